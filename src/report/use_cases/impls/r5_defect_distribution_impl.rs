// ==========================================
// Spin QC 报表查询层 - R5 用例实现
// ==========================================

use crate::domain::ReportFilter;
use crate::report::repository::defect_repo::DefectRepository;
use crate::report::use_cases::r5_defect_distribution::{DefectCount, DefectDistributionUseCase};
use crate::repository::RepositoryResult;
use std::sync::Arc;

/// R5 用例实现：缺陷分布
pub struct DefectDistributionUseCaseImpl {
    repo: Arc<DefectRepository>,
}

impl DefectDistributionUseCaseImpl {
    pub fn new(repo: Arc<DefectRepository>) -> Self {
        Self { repo }
    }
}

impl DefectDistributionUseCase for DefectDistributionUseCaseImpl {
    fn get_defect_distribution(&self, filter: &ReportFilter) -> RepositoryResult<Vec<DefectCount>> {
        self.repo.get_defect_distribution(filter)
    }

    fn count_defect_rows(&self, filter: &ReportFilter) -> RepositoryResult<u64> {
        self.repo.count_defect_rows(filter)
    }
}
