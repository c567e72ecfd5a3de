// ==========================================
// Spin QC 报表查询层 - R3 用例实现
// ==========================================

use crate::domain::ReportFilter;
use crate::report::repository::fill_line_repo::FillLineRepository;
use crate::report::use_cases::r3_fill_line_performance::{
    FillLinePerformance, FillLinePerformanceUseCase,
};
use crate::repository::RepositoryResult;
use std::sync::Arc;

/// R3 用例实现：灌装线表现
pub struct FillLinePerformanceUseCaseImpl {
    repo: Arc<FillLineRepository>,
}

impl FillLinePerformanceUseCaseImpl {
    pub fn new(repo: Arc<FillLineRepository>) -> Self {
        Self { repo }
    }
}

impl FillLinePerformanceUseCase for FillLinePerformanceUseCaseImpl {
    fn get_fill_line_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FillLinePerformance>> {
        self.repo.get_fill_line_performance(filter)
    }
}
