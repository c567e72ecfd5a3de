// ==========================================
// Spin QC 报表查询层 - R4 用例实现
// ==========================================
// 职责: "哪些试剂/标准失败最多" 用例的具体实现
// ==========================================

use crate::domain::ReportFilter;
use crate::report::repository::reagent_failure_repo::ReagentFailureRepository;
use crate::report::use_cases::r4_reagent_failures::{
    FailureTotal, ReagentFailure, ReagentFailureUseCase,
};
use crate::repository::RepositoryResult;
use std::sync::Arc;

/// R4 用例实现：试剂失败分析
pub struct ReagentFailureUseCaseImpl {
    /// 试剂失败仓储
    repo: Arc<ReagentFailureRepository>,
}

impl ReagentFailureUseCaseImpl {
    pub fn new(repo: Arc<ReagentFailureRepository>) -> Self {
        Self { repo }
    }
}

impl ReagentFailureUseCase for ReagentFailureUseCaseImpl {
    fn get_reagent_failure_breakdown(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<ReagentFailure>> {
        self.repo.get_reagent_failure_breakdown(filter)
    }

    fn get_reagent_failure_totals(&self, filter: &ReportFilter) -> RepositoryResult<Vec<FailureTotal>> {
        self.repo.get_reagent_failure_totals(filter)
    }

    fn get_standard_failure_totals(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FailureTotal>> {
        self.repo.get_standard_failure_totals(filter)
    }
}
