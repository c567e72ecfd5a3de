// ==========================================
// Spin QC 报表查询层 - R2 用例实现
// ==========================================

use crate::domain::ReportFilter;
use crate::report::repository::trend_repo::TrendRepository;
use crate::report::use_cases::r2_monthly_fail_trend::{MonthlyFailRate, MonthlyFailTrendUseCase};
use crate::repository::RepositoryResult;
use std::sync::Arc;

/// R2 用例实现：月度不合格率趋势
pub struct MonthlyFailTrendUseCaseImpl {
    repo: Arc<TrendRepository>,
}

impl MonthlyFailTrendUseCaseImpl {
    pub fn new(repo: Arc<TrendRepository>) -> Self {
        Self { repo }
    }
}

impl MonthlyFailTrendUseCase for MonthlyFailTrendUseCaseImpl {
    fn get_monthly_fail_trend(&self, filter: &ReportFilter) -> RepositoryResult<Vec<MonthlyFailRate>> {
        self.repo.get_monthly_fail_trend(filter)
    }
}
