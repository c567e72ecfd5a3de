// ==========================================
// Spin QC 报表查询层 - R1 用例实现
// ==========================================
// 职责: "总体合格率是多少" 用例的具体实现
// ==========================================

use crate::domain::ReportFilter;
use crate::report::repository::summary_repo::SummaryRepository;
use crate::report::use_cases::r1_summary_metrics::{SummaryMetrics, SummaryMetricsUseCase};
use crate::repository::RepositoryResult;
use std::sync::Arc;

/// R1 用例实现：总体合格率
pub struct SummaryMetricsUseCaseImpl {
    /// 汇总仓储
    repo: Arc<SummaryRepository>,
}

impl SummaryMetricsUseCaseImpl {
    pub fn new(repo: Arc<SummaryRepository>) -> Self {
        Self { repo }
    }
}

impl SummaryMetricsUseCase for SummaryMetricsUseCaseImpl {
    fn get_summary_metrics(&self, filter: &ReportFilter) -> RepositoryResult<SummaryMetrics> {
        self.repo.get_summary_metrics(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::repository::test_fixture::seeded_conn;

    #[test]
    fn test_summary_totals_are_consistent() {
        let use_case = SummaryMetricsUseCaseImpl::new(Arc::new(SummaryRepository::new(seeded_conn())));
        let summary = use_case.get_summary_metrics(&ReportFilter::default()).unwrap();
        assert_eq!(summary.pass_count + summary.fail_count, summary.total_samples);
        assert!((summary.pass_rate + summary.fail_rate - 1.0).abs() < 1e-9);
    }
}
