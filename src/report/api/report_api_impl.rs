// ==========================================
// Spin QC 报表查询层 - ReportApi 实现
// ==========================================
// 职责: 过滤条件校验 + 调用用例层 + 组合面板
// ==========================================

use super::dto::*;
use super::report_api::ReportApi;
use crate::domain::{ReportFilter, SampleDetail};
use crate::perf::ReportPerfGuard;
use crate::report::use_cases::{
    impls::*, DefectDistributionUseCase, FailureTotal, FillLinePerformance,
    FillLinePerformanceUseCase, LocationPerformance, LocationPerformanceUseCase, MonthlyFailRate,
    MonthlyFailTrendUseCase, ReagentFailure, ReagentFailureUseCase, SampleDetailsUseCase,
    SampleView, SummaryMetrics, SummaryMetricsUseCase,
};
use crate::repository::{DimensionRepository, RepositoryError, RepositoryResult};
use std::sync::Arc;

/// ReportApi 实现
pub struct ReportApiImpl {
    /// R1 用例实现
    r1_use_case: Arc<SummaryMetricsUseCaseImpl>,
    /// R2 用例实现
    r2_use_case: Arc<MonthlyFailTrendUseCaseImpl>,
    /// R3 用例实现
    r3_use_case: Arc<FillLinePerformanceUseCaseImpl>,
    /// R4 用例实现
    r4_use_case: Arc<ReagentFailureUseCaseImpl>,
    /// R5 用例实现
    r5_use_case: Arc<DefectDistributionUseCaseImpl>,
    /// R6 用例实现
    r6_use_case: Arc<LocationPerformanceUseCaseImpl>,
    /// R7 用例实现
    r7_use_case: Arc<SampleDetailsUseCaseImpl>,
    /// 维度表仓储（过滤选项）
    dimension_repo: Arc<DimensionRepository>,
}

impl ReportApiImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        r1_use_case: Arc<SummaryMetricsUseCaseImpl>,
        r2_use_case: Arc<MonthlyFailTrendUseCaseImpl>,
        r3_use_case: Arc<FillLinePerformanceUseCaseImpl>,
        r4_use_case: Arc<ReagentFailureUseCaseImpl>,
        r5_use_case: Arc<DefectDistributionUseCaseImpl>,
        r6_use_case: Arc<LocationPerformanceUseCaseImpl>,
        r7_use_case: Arc<SampleDetailsUseCaseImpl>,
        dimension_repo: Arc<DimensionRepository>,
    ) -> Self {
        Self {
            r1_use_case,
            r2_use_case,
            r3_use_case,
            r4_use_case,
            r5_use_case,
            r6_use_case,
            r7_use_case,
            dimension_repo,
        }
    }

    /// 查询前的统一校验
    fn check_filter(report: &'static str, filter: &ReportFilter) -> RepositoryResult<()> {
        filter.validate()?;
        tracing::debug!(report = report, filter = ?filter, "执行报表查询");
        Ok(())
    }
}

impl ReportApi for ReportApiImpl {
    fn get_summary_metrics(&self, filter: &ReportFilter) -> RepositoryResult<SummaryMetrics> {
        let _perf = ReportPerfGuard::new("summary_metrics");
        Self::check_filter("summary_metrics", filter)?;
        self.r1_use_case.get_summary_metrics(filter)
    }

    fn get_monthly_fail_trend(&self, filter: &ReportFilter) -> RepositoryResult<Vec<MonthlyFailRate>> {
        let _perf = ReportPerfGuard::new("monthly_fail_trend");
        Self::check_filter("monthly_fail_trend", filter)?;
        self.r2_use_case.get_monthly_fail_trend(filter)
    }

    fn get_fill_line_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FillLinePerformance>> {
        let _perf = ReportPerfGuard::new("fill_line_performance");
        Self::check_filter("fill_line_performance", filter)?;
        self.r3_use_case.get_fill_line_performance(filter)
    }

    fn get_reagent_failure_breakdown(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<ReagentFailure>> {
        let _perf = ReportPerfGuard::new("reagent_failure_breakdown");
        Self::check_filter("reagent_failure_breakdown", filter)?;
        self.r4_use_case.get_reagent_failure_breakdown(filter)
    }

    fn get_reagent_failure_totals(&self, filter: &ReportFilter) -> RepositoryResult<Vec<FailureTotal>> {
        let _perf = ReportPerfGuard::new("reagent_failure_totals");
        Self::check_filter("reagent_failure_totals", filter)?;
        self.r4_use_case.get_reagent_failure_totals(filter)
    }

    fn get_standard_failure_totals(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FailureTotal>> {
        let _perf = ReportPerfGuard::new("standard_failure_totals");
        Self::check_filter("standard_failure_totals", filter)?;
        self.r4_use_case.get_standard_failure_totals(filter)
    }

    fn get_reagent_failure_report(&self, filter: &ReportFilter) -> RepositoryResult<ReagentFailureReport> {
        let _perf = ReportPerfGuard::new("reagent_failure_report");
        Self::check_filter("reagent_failure_report", filter)?;
        Ok(ReagentFailureReport {
            breakdown: self.r4_use_case.get_reagent_failure_breakdown(filter)?,
            reagent_totals: self.r4_use_case.get_reagent_failure_totals(filter)?,
            standard_totals: self.r4_use_case.get_standard_failure_totals(filter)?,
        })
    }

    fn get_defect_distribution(&self, filter: &ReportFilter) -> RepositoryResult<DefectDistributionReport> {
        let _perf = ReportPerfGuard::new("defect_distribution");
        Self::check_filter("defect_distribution", filter)?;

        let items = self.r5_use_case.get_defect_distribution(filter)?;
        let defect_row_count = self.r5_use_case.count_defect_rows(filter)?;

        let labelled: u64 = items.iter().map(|d| d.count).sum();
        if labelled != defect_row_count {
            // 两次查询之间数据被外部写入时可能出现
            tracing::warn!(
                labelled = labelled,
                defect_row_count = defect_row_count,
                "缺陷分布合计与缺陷行数不一致"
            );
        }

        Ok(DefectDistributionReport {
            items,
            defect_row_count,
        })
    }

    fn get_location_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<LocationPerformance>> {
        let _perf = ReportPerfGuard::new("location_performance");
        Self::check_filter("location_performance", filter)?;
        self.r6_use_case.get_location_performance(filter)
    }

    fn list_recent_sample_details(
        &self,
        filter: &ReportFilter,
        limit: usize,
    ) -> RepositoryResult<Vec<SampleDetail>> {
        let _perf = ReportPerfGuard::new("recent_sample_details");
        Self::check_filter("recent_sample_details", filter)?;
        if limit == 0 {
            return Err(RepositoryError::InvalidFilter {
                filter: "limit".to_string(),
                reason: "limit 必须大于 0".to_string(),
            });
        }
        self.r7_use_case.list_recent_sample_details(filter, limit)
    }

    fn get_sample_view(&self, sample_set_id: i64) -> RepositoryResult<SampleView> {
        let _perf = ReportPerfGuard::new("sample_view");
        tracing::debug!(sample_set_id = sample_set_id, "查询样本下钻视图");
        self.r7_use_case.get_sample_view(sample_set_id)
    }

    fn list_dimension_options(&self) -> RepositoryResult<DimensionOptions> {
        Ok(DimensionOptions {
            products: self.dimension_repo.list_products()?,
            locations: self.dimension_repo.list_locations()?,
            fill_lines: self.dimension_repo.list_fill_lines()?,
        })
    }
}

/// 基于同一连接装配完整的 ReportApiImpl
pub fn build_report_api(
    conn: Arc<std::sync::Mutex<rusqlite::Connection>>,
) -> ReportApiImpl {
    use crate::report::repository::*;
    use crate::repository::SampleRepository;

    ReportApiImpl::new(
        Arc::new(SummaryMetricsUseCaseImpl::new(Arc::new(SummaryRepository::new(conn.clone())))),
        Arc::new(MonthlyFailTrendUseCaseImpl::new(Arc::new(TrendRepository::new(conn.clone())))),
        Arc::new(FillLinePerformanceUseCaseImpl::new(Arc::new(FillLineRepository::new(
            conn.clone(),
        )))),
        Arc::new(ReagentFailureUseCaseImpl::new(Arc::new(ReagentFailureRepository::new(
            conn.clone(),
        )))),
        Arc::new(DefectDistributionUseCaseImpl::new(Arc::new(DefectRepository::new(
            conn.clone(),
        )))),
        Arc::new(LocationPerformanceUseCaseImpl::new(Arc::new(LocationRepository::new(
            conn.clone(),
        )))),
        Arc::new(SampleDetailsUseCaseImpl::new(
            Arc::new(SampleDetailRepository::new(conn.clone())),
            Arc::new(SampleRepository::new(conn.clone())),
        )),
        Arc::new(DimensionRepository::new(conn)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::repository::test_fixture::seeded_conn;
    use chrono::NaiveDate;

    #[test]
    fn test_invalid_filter_is_rejected_before_query() {
        let api = build_report_api(seeded_conn());
        let filter = ReportFilter::between(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        match api.get_summary_metrics(&filter) {
            Err(RepositoryError::InvalidFilter { filter, .. }) => assert_eq!(filter, "date_range"),
            other => panic!("Expected InvalidFilter, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let api = build_report_api(seeded_conn());
        assert!(matches!(
            api.list_recent_sample_details(&ReportFilter::default(), 0),
            Err(RepositoryError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_reagent_report_panels() {
        let api = build_report_api(seeded_conn());
        let report = api.get_reagent_failure_report(&ReportFilter::default()).unwrap();
        assert_eq!(report.breakdown.len(), 3);
        assert_eq!(report.reagent_totals[0].name, "ALB");
        assert_eq!(report.standard_totals.len(), 2);
    }

    #[test]
    fn test_defect_report_reconciles() {
        let api = build_report_api(seeded_conn());
        let report = api.get_defect_distribution(&ReportFilter::default()).unwrap();
        assert_eq!(
            report.items.iter().map(|d| d.count).sum::<u64>(),
            report.defect_row_count
        );
    }

    #[test]
    fn test_dimension_options() {
        let api = build_report_api(seeded_conn());
        let options = api.list_dimension_options().unwrap();
        assert_eq!(options.products.len(), 2);
        assert_eq!(options.locations[0].location_name, "Newark");
        assert_eq!(options.fill_lines[1].display, "Fill-2");
    }
}
