// ==========================================
// Spin QC 报表查询层 - 报表用例实现模块
// ==========================================

pub mod r1_summary_metrics_impl;
pub mod r2_monthly_fail_trend_impl;
pub mod r3_fill_line_performance_impl;
pub mod r4_reagent_failures_impl;
pub mod r5_defect_distribution_impl;
pub mod r6_location_performance_impl;
pub mod r7_sample_details_impl;

// 重导出实现
pub use r1_summary_metrics_impl::SummaryMetricsUseCaseImpl;
pub use r2_monthly_fail_trend_impl::MonthlyFailTrendUseCaseImpl;
pub use r3_fill_line_performance_impl::FillLinePerformanceUseCaseImpl;
pub use r4_reagent_failures_impl::ReagentFailureUseCaseImpl;
pub use r5_defect_distribution_impl::DefectDistributionUseCaseImpl;
pub use r6_location_performance_impl::LocationPerformanceUseCaseImpl;
pub use r7_sample_details_impl::SampleDetailsUseCaseImpl;
