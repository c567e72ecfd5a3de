// ==========================================
// Spin QC 报表查询层 - 报表用例模块
// ==========================================
// 职责: 定义 7 个 QC 报表问题的标准输出
//
// R1 总体合格率            R2 不合格率月度趋势
// R3 灌装线表现            R4 试剂/标准失败
// R5 缺陷分布              R6 厂区 × 灌装线表现
// R7 样本明细与下钻
// ==========================================

pub mod r1_summary_metrics;
pub mod r2_monthly_fail_trend;
pub mod r3_fill_line_performance;
pub mod r4_reagent_failures;
pub mod r5_defect_distribution;
pub mod r6_location_performance;
pub mod r7_sample_details;

// 用例实现
pub mod impls;

// 重导出用例接口
pub use r1_summary_metrics::{SummaryMetrics, SummaryMetricsUseCase};
pub use r2_monthly_fail_trend::{MonthlyFailRate, MonthlyFailTrendUseCase};
pub use r3_fill_line_performance::{FillLinePerformance, FillLinePerformanceUseCase};
pub use r4_reagent_failures::{FailureTotal, ReagentFailure, ReagentFailureUseCase};
pub use r5_defect_distribution::{DefectCount, DefectDistributionUseCase};
pub use r6_location_performance::{LocationPerformance, LocationPerformanceUseCase};
pub use r7_sample_details::{
    DefectView, ReagentFailView, SampleDetailsUseCase, SampleView,
};
