// ==========================================
// Spin QC 报表查询层 - ReportApi Trait 定义
// ==========================================
// 职责: 定义报表层的核心查询接口
// ==========================================

use super::dto::*;
use crate::domain::{ReportFilter, SampleDetail};
use crate::report::use_cases::{
    FailureTotal, FillLinePerformance, LocationPerformance, MonthlyFailRate, ReagentFailure,
    SampleView, SummaryMetrics,
};
use crate::repository::RepositoryResult;

/// ReportApi trait
///
/// 提供 QC 仪表盘的报表查询:
/// - R1: 总体合格率
/// - R2: 不合格率月度趋势
/// - R3: 灌装线表现
/// - R4: 试剂/标准失败
/// - R5: 缺陷分布
/// - R6: 厂区 × 灌装线表现
/// - R7: 样本明细与下钻
///
/// 所有方法只读、幂等；过滤条件非法时返回 `RepositoryError::InvalidFilter`，
/// 匹配不到数据时返回零值或空列表。
pub trait ReportApi: Send + Sync {
    /// R1: 汇总指标
    ///
    /// # 示例
    /// ```ignore
    /// let filter = ReportFilter::default().with_fill_lines(["Fill-1"]);
    /// let summary = api.get_summary_metrics(&filter)?;
    /// assert_eq!(summary.pass_count + summary.fail_count, summary.total_samples);
    /// ```
    fn get_summary_metrics(&self, filter: &ReportFilter) -> RepositoryResult<SummaryMetrics>;

    /// R2: 月度不合格率（月份升序）
    fn get_monthly_fail_trend(&self, filter: &ReportFilter) -> RepositoryResult<Vec<MonthlyFailRate>>;

    /// R3: 灌装线表现（灌装线升序）
    fn get_fill_line_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FillLinePerformance>>;

    /// R4: (试剂, 标准) 失败分组
    fn get_reagent_failure_breakdown(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<ReagentFailure>>;

    /// R4: 按试剂汇总
    fn get_reagent_failure_totals(&self, filter: &ReportFilter) -> RepositoryResult<Vec<FailureTotal>>;

    /// R4: 按标准汇总
    fn get_standard_failure_totals(&self, filter: &ReportFilter)
        -> RepositoryResult<Vec<FailureTotal>>;

    /// R4: 试剂失败面板（分组 + 两个汇总）
    fn get_reagent_failure_report(&self, filter: &ReportFilter) -> RepositoryResult<ReagentFailureReport>;

    /// R5: 缺陷分布面板
    fn get_defect_distribution(&self, filter: &ReportFilter) -> RepositoryResult<DefectDistributionReport>;

    /// R6: 厂区 × 灌装线表现
    fn get_location_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<LocationPerformance>>;

    /// R7: 最近样本明细（至多 limit 行，时间降序）
    fn list_recent_sample_details(
        &self,
        filter: &ReportFilter,
        limit: usize,
    ) -> RepositoryResult<Vec<SampleDetail>>;

    /// R7: 单样本下钻
    fn get_sample_view(&self, sample_set_id: i64) -> RepositoryResult<SampleView>;

    /// 过滤器可选项（产品/厂区/灌装线）
    fn list_dimension_options(&self) -> RepositoryResult<DimensionOptions>;
}
