// ==========================================
// Spin QC 报表查询层 - 仪表盘 API
// ==========================================
// 职责: 封装 ReportApi，供展示层调用：入参校验、错误归类、整屏快照、CSV 导出
// 架构: API 层 → Report 层 (ReportApi) → Use Case 层 → Repository 层
// ==========================================

use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::api::export::write_sample_details_csv;
use crate::api::validator::{resolve_detail_limit, validate_filter};
use crate::config::ReportConfig;
use crate::domain::{ReportFilter, SampleDetail};
use crate::report::api::{DefectDistributionReport, DimensionOptions, ReagentFailureReport, ReportApi};
use crate::report::use_cases::{
    FillLinePerformance, LocationPerformance, MonthlyFailRate, SampleView, SummaryMetrics,
};
use crate::repository::DimensionRepository;

// ==========================================
// DashboardSnapshot - 整屏快照
// ==========================================

/// 仪表盘整屏快照（同一过滤条件下的全部面板）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// 快照 ID (UUID v4)
    pub snapshot_id: String,

    /// 生成时间 (RFC 3339)
    pub as_of: String,

    /// 生效的过滤条件
    pub filter: ReportFilter,

    /// R1 汇总
    pub summary: SummaryMetrics,

    /// R2 月度趋势
    pub monthly_fail_trend: Vec<MonthlyFailRate>,

    /// R3 灌装线表现
    pub fill_line_performance: Vec<FillLinePerformance>,

    /// R4 试剂失败
    pub reagent_failures: ReagentFailureReport,

    /// R5 缺陷分布
    pub defect_distribution: DefectDistributionReport,

    /// R6 厂区表现
    pub location_performance: Vec<LocationPerformance>,

    /// R7 最近样本
    pub recent_samples: Vec<SampleDetail>,
}

// ==========================================
// DashboardApi - 仪表盘 API
// ==========================================

/// 仪表盘 API
///
/// 职责：
/// 1. 封装 ReportApi，提供 R1-R7 查询
/// 2. 统一入参校验，错误归类为 ConnectionError / QueryError
/// 3. 聚合接口（整屏快照、CSV 导出）
pub struct DashboardApi {
    /// ReportApi 实例
    report_api: Arc<dyn ReportApi>,
    /// 维度表仓储（未知名称提示）
    dimension_repo: Arc<DimensionRepository>,
    /// 报表配置（明细行数上下限）
    config: ReportConfig,
}

impl DashboardApi {
    pub fn new(
        report_api: Arc<dyn ReportApi>,
        dimension_repo: Arc<DimensionRepository>,
        config: ReportConfig,
    ) -> Self {
        Self {
            report_api,
            dimension_repo,
            config,
        }
    }

    /// 校验过滤条件，对维度表中不存在的名称给出提示
    fn check_filter(&self, filter: &ReportFilter) -> ApiResult<()> {
        validate_filter(filter)?;

        let unresolved = self.dimension_repo.find_unresolved_names(filter)?;
        if !unresolved.is_empty() {
            tracing::warn!(
                products = ?unresolved.products,
                locations = ?unresolved.locations,
                fill_lines = ?unresolved.fill_lines,
                "过滤条件包含不存在的名称，相应报表将为空"
            );
        }
        Ok(())
    }

    // ==========================================
    // 单面板查询
    // ==========================================

    /// R1: 汇总指标
    pub fn get_summary_metrics(&self, filter: &ReportFilter) -> ApiResult<SummaryMetrics> {
        self.check_filter(filter)?;
        Ok(self.report_api.get_summary_metrics(filter)?)
    }

    /// R2: 月度不合格率
    pub fn get_monthly_fail_trend(&self, filter: &ReportFilter) -> ApiResult<Vec<MonthlyFailRate>> {
        self.check_filter(filter)?;
        Ok(self.report_api.get_monthly_fail_trend(filter)?)
    }

    /// R3: 灌装线表现
    pub fn get_fill_line_performance(
        &self,
        filter: &ReportFilter,
    ) -> ApiResult<Vec<FillLinePerformance>> {
        self.check_filter(filter)?;
        Ok(self.report_api.get_fill_line_performance(filter)?)
    }

    /// R4: 试剂失败面板
    pub fn get_reagent_failure_report(&self, filter: &ReportFilter) -> ApiResult<ReagentFailureReport> {
        self.check_filter(filter)?;
        Ok(self.report_api.get_reagent_failure_report(filter)?)
    }

    /// R5: 缺陷分布
    pub fn get_defect_distribution(&self, filter: &ReportFilter) -> ApiResult<DefectDistributionReport> {
        self.check_filter(filter)?;
        Ok(self.report_api.get_defect_distribution(filter)?)
    }

    /// R6: 厂区 × 灌装线表现
    pub fn get_location_performance(
        &self,
        filter: &ReportFilter,
    ) -> ApiResult<Vec<LocationPerformance>> {
        self.check_filter(filter)?;
        Ok(self.report_api.get_location_performance(filter)?)
    }

    /// R7: 最近样本明细
    ///
    /// # 参数
    /// - limit: 行数（None 时取配置默认值，超出 1..=max_detail_limit 报 QueryError）
    pub fn list_recent_sample_details(
        &self,
        filter: &ReportFilter,
        limit: Option<usize>,
    ) -> ApiResult<Vec<SampleDetail>> {
        let limit = resolve_detail_limit(limit, &self.config)?;
        self.check_filter(filter)?;
        Ok(self.report_api.list_recent_sample_details(filter, limit)?)
    }

    /// R7: 单样本下钻
    pub fn get_sample_view(&self, sample_set_id: i64) -> ApiResult<SampleView> {
        Ok(self.report_api.get_sample_view(sample_set_id)?)
    }

    /// 过滤器可选项
    pub fn list_filter_options(&self) -> ApiResult<DimensionOptions> {
        Ok(self.report_api.list_dimension_options()?)
    }

    // ==========================================
    // 聚合接口
    // ==========================================

    /// 整屏快照
    pub fn load_dashboard(
        &self,
        filter: &ReportFilter,
        limit: Option<usize>,
    ) -> ApiResult<DashboardSnapshot> {
        let limit = resolve_detail_limit(limit, &self.config)?;
        self.check_filter(filter)?;

        let snapshot = DashboardSnapshot {
            snapshot_id: Uuid::new_v4().to_string(),
            as_of: chrono::Utc::now().to_rfc3339(),
            filter: filter.clone(),
            summary: self.report_api.get_summary_metrics(filter)?,
            monthly_fail_trend: self.report_api.get_monthly_fail_trend(filter)?,
            fill_line_performance: self.report_api.get_fill_line_performance(filter)?,
            reagent_failures: self.report_api.get_reagent_failure_report(filter)?,
            defect_distribution: self.report_api.get_defect_distribution(filter)?,
            location_performance: self.report_api.get_location_performance(filter)?,
            recent_samples: self.report_api.list_recent_sample_details(filter, limit)?,
        };

        tracing::info!(
            snapshot_id = %snapshot.snapshot_id,
            total_samples = snapshot.summary.total_samples,
            recent_samples = snapshot.recent_samples.len(),
            "仪表盘快照已生成"
        );
        Ok(snapshot)
    }

    /// 导出最近样本明细为 CSV
    ///
    /// # 返回
    /// - Ok(n): 导出的数据行数
    pub fn export_sample_details_csv<W: Write>(
        &self,
        filter: &ReportFilter,
        limit: Option<usize>,
        writer: W,
    ) -> ApiResult<usize> {
        let rows = self.list_recent_sample_details(filter, limit)?;
        let written = write_sample_details_csv(&rows, writer)?;
        tracing::info!(rows = written, "样本明细已导出");
        Ok(written)
    }
}
