use std::sync::Arc;

use crate::app::state::AppState;

use super::common::{map_api_error, parse_filter, run_blocking};

// ==========================================
// 报表相关命令
// ==========================================

/// R1: 汇总指标
pub async fn get_summary_metrics(
    state: Arc<AppState>,
    filter_json: Option<String>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.get_summary_metrics(&filter)).await
}

/// R2: 月度不合格率
pub async fn get_monthly_fail_trend(
    state: Arc<AppState>,
    filter_json: Option<String>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.get_monthly_fail_trend(&filter)).await
}

/// R3: 灌装线表现
pub async fn get_fill_line_performance(
    state: Arc<AppState>,
    filter_json: Option<String>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.get_fill_line_performance(&filter)).await
}

/// R4: 试剂失败面板
pub async fn get_reagent_failure_report(
    state: Arc<AppState>,
    filter_json: Option<String>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.get_reagent_failure_report(&filter)).await
}

/// R5: 缺陷分布
pub async fn get_defect_distribution(
    state: Arc<AppState>,
    filter_json: Option<String>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.get_defect_distribution(&filter)).await
}

/// R6: 厂区 × 灌装线表现
pub async fn get_location_performance(
    state: Arc<AppState>,
    filter_json: Option<String>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.get_location_performance(&filter)).await
}

/// R7: 最近样本明细
pub async fn list_recent_sample_details(
    state: Arc<AppState>,
    filter_json: Option<String>,
    limit: Option<usize>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| {
        s.dashboard_api.list_recent_sample_details(&filter, limit)
    })
    .await
}

/// R7: 单样本下钻
pub async fn get_sample_view(state: Arc<AppState>, sample_set_id: i64) -> Result<String, String> {
    run_blocking(state, move |s| s.dashboard_api.get_sample_view(sample_set_id)).await
}

/// 过滤器可选项
pub async fn list_filter_options(state: Arc<AppState>) -> Result<String, String> {
    run_blocking(state, |s| s.dashboard_api.list_filter_options()).await
}

/// 整屏快照
pub async fn load_dashboard(
    state: Arc<AppState>,
    filter_json: Option<String>,
    limit: Option<usize>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    run_blocking(state, move |s| s.dashboard_api.load_dashboard(&filter, limit)).await
}

/// 导出最近样本明细（返回 CSV 文本）
pub async fn export_sample_details_csv(
    state: Arc<AppState>,
    filter_json: Option<String>,
    limit: Option<usize>,
) -> Result<String, String> {
    let filter = parse_filter(filter_json.as_deref()).map_err(map_api_error)?;
    let bytes = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        state
            .dashboard_api
            .export_sample_details_csv(&filter, limit, &mut buf)?;
        Ok::<_, crate::api::ApiError>(buf)
    })
    .await
    .map_err(|e| format!("导出任务异常退出: {}", e))?
    .map_err(map_api_error)?;

    String::from_utf8(bytes).map_err(|e| format!("CSV 编码错误: {}", e))
}
