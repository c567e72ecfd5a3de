use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::app::state::AppState;
use crate::domain::ReportFilter;

// ==========================================
// 公共工具：错误映射、过滤条件解析、阻塞执行
// ==========================================

/// 错误响应（返回给展示层）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 将ApiError转换为JSON字符串
pub(super) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: match &err {
            ApiError::ConnectionError(_) => "CONNECTION_ERROR",
            ApiError::QueryError { .. } => "QUERY_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
        .to_string(),
        message: err.to_string(),
        details: err
            .filter()
            .map(|filter| serde_json::json!({ "filter": filter })),
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 解析过滤条件 JSON（None 或空白表示不过滤）
pub(super) fn parse_filter(filter_json: Option<&str>) -> ApiResult<ReportFilter> {
    match filter_json.map(str::trim) {
        None | Some("") => Ok(ReportFilter::default()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidInput(format!("过滤条件格式错误: {}", e))),
    }
}

/// 在阻塞线程池中执行查询并序列化结果
pub(super) async fn run_blocking<T, F>(state: Arc<AppState>, query: F) -> Result<String, String>
where
    T: Serialize + Send + 'static,
    F: FnOnce(&AppState) -> ApiResult<T> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || query(state.as_ref()))
        .await
        .map_err(|e| map_api_error(ApiError::InternalError(format!("查询任务异常退出: {}", e))))?
        .map_err(map_api_error)?;

    serde_json::to_string(&result).map_err(|e| format!("序列化失败: {}", e))
}
