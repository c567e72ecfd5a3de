// ==========================================
// Spin QC 报表查询层 - 请求校验器
// ==========================================
// 职责: 展示边界的入参校验（过滤条件、明细行数）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportConfig;
use crate::domain::ReportFilter;

/// 校验过滤条件
pub fn validate_filter(filter: &ReportFilter) -> ApiResult<()> {
    filter.validate().map_err(ApiError::from)
}

/// 解析并校验明细行数
///
/// # 返回
/// - None → 配置的默认行数
/// - 1..=max_detail_limit → 原值
/// - 其他 → QueryError(filter=limit)
pub fn resolve_detail_limit(limit: Option<usize>, config: &ReportConfig) -> ApiResult<usize> {
    match limit {
        None => Ok(config.default_detail_limit),
        Some(n) if (1..=config.max_detail_limit).contains(&n) => Ok(n),
        Some(n) => Err(ApiError::invalid_filter(
            "limit",
            format!("行数 {} 超出范围 1..={}", n, config.max_detail_limit),
        )),
    }
}
