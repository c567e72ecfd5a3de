// ==========================================
// Spin QC 报表查询层 - API层错误类型
// ==========================================
// 职责: 定义展示边界的错误类型，把仓储层错误转换为可直接展示的消息
// 分类: ConnectionError 展示为横幅且不自动重试；QueryError 指明出错的过滤条件
// ==========================================

use crate::domain::FilterViolation;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 连接错误
    // ==========================================
    #[error("数据库不可用: {0}")]
    ConnectionError(String),

    // ==========================================
    // 查询错误
    // ==========================================
    /// 过滤条件非法或数据库结构不兼容
    #[error("查询失败 (filter={}): {message}", .filter.as_deref().unwrap_or("-"))]
    QueryError {
        filter: Option<String>,
        message: String,
    },

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 针对某个过滤条件的查询错误
    pub fn invalid_filter(filter: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::QueryError {
            filter: Some(filter.into()),
            message: message.into(),
        }
    }

    /// 出错的过滤条件名（若有）
    pub fn filter(&self) -> Option<&str> {
        match self {
            ApiError::QueryError { filter, .. } => filter.as_deref(),
            _ => None,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // 连接错误
            RepositoryError::ConnectionError(msg) => ApiError::ConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::ConnectionError(format!("数据库锁获取失败: {}", msg))
            }

            // 查询错误
            RepositoryError::InvalidFilter { filter, reason } => ApiError::QueryError {
                filter: Some(filter),
                message: reason,
            },
            RepositoryError::SchemaMismatch(msg) => ApiError::QueryError {
                filter: None,
                message: format!("数据库结构不兼容: {}", msg),
            },
            RepositoryError::DatabaseQueryError(msg) => ApiError::QueryError {
                filter: None,
                message: msg,
            },
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }

            // 通用错误
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<FilterViolation> for ApiError {
    fn from(v: FilterViolation) -> Self {
        ApiError::QueryError {
            filter: Some(v.filter),
            message: v.reason,
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
