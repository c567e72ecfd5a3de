// ==========================================
// Spin QC 报表查询层 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 空结果不是错误，由调用方渲染为零值/空状态
// ==========================================

use crate::domain::FilterViolation;
use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 连接错误 =====
    #[error("数据库连接失败: {0}")]
    ConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    // ===== 查询错误 =====
    #[error("数据库结构不兼容: {0}")]
    SchemaMismatch(String),

    #[error("过滤条件非法 (filter={filter}): {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 锁中毒（某个查询在持锁期间 panic）
    pub fn lock_poisoned(e: impl std::fmt::Display) -> Self {
        RepositoryError::LockError(e.to_string())
    }
}

impl From<FilterViolation> for RepositoryError {
    fn from(v: FilterViolation) -> Self {
        RepositoryError::InvalidFilter {
            filter: v.filter,
            reason: v.reason,
        }
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref e, ref msg) => {
                let text = msg.clone().unwrap_or_else(|| e.to_string());
                match e.code {
                    ErrorCode::CannotOpen
                    | ErrorCode::NotADatabase
                    | ErrorCode::PermissionDenied
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::SystemIoFailure => RepositoryError::ConnectionError(text),
                    _ if is_schema_message(&text) => RepositoryError::SchemaMismatch(text),
                    _ => RepositoryError::DatabaseQueryError(text),
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
                RepositoryError::SchemaMismatch(err.to_string())
            }
            _ => {
                let text = err.to_string();
                if is_schema_message(&text) {
                    RepositoryError::SchemaMismatch(text)
                } else {
                    RepositoryError::DatabaseQueryError(text)
                }
            }
        }
    }
}

fn is_schema_message(msg: &str) -> bool {
    msg.contains("no such table") || msg.contains("no such column")
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_missing_table_maps_to_schema_mismatch() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn
            .prepare("SELECT * FROM sample_set")
            .map(|_| ())
            .unwrap_err();
        let repo_err: RepositoryError = err.into();
        assert!(matches!(repo_err, RepositoryError::SchemaMismatch(_)), "{:?}", repo_err);
    }

    #[test]
    fn test_cannot_open_maps_to_connection_error() {
        let err = Connection::open_with_flags(
            "/nonexistent/dir/spin_qc.db",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .map(|_| ())
        .unwrap_err();
        let repo_err: RepositoryError = err.into();
        assert!(matches!(repo_err, RepositoryError::ConnectionError(_)), "{:?}", repo_err);
    }

    #[test]
    fn test_filter_violation_conversion() {
        let repo_err: RepositoryError = FilterViolation::new("products", "至少选择一项").into();
        match repo_err {
            RepositoryError::InvalidFilter { filter, reason } => {
                assert_eq!(filter, "products");
                assert_eq!(reason, "至少选择一项");
            }
            other => panic!("Expected InvalidFilter, got {:?}", other),
        }
    }
}
