// ==========================================
// Spin QC 报表查询层 - 应用层
// ==========================================
// 职责: 状态装配 + 展示层异步命令
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
