// ==========================================
// Spin QC 报表查询层 - API 层
// ==========================================
// 职责: 展示层边界，供 app::commands 与二进制入口调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod export;
pub mod validator;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, DashboardSnapshot};
pub use error::{ApiError, ApiResult};
pub use export::{write_sample_details_csv, SAMPLE_DETAIL_HEADERS};
