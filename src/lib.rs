// ==========================================
// Spin QC 报表查询层 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (只读)
// 系统定位: QC 仪表盘的报表查询层，展示层为外部协作方
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体、状态与过滤条件
pub mod domain;

// 数据仓储层 - 错误类型与单表查询
pub mod repository;

// 配置层 - 报表配置
pub mod config;

// 数据库基础设施（只读连接/PRAGMA 统一/schema 校验）
pub mod db;

// 日志系统
pub mod logging;

// SQL 性能追踪
pub mod perf;

// 报表层 - R1-R7 报表
pub mod report;

// API 层 - 展示边界
pub mod api;

// 应用层 - 状态装配与异步命令
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    FillLine, Location, PassFailCounts, Product, ReportFilter, Sample, SampleDetail, SampleState,
};

// 报表
pub use report::{ReportApi, ReportApiImpl};

// API
pub use api::{ApiError, ApiResult, DashboardApi, DashboardSnapshot};

// 应用
pub use app::AppState;
pub use config::ReportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Spin QC 报表查询层";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
