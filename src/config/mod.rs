// ==========================================
// Spin QC 报表查询层 - 配置层
// ==========================================
// 职责: 报表配置加载，支持文件 + 环境变量覆写
// ==========================================

pub mod report_config;

// 重导出核心配置
pub use report_config::{
    config_keys, ConfigError, ReportConfig, DEFAULT_DETAIL_LIMIT, MAX_DETAIL_LIMIT,
};
