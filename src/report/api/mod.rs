// ==========================================
// Spin QC 报表查询层 - ReportApi 模块
// ==========================================

// DTO 定义
pub mod dto;

// ReportApi trait 定义
pub mod report_api;

// ReportApi 实现
pub mod report_api_impl;

// 重导出 DTO
pub use dto::*;

// 重导出 API
pub use report_api::ReportApi;
pub use report_api_impl::{build_report_api, ReportApiImpl};
