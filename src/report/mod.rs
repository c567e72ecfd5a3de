// ==========================================
// Spin QC 报表查询层 - 报表层模块
// ==========================================
// 架构原则:
// - 报表层对外只输出聚合结果与明细视图，不暴露底层表结构
// - 口径统一: 样本状态以最新审批为准；合格率/不合格率只基于已判定样本
// - 全程只读: 连接以 query_only 打开，仓储中不出现写语句
// ==========================================

// 报表用例
pub mod use_cases;

// 报表仓储
pub mod repository;

// 报表 API
pub mod api;

// 公共工具模块
pub mod common;

// 重导出用例类型
pub use use_cases::{
    DefectCount, DefectView, FailureTotal, FillLinePerformance, LocationPerformance,
    MonthlyFailRate, ReagentFailView, ReagentFailure, SampleView, SummaryMetrics,
};

// 重导出 API
pub use api::*;
