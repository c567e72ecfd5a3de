// ==========================================
// Spin QC 报表查询层 - 报表公共工具模块
// ==========================================
// 职责: 报表仓储共用的 SQL 构建与执行工具
// ==========================================

/// 数据库操作工具
pub mod db_utils;

/// 样本范围 CTE
pub mod scope;

/// SQL 构建工具
pub mod sql_builder;

// 重新导出常用函数
pub use db_utils::{build_in_clause, count_value, query_rows, query_single_row, text_values};
pub use scope::{SampleScope, DECIDED_SAMPLES, FAIL_COUNT_EXPR, PASS_COUNT_EXPR};
pub use sql_builder::SqlQueryBuilder;
