// ==========================================
// Spin QC 报表查询层 - 异步命令（展示层边界）
// ==========================================
// 职责: 展示层调用入口；入参/出参均为 JSON 字符串，
//       阻塞查询通过 spawn_blocking 移出异步运行时
// ==========================================

mod common;
mod report;

pub use common::ErrorResponse;
pub use report::*;
