// ==========================================
// Spin QC 报表查询层 - 领域类型定义
// ==========================================
// 职责: 样本状态、缺陷代码表
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// approvals.state 中"合格"的取值
pub const STATE_CODE_PASSED: i64 = 1;

/// approvals.state 中"不合格"的取值
pub const STATE_CODE_FAILED: i64 = 3;

// ==========================================
// 样本状态 (Sample State)
// ==========================================
// 由最新一次审批决定；其余取值（含无审批）均视为未判定
//
// JSON 中序列化为 "PASSED" / "FAILED" / "UNKNOWN"；
// Display（CSV 导出、日志）输出 "Passed" / "Failed" / "Unknown"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleState {
    Passed,
    Failed,
    Unknown,
}

impl SampleState {
    /// 从 approvals.state 代码转换
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(STATE_CODE_PASSED) => SampleState::Passed,
            Some(STATE_CODE_FAILED) => SampleState::Failed,
            _ => SampleState::Unknown,
        }
    }
}

impl fmt::Display for SampleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleState::Passed => write!(f, "Passed"),
            SampleState::Failed => write!(f, "Failed"),
            SampleState::Unknown => write!(f, "Unknown"),
        }
    }
}

// ==========================================
// 缺陷代码表 (Sample Defect Codes)
// ==========================================
// sample_defects.type 为本表下标
pub const SAMPLE_DEFECT_CODES: [&str; 23] = [
    "Other",
    "BB Misplacement",
    "BB Missing",
    "Bead Incorrect",
    "Bead Misplacement",
    "Bead Missing",
    "Disk Body Failure",
    "Disk Bubbles",
    "Disk Foreign Matter",
    "Disk Leaking",
    "Disk Lid Failure",
    "Oven Malfunction",
    "Oven Temperature",
    "Reagent Adjustment Failure",
    "Reagent Contamination Sprays Drips",
    "Reagent CrossedLines",
    "Reagent Discoloration",
    "Reagent Expired",
    "Reagent Fill Machine Weight",
    "Reagent Incorrect",
    "Reagent Missing",
    "Room GPP",
    "Room Power Outage",
];

/// 无法识别的缺陷代码（越界或 NULL）的标签
pub const UNKNOWN_DEFECT_LABEL: &str = "Unknown";

/// 缺陷代码 → 描述
pub fn defect_label(code: Option<i64>) -> &'static str {
    code.and_then(|c| usize::try_from(c).ok())
        .and_then(|idx| SAMPLE_DEFECT_CODES.get(idx).copied())
        .unwrap_or(UNKNOWN_DEFECT_LABEL)
}
