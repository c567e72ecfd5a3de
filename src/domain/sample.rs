// ==========================================
// Spin QC 报表查询层 - QC 样本领域模型
// ==========================================
// 说明: 以下实体均为外部库中的行，本系统只读消费
// ==========================================

use crate::domain::types::SampleState;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Sample - QC 样本 (sample_set)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_set_id: i64,       // 样本ID
    pub collected: NaiveDateTime, // 采样时间
    pub product_id: i64,          // 产品
    pub location_id: i64,         // 厂区
    pub fill_id: i64,             // 灌装线
    pub is_test: bool,            // 测试样本（默认排除）
}

// ==========================================
// Approval - 审批记录 (approvals)
// ==========================================
// 同一样本可能有多次审批，以时间最新的一次为准
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub approval_id: i64,
    pub sample_set_id: i64,
    pub state: Option<i64>,       // 1=合格, 3=不合格
    pub timestamp: NaiveDateTime,
}

impl Approval {
    pub fn sample_state(&self) -> SampleState {
        SampleState::from_code(self.state)
    }
}

// ==========================================
// ReagentFail - 试剂失败 (reagent_fails)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentFail {
    pub reagent_fail_id: i64,
    pub approval_id: i64,
    pub spec_id: Option<i64>,     // → specs.id
    pub reagent: String,
}

// ==========================================
// SampleDefect - 样本缺陷 (sample_defects)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDefect {
    pub sample_defect_id: i64,
    pub approval_id: i64,
    pub defect_type: Option<i64>, // SAMPLE_DEFECT_CODES 下标
}

// ==========================================
// Spec / Standard - 判定规格 (specs / standards)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    pub id: i64,
    pub product_id: i64,
    pub standard_id: Option<i64>,
    pub standard_name: Option<String>, // LEFT JOIN standards
}

// ==========================================
// 维度表 (products / locations / fill_lines)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub location_id: i64,
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillLine {
    pub fill_line_id: i64,
    pub display: String,
}

// ==========================================
// SampleDetail - 样本明细（报表行）
// ==========================================
// 用途: 最近样本明细表，维度已解析为显示名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDetail {
    pub sample_set_id: i64,
    pub collected: NaiveDateTime,
    pub status: SampleState,
    pub fill_line: String,
    pub location: String,
    pub product: String,
}
