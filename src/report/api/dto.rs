// ==========================================
// Spin QC 报表查询层 - ReportApi DTO 定义
// ==========================================
// 职责: 组合型报表的响应结构（单一用例的输出直接复用用例类型）
// ==========================================

use crate::domain::{FillLine, Location, Product};
use crate::report::use_cases::{DefectCount, FailureTotal, ReagentFailure};
use serde::{Deserialize, Serialize};

// ==========================================
// R4: 试剂失败面板
// ==========================================

/// 试剂失败面板：明细分组 + 两个单维度汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReagentFailureReport {
    /// (试剂, 标准) 分组
    pub breakdown: Vec<ReagentFailure>,

    /// 按试剂汇总
    pub reagent_totals: Vec<FailureTotal>,

    /// 按标准汇总
    pub standard_totals: Vec<FailureTotal>,
}

// ==========================================
// R5: 缺陷分布面板
// ==========================================

/// 缺陷分布面板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectDistributionReport {
    /// 按缺陷类型计数
    pub items: Vec<DefectCount>,

    /// 缺陷记录总行数（等于 items 的 count 之和）
    pub defect_row_count: u64,
}

// ==========================================
// 过滤选项
// ==========================================

/// 展示层过滤器的可选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionOptions {
    pub products: Vec<Product>,
    pub locations: Vec<Location>,
    pub fill_lines: Vec<FillLine>,
}
