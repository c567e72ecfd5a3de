// ==========================================
// Spin QC 报表查询层 - R5 用例：样本缺陷分布
// ==========================================
// 职责: 回答"缺陷类型如何分布"
// 口径: 只统计过滤后样本的最新审批下的 sample_defects；
//       缺陷代码越界或为 NULL 时归入 "Unknown"，保证各项合计等于缺陷行数
// ==========================================

use crate::domain::ReportFilter;
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R5 用例：样本缺陷分布
pub trait DefectDistributionUseCase {
    /// 按缺陷类型统计，count 降序，其次类型名升序
    fn get_defect_distribution(&self, filter: &ReportFilter) -> RepositoryResult<Vec<DefectCount>>;

    /// 缺陷记录总行数（与分布合计对账）
    fn count_defect_rows(&self, filter: &ReportFilter) -> RepositoryResult<u64>;
}

/// 缺陷类型计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectCount {
    /// 缺陷类型描述
    pub defect_type: String,

    /// 记录数
    pub count: u64,
}
