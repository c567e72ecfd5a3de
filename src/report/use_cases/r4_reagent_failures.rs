// ==========================================
// Spin QC 报表查询层 - R4 用例：试剂失败分析
// ==========================================
// 职责: 回答"哪些试剂/标准失败最多"
// 口径: 只统计过滤后样本的最新审批下的 reagent_fails；
//       filter.reagent / filter.standard 只在本报表生效
// ==========================================

use crate::domain::ReportFilter;
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R4 用例：试剂失败分析
///
/// 输出排序: fail_count 降序，其次名称升序
pub trait ReagentFailureUseCase {
    /// 按 (试剂, 标准) 分组的失败次数
    fn get_reagent_failure_breakdown(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<ReagentFailure>>;

    /// 按试剂汇总的失败次数
    fn get_reagent_failure_totals(&self, filter: &ReportFilter) -> RepositoryResult<Vec<FailureTotal>>;

    /// 按标准汇总的失败次数（无标准的失败不计入）
    fn get_standard_failure_totals(&self, filter: &ReportFilter)
        -> RepositoryResult<Vec<FailureTotal>>;
}

/// 试剂失败分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReagentFailure {
    /// 试剂名称
    pub reagent: String,

    /// 标准名称（规格未关联标准时为 None）
    pub standard: Option<String>,

    /// 失败次数
    pub fail_count: u64,
}

/// 单维度失败汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureTotal {
    /// 试剂或标准名称
    pub name: String,

    /// 失败次数
    pub fail_count: u64,
}
