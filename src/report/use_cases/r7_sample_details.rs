// ==========================================
// Spin QC 报表查询层 - R7 用例：样本明细
// ==========================================
// 职责: 最近样本明细表 + 单样本下钻视图
// ==========================================

use crate::domain::{Approval, ReportFilter, Sample, SampleDetail, SampleState};
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R7 用例：样本明细
pub trait SampleDetailsUseCase {
    /// 最近样本明细
    ///
    /// 输出: 至多 limit 行，按 collected 降序（同时间按 sample_set_id 降序）；
    /// 包含未判定样本（status = Unknown）
    fn list_recent_sample_details(
        &self,
        filter: &ReportFilter,
        limit: usize,
    ) -> RepositoryResult<Vec<SampleDetail>>;

    /// 单样本下钻：审批历史 + 最新审批下的试剂失败与缺陷
    fn get_sample_view(&self, sample_set_id: i64) -> RepositoryResult<SampleView>;
}

/// 单样本下钻视图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleView {
    pub sample: Sample,

    /// 由最新审批决定的状态
    pub status: SampleState,

    /// 审批历史（时间升序）
    pub approvals: Vec<Approval>,

    /// 最新审批 ID（无审批时为 None）
    pub latest_approval_id: Option<i64>,

    /// 最新审批下的试剂失败
    pub reagent_fails: Vec<ReagentFailView>,

    /// 最新审批下的缺陷
    pub defects: Vec<DefectView>,
}

/// 试剂失败（附标准名称）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReagentFailView {
    pub reagent_fail_id: i64,
    pub reagent: String,
    pub spec_id: Option<i64>,
    pub standard: Option<String>,
}

/// 缺陷（附类型描述）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectView {
    pub sample_defect_id: i64,
    pub code: Option<i64>,
    pub defect_type: String,
}
