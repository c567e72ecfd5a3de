// ==========================================
// Spin QC 报表查询层 - R1 用例：QC 汇总
// ==========================================
// 职责: 回答"总体合格率是多少"，返回样本总数/合格数/不合格数/合格率
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R1 用例：QC 汇总
///
/// 输入: ReportFilter
/// 输出: SummaryMetrics（pass_count + fail_count == total_samples）
pub trait SummaryMetricsUseCase {
    /// 查询汇总指标
    fn get_summary_metrics(&self, filter: &ReportFilter) -> RepositoryResult<SummaryMetrics>;
}

/// QC 汇总指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// 已判定样本数（合格 + 不合格）
    pub total_samples: u64,

    /// 合格样本数
    pub pass_count: u64,

    /// 不合格样本数
    pub fail_count: u64,

    /// 合格率 (0-1)
    pub pass_rate: f64,

    /// 不合格率 (0-1)
    pub fail_rate: f64,

    /// 未判定样本数（无审批或审批状态不是合格/不合格）
    pub undecided_count: u64,
}

impl SummaryMetrics {
    pub fn from_counts(counts: PassFailCounts, undecided_count: u64) -> Self {
        Self {
            total_samples: counts.total(),
            pass_count: counts.pass_count,
            fail_count: counts.fail_count,
            pass_rate: counts.pass_rate(),
            fail_rate: counts.fail_rate(),
            undecided_count,
        }
    }
}
