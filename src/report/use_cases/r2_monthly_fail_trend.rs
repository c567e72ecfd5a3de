// ==========================================
// Spin QC 报表查询层 - R2 用例：月度不合格率趋势
// ==========================================
// 职责: 回答"不合格率随时间如何变化"，按月聚合
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R2 用例：月度不合格率趋势
///
/// 输入: ReportFilter
/// 输出: Vec<MonthlyFailRate> 按月份严格升序，月份不重复；没有已判定样本的月份不出现
pub trait MonthlyFailTrendUseCase {
    /// 查询月度不合格率
    fn get_monthly_fail_trend(&self, filter: &ReportFilter) -> RepositoryResult<Vec<MonthlyFailRate>>;
}

/// 单月不合格率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFailRate {
    /// 月份 (YYYY-MM)
    pub month: String,

    /// 不合格率 (0-1)
    pub fail_rate: f64,

    /// 合格样本数
    pub pass_count: u64,

    /// 不合格样本数
    pub fail_count: u64,

    /// 已判定样本数
    pub total_samples: u64,
}

impl MonthlyFailRate {
    pub fn new(month: String, counts: PassFailCounts) -> Self {
        Self {
            month,
            fail_rate: counts.fail_rate(),
            pass_count: counts.pass_count,
            fail_count: counts.fail_count,
            total_samples: counts.total(),
        }
    }
}
