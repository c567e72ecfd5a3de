// ==========================================
// Spin QC 报表查询层 - R3 用例：灌装线表现
// ==========================================
// 职责: 回答"哪条灌装线问题最多"，按灌装线聚合
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R3 用例：灌装线表现
///
/// 输入: ReportFilter
/// 输出: Vec<FillLinePerformance> 按灌装线显示名升序，每条灌装线至多一行
pub trait FillLinePerformanceUseCase {
    /// 查询各灌装线合格率
    fn get_fill_line_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FillLinePerformance>>;
}

/// 灌装线表现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillLinePerformance {
    /// 灌装线显示名
    pub fill_line: String,

    /// 合格率 (0-1)
    pub pass_rate: f64,

    /// 已判定样本数
    pub sample_count: u64,

    /// 合格样本数
    pub pass_count: u64,

    /// 不合格样本数
    pub fail_count: u64,

    /// 不合格率 (0-1)
    pub fail_rate: f64,
}

impl FillLinePerformance {
    pub fn new(fill_line: String, counts: PassFailCounts) -> Self {
        Self {
            fill_line,
            pass_rate: counts.pass_rate(),
            sample_count: counts.total(),
            pass_count: counts.pass_count,
            fail_count: counts.fail_count,
            fail_rate: counts.fail_rate(),
        }
    }
}
