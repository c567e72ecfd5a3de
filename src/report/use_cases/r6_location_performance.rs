// ==========================================
// Spin QC 报表查询层 - R6 用例：厂区 × 灌装线表现
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::repository::RepositoryResult;
use serde::{Deserialize, Serialize};

/// R6 用例：厂区 × 灌装线表现
///
/// 输出: Vec<LocationPerformance> 按厂区、灌装线升序
pub trait LocationPerformanceUseCase {
    fn get_location_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<LocationPerformance>>;
}

/// 厂区 × 灌装线表现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPerformance {
    pub location: String,
    pub fill_line: String,
    /// 合格率 (0-1)
    pub pass_rate: f64,
    /// 不合格率 (0-1)
    pub fail_rate: f64,
    pub sample_count: u64,
    pub pass_count: u64,
    pub fail_count: u64,
}

impl LocationPerformance {
    pub fn new(location: String, fill_line: String, counts: PassFailCounts) -> Self {
        Self {
            location,
            fill_line,
            pass_rate: counts.pass_rate(),
            fail_rate: counts.fail_rate(),
            sample_count: counts.total(),
            pass_count: counts.pass_count,
            fail_count: counts.fail_count,
        }
    }
}
