// ==========================================
// Spin QC 报表查询层 - 合格率计算
// ==========================================
// 所有报表的合格/不合格计数与比率口径统一在此
// ==========================================

use serde::{Deserialize, Serialize};

/// 合格/不合格计数
///
/// 总数恒由两者相加得出，比率为 [0, 1] 区间的小数；总数为 0 时比率为 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFailCounts {
    pub pass_count: u64,
    pub fail_count: u64,
}

impl PassFailCounts {
    pub fn new(pass_count: u64, fail_count: u64) -> Self {
        Self {
            pass_count,
            fail_count,
        }
    }

    /// 从 SQL 聚合结果构造（SUM 在无行时为 NULL，负数视为 0）
    pub fn from_sql(pass_count: Option<i64>, fail_count: Option<i64>) -> Self {
        let to_u64 = |v: Option<i64>| v.and_then(|n| u64::try_from(n).ok()).unwrap_or(0);
        Self::new(to_u64(pass_count), to_u64(fail_count))
    }

    pub fn total(&self) -> u64 {
        self.pass_count + self.fail_count
    }

    pub fn pass_rate(&self) -> f64 {
        ratio(self.pass_count, self.total())
    }

    pub fn fail_rate(&self) -> f64 {
        ratio(self.fail_count, self.total())
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn ratio(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
