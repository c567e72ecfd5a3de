// ==========================================
// Spin QC 报表查询层 - R2 月度趋势仓储
// ==========================================
// 职责: 已判定样本按采样月份聚合
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::report::common::{
    query_rows, SampleScope, SqlQueryBuilder, DECIDED_SAMPLES, FAIL_COUNT_EXPR, PASS_COUNT_EXPR,
};
use crate::report::use_cases::r2_monthly_fail_trend::MonthlyFailRate;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// R2 月度趋势仓储
pub struct TrendRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TrendRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 查询月度不合格率（月份升序）
    pub fn get_monthly_fail_trend(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<MonthlyFailRate>> {
        let scope = SampleScope::from_filter(filter);
        let select = format!(
            "SELECT month, {}, {} FROM scoped_samples",
            PASS_COUNT_EXPR, FAIL_COUNT_EXPR
        );
        let (sql, params) = SqlQueryBuilder::new(&select)
            .with_scope(&scope)
            .where_clause(DECIDED_SAMPLES)
            .group_by("month")
            .order_by("month ASC")
            .build();

        let conn = self.get_conn()?;
        let rows = query_rows(&conn, &sql, &params, |row| {
            let month: String = row.get(0)?;
            Ok(MonthlyFailRate::new(
                month,
                PassFailCounts::from_sql(row.get(1)?, row.get(2)?),
            ))
        })?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::repository::test_fixture::seeded_conn;

    #[test]
    fn test_monthly_trend_ordered_and_skips_undecided_months() {
        let repo = TrendRepository::new(seeded_conn());
        let trend = repo.get_monthly_fail_trend(&ReportFilter::default()).unwrap();

        // 2025-03 只有未判定样本（测试样本被排除）
        let months: Vec<&str> = trend.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2025-01", "2025-02"]);

        for m in &trend {
            assert_eq!(m.total_samples, m.pass_count + m.fail_count);
            assert!((m.fail_rate - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_monthly_trend_includes_test_month_when_requested() {
        let repo = TrendRepository::new(seeded_conn());
        let filter = ReportFilter {
            include_test_samples: true,
            ..ReportFilter::default()
        };
        let trend = repo.get_monthly_fail_trend(&filter).unwrap();
        let last = trend.last().unwrap();
        assert_eq!(last.month, "2025-03");
        assert_eq!(last.fail_count, 1);
        assert_eq!(last.fail_rate, 1.0);
    }
}
