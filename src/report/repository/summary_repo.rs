// ==========================================
// Spin QC 报表查询层 - R1 QC 汇总仓储
// ==========================================
// 职责: 在样本范围内统计合格/不合格/未判定样本数
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::report::common::{
    count_value, query_single_row, SampleScope, SqlQueryBuilder, FAIL_COUNT_EXPR, PASS_COUNT_EXPR,
};
use crate::report::use_cases::r1_summary_metrics::SummaryMetrics;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// R1 QC 汇总仓储
pub struct SummaryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SummaryRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 查询汇总指标
    ///
    /// # 返回
    /// - 无匹配样本时各项为 0（不是错误）
    pub fn get_summary_metrics(&self, filter: &ReportFilter) -> RepositoryResult<SummaryMetrics> {
        let scope = SampleScope::from_filter(filter);
        let select = format!(
            "SELECT {}, {}, SUM(CASE WHEN COALESCE(state, 0) NOT IN (1, 3) THEN 1 ELSE 0 END) \
             FROM scoped_samples",
            PASS_COUNT_EXPR, FAIL_COUNT_EXPR
        );
        let (sql, params) = SqlQueryBuilder::new(&select).with_scope(&scope).build();

        let conn = self.get_conn()?;
        let (counts, undecided) = query_single_row(&conn, &sql, &params, |row| {
            let counts = PassFailCounts::from_sql(row.get(0)?, row.get(1)?);
            let undecided: Option<i64> = row.get(2)?;
            Ok((counts, undecided))
        })?;

        Ok(SummaryMetrics::from_counts(counts, count_value(undecided)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::repository::test_fixture::{empty_conn, seeded_conn};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_uses_latest_approval() {
        let repo = SummaryRepository::new(seeded_conn());
        let summary = repo.get_summary_metrics(&ReportFilter::default()).unwrap();

        assert_eq!(summary.total_samples, 4);
        assert_eq!(summary.pass_count, 2);
        assert_eq!(summary.fail_count, 2);
        assert_eq!(summary.undecided_count, 2);
        assert!((summary.pass_rate - 0.5).abs() < 1e-9);
        assert!((summary.fail_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_summary_with_test_samples() {
        let repo = SummaryRepository::new(seeded_conn());
        let filter = ReportFilter {
            include_test_samples: true,
            ..ReportFilter::default()
        };
        let summary = repo.get_summary_metrics(&filter).unwrap();
        assert_eq!(summary.fail_count, 3);
        assert_eq!(summary.total_samples, 5);
    }

    #[test]
    fn test_summary_end_date_is_exclusive() {
        let repo = SummaryRepository::new(seeded_conn());
        // 样本 2 采于 2025-01-20，不应被包含
        let filter = ReportFilter::between(date(2025, 1, 1), date(2025, 1, 20));
        let summary = repo.get_summary_metrics(&filter).unwrap();
        assert_eq!(summary.total_samples, 1);
        assert_eq!(summary.pass_count, 1);
    }

    #[test]
    fn test_summary_empty_range_is_zero() {
        let repo = SummaryRepository::new(seeded_conn());
        let filter = ReportFilter::between(date(2030, 1, 1), date(2030, 2, 1));
        let summary = repo.get_summary_metrics(&filter).unwrap();
        assert_eq!(summary, SummaryMetrics::from_counts(PassFailCounts::default(), 0));
        assert_eq!(summary.pass_rate, 0.0);

        let repo = SummaryRepository::new(empty_conn());
        assert_eq!(repo.get_summary_metrics(&ReportFilter::default()).unwrap().total_samples, 0);
    }

    #[test]
    fn test_summary_unknown_name_matches_nothing() {
        let repo = SummaryRepository::new(seeded_conn());
        let filter = ReportFilter::default().with_products(["NOPE"]);
        assert_eq!(repo.get_summary_metrics(&filter).unwrap().total_samples, 0);
    }
}
