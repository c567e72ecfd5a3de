// ==========================================
// Spin QC 报表查询层 - R3 灌装线表现仓储
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::report::common::{
    query_rows, SampleScope, SqlQueryBuilder, DECIDED_SAMPLES, FAIL_COUNT_EXPR, PASS_COUNT_EXPR,
};
use crate::report::use_cases::r3_fill_line_performance::FillLinePerformance;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// R3 灌装线表现仓储
pub struct FillLineRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FillLineRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 按灌装线显示名分组统计已判定样本
    pub fn get_fill_line_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FillLinePerformance>> {
        let scope = SampleScope::from_filter(filter);
        let select = format!(
            "SELECT fill_display, {}, {} FROM scoped_samples",
            PASS_COUNT_EXPR, FAIL_COUNT_EXPR
        );
        let (sql, params) = SqlQueryBuilder::new(&select)
            .with_scope(&scope)
            .where_clause(DECIDED_SAMPLES)
            .group_by("fill_display")
            .order_by("fill_display ASC")
            .build();

        let conn = self.get_conn()?;
        let rows = query_rows(&conn, &sql, &params, |row| {
            Ok(FillLinePerformance::new(
                row.get(0)?,
                PassFailCounts::from_sql(row.get(1)?, row.get(2)?),
            ))
        })?;
        Ok(rows)
    }
}
