// ==========================================
// Spin QC 报表查询层 - R6 厂区表现仓储
// ==========================================

use crate::domain::{PassFailCounts, ReportFilter};
use crate::report::common::{
    query_rows, SampleScope, SqlQueryBuilder, DECIDED_SAMPLES, FAIL_COUNT_EXPR, PASS_COUNT_EXPR,
};
use crate::report::use_cases::r6_location_performance::LocationPerformance;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// R6 厂区 × 灌装线表现仓储
pub struct LocationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LocationRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    pub fn get_location_performance(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<LocationPerformance>> {
        let scope = SampleScope::from_filter(filter);
        let select = format!(
            "SELECT location_name, fill_display, {}, {} FROM scoped_samples",
            PASS_COUNT_EXPR, FAIL_COUNT_EXPR
        );
        let (sql, params) = SqlQueryBuilder::new(&select)
            .with_scope(&scope)
            .where_clause(DECIDED_SAMPLES)
            .group_by("location_name, fill_display")
            .order_by("location_name ASC, fill_display ASC")
            .build();

        let conn = self.get_conn()?;
        let rows = query_rows(&conn, &sql, &params, |row| {
            Ok(LocationPerformance::new(
                row.get(0)?,
                row.get(1)?,
                PassFailCounts::from_sql(row.get(2)?, row.get(3)?),
            ))
        })?;
        Ok(rows)
    }
}
