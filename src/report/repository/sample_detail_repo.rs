// ==========================================
// Spin QC 报表查询层 - R7 样本明细仓储
// ==========================================
// 职责: 最近样本明细（含未判定样本）
// ==========================================

use crate::domain::{ReportFilter, SampleDetail, SampleState};
use crate::report::common::{query_rows, SampleScope, SqlQueryBuilder};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// R7 样本明细仓储
pub struct SampleDetailRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SampleDetailRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 最近样本明细
    ///
    /// # 参数
    /// - limit: 返回行数上限（上层已做边界校验）
    ///
    /// # 返回
    /// - collected 降序，同时间按 sample_set_id 降序
    pub fn list_recent_sample_details(
        &self,
        filter: &ReportFilter,
        limit: usize,
    ) -> RepositoryResult<Vec<SampleDetail>> {
        let scope = SampleScope::from_filter(filter);
        let (sql, params) = SqlQueryBuilder::new(
            r#"SELECT sample_set_id, collected, state, fill_display, location_name, product_name
            FROM scoped_samples"#,
        )
        .with_scope(&scope)
        .order_by("collected DESC, sample_set_id DESC")
        .limit(limit)
        .build();

        let conn = self.get_conn()?;
        let rows = query_rows(&conn, &sql, &params, |row| {
            Ok(SampleDetail {
                sample_set_id: row.get(0)?,
                collected: row.get(1)?,
                status: SampleState::from_code(row.get(2)?),
                fill_line: row.get(3)?,
                location: row.get(4)?,
                product: row.get(5)?,
            })
        })?;
        Ok(rows)
    }
}
