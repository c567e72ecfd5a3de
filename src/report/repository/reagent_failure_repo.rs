// ==========================================
// Spin QC 报表查询层 - R4 试剂失败仓储
// ==========================================
// 职责: 统计过滤后样本最新审批下的 reagent_fails
// 关联: reagent_fails.spec_id → specs.id → standards.standard_id
// ==========================================

use crate::domain::ReportFilter;
use crate::report::common::{count_value, query_rows, SampleScope, SqlQueryBuilder};
use crate::report::use_cases::r4_reagent_failures::{FailureTotal, ReagentFailure};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

const REAGENT_FAIL_JOINS: &str = r#"
    FROM reagent_fails rf
    JOIN scoped_samples ss ON ss.approval_id = rf.approval_id
    LEFT JOIN specs sp ON sp.id = rf.spec_id
    LEFT JOIN standards st ON st.standard_id = sp.standard_id"#;

/// R4 试剂失败仓储
pub struct ReagentFailureRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReagentFailureRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 范围 + 试剂/标准过滤
    fn base_query(filter: &ReportFilter, select: &str) -> SqlQueryBuilder {
        let scope = SampleScope::from_filter(filter);
        SqlQueryBuilder::new(&format!("{}{}", select, REAGENT_FAIL_JOINS))
            .with_scope(&scope)
            .and_param_if("rf.reagent = ?", filter.reagent.clone().map(Value::Text))
            .and_param_if("st.name = ?", filter.standard.clone().map(Value::Text))
    }

    /// 按 (试剂, 标准) 分组
    ///
    /// # 返回
    /// - fail_count 降序，其次试剂名、标准名升序
    pub fn get_reagent_failure_breakdown(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<ReagentFailure>> {
        let (sql, params) =
            Self::base_query(filter, "SELECT rf.reagent, st.name, COUNT(*) AS fail_count")
                .group_by("rf.reagent, st.name")
                .order_by("fail_count DESC, rf.reagent ASC, st.name ASC")
                .build();

        let conn = self.get_conn()?;
        let rows = query_rows(&conn, &sql, &params, |row| {
            Ok(ReagentFailure {
                reagent: row.get(0)?,
                standard: row.get(1)?,
                fail_count: count_value(row.get(2)?),
            })
        })?;
        Ok(rows)
    }

    /// 按试剂汇总
    pub fn get_reagent_failure_totals(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FailureTotal>> {
        let (sql, params) = Self::base_query(filter, "SELECT rf.reagent, COUNT(*) AS fail_count")
            .group_by("rf.reagent")
            .order_by("fail_count DESC, rf.reagent ASC")
            .build();
        self.query_totals(&sql, &params)
    }

    /// 按标准汇总（未关联标准的失败不计入）
    pub fn get_standard_failure_totals(
        &self,
        filter: &ReportFilter,
    ) -> RepositoryResult<Vec<FailureTotal>> {
        let (sql, params) = Self::base_query(filter, "SELECT st.name, COUNT(*) AS fail_count")
            .where_clause("st.name IS NOT NULL")
            .group_by("st.name")
            .order_by("fail_count DESC, st.name ASC")
            .build();
        self.query_totals(&sql, &params)
    }

    fn query_totals(&self, sql: &str, params: &[Value]) -> RepositoryResult<Vec<FailureTotal>> {
        let conn = self.get_conn()?;
        let rows = query_rows(&conn, sql, params, |row| {
            Ok(FailureTotal {
                name: row.get(0)?,
                fail_count: count_value(row.get(1)?),
            })
        })?;
        Ok(rows)
    }
}
