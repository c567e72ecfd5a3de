// ==========================================
// Spin QC 报表查询层 - 样本数据仓储
// ==========================================
// 职责: 单个样本的只读查询（样本、审批历史、试剂失败、缺陷、规格）
// 用途: 样本明细视图（下钻）
// 约束: 时间列经 datetime() 归一，与报表 CTE 口径一致
// ==========================================

use crate::domain::{Approval, ReagentFail, Sample, SampleDefect, Spec};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

/// 样本数据仓储
pub struct SampleRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SampleRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 按主键查询样本
    ///
    /// # 返回
    /// - Ok(Sample)
    /// - Err(RepositoryError::NotFound): 样本不存在
    pub fn get_sample(&self, sample_set_id: i64) -> RepositoryResult<Sample> {
        let conn = self.get_conn()?;
        conn.query_row(
            r#"
            SELECT sample_set_id, datetime(collected), product_id, location_id, fill_id, is_test
            FROM sample_set
            WHERE sample_set_id = ?1
            "#,
            params![sample_set_id],
            map_sample,
        )
        .optional()?
        .ok_or_else(|| RepositoryError::NotFound {
            entity: "Sample".to_string(),
            id: sample_set_id.to_string(),
        })
    }

    /// 样本的审批历史（按时间升序，最后一条即最新审批）
    pub fn list_approvals(&self, sample_set_id: i64) -> RepositoryResult<Vec<Approval>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT approval_id, sample_set_id, state, datetime(timestamp) AS ts
            FROM approvals
            WHERE sample_set_id = ?1
            ORDER BY ts ASC, approval_id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![sample_set_id], map_approval)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// 某次审批下的试剂失败
    pub fn list_reagent_fails(&self, approval_id: i64) -> RepositoryResult<Vec<ReagentFail>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT reagent_fail_id, approval_id, spec_id, reagent
            FROM reagent_fails
            WHERE approval_id = ?1
            ORDER BY reagent, reagent_fail_id
            "#,
        )?;
        let rows = stmt.query_map(params![approval_id], |row: &Row| {
            Ok(ReagentFail {
                reagent_fail_id: row.get(0)?,
                approval_id: row.get(1)?,
                spec_id: row.get(2)?,
                reagent: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// 某次审批下的缺陷
    pub fn list_sample_defects(&self, approval_id: i64) -> RepositoryResult<Vec<SampleDefect>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT sample_defect_id, approval_id, type
            FROM sample_defects
            WHERE approval_id = ?1
            ORDER BY sample_defect_id
            "#,
        )?;
        let rows = stmt.query_map(params![approval_id], |row: &Row| {
            Ok(SampleDefect {
                sample_defect_id: row.get(0)?,
                approval_id: row.get(1)?,
                defect_type: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// 按 id 批量查询规格（附带标准名称）
    pub fn list_specs(&self, spec_ids: &[i64]) -> RepositoryResult<Vec<Spec>> {
        if spec_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT s.id, s.product_id, s.standard_id, st.name
            FROM specs s
            LEFT JOIN standards st ON st.standard_id = s.standard_id
            WHERE {}
            ORDER BY s.id
            "#,
            crate::report::common::build_in_clause("s.id", spec_ids)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(spec_ids.iter()), |row: &Row| {
            Ok(Spec {
                id: row.get(0)?,
                product_id: row.get(1)?,
                standard_id: row.get(2)?,
                standard_name: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn map_sample(row: &Row) -> rusqlite::Result<Sample> {
    let is_test: Option<i64> = row.get(5)?;
    Ok(Sample {
        sample_set_id: row.get(0)?,
        collected: row.get(1)?,
        product_id: row.get(2)?,
        location_id: row.get(3)?,
        fill_id: row.get(4)?,
        is_test: is_test.unwrap_or(0) != 0,
    })
}

fn map_approval(row: &Row) -> rusqlite::Result<Approval> {
    Ok(Approval {
        approval_id: row.get(0)?,
        sample_set_id: row.get(1)?,
        state: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SampleState;

    fn setup_repo() -> SampleRepository {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE sample_set (
                sample_set_id INTEGER PRIMARY KEY, collected TEXT NOT NULL,
                product_id INTEGER NOT NULL, location_id INTEGER NOT NULL,
                fill_id INTEGER NOT NULL, is_test INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE approvals (
                approval_id INTEGER PRIMARY KEY, sample_set_id INTEGER NOT NULL,
                state INTEGER, timestamp TEXT NOT NULL
            );
            CREATE TABLE reagent_fails (
                reagent_fail_id INTEGER PRIMARY KEY, approval_id INTEGER NOT NULL,
                spec_id INTEGER, reagent TEXT NOT NULL
            );
            CREATE TABLE sample_defects (
                sample_defect_id INTEGER PRIMARY KEY, approval_id INTEGER NOT NULL, type INTEGER
            );
            CREATE TABLE specs (id INTEGER PRIMARY KEY, product_id INTEGER NOT NULL, standard_id INTEGER);
            CREATE TABLE standards (standard_id INTEGER PRIMARY KEY, name TEXT NOT NULL);

            INSERT INTO sample_set VALUES (10, '2025-02-03 08:30:00', 1, 1, 1, 0);
            INSERT INTO approvals VALUES
                (100, 10, 3, '2025-02-03 09:00:00'),
                (101, 10, 1, '2025-02-04 09:00:00');
            INSERT INTO reagent_fails VALUES (1, 101, 7, 'ALB'), (2, 101, 8, 'ALT');
            INSERT INTO sample_defects VALUES (1, 101, 7), (2, 101, NULL);
            INSERT INTO specs VALUES (7, 1, 1), (8, 1, NULL);
            INSERT INTO standards VALUES (1, 'Level 1 Control');

            INSERT INTO sample_set VALUES (11, '2025-02-03T09:00:00+01:00', 1, 1, 1, 0);
            INSERT INTO approvals VALUES
                (102, 11, 3, '2025-02-03T11:00:00'),
                (103, 11, 1, '2025-02-03 12:00:00');
            "#,
        )
        .unwrap();
        SampleRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_get_sample() {
        let repo = setup_repo();
        let sample = repo.get_sample(10).unwrap();
        assert_eq!(sample.fill_id, 1);
        assert!(!sample.is_test);
        assert_eq!(sample.collected.to_string(), "2025-02-03 08:30:00");
    }

    #[test]
    fn test_get_sample_not_found() {
        let repo = setup_repo();
        match repo.get_sample(999) {
            Err(RepositoryError::NotFound { entity, id }) => {
                assert_eq!(entity, "Sample");
                assert_eq!(id, "999");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_list_approvals_ordered_by_time() {
        let repo = setup_repo();
        let approvals = repo.list_approvals(10).unwrap();
        assert_eq!(approvals.len(), 2);
        assert_eq!(approvals[0].sample_state(), SampleState::Failed);
        assert_eq!(approvals[1].sample_state(), SampleState::Passed);
    }

    #[test]
    fn test_mixed_timestamp_forms_are_normalised() {
        let repo = setup_repo();

        let sample = repo.get_sample(11).unwrap();
        assert_eq!(sample.collected.to_string(), "2025-02-03 08:00:00");

        // T 分隔的 11:00 早于空格分隔的 12:00
        let approvals = repo.list_approvals(11).unwrap();
        let ids: Vec<i64> = approvals.iter().map(|a| a.approval_id).collect();
        assert_eq!(ids, vec![102, 103]);
        assert_eq!(approvals[1].sample_state(), SampleState::Passed);
        assert_eq!(approvals[0].timestamp.to_string(), "2025-02-03 11:00:00");
    }

    #[test]
    fn test_reagent_fails_defects_and_specs() {
        let repo = setup_repo();

        let fails = repo.list_reagent_fails(101).unwrap();
        assert_eq!(fails.iter().map(|f| f.reagent.as_str()).collect::<Vec<_>>(), vec!["ALB", "ALT"]);

        let defects = repo.list_sample_defects(101).unwrap();
        assert_eq!(defects[0].defect_type, Some(7));
        assert_eq!(defects[1].defect_type, None);

        let specs = repo.list_specs(&[7, 8]).unwrap();
        assert_eq!(specs[0].standard_name.as_deref(), Some("Level 1 Control"));
        assert_eq!(specs[1].standard_name, None);

        assert!(repo.list_specs(&[]).unwrap().is_empty());
        assert!(repo.list_reagent_fails(100).unwrap().is_empty());
    }
}
