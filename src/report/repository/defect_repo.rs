// ==========================================
// Spin QC 报表查询层 - R5 缺陷分布仓储
// ==========================================
// 职责: 按缺陷代码统计过滤后样本最新审批下的 sample_defects，
//       代码到描述的映射在此完成
// ==========================================

use crate::domain::{defect_label, ReportFilter};
use crate::report::common::{count_value, query_rows, query_single_row, SampleScope, SqlQueryBuilder};
use crate::report::use_cases::r5_defect_distribution::DefectCount;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

const DEFECT_JOINS: &str = r#"
    FROM sample_defects sd
    JOIN scoped_samples ss ON ss.approval_id = sd.approval_id"#;

/// R5 缺陷分布仓储
pub struct DefectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DefectRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 按缺陷类型统计
    ///
    /// 越界与 NULL 代码合并为 "Unknown"；count 降序，其次类型名升序
    pub fn get_defect_distribution(&self, filter: &ReportFilter) -> RepositoryResult<Vec<DefectCount>> {
        let scope = SampleScope::from_filter(filter);
        let (sql, params) = SqlQueryBuilder::new(&format!("SELECT sd.type, COUNT(*){}", DEFECT_JOINS))
            .with_scope(&scope)
            .group_by("sd.type")
            .build();

        let conn = self.get_conn()?;
        let by_code: Vec<(Option<i64>, u64)> = query_rows(&conn, &sql, &params, |row| {
            Ok((row.get(0)?, count_value(row.get(1)?)))
        })?;

        let mut by_label: BTreeMap<&'static str, u64> = BTreeMap::new();
        for (code, count) in by_code {
            *by_label.entry(defect_label(code)).or_insert(0) += count;
        }

        let mut counts: Vec<DefectCount> = by_label
            .into_iter()
            .map(|(label, count)| DefectCount {
                defect_type: label.to_string(),
                count,
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.defect_type.cmp(&b.defect_type)));
        Ok(counts)
    }

    /// 缺陷记录行数
    pub fn count_defect_rows(&self, filter: &ReportFilter) -> RepositoryResult<u64> {
        let scope = SampleScope::from_filter(filter);
        let (sql, params) = SqlQueryBuilder::new(&format!("SELECT COUNT(*){}", DEFECT_JOINS))
            .with_scope(&scope)
            .build();

        let conn = self.get_conn()?;
        let count = query_single_row(&conn, &sql, &params, |row| row.get::<_, Option<i64>>(0))?;
        Ok(count_value(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_DEFECT_LABEL;
    use crate::report::repository::test_fixture::{empty_conn, seeded_conn};

    #[test]
    fn test_distribution_sums_to_row_count() {
        let repo = DefectRepository::new(seeded_conn());
        let filter = ReportFilter::default();

        let dist = repo.get_defect_distribution(&filter).unwrap();
        let rows = repo.count_defect_rows(&filter).unwrap();

        assert_eq!(rows, 5);
        assert_eq!(dist.iter().map(|d| d.count).sum::<u64>(), rows);
        assert_eq!(
            dist,
            vec![
                DefectCount { defect_type: "Other".into(), count: 2 },
                DefectCount { defect_type: UNKNOWN_DEFECT_LABEL.into(), count: 2 },
                DefectCount { defect_type: "Bead Missing".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_distribution_respects_scope() {
        let repo = DefectRepository::new(seeded_conn());
        let filter = ReportFilter::default().with_locations(["Reno"]);
        let dist = repo.get_defect_distribution(&filter).unwrap();
        // 样本 3 最新审批无缺陷，只剩样本 4 的两条越界/NULL
        assert_eq!(dist, vec![DefectCount { defect_type: "Unknown".into(), count: 2 }]);
    }

    #[test]
    fn test_no_defects() {
        let repo = DefectRepository::new(empty_conn());
        assert!(repo.get_defect_distribution(&ReportFilter::default()).unwrap().is_empty());
        assert_eq!(repo.count_defect_rows(&ReportFilter::default()).unwrap(), 0);
    }
}
