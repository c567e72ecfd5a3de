// ==========================================
// Spin QC 报表查询层 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为（只读 + busy_timeout）
// - 打开时校验 QC schema，避免在不兼容的库上静默返回空结果
// ==========================================

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 报表层依赖的表（外部库所有，只读消费）
pub const REQUIRED_TABLES: &[&str] = &[
    "sample_set",
    "approvals",
    "reagent_fails",
    "sample_defects",
    "specs",
    "standards",
    "products",
    "locations",
    "fill_lines",
];

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - query_only 需要"每个连接"单独开启，保证本系统永不写库
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout_ms: u64) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA query_only = ON;")?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// 以只读方式打开 SQLite 连接并应用统一配置
///
/// 文件不存在时直接失败（不会创建空库）。
pub fn open_readonly_connection(db_path: &str, busy_timeout_ms: u64) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI,
    )?;
    configure_sqlite_connection(&conn, busy_timeout_ms)?;
    crate::perf::install_sqlite_tracing(&mut conn);
    tracing::info!(db_path, busy_timeout_ms, "已打开只读 QC 数据库连接");
    Ok(conn)
}

/// 返回缺失的必需表（按 REQUIRED_TABLES 顺序）
pub fn find_missing_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1 LIMIT 1")?;

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        let exists = stmt
            .query_row([table], |_row| Ok(true))
            .optional()?
            .unwrap_or(false);
        if !exists {
            missing.push(table.to_string());
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_sets_query_only() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn, DEFAULT_BUSY_TIMEOUT_MS).unwrap();

        let query_only: i64 = conn
            .query_row("PRAGMA query_only", [], |row| row.get(0))
            .unwrap();
        assert_eq!(query_only, 1);

        // 只读连接拒绝任何写入
        let result = conn.execute("CREATE TABLE t (id INTEGER)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_missing_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE sample_set (sample_set_id INTEGER PRIMARY KEY);
             CREATE TABLE products (product_id INTEGER PRIMARY KEY, name TEXT);",
        )
        .unwrap();

        let missing = find_missing_tables(&conn).unwrap();
        assert!(!missing.contains(&"sample_set".to_string()));
        assert!(!missing.contains(&"products".to_string()));
        assert!(missing.contains(&"approvals".to_string()));
        assert_eq!(missing.len(), REQUIRED_TABLES.len() - 2);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let result = open_readonly_connection("/nonexistent/dir/spin_qc.db", 100);
        assert!(result.is_err());
    }
}
