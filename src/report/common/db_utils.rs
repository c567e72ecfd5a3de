// ==========================================
// Spin QC 报表查询层 - 数据库工具模块
// ==========================================
// 职责: IN 子句构建、带绑定参数的只读查询执行
// ==========================================

use rusqlite::types::Value;
use rusqlite::{Connection, Result as SqlResult, Row};

/// 构建 IN 子句的 SQL 片段
///
/// # 参数
/// - `column_name`: IN 子句应用的列名
/// - `values`: 值列表（只用于计数占位符，取值需另行绑定）
///
/// # 返回
/// - 生成的 IN 子句片段，例如: "p.name IN (?, ?, ?)"
/// - 空列表返回永假条件 "1 = 0"
///
/// # 示例
/// ```
/// use spin_qc_reports::report::common::db_utils::build_in_clause;
///
/// let fills = vec!["Fill-1".to_string(), "Fill-2".to_string()];
/// assert_eq!(build_in_clause("f.display", &fills), "f.display IN (?, ?)");
///
/// let empty: Vec<String> = vec![];
/// assert_eq!(build_in_clause("f.display", &empty), "1 = 0");
/// ```
pub fn build_in_clause<T>(column_name: &str, values: &[T]) -> String {
    if values.is_empty() {
        return "1 = 0".to_string();
    }

    let placeholders = values.iter().map(|_| "?").collect::<Vec<_>>().join(", ");
    format!("{} IN ({})", column_name, placeholders)
}

/// 文本列表转为绑定参数
pub fn text_values<S: AsRef<str>>(values: &[S]) -> Vec<Value> {
    values
        .iter()
        .map(|v| Value::Text(v.as_ref().to_string()))
        .collect()
}

/// SQL 计数值转为 u64（NULL 或负数视为 0）
pub fn count_value(value: Option<i64>) -> u64 {
    value.and_then(|n| u64::try_from(n).ok()).unwrap_or(0)
}

/// 执行带位置参数的查询并映射所有行
///
/// # 参数
/// - `conn`: 数据库连接
/// - `sql`: 含 `?` 占位符的 SQL
/// - `params`: 按占位符顺序排列的绑定值
/// - `map_row`: 行映射函数
pub fn query_rows<T, F>(conn: &Connection, sql: &str, params: &[Value], map_row: F) -> SqlResult<Vec<T>>
where
    F: FnMut(&Row<'_>) -> SqlResult<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), map_row)?;
    rows.collect()
}

/// 执行带位置参数的单行查询
pub fn query_single_row<T, F>(conn: &Connection, sql: &str, params: &[Value], map_row: F) -> SqlResult<T>
where
    F: FnOnce(&Row<'_>) -> SqlResult<T>,
{
    conn.query_row(sql, rusqlite::params_from_iter(params.iter()), map_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_in_clause_with_values() {
        let values = vec!["Fill-1", "Fill-2", "Fill-3"];
        assert_eq!(build_in_clause("f.display", &values), "f.display IN (?, ?, ?)");
    }

    #[test]
    fn test_build_in_clause_numeric() {
        assert_eq!(build_in_clause("s.id", &[7_i64]), "s.id IN (?)");
    }

    #[test]
    fn test_build_in_clause_empty_returns_false() {
        let values: Vec<String> = vec![];
        assert_eq!(build_in_clause("p.name", &values), "1 = 0");
    }

    #[test]
    fn test_count_value() {
        assert_eq!(count_value(Some(4)), 4);
        assert_eq!(count_value(Some(-1)), 0);
        assert_eq!(count_value(None), 0);
    }

    #[test]
    fn test_query_rows_binds_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE fill_lines (fill_line_id INTEGER PRIMARY KEY, display TEXT);
             INSERT INTO fill_lines VALUES (1, 'Fill-1'), (2, 'Fill-2'), (3, 'Fill-3');",
        )
        .unwrap();

        let names = vec!["Fill-3", "Fill-1"];
        let sql = format!(
            "SELECT fill_line_id FROM fill_lines WHERE {} AND fill_line_id > ? ORDER BY fill_line_id",
            build_in_clause("display", &names)
        );
        let mut params = text_values(&names);
        params.push(Value::Integer(1));

        let ids: Vec<i64> = query_rows(&conn, &sql, &params, |row| row.get(0)).unwrap();
        assert_eq!(ids, vec![3]);

        let count: i64 = query_single_row(
            &conn,
            "SELECT COUNT(*) FROM fill_lines WHERE fill_line_id >= ?",
            &[Value::Integer(2)],
            |row| row.get(0),
        )
        .unwrap();
        assert_eq!(count, 2);
    }
}
