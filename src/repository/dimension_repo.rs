// ==========================================
// Spin QC 报表查询层 - 维度表仓储
// ==========================================
// 职责: products / locations / fill_lines 的只读查询
// 用途: 展示层的过滤选项；过滤名称的存在性检查
// ==========================================

use crate::domain::{FillLine, Location, Product, ReportFilter};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, Row};
use std::sync::{Arc, Mutex};

/// 过滤条件中在维度表里找不到的名称
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedNames {
    pub products: Vec<String>,
    pub locations: Vec<String>,
    pub fill_lines: Vec<String>,
}

impl UnresolvedNames {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.locations.is_empty() && self.fill_lines.is_empty()
    }
}

/// 维度表仓储
pub struct DimensionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DimensionRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(RepositoryError::lock_poisoned)
    }

    /// 所有产品（按名称排序）
    pub fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT product_id, name FROM products ORDER BY name, product_id")?;
        let rows = stmt.query_map([], |row: &Row| {
            Ok(Product {
                product_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// 所有厂区（按名称排序）
    pub fn list_locations(&self) -> RepositoryResult<Vec<Location>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT location_id, location_name FROM locations ORDER BY location_name, location_id",
        )?;
        let rows = stmt.query_map([], |row: &Row| {
            Ok(Location {
                location_id: row.get(0)?,
                location_name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// 所有灌装线（按显示名排序）
    pub fn list_fill_lines(&self) -> RepositoryResult<Vec<FillLine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn
            .prepare("SELECT fill_line_id, display FROM fill_lines ORDER BY display, fill_line_id")?;
        let rows = stmt.query_map([], |row: &Row| {
            Ok(FillLine {
                fill_line_id: row.get(0)?,
                display: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// 查找过滤条件中不存在的维度名称
    ///
    /// 不存在的名称不是错误（只是匹配不到数据），这里只用于日志提示。
    pub fn find_unresolved_names(&self, filter: &ReportFilter) -> RepositoryResult<UnresolvedNames> {
        let conn = self.get_conn()?;
        Ok(UnresolvedNames {
            products: missing_names(&conn, "products", "name", filter.products.as_deref())?,
            locations: missing_names(
                &conn,
                "locations",
                "location_name",
                filter.locations.as_deref(),
            )?,
            fill_lines: missing_names(&conn, "fill_lines", "display", filter.fill_lines.as_deref())?,
        })
    }
}

fn missing_names(
    conn: &Connection,
    table: &str,
    column: &str,
    names: Option<&[String]>,
) -> RepositoryResult<Vec<String>> {
    let Some(names) = names else {
        return Ok(Vec::new());
    };

    let sql = format!("SELECT 1 FROM {} WHERE {} = ?1 LIMIT 1", table, column);
    let mut stmt = conn.prepare(&sql)?;
    let mut missing = Vec::new();
    for name in names {
        if !stmt.exists([name])? {
            missing.push(name.clone());
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_repo() -> DimensionRepository {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE products (product_id INTEGER PRIMARY KEY, name TEXT NOT NULL);
            CREATE TABLE locations (location_id INTEGER PRIMARY KEY, location_name TEXT NOT NULL);
            CREATE TABLE fill_lines (fill_line_id INTEGER PRIMARY KEY, display TEXT NOT NULL);
            INSERT INTO products VALUES (1, '303'), (2, '203'), (3, 'FF104');
            INSERT INTO locations VALUES (1, 'Newark'), (2, 'Chestertown');
            INSERT INTO fill_lines VALUES (1, 'Fill-2'), (2, 'Fill-1');
            "#,
        )
        .unwrap();
        DimensionRepository::new(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_list_dimensions_sorted_by_name() {
        let repo = setup_repo();

        let products: Vec<String> = repo.list_products().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(products, vec!["203", "303", "FF104"]);

        let locations = repo.list_locations().unwrap();
        assert_eq!(locations[0].location_name, "Chestertown");
        assert_eq!(locations[1].location_id, 1);

        let fills = repo.list_fill_lines().unwrap();
        assert_eq!(fills[0].display, "Fill-1");
        assert_eq!(fills[0].fill_line_id, 2);
    }

    #[test]
    fn test_find_unresolved_names() {
        let repo = setup_repo();
        let filter = ReportFilter::default()
            .with_products(["203", "999"])
            .with_locations(["Newark"])
            .with_fill_lines(["Fill-9"]);

        let unresolved = repo.find_unresolved_names(&filter).unwrap();
        assert_eq!(unresolved.products, vec!["999"]);
        assert!(unresolved.locations.is_empty());
        assert_eq!(unresolved.fill_lines, vec!["Fill-9"]);
        assert!(!unresolved.is_empty());

        let none = repo.find_unresolved_names(&ReportFilter::default()).unwrap();
        assert!(none.is_empty());
    }
}
