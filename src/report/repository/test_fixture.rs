// ==========================================
// 报表仓储单元测试用的内存库
// ==========================================
// 样本       月份     灌装线  厂区    最新状态
// 1          2025-01  Fill-1  Newark  Passed
// 2          2025-01  Fill-2  Newark  Failed   (ALB/Level 1, ALT/-; 缺陷 0, 5)
// 3          2025-02  Fill-1  Reno    Passed   (先 Failed 后 Passed；旧审批下的失败/缺陷不计)
// 4          2025-02  Fill-2  Reno    Failed   (ALB/Level 1; 缺陷 99, NULL)
// 5          2025-02  Fill-1  Newark  无审批
// 6          2025-03  Fill-1  Newark  Failed   测试样本
// 7          2025-03  Fill-2  Newark  state=2  (CHOL/Level 2; 缺陷 0)
//
// 时间列混用多种写法: T 分隔、Z、时区偏移、只有日期。
// 样本 3 的旧审批用 T 分隔，按原始文本比较会被误判为最新。
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub const QC_SCHEMA: &str = r#"
CREATE TABLE products (product_id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE locations (location_id INTEGER PRIMARY KEY, location_name TEXT NOT NULL);
CREATE TABLE fill_lines (fill_line_id INTEGER PRIMARY KEY, display TEXT NOT NULL);
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
"#;

const SEED: &str = r#"
INSERT INTO products VALUES (1, '203'), (2, 'Q203');
INSERT INTO locations VALUES (1, 'Newark'), (2, 'Reno');
INSERT INTO fill_lines VALUES (1, 'Fill-1'), (2, 'Fill-2');
INSERT INTO standards VALUES (1, 'Level 1'), (2, 'Level 2');
INSERT INTO specs VALUES (7, 1, 1), (8, 1, NULL), (9, 2, 2);

INSERT INTO sample_set VALUES
    (1, '2025-01-10 08:00:00', 1, 1, 1, 0),
    (2, '2025-01-20T08:00:00Z', 1, 1, 2, 0),
    (3, '2025-02-05 08:00:00', 2, 2, 1, 0),
    (4, '2025-02-15 10:00:00+02:00', 1, 2, 2, 0),
    (5, '2025-02-20 08:00:00', 1, 1, 1, 0),
    (6, '2025-03-01 08:00:00', 1, 1, 1, 1),
    (7, '2025-03-03', 2, 1, 2, 0);

INSERT INTO approvals VALUES
    (1, 1, 1, '2025-01-10 09:00:00'),
    (2, 2, 3, '2025-01-20 09:00:00'),
    (3, 3, 3, '2025-02-05T09:00:00'),
    (4, 3, 1, '2025-02-05 10:00:00'),
    (5, 4, 3, '2025-02-15 09:00:00'),
    (6, 6, 3, '2025-03-01 09:00:00'),
    (7, 7, 2, '2025-03-03 09:00:00');

INSERT INTO reagent_fails VALUES
    (1, 2, 7, 'ALB'),
    (2, 2, 8, 'ALT'),
    (3, 3, 7, 'ALB'),
    (4, 5, 7, 'ALB'),
    (5, 6, 7, 'GLU'),
    (6, 7, 9, 'CHOL');

INSERT INTO sample_defects VALUES
    (1, 2, 0),
    (2, 2, 5),
    (3, 3, 1),
    (4, 5, 99),
    (5, 5, NULL),
    (6, 6, 2),
    (7, 7, 0);
"#;

/// 建表 + 示例数据
pub fn seeded_conn() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(QC_SCHEMA).unwrap();
    conn.execute_batch(SEED).unwrap();
    Arc::new(Mutex::new(conn))
}

/// 只建表
pub fn empty_conn() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(QC_SCHEMA).unwrap();
    Arc::new(Mutex::new(conn))
}
