// ==========================================
// Spin QC 报表查询层 - SQL 性能统计
// ==========================================
// 职责: 报表查询的 SQL 计数与慢查询日志
// 开关:
// - SPIN_QC_PERF_SQL=1 强制开启（Debug 默认开启，Release 默认关闭）
// - SPIN_QC_SLOW_SQL_MS=50 慢 SQL 阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static PERF_SQL_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static REPORT_DEPTH: Cell<u32> = Cell::new(0);
    static SQL_COUNT: Cell<u64> = Cell::new(0);
    static SLOW_SQL_COUNT: Cell<u64> = Cell::new(0);
}

/// SQL 统计开关（从环境变量解析）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlPerfSettings {
    pub enabled: bool,
    pub slow_sql_ms: u64,
}

impl SqlPerfSettings {
    /// 从环境变量读取
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("SPIN_QC_PERF_SQL").ok().as_deref(),
            std::env::var("SPIN_QC_SLOW_SQL_MS").ok().as_deref(),
        )
    }

    fn from_values(enabled: Option<&str>, slow_ms: Option<&str>) -> Self {
        let enabled = match enabled {
            Some(v) => is_true(v),
            None => cfg!(debug_assertions),
        };
        let slow_sql_ms = slow_ms
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
        Self { enabled, slow_sql_ms }
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 折叠为单行并截断（按字符截断，避免切断多字节字符）
fn compact_sql(sql: &str, max_chars: usize) -> String {
    let single_line = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut truncated: String = single_line.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

/// 安装 SQLite 语句 trace/profile
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let settings = SqlPerfSettings::from_env();
    PERF_SQL_ENABLED.store(settings.enabled, Ordering::Relaxed);

    if !settings.enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    SLOW_SQL_THRESHOLD_MS.store(settings.slow_sql_ms, Ordering::Relaxed);
    conn.trace(Some(sql_trace_callback));
    conn.profile(Some(sql_profile_callback));
}

fn sql_trace_callback(_sql: &str) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }
    if REPORT_DEPTH.with(|d| d.get() == 0) {
        return;
    }
    SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
}

fn sql_profile_callback(sql: &str, duration: Duration) {
    if !PERF_SQL_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(
        target: "slow_sql",
        duration_ms = ms,
        sql = %compact_sql(sql, 420),
        "报表查询较慢"
    );
    if REPORT_DEPTH.with(|d| d.get() > 0) {
        SLOW_SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 单次报表请求的性能 Guard：记录 elapsed_ms + SQL 语句数 + 慢 SQL 数
///
/// ```ignore
/// let _perf = spin_qc_reports::perf::ReportPerfGuard::new("summary_metrics");
/// ```
pub struct ReportPerfGuard {
    report: &'static str,
    start: Instant,
    sql_start: u64,
    slow_sql_start: u64,
}

impl ReportPerfGuard {
    pub fn new(report: &'static str) -> Self {
        REPORT_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            report,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
            slow_sql_start: SLOW_SQL_COUNT.with(|c| c.get()),
        }
    }
}

impl Drop for ReportPerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start);
        let slow_sql_count = SLOW_SQL_COUNT
            .with(|c| c.get())
            .saturating_sub(self.slow_sql_start);

        tracing::debug!(
            target: "perf",
            report = self.report,
            elapsed_ms,
            sql_count,
            slow_sql_count,
            "报表查询完成"
        );

        REPORT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_explicit_values() {
        let s = SqlPerfSettings::from_values(Some("on"), Some(" 75 "));
        assert!(s.enabled);
        assert_eq!(s.slow_sql_ms, 75);

        let s = SqlPerfSettings::from_values(Some("0"), Some("abc"));
        assert!(!s.enabled);
        assert!(s.slow_sql_ms == 50 || s.slow_sql_ms == 200);
    }

    #[test]
    fn test_compact_sql_collapses_whitespace() {
        let sql = "SELECT *\n    FROM sample_set\n   WHERE is_test = 0";
        assert_eq!(compact_sql(sql, 100), "SELECT * FROM sample_set WHERE is_test = 0");
    }

    #[test]
    fn test_compact_sql_truncates_on_char_boundary() {
        let sql = "SELECT '合格' FROM t";
        let out = compact_sql(sql, 9);
        assert_eq!(out, "SELECT '合…");
    }

    #[test]
    fn test_guard_restores_depth() {
        {
            let _outer = ReportPerfGuard::new("outer");
            let _inner = ReportPerfGuard::new("inner");
            assert_eq!(REPORT_DEPTH.with(|d| d.get()), 2);
        }
        assert_eq!(REPORT_DEPTH.with(|d| d.get()), 0);
    }
}
