// ==========================================
// Spin QC 报表查询层 - 样本范围 CTE
// ==========================================
// 职责: 把 ReportFilter 翻译为所有报表共用的样本范围
//
// filtered_samples  过滤后的样本（已解析产品/厂区/灌装线显示名）
// latest_approvals  每个样本时间最新的一次审批（同时间取 approval_id 最大者）
// scoped_samples    样本 + 最新审批的 approval_id / state + 月份
//
// 时间列一律经 datetime() 归一为 UTC 的 "YYYY-MM-DD HH:MM:SS"，
// 带时区偏移、T 分隔符或只有日期的取值都按同一口径比较和排序
// ==========================================

use crate::domain::ReportFilter;
use crate::report::common::db_utils::{build_in_clause, text_values};
use rusqlite::types::Value;

/// 已判定样本（合格或不合格）的条件，作用于 scoped_samples
pub const DECIDED_SAMPLES: &str = "state IN (1, 3)";

/// 归一化后的采样时间
pub const COLLECTED_EXPR: &str = "datetime(s.collected)";

/// 合格计数表达式
pub const PASS_COUNT_EXPR: &str = "SUM(CASE WHEN state = 1 THEN 1 ELSE 0 END)";

/// 不合格计数表达式
pub const FAIL_COUNT_EXPR: &str = "SUM(CASE WHEN state = 3 THEN 1 ELSE 0 END)";

/// 样本范围（CTE 文本 + 绑定参数）
#[derive(Debug, Clone, PartialEq)]
pub struct SampleScope {
    cte: String,
    params: Vec<Value>,
}

impl SampleScope {
    /// 由过滤条件构建样本范围
    ///
    /// 调用前应已通过 `ReportFilter::validate`。日期以 `YYYY-MM-DD` 文本绑定，
    /// 与归一化后的 `collected` 按字典序比较，因此结束日期当天不被包含。
    pub fn from_filter(filter: &ReportFilter) -> Self {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if !filter.include_test_samples {
            conditions.push("COALESCE(s.is_test, 0) = 0".to_string());
        }

        if let Some(start) = filter.start_date {
            conditions.push(format!("{} >= ?", COLLECTED_EXPR));
            params.push(Value::Text(start.format("%Y-%m-%d").to_string()));
        }

        if let Some(end) = filter.end_date {
            conditions.push(format!("{} < ?", COLLECTED_EXPR));
            params.push(Value::Text(end.format("%Y-%m-%d").to_string()));
        }

        let name_filters = [
            ("p.name", filter.products.as_deref()),
            ("l.location_name", filter.locations.as_deref()),
            ("f.display", filter.fill_lines.as_deref()),
        ];
        for (column, names) in name_filters {
            if let Some(names) = names {
                conditions.push(build_in_clause(column, names));
                params.extend(text_values(names));
            }
        }

        let where_sql = if conditions.is_empty() {
            "1 = 1".to_string()
        } else {
            conditions.join(" AND ")
        };

        let cte = format!(
            r#"WITH filtered_samples AS (
                SELECT
                    s.sample_set_id,
                    {COLLECTED_EXPR} AS collected,
                    p.name AS product_name,
                    l.location_name,
                    f.display AS fill_display
                FROM sample_set s
                JOIN products p ON p.product_id = s.product_id
                JOIN locations l ON l.location_id = s.location_id
                JOIN fill_lines f ON f.fill_line_id = s.fill_id
                WHERE {where_sql}
            ),
            latest_approvals AS (
                SELECT approval_id, sample_set_id, state
                FROM (
                    SELECT
                        a.approval_id,
                        a.sample_set_id,
                        a.state,
                        ROW_NUMBER() OVER (
                            PARTITION BY a.sample_set_id
                            ORDER BY datetime(a.timestamp) DESC, a.approval_id DESC
                        ) AS rn
                    FROM approvals a
                    JOIN filtered_samples fs ON fs.sample_set_id = a.sample_set_id
                )
                WHERE rn = 1
            ),
            scoped_samples AS (
                SELECT
                    fs.sample_set_id,
                    fs.collected,
                    strftime('%Y-%m', fs.collected) AS month,
                    fs.product_name,
                    fs.location_name,
                    fs.fill_display,
                    la.approval_id,
                    la.state
                FROM filtered_samples fs
                LEFT JOIN latest_approvals la ON la.sample_set_id = fs.sample_set_id
            )"#
        );

        Self { cte, params }
    }

    /// CTE 文本（以 WITH 开头，定义 scoped_samples）
    pub fn cte(&self) -> &str {
        &self.cte
    }

    /// CTE 中占位符对应的绑定参数
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}
