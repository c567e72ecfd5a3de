// ==========================================
// Spin QC 报表查询层 - SQL 构建工具模块
// ==========================================
// 职责: 报表 SQL 的流式构建（CTE 范围 + 条件 + 分组 + 排序 + 限制）
// 约束: 取值一律作为绑定参数收集，SQL 文本中只出现占位符
// ==========================================

use crate::report::common::scope::SampleScope;
use rusqlite::types::Value;

/// SQL 查询构建器（流式 API）
///
/// 绑定参数的顺序与占位符在最终 SQL 中出现的顺序一致：
/// 先是样本范围 CTE 的参数，再是 WHERE 条件的参数。
///
/// # 示例
/// ```
/// use spin_qc_reports::report::common::sql_builder::SqlQueryBuilder;
/// use rusqlite::types::Value;
///
/// let (sql, params) = SqlQueryBuilder::new("SELECT reagent, COUNT(*) FROM reagent_fails")
///     .where_param("reagent = ?", Value::Text("ALB".to_string()))
///     .group_by("reagent")
///     .order_by("COUNT(*) DESC")
///     .limit(10)
///     .build();
///
/// assert_eq!(
///     sql,
///     "SELECT reagent, COUNT(*) FROM reagent_fails WHERE reagent = ? GROUP BY reagent ORDER BY COUNT(*) DESC LIMIT 10"
/// );
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    with_clause: Option<String>,
    select_clause: String,
    where_clauses: Vec<String>,
    group_by_clause: Option<String>,
    order_by_clause: Option<String>,
    limit_clause: Option<usize>,
    scope_params: Vec<Value>,
    where_params: Vec<Value>,
}

impl SqlQueryBuilder {
    /// 创建新的 SQL 查询构建器
    pub fn new(select: &str) -> Self {
        Self {
            with_clause: None,
            select_clause: select.trim().to_string(),
            where_clauses: Vec::new(),
            group_by_clause: None,
            order_by_clause: None,
            limit_clause: None,
            scope_params: Vec::new(),
            where_params: Vec::new(),
        }
    }

    /// 在 SELECT 之前挂载样本范围 CTE
    pub fn with_scope(mut self, scope: &SampleScope) -> Self {
        self.with_clause = Some(scope.cte().to_string());
        self.scope_params = scope.params().to_vec();
        self
    }

    /// 添加无参数的 WHERE 条件
    pub fn where_clause(mut self, condition: &str) -> Self {
        self.where_clauses.push(condition.to_string());
        self
    }

    /// 添加带单个参数的 WHERE 条件
    pub fn where_param(mut self, condition: &str, value: Value) -> Self {
        self.where_clauses.push(condition.to_string());
        self.where_params.push(value);
        self
    }

    /// 条件添加带参数的 WHERE 条件（None 时忽略）
    pub fn and_param_if(self, condition: &str, value: Option<Value>) -> Self {
        match value {
            Some(v) => self.where_param(condition, v),
            None => self,
        }
    }

    /// 添加 GROUP BY 子句
    pub fn group_by(mut self, columns: &str) -> Self {
        self.group_by_clause = Some(columns.to_string());
        self
    }

    /// 添加 ORDER BY 子句
    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by_clause = Some(order.to_string());
        self
    }

    /// 添加 LIMIT 子句
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_clause = Some(n);
        self
    }

    /// 构建最终的 SQL 语句与绑定参数
    pub fn build(self) -> (String, Vec<Value>) {
        let mut sql = String::new();

        if let Some(with) = &self.with_clause {
            sql.push_str(with);
            sql.push(' ');
        }

        sql.push_str(&self.select_clause);

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if let Some(group) = &self.group_by_clause {
            sql.push_str(" GROUP BY ");
            sql.push_str(group);
        }

        if let Some(order) = &self.order_by_clause {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        if let Some(limit) = self.limit_clause {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut params = self.scope_params;
        params.extend(self.where_params);
        (sql, params)
    }
}
