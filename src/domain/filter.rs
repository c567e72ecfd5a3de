// ==========================================
// Spin QC 报表查询层 - 报表过滤条件
// ==========================================
// 口径:
// - 日期区间为 [start_date, end_date)，按 sample_set.collected 过滤
// - 名称列表为 None 表示不限；显式空列表视为非法过滤条件
// - reagent / standard 只作用于试剂失败报表
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 报表过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFilter {
    /// 开始日期（包含）
    pub start_date: Option<NaiveDate>,
    /// 结束日期（不包含）
    pub end_date: Option<NaiveDate>,
    /// 产品名称 (products.name)
    pub products: Option<Vec<String>>,
    /// 厂区名称 (locations.location_name)
    pub locations: Option<Vec<String>>,
    /// 灌装线显示名 (fill_lines.display)
    pub fill_lines: Option<Vec<String>>,
    /// 试剂名称 (reagent_fails.reagent)
    pub reagent: Option<String>,
    /// 标准名称 (standards.name)
    pub standard: Option<String>,
    /// 是否包含测试样本
    pub include_test_samples: bool,
}

/// 非法过滤条件（附带字段名，便于展示层提示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterViolation {
    pub filter: String,
    pub reason: String,
}

impl FilterViolation {
    pub fn new(filter: &str, reason: impl Into<String>) -> Self {
        Self {
            filter: filter.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FilterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.filter, self.reason)
    }
}

impl std::error::Error for FilterViolation {}

impl ReportFilter {
    /// 日期区间过滤
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    pub fn with_products<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.products = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_locations<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.locations = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fill_lines<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.fill_lines = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_reagent(mut self, reagent: impl Into<String>) -> Self {
        self.reagent = Some(reagent.into());
        self
    }

    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    /// 校验过滤条件
    ///
    /// # 返回
    /// - Ok(()): 合法
    /// - Err(FilterViolation): 第一个不合法的字段
    pub fn validate(&self) -> Result<(), FilterViolation> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start >= end {
                return Err(FilterViolation::new(
                    "date_range",
                    format!("开始日期 {} 必须早于结束日期 {}", start, end),
                ));
            }
        }

        validate_names("products", self.products.as_deref())?;
        validate_names("locations", self.locations.as_deref())?;
        validate_names("fill_lines", self.fill_lines.as_deref())?;

        if matches!(&self.reagent, Some(r) if r.trim().is_empty()) {
            return Err(FilterViolation::new("reagent", "试剂名称不能为空"));
        }
        if matches!(&self.standard, Some(s) if s.trim().is_empty()) {
            return Err(FilterViolation::new("standard", "标准名称不能为空"));
        }

        Ok(())
    }
}

fn validate_names(filter: &str, names: Option<&[String]>) -> Result<(), FilterViolation> {
    let Some(names) = names else {
        return Ok(());
    };
    if names.is_empty() {
        return Err(FilterViolation::new(filter, "至少选择一项"));
    }
    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(FilterViolation::new(filter, "名称不能为空"));
    }
    Ok(())
}
