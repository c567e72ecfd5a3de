// ==========================================
// Spin QC 报表查询层 - 报表配置
// ==========================================
// 职责: 配置加载与校验，支持两级覆写
// 优先级: 环境变量 > 配置文件 (SPIN_QC_CONFIG) > 默认值
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_FILE: &str = "SPIN_QC_CONFIG";
    /// 数据库文件路径
    pub const DB_PATH: &str = "SPIN_QC_DB_PATH";
    /// SQLite busy_timeout (毫秒)
    pub const BUSY_TIMEOUT_MS: &str = "SPIN_QC_BUSY_TIMEOUT_MS";
    /// 样本明细默认行数
    pub const DETAIL_LIMIT: &str = "SPIN_QC_DETAIL_LIMIT";
}

/// 样本明细默认行数
pub const DEFAULT_DETAIL_LIMIT: usize = 100;

/// 样本明细行数上限
pub const MAX_DETAIL_LIMIT: usize = 1000;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值非法: {key}={value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// 报表配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 数据库文件路径（None 时使用用户数据目录下的默认路径）
    pub db_path: Option<String>,

    /// SQLite busy_timeout (毫秒)
    pub busy_timeout_ms: u64,

    /// 样本明细默认行数
    pub default_detail_limit: usize,

    /// 样本明细行数上限
    pub max_detail_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            default_detail_limit: DEFAULT_DETAIL_LIMIT,
            max_detail_limit: MAX_DETAIL_LIMIT,
        }
    }
}

impl ReportConfig {
    /// 加载配置：配置文件（若 SPIN_QC_CONFIG 已设置）+ 环境变量覆写
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(config_keys::CONFIG_FILE) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::info!(
            db_path = ?config.db_path,
            busy_timeout_ms = config.busy_timeout_ms,
            default_detail_limit = config.default_detail_limit,
            max_detail_limit = config.max_detail_limit,
            "报表配置已加载"
        );
        Ok(config)
    }

    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// 按键查询覆写值并应用（空白值视为未设置）
    ///
    /// # 参数
    /// - lookup: 键 → 值，生产环境为 `std::env::var`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(path) = get(config_keys::DB_PATH) {
            self.db_path = Some(path);
        }
        if let Some(raw) = get(config_keys::BUSY_TIMEOUT_MS) {
            self.busy_timeout_ms = parse_number(config_keys::BUSY_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = get(config_keys::DETAIL_LIMIT) {
            self.default_detail_limit = parse_number(config_keys::DETAIL_LIMIT, &raw)?;
        }
        Ok(())
    }

    /// 校验行数上下限
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_detail_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_detail_limit".to_string(),
                value: self.max_detail_limit.to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.default_detail_limit == 0 || self.default_detail_limit > self.max_detail_limit {
            return Err(ConfigError::InvalidValue {
                key: "default_detail_limit".to_string(),
                value: self.default_detail_limit.to_string(),
                reason: format!("必须在 1..={} 之间", self.max_detail_limit),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
