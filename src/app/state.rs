// ==========================================
// Spin QC 报表查询层 - 应用状态
// ==========================================
// 职责: 打开只读连接、校验 schema、装配所有 API 实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{ApiResult, DashboardApi};
use crate::config::{config_keys, ReportConfig};
use crate::db::{find_missing_tables, open_readonly_connection};
use crate::report::api::{build_report_api, ReportApiImpl};
use crate::repository::{DimensionRepository, RepositoryError};

/// 应用状态
///
/// 包含所有 API 实例和共享连接，供 app::commands 与二进制入口使用
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 生效的报表配置
    pub config: ReportConfig,

    /// 报表 API
    pub report_api: Arc<ReportApiImpl>,

    /// 仪表盘 API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的 AppState 实例
    ///
    /// # 返回
    /// - Ok(AppState)
    /// - Err(ApiError::ConnectionError): 数据库文件不可打开
    /// - Err(ApiError::QueryError): 数据库缺少 QC 数据表
    pub fn new(config: ReportConfig) -> ApiResult<Self> {
        let db_path = config.db_path.clone().unwrap_or_else(get_default_db_path);
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_readonly_connection(&db_path, config.busy_timeout_ms)
            .map_err(RepositoryError::from)?;

        Self::from_connection(db_path, conn, config)
    }

    /// 从已打开的连接创建（连接应已配置为只读）
    pub fn from_connection(
        db_path: String,
        conn: Connection,
        config: ReportConfig,
    ) -> ApiResult<Self> {
        let missing = find_missing_tables(&conn).map_err(RepositoryError::from)?;
        if !missing.is_empty() {
            tracing::error!(missing = ?missing, "数据库缺少 QC 数据表");
            return Err(
                RepositoryError::SchemaMismatch(format!("缺少数据表: {}", missing.join(", "))).into(),
            );
        }

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化 Report 层 (R1-R7)
        // ==========================================
        let report_api = Arc::new(build_report_api(conn.clone()));
        let dimension_repo = Arc::new(DimensionRepository::new(conn));

        // ==========================================
        // 初始化 API 层
        // ==========================================
        let dashboard_api = Arc::new(DashboardApi::new(
            report_api.clone(),
            dimension_repo,
            config.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            config,
            report_api,
            dashboard_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: SPIN_QC_DB_PATH > 用户数据目录/spin-qc-reports/spin_qc.db > ./spin_qc.db
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(config_keys::DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let path = match dirs::data_dir() {
        Some(data_dir) => data_dir.join("spin-qc-reports").join("spin_qc.db"),
        None => PathBuf::from("./spin_qc.db"),
    };
    path.to_string_lossy().to_string()
}
