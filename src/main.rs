// ==========================================
// Spin QC 报表查询层 - 命令行入口
// ==========================================
// 开发工具: 按过滤条件打印仪表盘快照 (JSON)
//
// 用法:
//   spin-qc-reports [filter_json] [limit]
//   spin-qc-reports '{"start_date":"2025-01-01","fill_lines":["Fill-1"]}' 20
// ==========================================

use std::sync::Arc;

use anyhow::Context;
use spin_qc_reports::app::{commands, AppState};
use spin_qc_reports::{logging, ReportConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", spin_qc_reports::APP_NAME);
    tracing::info!("系统版本: {}", spin_qc_reports::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let filter_json = args.next();
    let limit = args
        .next()
        .map(|raw| raw.trim().parse::<usize>())
        .transpose()
        .context("limit 参数必须为正整数")?;

    let config = ReportConfig::load().context("加载报表配置失败")?;
    let state = Arc::new(AppState::new(config).context("初始化AppState失败")?);

    let snapshot = commands::load_dashboard(state, filter_json, limit)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("生成仪表盘快照失败")?;

    // 统一输出为格式化 JSON
    let value: serde_json::Value = serde_json::from_str(&snapshot)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
