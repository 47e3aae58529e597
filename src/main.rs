// ==========================================
// 施工进度数据导入系统 - 命令行入口
// ==========================================
// 用法:
//   progress-ingest [--config PATH] [--today DD-MM-YYYY] [--base-dir DIR] [--json-logs]
// 输出: PipelineOutput JSON（stdout）；日志写入 stderr
// ==========================================

use anyhow::{anyhow, bail, Context};
use chrono::{Local, NaiveDate};
use progress_ingest::config::PipelineConfigReader;
use progress_ingest::importer::normalize_date;
use progress_ingest::{
    logging, ConfigManager, FileSheetFetcher, IngestOrchestrator, PipelineOptions,
    TaskImporterImpl,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    today: Option<NaiveDate>,
    base_dir: Option<PathBuf>,
    json_logs: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or_else(|| anyhow!("--config 需要文件路径"))?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--today" => {
                let value = args.next().ok_or_else(|| anyhow!("--today 需要日期"))?;
                let date = normalize_date(&value)
                    .ok_or_else(|| anyhow!("无法识别的日期: {}（格式 DD-MM-YYYY）", value))?;
                parsed.today = Some(date);
            }
            "--base-dir" => {
                let value = args.next().ok_or_else(|| anyhow!("--base-dir 需要目录"))?;
                parsed.base_dir = Some(PathBuf::from(value));
            }
            "--json-logs" => parsed.json_logs = true,
            other => bail!("未知参数: {}", other),
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;

    // 初始化日志系统
    if args.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = progress_ingest::VERSION, "施工进度数据导入系统启动");

    // 加载配置（配置错误是唯一向调用方报告的错误）
    let config = ConfigManager::load(args.config.as_deref()).context("配置加载失败")?;
    let tab_name = config.get_tab_name().await?;

    let mut fetcher = FileSheetFetcher::new(&tab_name);
    if let Some(base_dir) = args.base_dir {
        fetcher = fetcher.with_base_dir(base_dir);
    }
    let importer = TaskImporterImpl::with_file_fetcher(fetcher);
    let orchestrator = IngestOrchestrator::new(Arc::new(config), Box::new(importer));

    // 时钟只在入口读取一次
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let output = orchestrator.run(PipelineOptions { today }).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
