// ==========================================
// 库存运营看板 - 命令行入口
// ==========================================
// 子命令:
// - generate     一次性导入并输出数据集
// - watch        监听数据目录，变化时重新生成
// - save-plan    追加排产计划到 Production.xlsx
// - bom-capacity 查询父件最大可生产量
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use inventory_ops::app::{today, AppState, WorkbookWatcher};
use inventory_ops::config::{config_keys, DashboardConfig};
use inventory_ops::domain::plan::{PlanRow, SavePlanRequest};
use inventory_ops::logging;

#[derive(Parser)]
#[command(name = "inventory-ops")]
#[command(author, version, about = "库存运营看板 - Excel 工作簿导入与数据集生成")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// 工作簿所在目录
    #[arg(long, global = true, env = config_keys::EXCEL_DATA_DIR)]
    data_dir: Option<PathBuf>,

    /// TypeScript 数据模块输出路径
    #[arg(long, global = true, env = config_keys::DASHBOARD_OUTPUT)]
    output: Option<PathBuf>,

    /// JSON 文档输出路径
    #[arg(long, global = true, env = config_keys::DASHBOARD_JSON_OUTPUT)]
    json_output: Option<PathBuf>,

    /// 排产计划工作簿文件名
    #[arg(long, global = true, env = config_keys::PRODUCTION_PLAN_FILE)]
    plan_file: Option<String>,

    /// 账龄计算基准日期（YYYY-MM-DD，默认今天）
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// 导入工作簿并输出数据集
    Generate,

    /// 监听数据目录，工作簿变化时重新生成
    Watch {
        /// 轮询间隔（毫秒）
        #[arg(long, env = config_keys::DASHBOARD_WATCH_INTERVAL_MS)]
        interval_ms: Option<u64>,
    },

    /// 追加排产计划
    SavePlan {
        /// 计划行 JSON 文件（数组或 {"rows": [...]})
        #[arg(long)]
        rows: PathBuf,
    },

    /// 查询父件最大可生产量
    BomCapacity {
        /// 父件 SKU
        sku: String,
    },
}

impl GlobalOpts {
    fn apply(&self, mut config: DashboardConfig) -> DashboardConfig {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(json) = &self.json_output {
            config.json_output = Some(json.clone());
        }
        if let Some(plan_file) = &self.plan_file {
            config.plan_file = plan_file.clone();
        }
        config
    }
}

fn read_plan_request(path: &PathBuf) -> Result<SavePlanRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取计划文件: {}", path.display()))?;

    // 同时接受裸数组
    if let Ok(rows) = serde_json::from_str::<Vec<PlanRow>>(&text) {
        return Ok(SavePlanRequest { rows });
    }
    serde_json::from_str(&text).with_context(|| format!("计划文件格式无效: {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = cli.global.apply(DashboardConfig::from_env());
    logging::init(&config);
    let as_of = cli.global.today.unwrap_or_else(today);

    tracing::info!("库存运营看板 v{}", inventory_ops::VERSION);

    match cli.command {
        Commands::Generate => {
            let state = AppState::new(config);
            let snapshot = state.generate(as_of)?;
            tracing::info!(
                stock_items = snapshot.stock_items.len(),
                purchase_orders = snapshot.purchase_orders.len(),
                sales_orders = snapshot.sales_orders.len(),
                "生成完成"
            );
        }
        Commands::Watch { interval_ms } => {
            if let Some(ms) = interval_ms.filter(|ms| *ms > 0) {
                config.watch_interval = std::time::Duration::from_millis(ms);
            }
            let state = Arc::new(AppState::new(config));
            let runtime = tokio::runtime::Runtime::new().context("无法创建 tokio 运行时")?;
            runtime.block_on(async move {
                let shutdown = async {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        tracing::warn!(error = %e, "无法监听 Ctrl-C");
                        std::future::pending::<()>().await;
                    }
                };
                WorkbookWatcher::new(state).run_until(shutdown).await;
            });
        }
        Commands::SavePlan { rows } => {
            let request = read_plan_request(&rows)?;
            let state = AppState::new(config);
            let response = state.plan_api.save_plan(&request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::BomCapacity { sku } => {
            let state = AppState::new(config);
            state.dashboard_api.refresh(as_of)?;
            let result = state.dashboard_api.compute_bom_capacity(&sku)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
