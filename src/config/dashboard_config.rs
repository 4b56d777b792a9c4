// ==========================================
// 库存运营看板 - 运行配置
// ==========================================
// 来源优先级: 命令行参数 > 环境变量 > 默认值
// ==========================================

use std::path::PathBuf;
use std::time::Duration;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    // 数据源
    pub const EXCEL_DATA_DIR: &str = "EXCEL_DATA_DIR";
    pub const PRODUCTION_PLAN_FILE: &str = "PRODUCTION_PLAN_FILE";

    // 输出
    pub const DASHBOARD_OUTPUT: &str = "DASHBOARD_OUTPUT";
    pub const DASHBOARD_JSON_OUTPUT: &str = "DASHBOARD_JSON_OUTPUT";

    // 诊断
    pub const EXCEL_DEBUG: &str = "EXCEL_DEBUG";

    // 热加载
    pub const DASHBOARD_WATCH_INTERVAL_MS: &str = "DASHBOARD_WATCH_INTERVAL_MS";
}

pub const DEFAULT_DATA_DIR: &str = "./data/connected-workbooks";
pub const DEFAULT_OUTPUT: &str = "./src/lib/data.ts";
pub const DEFAULT_PLAN_FILE: &str = "Production.xlsx";
pub const DEFAULT_WATCH_INTERVAL_MS: u64 = 1000;

/// 诊断开关: 仅 "1" / "true" 视为开启
pub fn is_debug_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}

// ==========================================
// DashboardConfig
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    /// TypeScript 数据模块输出路径
    pub output: Option<PathBuf>,
    /// JSON 文档输出路径
    pub json_output: Option<PathBuf>,
    pub excel_debug: bool,
    pub watch_interval: Duration,
    /// 排产计划工作簿文件名（位于数据目录下）
    pub plan_file: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output: Some(PathBuf::from(DEFAULT_OUTPUT)),
            json_output: None,
            excel_debug: false,
            watch_interval: Duration::from_millis(DEFAULT_WATCH_INTERVAL_MS),
            plan_file: DEFAULT_PLAN_FILE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（空值视为未设置）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let watch_interval = get(config_keys::DASHBOARD_WATCH_INTERVAL_MS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.watch_interval);

        Self {
            data_dir: get(config_keys::EXCEL_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            output: get(config_keys::DASHBOARD_OUTPUT)
                .map(PathBuf::from)
                .or(defaults.output),
            json_output: get(config_keys::DASHBOARD_JSON_OUTPUT).map(PathBuf::from),
            excel_debug: get(config_keys::EXCEL_DEBUG)
                .map(|v| is_debug_flag(&v))
                .unwrap_or(false),
            watch_interval,
            plan_file: get(config_keys::PRODUCTION_PLAN_FILE).unwrap_or(defaults.plan_file),
        }
    }

    /// 排产计划工作簿完整路径
    pub fn plan_path(&self) -> PathBuf {
        self.data_dir.join(&self.plan_file)
    }
}
