// ==========================================
// 库存运营看板 - 配置层
// ==========================================
// 职责: 运行配置加载（环境变量 + 默认值）
// ==========================================

pub mod dashboard_config;

// 重导出核心配置
pub use dashboard_config::{config_keys, is_debug_flag, DashboardConfig};
