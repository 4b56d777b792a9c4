// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use crate::config::DashboardConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤器
///
/// EXCEL_DEBUG=1|true 时本 crate 提升到 debug
pub fn default_filter(excel_debug: bool) -> String {
    if excel_debug {
        "info,inventory_ops=debug".to_string()
    } else {
        "info".to_string()
    }
}

/// 初始化日志系统
///
/// # 过滤器来源
/// - RUST_LOG: 日志级别过滤器（优先）
///   例如: RUST_LOG=debug 或 RUST_LOG=inventory_ops=trace
/// - config.excel_debug: 未设置 RUST_LOG 时输出工作表级诊断日志
///
/// # 示例
/// ```no_run
/// use inventory_ops::config::DashboardConfig;
/// use inventory_ops::logging;
/// logging::init(&DashboardConfig::from_env());
/// ```
pub fn init(config: &DashboardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config.excel_debug)));

    // try_init: watch 子命令与测试可能重复调用
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .try_init();
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
