// ==========================================
// 库存运营看板 - 核心库
// ==========================================
// 流程: Excel 工作簿 → 字段标准化 → 指标派生 → 快照 → 数据集输出
// 入口: 一次性生成 / 监听模式共用同一条导入流水线
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 工作簿定位与读取
pub mod importer;

// 引擎层 - 指标派生
pub mod engine;

// 输出层 - TypeScript / JSON 数据集
pub mod emitter;

// 配置层 - 运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配与监听
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    BomCapacityResult, DashboardSnapshot, PurchaseOrder, SalesOrder, StockItem,
};

pub use engine::IngestionPipeline;

pub use api::{ApiError, ApiResult, DashboardApi, PlanApi};

pub use importer::{ImportError, ImportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存运营看板";
