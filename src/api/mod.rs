// ==========================================
// 库存运营看板 - API 层
// ==========================================
// 职责: 供命令行与监听模式调用的业务接口
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod plan_api;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use plan_api::PlanApi;
