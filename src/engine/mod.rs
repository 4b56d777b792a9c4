// ==========================================
// 库存运营看板 - 引擎层
// ==========================================
// 职责: 由标准化记录派生库存 / 订单 / 看板指标
// 红线: 引擎不做 I/O（导入编排除外），派生结果每次全量重算
// ==========================================

pub mod bom_capacity;
pub mod dashboard_alerts;
pub mod ingestion;
pub mod order_aggregation;
pub mod placeholders;
pub mod stock_derivation;

// 重导出核心引擎
pub use bom_capacity::BomCapacityEngine;
pub use dashboard_alerts::DashboardAlertsEngine;
pub use ingestion::IngestionPipeline;
pub use order_aggregation::OrderAggregationEngine;
pub use stock_derivation::{ItemSources, StockDerivationEngine};
