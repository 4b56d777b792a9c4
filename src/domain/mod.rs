// ==========================================
// 库存运营看板 - 领域层
// ==========================================
// 职责: 实体与值类型定义，不包含 I/O
// ==========================================

pub mod activity;
pub mod dashboard;
pub mod item;
pub mod order;
pub mod plan;
pub mod sheet;
pub mod snapshot;
pub mod types;

// 重导出核心类型
pub use activity::{InventoryMovement, ProductionRecord, Receipt};
pub use dashboard::{ActivityItem, ExpediteItem, Kpi, MorningListItem};
pub use item::{BomBottleneck, BomCapacityResult, BomLine, Item, StockItem};
pub use order::{CombinedOrderLine, OrderSide, PurchaseOrder, SalesOrder};
pub use plan::{PlanRow, SavePlanRequest, SavePlanResponse};
pub use sheet::{CellValue, RawRecord};
pub use snapshot::{DashboardSnapshot, DebugSample, ExcelDebug};
pub use types::{
    ActivityType, ExpediteType, MorningListType, MovementType, Priority, Severity,
    StockCategory, StockStatus, Trend,
};
