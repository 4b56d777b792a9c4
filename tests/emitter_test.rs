// ==========================================
// 数据集输出测试
// ==========================================
// 测试目标: 快照 → TypeScript 模块 / JSON 文档
// ==========================================

mod test_helpers;

use std::sync::Arc;

use inventory_ops::app::AppState;
use inventory_ops::config::DashboardConfig;
use inventory_ops::emitter::{DatasetEmitter, MODULE_HEADER};
use inventory_ops::engine::IngestionPipeline;
use inventory_ops::DashboardSnapshot;
use test_helpers::*;

#[test]
fn test_render_module_layout() {
    let scenario = ScenarioDir::standard();
    let snapshot = IngestionPipeline::with_calamine(scenario.path())
        .run(as_of())
        .unwrap();

    let module = DatasetEmitter::render_module(&snapshot).unwrap();
    let mut lines = module.lines();
    assert_eq!(lines.next(), Some(MODULE_HEADER));
    assert_eq!(
        lines.next(),
        Some(
            "import type { KPI, MorningListItem, ExpediteItem, ActivityItem, SalesOrder, \
             PurchaseOrder, Receipt, ProductionRecord, StockItem, BOMLine } from './types';"
        )
    );

    let exports: Vec<&str> = module
        .lines()
        .filter(|l| l.starts_with("export const "))
        .collect();
    assert_eq!(
        exports,
        vec![
            "export const dashboardKPIs: KPI[] = [",
            "export const morningListItems: MorningListItem[] = [",
            "export const expediteItems: ExpediteItem[] = [];",
            "export const recentActivity: ActivityItem[] = [",
            "export const salesOrders: SalesOrder[] = [",
            "export const purchaseOrders: PurchaseOrder[] = [",
            "export const receipts: Receipt[] = [",
            "export const productionRecords: ProductionRecord[] = [",
            "export const stockItems: StockItem[] = [",
            "export const bomLines: BOMLine[] = [",
            "export const excelDebug: any = {",
        ]
    );

    // 字段名与前端类型一致
    assert!(module.contains("\"poNumber\": \"6100765509\""));
    assert!(module.contains("\"percentReceived\": 100"));
    assert!(module.contains("\"status\": \"Out\""));
    assert!(module.contains("\"category\": \"Raw Materials\""));
    assert!(module.ends_with("};\n"));
}

#[test]
fn test_generate_writes_module_and_json() {
    let scenario = ScenarioDir::standard();
    let out_dir = tempfile::TempDir::new().unwrap();
    let module_path = out_dir.path().join("lib").join("data.ts");
    let json_path = out_dir.path().join("data.json");

    let state = AppState::new(DashboardConfig {
        data_dir: scenario.path().to_path_buf(),
        output: Some(module_path.clone()),
        json_output: Some(json_path.clone()),
        ..DashboardConfig::default()
    });
    let snapshot = state.generate(as_of()).unwrap();

    let module = std::fs::read_to_string(&module_path).unwrap();
    assert!(module.starts_with(MODULE_HEADER));

    let json = std::fs::read_to_string(&json_path).unwrap();
    let parsed: DashboardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_of, as_of());
    assert_eq!(parsed.stock_items, snapshot.stock_items);
    assert_eq!(parsed.purchase_orders, snapshot.purchase_orders);
    assert_eq!(parsed.production_records, snapshot.production_records);

    // 当前快照即本次输出的快照
    let current = state.dashboard_api.snapshot().unwrap();
    assert!(Arc::ptr_eq(&current, &snapshot));
}
