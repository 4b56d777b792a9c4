// ==========================================
// 库存运营看板 - 数据快照
// ==========================================
// 职责: 一次导入产出的全部派生集合
// 红线: 所有集合来自同一次导入，不可新旧混合
// ==========================================

use crate::domain::activity::{ProductionRecord, Receipt};
use crate::domain::dashboard::{ActivityItem, ExpediteItem, Kpi, MorningListItem};
use crate::domain::item::{BomLine, StockItem};
use crate::domain::order::{PurchaseOrder, SalesOrder};
use crate::domain::sheet::RawRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DashboardSnapshot - 不可变快照
// ==========================================
// 导入完成后整体替换，不在原地修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub as_of: NaiveDate,
    #[serde(rename = "dashboardKPIs")]
    pub dashboard_kpis: Vec<Kpi>,
    pub morning_list_items: Vec<MorningListItem>,
    pub expedite_items: Vec<ExpediteItem>,
    pub recent_activity: Vec<ActivityItem>,
    pub sales_orders: Vec<SalesOrder>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub receipts: Vec<Receipt>,
    pub production_records: Vec<ProductionRecord>,
    pub stock_items: Vec<StockItem>,
    pub bom_lines: Vec<BomLine>,
    pub excel_debug: ExcelDebug,
}

impl DashboardSnapshot {
    /// 空快照（所有集合为空）
    pub fn empty(as_of: NaiveDate) -> Self {
        Self {
            generated_at: Utc::now(),
            as_of,
            dashboard_kpis: Vec::new(),
            morning_list_items: Vec::new(),
            expedite_items: Vec::new(),
            recent_activity: Vec::new(),
            sales_orders: Vec::new(),
            purchase_orders: Vec::new(),
            receipts: Vec::new(),
            production_records: Vec::new(),
            stock_items: Vec::new(),
            bom_lines: Vec::new(),
            excel_debug: ExcelDebug::default(),
        }
    }

    pub fn stock_item(&self, sku: &str) -> Option<&StockItem> {
        self.stock_items.iter().find(|s| s.sku == sku)
    }

    pub fn purchase_order(&self, po_number: &str) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|p| p.po_number == po_number)
    }
}

// ==========================================
// ExcelDebug - 诊断信息
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelDebug {
    pub data_dir: String,
    pub master_path: String,
    pub po_workbook: Option<String>,
    pub so_workbook: Option<String>,
    pub misc_workbook: Option<String>,
    /// 各工作表行数（含有效 BOM 行数）
    pub counts: BTreeMap<String, usize>,
    pub sample: DebugSample,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSample {
    pub finished_goods: Vec<RawRecord>,
    pub po_combined: Vec<RawRecord>,
    pub so_combined: Vec<RawRecord>,
}
