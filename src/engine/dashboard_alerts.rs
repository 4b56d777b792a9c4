// ==========================================
// 库存运营看板 - 看板摘要引擎
// ==========================================
// 职责: KPI / 晨会清单 / 催货清单 / 最近活动
// 输入: 已派生的库存、订单、收货、生产记录
// ==========================================

use crate::domain::activity::{ProductionRecord, Receipt};
use crate::domain::dashboard::{ActivityItem, ExpediteItem, Kpi, MorningListItem};
use crate::domain::item::StockItem;
use crate::domain::order::{PurchaseOrder, SalesOrder};
use crate::domain::types::{ActivityType, ExpediteType, MorningListType, Severity, Trend};

/// 晨会清单: 每类信号最多条数
pub const MORNING_LIST_CAP_PER_KIND: usize = 3;
/// 催货清单最多条数
pub const EXPEDITE_CAP: usize = 10;
/// 最近活动: 每类记录取最后几条
pub const RECENT_ACTIVITY_PER_KIND: usize = 5;

const UNIT_LABEL: &str = "units";

fn last_n<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

fn kpi(id: &str, label: &str, value: f64, with_unit: bool) -> Kpi {
    Kpi {
        id: id.to_string(),
        label: label.to_string(),
        value,
        unit: with_unit.then(|| UNIT_LABEL.to_string()),
        trend: Trend::Neutral,
    }
}

// ==========================================
// DashboardAlertsEngine
// ==========================================
#[derive(Debug, Default)]
pub struct DashboardAlertsEngine;

impl DashboardAlertsEngine {
    pub fn new() -> Self {
        Self
    }

    /// KPI（固定 6 项，顺序固定）
    pub fn kpis(
        &self,
        stock_items: &[StockItem],
        purchase_orders: &[PurchaseOrder],
        sales_orders: &[SalesOrder],
    ) -> Vec<Kpi> {
        let total_available: f64 = stock_items.iter().map(|s| s.available).sum();
        let total_reserved: f64 = stock_items.iter().map(|s| s.reserved).sum();
        let incoming_14d: f64 = stock_items.iter().map(|s| s.incoming_14d).sum();
        let open_pos = purchase_orders.iter().filter(|p| p.lines_open > 0).count();
        let late_items = purchase_orders.iter().filter(|p| p.is_late).count();

        vec![
            kpi("available", "Available", total_available, true),
            kpi("reserved", "Reserved", total_reserved, true),
            kpi("incoming", "Incoming ≤14d", incoming_14d, true),
            kpi("open-pos", "Open POs", open_pos as f64, false),
            kpi("pending-orders", "Orders Pending", sales_orders.len() as f64, false),
            kpi("late-items", "Late Items", late_items as f64, false),
        ]
    }

    /// 晨会清单: 逾期采购在前，缺货物料在后，每类最多 3 条
    pub fn morning_list(
        &self,
        purchase_orders: &[PurchaseOrder],
        stock_items: &[StockItem],
    ) -> Vec<MorningListItem> {
        let overdue = purchase_orders
            .iter()
            .filter(|p| p.is_late)
            .take(MORNING_LIST_CAP_PER_KIND)
            .map(|p| MorningListItem {
                id: format!("po-{}", p.po_number),
                item_type: MorningListType::Overdue,
                severity: Severity::Critical,
                title: format!("{} overdue", p.po_number),
                description: format!("Vendor: {}", p.vendor),
                reference: p.po_number.clone(),
            });

        let stockouts = stock_items
            .iter()
            .filter(|s| s.available <= 0.0)
            .take(MORNING_LIST_CAP_PER_KIND)
            .map(|s| MorningListItem {
                id: format!("out-{}", s.sku),
                item_type: MorningListType::Stockout,
                severity: Severity::Critical,
                title: format!("{} out of stock", s.sku),
                description: s.description.clone(),
                reference: s.sku.clone(),
            });

        overdue.chain(stockouts).collect()
    }

    /// 催货清单: 逾期采购，最多 10 条
    pub fn expedite_items(&self, purchase_orders: &[PurchaseOrder]) -> Vec<ExpediteItem> {
        purchase_orders
            .iter()
            .filter(|p| p.is_late)
            .take(EXPEDITE_CAP)
            .enumerate()
            .map(|(i, p)| ExpediteItem {
                id: (i + 1).to_string(),
                item_type: ExpediteType::LatePo,
                severity: Severity::Critical,
                reference: p.po_number.clone(),
                description: format!("Vendor {}", p.vendor),
                days_late: Some(p.aging),
                gap: None,
            })
            .collect()
    }

    /// 最近活动: 最后 5 条收货 + 最后 5 条生产（保持源顺序）
    pub fn recent_activity(
        &self,
        receipts: &[Receipt],
        production: &[ProductionRecord],
    ) -> Vec<ActivityItem> {
        let receipt_items = last_n(receipts, RECENT_ACTIVITY_PER_KIND)
            .iter()
            .map(|r| ActivityItem {
                id: format!("rec-{}", r.id),
                item_type: ActivityType::Receipt,
                timestamp: format!("{}T00:00:00", r.date),
                description: format!("Received {}", r.po_number),
                sku: r.sku.clone(),
                qty: r.qty,
                reference: r.po_number.clone(),
            });

        let production_items = last_n(production, RECENT_ACTIVITY_PER_KIND)
            .iter()
            .map(|p| ActivityItem {
                id: format!("prod-{}", p.id),
                item_type: ActivityType::Production,
                timestamp: format!("{}T00:00:00", p.date),
                description: format!("Prod {}", p.line),
                sku: p.sku.clone(),
                qty: p.qty,
                reference: p.id.clone(),
            });

        receipt_items.chain(production_items).collect()
    }
}
