// ==========================================
// 库存运营看板 - 订单汇总引擎
// ==========================================
// 销售: 每条 SO_Combined 明细一条销售订单（不分组）
// 采购: PO_Combined 明细按 PO 号分组，组按首次出现顺序
// ==========================================

use crate::domain::order::{CombinedOrderLine, PurchaseOrder, SalesOrder};
use crate::engine::placeholders::{
    ALLOCATED_NOT_YET_COMPUTED, DEFAULT_SALES_PRIORITY, IS_LATE_NOT_YET_COMPUTED,
};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::instrument;

/// 距今天数（不小于 0），日期为空或无法解析时按今天计
pub fn days_since(date: &str, today: NaiveDate) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| (today - d).num_days().max(0))
        .unwrap_or(0)
}

/// 百分比取整（四舍五入）
fn round_percent(part: f64, whole: f64) -> i64 {
    ((part / whole) * 100.0).round() as i64
}

// 采购订单分组累加器
struct PoGroup {
    po_number: String,
    vendor: String,
    due_date: String,
    order_date: String,
    lines_open: usize,
    ordered: f64,
    received: f64,
    last_receipt: Option<String>,
}

// ==========================================
// OrderAggregationEngine
// ==========================================
#[derive(Debug, Default)]
pub struct OrderAggregationEngine;

impl OrderAggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 销售订单派生
    ///
    /// - gap = max(0, ordered - allocated)
    /// - coverage = ordered 为 0 时取 0，否则 round(allocated / ordered * 100)
    /// - 承诺日期取 SO-date，其次 InvoiceDate
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub fn derive_sales_orders(
        &self,
        lines: &[CombinedOrderLine],
        today: NaiveDate,
    ) -> Vec<SalesOrder> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let qty_ordered = line.quantity;
                let allocated = ALLOCATED_NOT_YET_COMPUTED;
                let coverage_percent = if qty_ordered == 0.0 {
                    0
                } else {
                    round_percent(allocated, qty_ordered)
                };
                let promise_date = if line.order_date.is_empty() {
                    line.invoice_date.clone()
                } else {
                    line.order_date.clone()
                };

                SalesOrder {
                    id: (i + 1).to_string(),
                    so_number: line.order_number.clone(),
                    customer: line.counterparty.clone(),
                    age: days_since(&promise_date, today),
                    promise_date,
                    priority: DEFAULT_SALES_PRIORITY,
                    sku: line.sku.clone(),
                    qty_ordered,
                    allocated,
                    gap: (qty_ordered - allocated).max(0.0),
                    coverage_percent,
                }
            })
            .collect()
    }

    /// 采购订单派生
    ///
    /// - 供应商 / 交期 / 下单日期取组内首行
    /// - received = Σ Quantity，ordered = Σ QtyOrdered，lines_open = 行数
    /// - 最近收货日期取组内 InvoiceDate 最大值
    #[instrument(skip_all, fields(lines = lines.len()))]
    pub fn derive_purchase_orders(
        &self,
        lines: &[CombinedOrderLine],
        today: NaiveDate,
    ) -> Vec<PurchaseOrder> {
        let mut groups: Vec<PoGroup> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for line in lines {
            let po = line.order_number.trim();
            if po.is_empty() {
                continue;
            }

            let slot = *index.entry(po.to_string()).or_insert_with(|| {
                groups.push(PoGroup {
                    po_number: po.to_string(),
                    vendor: line.counterparty.clone(),
                    due_date: line.order_date.clone(),
                    order_date: line.invoice_date.clone(),
                    lines_open: 0,
                    ordered: 0.0,
                    received: 0.0,
                    last_receipt: None,
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.received += line.quantity;
            group.ordered += line.qty_ordered;
            group.lines_open += 1;
            if !line.invoice_date.is_empty()
                && group
                    .last_receipt
                    .as_deref()
                    .map_or(true, |cur| cur < line.invoice_date.as_str())
            {
                group.last_receipt = Some(line.invoice_date.clone());
            }
        }

        groups
            .into_iter()
            .enumerate()
            .map(|(i, g)| {
                let percent_received = if g.ordered > 0.0 {
                    round_percent(g.received, g.ordered)
                } else if g.received > 0.0 {
                    100
                } else {
                    0
                };

                PurchaseOrder {
                    id: (i + 1).to_string(),
                    aging: days_since(&g.order_date, today),
                    po_number: g.po_number,
                    vendor: g.vendor,
                    due_date: g.due_date,
                    lines_open: g.lines_open,
                    ordered: g.ordered,
                    received: g.received,
                    percent_received,
                    last_receipt: g.last_receipt,
                    is_late: IS_LATE_NOT_YET_COMPUTED,
                }
            })
            .collect()
    }
}
