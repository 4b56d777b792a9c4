// ==========================================
// 库存运营看板 - 订单领域模型
// ==========================================
// 职责: 采购/销售合并明细行 + 派生的销售订单 / 采购订单视图
// ==========================================

use crate::domain::types::Priority;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderSide - 合并明细行的方向
// ==========================================
// 采购与销售共用同一列布局：
// - counterparty 在采购侧为供应商，在销售侧为客户
// - order_number 在采购侧为 PO 号，在销售侧为 SO 号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Purchase,
    Sales,
}

// ==========================================
// CombinedOrderLine - 标准化的采购/销售明细行
// ==========================================
// 来源: AI 发票抽取后合并的 PO_Combined / SO_Combined 工作表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedOrderLine {
    pub side: OrderSide,
    pub file_name: String,
    pub file_link: String,
    pub counterparty: String,
    pub invoice_id: String,
    pub order_number: String,
    pub invoice_date: String,        // 发票日期（YYYY-MM-DD，无法解析时为空）
    pub order_date: String,          // PO-date / SO-date（YYYY-MM-DD，无法解析时为空）
    pub product_description: String,
    pub product_code: String,
    pub sku: String,                 // part no. 优先，缺省回退 ProductCode
    pub quantity: f64,
    pub qty_ordered: f64,            // 标准化抽取中通常不存在，默认 0
    pub unit: String,
}

// ==========================================
// SalesOrder - 销售订单视图（一行明细一条，不按单号分组）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: String,
    pub so_number: String,
    pub customer: String,
    pub promise_date: String,
    pub priority: Priority,
    pub sku: String,
    pub qty_ordered: f64,
    pub allocated: f64,
    pub gap: f64,
    pub coverage_percent: i64,
    pub age: i64,
}

// ==========================================
// PurchaseOrder - 采购订单视图（按 PO 号分组汇总）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: String,
    pub po_number: String,
    pub vendor: String,
    pub due_date: String,
    pub lines_open: usize,
    pub ordered: f64,
    pub received: f64,
    pub percent_received: i64,
    pub last_receipt: Option<String>,
    pub aging: i64,
    pub is_late: bool,
}
