// ==========================================
// 库存运营看板 - 收货 / 生产 / 库存流水领域模型
// ==========================================

use crate::domain::types::MovementType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Receipt - 收货记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub date: String,
    pub po_number: String,
    pub vendor: String,
    pub sku: String,
    pub qty: f64,
    pub variance: f64,
    pub receiver: String,
    pub remarks: String,
}

// ==========================================
// ProductionRecord - 生产记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: String,
    pub date: String,
    pub line: String,
    pub sku: String,
    pub qty: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shift: String,
    pub item_name: String,
    pub qty_rejected: f64,
    pub reject_pct: f64,
    pub male: f64,   // 男工人数
    pub female: f64, // 女工人数
    pub operator: String,
}

// ==========================================
// InventoryMovement - 库存流水
// ==========================================
// 当前只用于派生“最后变动日期”，不用于重算在库数量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub sku: String,
    pub date: Option<NaiveDate>,
    pub movement_type: MovementType,
    pub qty_delta: f64,
    pub ref_type: String,
    pub ref_no: String,
    pub location: String,
}
