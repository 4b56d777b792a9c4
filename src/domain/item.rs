// ==========================================
// 库存运营看板 - 物料与 BOM 领域模型
// ==========================================
// 职责: 物料主数据 / BOM 行 / 库存派生视图
// 用途: 导入层写入，引擎层只读
// ==========================================

use crate::domain::types::{StockCategory, StockStatus};
use serde::{Deserialize, Serialize};

// ==========================================
// Item - 物料主数据快照
// ==========================================
// 每次导入从主数据工作簿完整重建，不做增量修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub sku: String,                       // 物料号（PartNo，已 trim，非空）
    pub name: String,                      // 显示名称（缺省为 SKU）
    pub category_label: Option<String>,    // 类别单元格原文（用于兜底识别）
    pub uom: String,                       // 计量单位
    pub on_hand: f64,                      // 在库数量（主数据快照，权威口径）
    pub min: f64,                          // 安全库存下限
    pub max: f64,                          // 库存上限
    pub location: String,                  // 库位
}

// ==========================================
// BomLine - 物料清单行
// ==========================================
// 不变式: parent / component 非空 且 qty_per > 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub parent: String,
    pub component: String,
    pub qty_per: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrap_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_group: Option<String>,
}

impl BomLine {
    pub fn is_valid(&self) -> bool {
        !self.parent.is_empty() && !self.component.is_empty() && self.qty_per > 0.0
    }
}

// ==========================================
// StockItem - 库存派生视图
// ==========================================
// available = on_hand - reserved（严格相等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: String,
    pub sku: String,
    pub description: String,
    pub category: StockCategory,
    pub uom: String,
    pub on_hand: f64,
    pub reserved: f64,
    pub available: f64,
    pub incoming_14d: f64,
    pub min: f64,
    pub max: f64,
    pub status: StockStatus,
    pub last_movement: String,
    pub location: String,
}

// ==========================================
// BOM 产能测算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomBottleneck {
    pub sku: String,
    pub available: f64,
    pub required: f64,
    pub shortfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomCapacityResult {
    pub parent: String,
    pub max_buildable: i64,
    pub bottlenecks: Vec<BomBottleneck>,
}
