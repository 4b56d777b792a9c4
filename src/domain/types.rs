// ==========================================
// 库存运营看板 - 领域类型定义
// ==========================================
// 职责: 库存状态 / 物料类别 / 优先级 / 告警类型等枚举
// 序列化格式: 与前端 types.ts 的字面量保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 库存状态 (Stock Status)
// ==========================================
// 判定顺序: Out 优先于 Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    Healthy, // 充足
    Low,     // 低于下限
    Out,     // 缺货
}

impl StockStatus {
    /// 按可用量与下限判定库存状态
    ///
    /// # 规则
    /// - available <= 0 → Out（即使 min <= 0 也优先判定为 Out）
    /// - available < min → Low
    /// - 其他 → Healthy
    pub fn classify(available: f64, min: f64) -> Self {
        if available <= 0.0 {
            StockStatus::Out
        } else if available < min {
            StockStatus::Low
        } else {
            StockStatus::Healthy
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Healthy => write!(f, "Healthy"),
            StockStatus::Low => write!(f, "Low"),
            StockStatus::Out => write!(f, "Out"),
        }
    }
}

// ==========================================
// 物料类别 (Stock Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockCategory {
    #[serde(rename = "Finished Goods")]
    FinishedGoods,
    #[serde(rename = "Raw Materials")]
    RawMaterials,
    #[serde(rename = "WIP")]
    Wip,
}

impl StockCategory {
    /// 从类别单元格文本识别类别（去空白 + 小写后匹配同义词）
    ///
    /// 无法识别时返回 None，由调用方决定默认值
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "finishedgoods" | "finishedgood" | "fg" => Some(StockCategory::FinishedGoods),
            "rawmaterials" | "rawmaterial" | "rm" => Some(StockCategory::RawMaterials),
            "wip" => Some(StockCategory::Wip),
            _ => None,
        }
    }
}

impl fmt::Display for StockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockCategory::FinishedGoods => write!(f, "Finished Goods"),
            StockCategory::RawMaterials => write!(f, "Raw Materials"),
            StockCategory::Wip => write!(f, "WIP"),
        }
    }
}

// ==========================================
// 销售订单优先级 (Priority)
// ==========================================
// 源数据中没有优先级信号，当前统一为 Medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

// ==========================================
// 库存流水类型 (Movement Type)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    Receipt,  // 采购入库
    Issue,    // 生产领料
    ProdIn,   // 完工入库
    Dispatch, // 销售出库
    /// 未识别的类型，保留原文
    Other(String),
}

impl MovementType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "receipt" => MovementType::Receipt,
            "issue" => MovementType::Issue,
            "prodin" => MovementType::ProdIn,
            "dispatch" => MovementType::Dispatch,
            _ => MovementType::Other(label.trim().to_string()),
        }
    }
}

// ==========================================
// 看板告警与活动类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MorningListType {
    Overdue,
    Stockout,
    ShortReceipt,
    NoCoverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpediteType {
    LatePo,
    OrderGap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Receipt,
    Dispatch,
    Production,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}
