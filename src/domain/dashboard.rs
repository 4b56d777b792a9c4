// ==========================================
// 库存运营看板 - 看板摘要领域模型
// ==========================================
// 职责: KPI / 晨会清单 / 催货清单 / 最近活动
// 说明: 每次导入重新计算，不独立持久化
// ==========================================

use crate::domain::types::{ActivityType, ExpediteType, MorningListType, Severity, Trend};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: String,
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorningListItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: MorningListType,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpediteItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ExpediteType,
    pub severity: Severity,
    pub reference: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_late: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ActivityType,
    pub timestamp: String,
    pub description: String,
    pub sku: String,
    pub qty: f64,
    pub reference: String,
}
