// ==========================================
// 库存运营看板 - 排产计划领域模型
// ==========================================
// 职责: 人工排产计划行 + 追加写入的请求/响应
// ==========================================

use serde::{Deserialize, Serialize};

/// 排产计划工作表名
pub const PLAN_SHEET_NAME: &str = "line_plan";

/// 排产计划工作表表头（固定顺序）
pub const PLAN_SHEET_HEADERS: [&str; 5] = ["Date", "Line", "SKU", "ItemName", "Qty"];

/// 单条排产计划
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanRow {
    pub date: String,
    pub line: String,
    pub sku: String,
    /// 物料名称（写入 ItemName 列）
    pub name: String,
    pub qty: f64,
}

/// 保存排产计划请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavePlanRequest {
    pub rows: Vec<PlanRow>,
}

/// 保存排产计划响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlanResponse {
    pub ok: bool,
    pub path: String,
    pub sheet: String,
    pub appended: usize,
    /// 写入后重新读取得到的数据行数（不含表头）
    pub rows_after: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_request_tolerates_missing_fields() {
        let req: SavePlanRequest =
            serde_json::from_str(r#"{"rows":[{"date":"2025-10-20","line":"Line A","qty":12}]}"#)
                .unwrap();
        assert_eq!(req.rows.len(), 1);
        assert_eq!(req.rows[0].sku, "");
        assert_eq!(req.rows[0].qty, 12.0);
    }

    #[test]
    fn test_plan_request_without_rows() {
        let req: SavePlanRequest = serde_json::from_str("{}").unwrap();
        assert!(req.rows.is_empty());
    }
}
