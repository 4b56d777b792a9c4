// ==========================================
// 库存运营看板 - 数据集输出
// ==========================================
// 输出形式:
// - TypeScript 数据模块（供前端 import）
// - JSON 文档（可选）
// 红线: 原子写入（同目录临时文件 + rename），失败时保留旧文件
// ==========================================

use crate::domain::snapshot::DashboardSnapshot;
use crate::importer::error::{ImportError, ImportResult};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// 模块头注释
pub const MODULE_HEADER: &str = "// GENERATED FILE. Do not edit by hand.";

/// 前端类型导入
const TYPE_IMPORTS: &[&str] = &[
    "KPI",
    "MorningListItem",
    "ExpediteItem",
    "ActivityItem",
    "SalesOrder",
    "PurchaseOrder",
    "Receipt",
    "ProductionRecord",
    "StockItem",
    "BOMLine",
];

// (导出名, TS 类型, 值)
type ExportedConst = (&'static str, &'static str, Value);

fn to_value<T: Serialize>(value: &T) -> ImportResult<Value> {
    Ok(serde_json::to_value(value)?)
}

pub struct DatasetEmitter;

impl DatasetEmitter {
    /// 导出集合（名称, TS 类型, 值），顺序即输出顺序
    fn collections(snapshot: &DashboardSnapshot) -> ImportResult<Vec<ExportedConst>> {
        let s = snapshot;
        Ok(vec![
            ("dashboardKPIs", "KPI[]", to_value(&s.dashboard_kpis)?),
            ("morningListItems", "MorningListItem[]", to_value(&s.morning_list_items)?),
            ("expediteItems", "ExpediteItem[]", to_value(&s.expedite_items)?),
            ("recentActivity", "ActivityItem[]", to_value(&s.recent_activity)?),
            ("salesOrders", "SalesOrder[]", to_value(&s.sales_orders)?),
            ("purchaseOrders", "PurchaseOrder[]", to_value(&s.purchase_orders)?),
            ("receipts", "Receipt[]", to_value(&s.receipts)?),
            ("productionRecords", "ProductionRecord[]", to_value(&s.production_records)?),
            ("stockItems", "StockItem[]", to_value(&s.stock_items)?),
            ("bomLines", "BOMLine[]", to_value(&s.bom_lines)?),
            ("excelDebug", "any", to_value(&s.excel_debug)?),
        ])
    }

    /// 生成 TypeScript 数据模块
    pub fn render_module(snapshot: &DashboardSnapshot) -> ImportResult<String> {
        let mut out = String::new();
        out.push_str(MODULE_HEADER);
        out.push('\n');
        out.push_str(&format!(
            "import type {{ {} }} from './types';\n",
            TYPE_IMPORTS.join(", ")
        ));

        for (name, ts_type, value) in Self::collections(snapshot)? {
            let json = serde_json::to_string_pretty(&value)?;
            out.push_str(&format!("\nexport const {}: {} = {};\n", name, ts_type, json));
        }

        Ok(out)
    }

    /// 生成 JSON 文档（整份快照）
    pub fn render_json(snapshot: &DashboardSnapshot) -> ImportResult<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }

    /// 原子写入文本
    pub fn write_atomic(path: &Path, contents: &str) -> ImportResult<()> {
        Self::write_atomic_bytes(path, contents.as_bytes())
    }

    /// 原子写入: 同目录临时文件写完后 rename 覆盖目标
    pub fn write_atomic_bytes(path: &Path, contents: &[u8]) -> ImportResult<()> {
        let emit_err = |message: String| ImportError::EmitError {
            path: path.display().to_string(),
            message,
        };

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| emit_err(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| emit_err(e.to_string()))?;
        tmp.write_all(contents)
            .and_then(|_| tmp.flush())
            .map_err(|e| emit_err(e.to_string()))?;
        tmp.persist(path).map_err(|e| emit_err(e.error.to_string()))?;
        Ok(())
    }

    /// 输出到已配置的目标，返回实际写入的路径
    pub fn emit(
        snapshot: &DashboardSnapshot,
        module_path: Option<&Path>,
        json_path: Option<&Path>,
    ) -> ImportResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        if let Some(path) = module_path {
            Self::write_atomic(path, &Self::render_module(snapshot)?)?;
            written.push(path.to_path_buf());
        }
        if let Some(path) = json_path {
            Self::write_atomic(path, &Self::render_json(snapshot)?)?;
            written.push(path.to_path_buf());
        }

        info!(
            outputs = ?written,
            stock_items = snapshot.stock_items.len(),
            "数据集已输出"
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_dirs_and_replaces() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("data.ts");

        DatasetEmitter::write_atomic(&target, "first").unwrap();
        DatasetEmitter::write_atomic(&target, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
        // 不残留临时文件
        let entries = std::fs::read_dir(target.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }
}
