// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 使用 rust_xlsxwriter 在临时目录中生成真实的 .xlsx 工作簿
// ==========================================

#![allow(dead_code)]

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use inventory_ops::domain::sheet::CellValue;
use inventory_ops::importer::sheet_loader::datetime_to_excel_serial;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::TempDir;

/// 工作表定义: (名称, 行)，第一行为表头
pub type SheetDef = (&'static str, Vec<Vec<CellValue>>);

pub fn t(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn n(v: f64) -> CellValue {
    CellValue::Number(v)
}

pub fn d(y: i32, m: u32, day: u32) -> CellValue {
    CellValue::Date(ymd(y, m, day).and_hms_opt(0, 0, 0).unwrap())
}

pub fn ymd(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// 基准日期（账龄计算用）
pub fn as_of() -> NaiveDate {
    ymd(2025, 10, 15)
}

fn header(cols: &[&str]) -> Vec<CellValue> {
    cols.iter().map(|c| t(c)).collect()
}

/// 写出 .xlsx 工作簿
pub fn write_workbook(path: &Path, sheets: &[SheetDef]) -> Result<(), Box<dyn Error>> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    CellValue::Text(s) if s.is_empty() => {}
                    CellValue::Text(s) => {
                        worksheet.write_string(r, c, s)?;
                    }
                    CellValue::Number(v) => {
                        worksheet.write_number(r, c, *v)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(r, c, *b)?;
                    }
                    CellValue::Date(dt) => {
                        worksheet.write_number_with_format(
                            r,
                            c,
                            datetime_to_excel_serial(dt),
                            &date_format,
                        )?;
                    }
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

// ==========================================
// 标准场景数据
// ==========================================

pub fn finished_goods_sheet() -> SheetDef {
    (
        "Finished Goods",
        vec![
            header(&["PartNo", "PartName", "Category", "UoM", "qty", "Min", "Max", "Location"]),
            vec![t("FG-100"), t("Widget Alpha"), t("FG"), t("EA"), n(0.0), n(10.0), n(50.0), t("A1")],
            vec![t("FG-200"), t("Widget Beta"), t(""), t("EA"), n(25.0), n(10.0), n(80.0), t("A2")],
            vec![t("FG-300"), t(""), t(""), t("EA"), n(4.0), n(5.0), n(20.0), t("A3")],
            // SKU 为空白，应被忽略
            vec![t("   "), t("Ghost"), t(""), t("EA"), n(9.0), n(1.0), n(2.0), t("")],
        ],
    )
}

pub fn raw_materials_sheet() -> SheetDef {
    (
        "Raw Material",
        vec![
            header(&["PartNo", "PartName", "UoM", "qty", "Min", "Max", "Location"]),
            vec![t("RM-200"), t("Steel Rod"), t("KG"), n(0.0), n(5.0), n(100.0), t("B1")],
            vec![t("RM-300"), t("Bolt M8"), t("EA"), t("1,500"), n(100.0), n(2000.0), t("B2")],
        ],
    )
}

pub fn bom_sheet() -> SheetDef {
    (
        "BOM",
        vec![
            header(&["ParentPartNo", "ComponentPartNo", "QtyPer", "ScrapPct"]),
            vec![t("FG-100"), t("RM-200"), n(2.0), t("")],
            vec![t("FG-100"), t("RM-300"), n(4.0), n(0.5)],
            vec![t("FG-200"), t("RM-300"), n(10.0), t("")],
            // 无效行: 缺子件
            vec![t("FG-999"), t(""), n(1.0), t("")],
        ],
    )
}

pub fn po_combined_sheet() -> SheetDef {
    (
        "PO_Combined",
        vec![
            header(&["PurchaseOrder", "VendorName", "PO-date", "InvoiceDate", "part no.", "Quantity", "Unit"]),
            vec![n(6100765509.0), t("Acme Metals"), d(2025, 10, 20), d(2025, 10, 1), t("RM-200"), n(48.0), t("KG")],
            vec![n(6100765509.0), t("Acme Metals"), d(2025, 10, 20), d(2025, 10, 3), t("RM-300"), n(68.0), t("EA")],
            vec![n(6100765510.0), t("Beta Supply"), t("2025-10-30"), t(""), t("RM-300"), n(10.0), t("EA")],
        ],
    )
}

pub fn so_combined_sheet() -> SheetDef {
    (
        "SO_Combined",
        vec![
            header(&["SaleOrder No.", "CustomerName", "SO-date", "PartNo", "Quantity"]),
            vec![t("SO-5001"), t("Contoso"), d(2025, 10, 5), t("FG-100"), n(76.0)],
            vec![t("SO-5002"), t("Fabrikam"), t("2025-10-12"), t("FG-200"), n(0.0)],
        ],
    )
}

pub fn receipts_sheet() -> SheetDef {
    (
        "Trascations",
        vec![
            header(&["Date", "PurchaseOrder", "VendorName", "ProductCode", "Quantity", "Receiver"]),
            vec![d(2025, 10, 2), n(6100765509.0), t("Acme Metals"), t("RM-200"), n(48.0), t("Lee")],
            vec![d(2025, 10, 3), n(6100765509.0), t("Acme Metals"), t("RM-300"), n(68.0), t("Lee")],
        ],
    )
}

pub fn production_sheet() -> SheetDef {
    (
        "ProductionLog",
        vec![
            header(&["Date", "Line", "ItemCode", "QtyProduced", "ItemName", "Shift"]),
            vec![d(2025, 10, 13), t("Line A"), t("FG-200"), n(12.0), t("Widget Beta"), t("Day")],
            vec![t("14/10/2025"), t("Line B"), t("FG-300"), n(6.0), t("FG-300"), t("")],
        ],
    )
}

pub fn movements_sheet() -> SheetDef {
    (
        "Movements",
        vec![
            header(&["PartNo", "Date", "MovementType", "QtyDelta", "RefType", "RefNo"]),
            vec![t("RM-300"), d(2025, 10, 3), t("Receipt"), n(68.0), t("PO"), t("6100765509")],
            vec![t("RM-300"), d(2025, 9, 20), t("Issue"), n(-20.0), t("WO"), t("WO-1")],
            vec![t("FG-200"), t("not a date"), t("Adjust"), n(1.0), t(""), t("")],
        ],
    )
}

/// 标准数据目录: 主数据 + PO + SO + 杂项（收货 / 生产 / 流水）
pub struct ScenarioDir {
    pub dir: TempDir,
}

impl ScenarioDir {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn standard() -> Self {
        let scenario = Self::empty();
        scenario.write(
            "MasterData.xlsx",
            &[finished_goods_sheet(), raw_materials_sheet(), bom_sheet()],
        );
        scenario.write("PO.xlsx", &[po_combined_sheet()]);
        scenario.write("SO.xlsx", &[so_combined_sheet()]);
        scenario.write(
            "Transactions.xlsx",
            &[receipts_sheet(), production_sheet(), movements_sheet()],
        );
        scenario
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, sheets: &[SheetDef]) -> PathBuf {
        let path = self.file(name);
        write_workbook(&path, sheets).unwrap();
        path
    }
}

/// 便于断言的日期时间构造
pub fn dt(y: i32, m: u32, day: u32) -> NaiveDateTime {
    ymd(y, m, day).and_hms_opt(0, 0, 0).unwrap()
}
