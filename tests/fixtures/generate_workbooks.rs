// ==========================================
// 样例工作簿生成器
// ==========================================
// 用途: 生成可直接导入的样例数据目录
// 输出: <目录>/MasterData.xlsx, <目录>/Transactions.xlsx
// 用法: generate_workbooks [目录]（默认 EXCEL_DATA_DIR 或 ./data/connected-workbooks）
// ==========================================

use chrono::{Datelike, Duration, Local, NaiveDate};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::error::Error;
use std::path::PathBuf;

// 1899-12-30（Excel 序列号 0）
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

const FG_HEADER: &[&str] = &[
    "PartNo", "PartName", "Category", "UoM", "qty", "Min", "Max", "Location",
];
const RM_HEADER: &[&str] = &["PartNo", "PartName", "UoM", "qty", "Min", "Max", "Location"];
const BOM_HEADER: &[&str] = &["ParentPartNo", "ComponentPartNo", "QtyPer", "ScrapPct"];
const PO_HEADER: &[&str] = &[
    "FileName", "PurchaseOrder", "VendorName", "PO-date", "InvoiceDate", "part no.",
    "ProductDescription", "Quantity", "Unit",
];
const SO_HEADER: &[&str] = &[
    "SaleOrder No.", "CustomerName", "SO-date", "PartNo", "ProductDescription", "Quantity",
];
const RECEIPT_HEADER: &[&str] = &[
    "Date", "PurchaseOrder", "VendorName", "ProductCode", "Quantity", "Receiver", "Status",
];
const PRODUCTION_HEADER: &[&str] = &[
    "Date", "Line", "ItemCode", "ItemName", "QtyProduced", "QtyRejected", "Shift", "Operator",
];
const MOVEMENT_HEADER: &[&str] = &[
    "PartNo", "Date", "MovementType", "QtyDelta", "RefType", "RefNo", "Location",
];

const VENDORS: &[&str] = &["Acme Metals", "Beta Supply", "Gamma Parts"];
const CUSTOMERS: &[&str] = &["Contoso", "Fabrikam", "Northwind"];
const LINES: &[&str] = &["Line A", "Line B", "Line C"];

// 成品 (SKU, 名称, 在库, 下限)
const FINISHED_GOODS: &[(&str, &str, f64, f64)] = &[
    ("FG-100", "Widget Alpha", 0.0, 10.0),
    ("FG-200", "Widget Beta", 25.0, 10.0),
    ("FG-300", "Widget Gamma", 4.0, 5.0),
    ("FG-400", "Widget Delta", 120.0, 20.0),
];

// 原料 (SKU, 名称, 单位, 在库, 下限)
const RAW_MATERIALS: &[(&str, &str, &str, f64, f64)] = &[
    ("RM-200", "Steel Rod", "KG", 0.0, 5.0),
    ("RM-300", "Bolt M8", "EA", 1500.0, 100.0),
    ("RM-400", "Paint (Blue)", "L", 12.0, 20.0),
];

// BOM (父件, 子件, 用量)
const BOM: &[(&str, &str, f64)] = &[
    ("FG-100", "RM-200", 2.0),
    ("FG-100", "RM-300", 4.0),
    ("FG-200", "RM-300", 10.0),
    ("FG-300", "RM-300", 6.0),
    ("FG-300", "RM-400", 0.5),
    ("FG-400", "RM-400", 1.0),
];

struct SheetWriter<'a> {
    sheet: &'a mut Worksheet,
    date_format: &'a Format,
    row: u32,
}

impl<'a> SheetWriter<'a> {
    fn new(sheet: &'a mut Worksheet, date_format: &'a Format, header: &[&str]) -> Result<Self, XlsxError> {
        for (col, title) in header.iter().enumerate() {
            sheet.write_string(0, col as u16, *title)?;
        }
        Ok(Self {
            sheet,
            date_format,
            row: 1,
        })
    }

    fn text(&mut self, col: u16, value: &str) -> Result<(), XlsxError> {
        if !value.is_empty() {
            self.sheet.write_string(self.row, col, value)?;
        }
        Ok(())
    }

    fn number(&mut self, col: u16, value: f64) -> Result<(), XlsxError> {
        self.sheet.write_number(self.row, col, value)?;
        Ok(())
    }

    fn date(&mut self, col: u16, value: NaiveDate) -> Result<(), XlsxError> {
        let serial = (value.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE) as f64;
        self.sheet
            .write_number_with_format(self.row, col, serial, self.date_format)?;
        Ok(())
    }

    fn next_row(&mut self) {
        self.row += 1;
    }
}

fn output_dir() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EXCEL_DATA_DIR").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./data/connected-workbooks"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let dir = output_dir();
    std::fs::create_dir_all(&dir)?;
    println!("开始生成样例工作簿: {}", dir.display());

    let today = Local::now().date_naive();

    // 1. 主数据
    generate_master_data(&dir.join("MasterData.xlsx"))?;

    // 2. 交易数据（PO / SO / 收货 / 生产 / 流水）
    generate_transactions(&dir.join("Transactions.xlsx"), today)?;

    println!("✓ 样例工作簿生成完成！");
    Ok(())
}

fn generate_master_data(path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name("Finished Goods")?;
    let mut w = SheetWriter::new(sheet, &date_format, FG_HEADER)?;
    for (i, (sku, name, on_hand, min)) in FINISHED_GOODS.iter().enumerate() {
        w.text(0, sku)?;
        w.text(1, name)?;
        w.text(2, "FG")?;
        w.text(3, "EA")?;
        w.number(4, *on_hand)?;
        w.number(5, *min)?;
        w.number(6, min * 5.0)?;
        w.text(7, &format!("A{}", i + 1))?;
        w.next_row();
    }

    let sheet = workbook.add_worksheet().set_name("Raw Material")?;
    let mut w = SheetWriter::new(sheet, &date_format, RM_HEADER)?;
    for (i, (sku, name, uom, on_hand, min)) in RAW_MATERIALS.iter().enumerate() {
        w.text(0, sku)?;
        w.text(1, name)?;
        w.text(2, uom)?;
        w.number(3, *on_hand)?;
        w.number(4, *min)?;
        w.number(5, min * 10.0)?;
        w.text(6, &format!("B{}", i + 1))?;
        w.next_row();
    }

    let sheet = workbook.add_worksheet().set_name("BOM")?;
    let mut w = SheetWriter::new(sheet, &date_format, BOM_HEADER)?;
    for (parent, component, qty_per) in BOM {
        w.text(0, parent)?;
        w.text(1, component)?;
        w.number(2, *qty_per)?;
        w.number(3, 0.02)?;
        w.next_row();
    }

    workbook.save(path)?;
    println!("✓ 生成 {} ({} 成品, {} 原料, {} BOM 行)",
        path.display(), FINISHED_GOODS.len(), RAW_MATERIALS.len(), BOM.len());
    Ok(())
}

fn generate_transactions(path: &PathBuf, today: NaiveDate) -> Result<(), Box<dyn Error>> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();

    // PO_Combined: 每张采购单 2 行明细
    let sheet = workbook.add_worksheet().set_name("PO_Combined")?;
    let mut w = SheetWriter::new(sheet, &date_format, PO_HEADER)?;
    for i in 0..12usize {
        let po = 6_100_765_509u64 + (i / 2) as u64;
        let (sku, name, uom, _, _) = RAW_MATERIALS[i % RAW_MATERIALS.len()];
        w.text(0, &format!("invoice_{:03}.pdf", i / 2))?;
        w.number(1, po as f64)?;
        w.text(2, VENDORS[(i / 2) % VENDORS.len()])?;
        w.date(3, today + Duration::days(7 + (i / 2) as i64 * 3))?;
        w.date(4, today - Duration::days(14 - (i / 2) as i64 * 2))?;
        w.text(5, sku)?;
        w.text(6, name)?;
        w.number(7, 40.0 + (i * 7 % 30) as f64)?;
        w.text(8, uom)?;
        w.next_row();
    }

    // SO_Combined
    let sheet = workbook.add_worksheet().set_name("SO_Combined")?;
    let mut w = SheetWriter::new(sheet, &date_format, SO_HEADER)?;
    for i in 0..8usize {
        let (sku, name, _, _) = FINISHED_GOODS[i % FINISHED_GOODS.len()];
        w.text(0, &format!("SO-{}", 5001 + i))?;
        w.text(1, CUSTOMERS[i % CUSTOMERS.len()])?;
        w.date(2, today - Duration::days(i as i64 * 2))?;
        w.text(3, sku)?;
        w.text(4, name)?;
        w.number(5, 10.0 + (i * 11 % 70) as f64)?;
        w.next_row();
    }

    // 收货（工作表名沿用源文件拼写）
    let sheet = workbook.add_worksheet().set_name("Trascations")?;
    let mut w = SheetWriter::new(sheet, &date_format, RECEIPT_HEADER)?;
    for i in 0..6usize {
        let (sku, _, _, _, _) = RAW_MATERIALS[i % RAW_MATERIALS.len()];
        w.date(0, today - Duration::days(6 - i as i64))?;
        w.number(1, (6_100_765_509u64 + (i / 2) as u64) as f64)?;
        w.text(2, VENDORS[(i / 2) % VENDORS.len()])?;
        w.text(3, sku)?;
        w.number(4, 20.0 + (i * 5) as f64)?;
        w.text(5, ["Lee", "Patel", "Garcia"][i % 3])?;
        w.text(6, "OK")?;
        w.next_row();
    }

    // 生产记录
    let sheet = workbook.add_worksheet().set_name("ProductionLog")?;
    let mut w = SheetWriter::new(sheet, &date_format, PRODUCTION_HEADER)?;
    for i in 0..9usize {
        let (sku, name, _, _) = FINISHED_GOODS[i % FINISHED_GOODS.len()];
        w.date(0, today - Duration::days(9 - i as i64))?;
        w.text(1, LINES[i % LINES.len()])?;
        w.text(2, sku)?;
        w.text(3, name)?;
        w.number(4, 15.0 + (i * 3) as f64)?;
        w.number(5, (i % 3) as f64)?;
        w.text(6, ["Day", "Night"][i % 2])?;
        w.text(7, ["Kim", "Singh", "Okafor"][i % 3])?;
        w.next_row();
    }

    // 库存流水
    let sheet = workbook.add_worksheet().set_name("Movements")?;
    let mut w = SheetWriter::new(sheet, &date_format, MOVEMENT_HEADER)?;
    for i in 0..10usize {
        let sku = if i % 2 == 0 {
            RAW_MATERIALS[i % RAW_MATERIALS.len()].0
        } else {
            FINISHED_GOODS[i % FINISHED_GOODS.len()].0
        };
        let (movement, delta, ref_type) = match i % 3 {
            0 => ("Receipt", 25.0, "PO"),
            1 => ("Issue", -8.0, "WO"),
            _ => ("Adjust", 1.0, "CC"),
        };
        w.text(0, sku)?;
        w.date(1, today - Duration::days(10 - i as i64))?;
        w.text(2, movement)?;
        w.number(3, delta)?;
        w.text(4, ref_type)?;
        w.text(5, &format!("{}-{}", ref_type, 100 + i))?;
        w.text(6, "MAIN")?;
        w.next_row();
    }

    workbook.save(path)?;
    println!("✓ 生成 {} (PO / SO / 收货 / 生产 / 流水)", path.display());
    Ok(())
}
