// ==========================================
// 库存运营看板 - 排产计划 API
// ==========================================
// 职责: 将人工排产计划追加写入 Production.xlsx 的 line_plan 工作表
// 约定:
// - 文件 / 工作表不存在时新建，并写入表头 Date, Line, SKU, ItemName, Qty
// - 其他工作表按单元格值原样保留（不保留样式与公式）
// - 写入失败原样返回底层错误，不做回滚
// ==========================================

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::plan::{
    PlanRow, SavePlanRequest, SavePlanResponse, PLAN_SHEET_HEADERS, PLAN_SHEET_NAME,
};
use crate::domain::sheet::CellValue;
use crate::emitter::DatasetEmitter;
use crate::importer::sheet_loader::{datetime_to_excel_serial, CalamineWorkbook};
use crate::importer::workbook_trait::WorkbookSource;

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

/// 已有工作表的单元格网格（保留原始起始位置）
#[derive(Debug, Clone, PartialEq)]
struct SheetGrid {
    name: String,
    start_row: u32,
    start_col: u32,
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    fn with_headers(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start_row: 0,
            start_col: 0,
            rows: vec![PLAN_SHEET_HEADERS
                .iter()
                .map(|h| CellValue::from(*h))
                .collect()],
        }
    }
}

fn plan_row_cells(row: &PlanRow) -> Vec<CellValue> {
    vec![
        CellValue::Text(row.date.clone()),
        CellValue::Text(row.line.clone()),
        CellValue::Text(row.sku.clone()),
        CellValue::Text(row.name.clone()),
        CellValue::Number(row.qty),
    ]
}

fn is_plan_sheet(name: &str) -> bool {
    name.eq_ignore_ascii_case(PLAN_SHEET_NAME)
}

// ==========================================
// PlanApi - 排产计划 API
// ==========================================
pub struct PlanApi {
    plan_path: PathBuf,
}

impl PlanApi {
    /// # 参数
    /// - plan_path: 排产计划工作簿路径（通常为 <数据目录>/Production.xlsx）
    pub fn new(plan_path: impl Into<PathBuf>) -> Self {
        Self {
            plan_path: plan_path.into(),
        }
    }

    pub fn plan_path(&self) -> &Path {
        &self.plan_path
    }

    /// 追加排产计划
    ///
    /// # 参数
    /// - request: 待追加的计划行（不可为空）
    ///
    /// # 返回
    /// - Ok(SavePlanResponse): 写入结果，rows_after 为写入后重新读取的数据行数
    /// - Err(InvalidInput): 计划行为空
    /// - Err(ApiError): 读取 / 写入失败
    pub fn save_plan(&self, request: &SavePlanRequest) -> ApiResult<SavePlanResponse> {
        if request.rows.is_empty() {
            return Err(ApiError::InvalidInput("No rows".to_string()));
        }

        let path = self.plan_path.as_path();
        let mut sheets = if path.exists() {
            Self::read_existing(path)?
        } else {
            Vec::new()
        };

        let plan_idx = match sheets.iter().position(|s| is_plan_sheet(&s.name)) {
            Some(idx) => idx,
            None => {
                sheets.push(SheetGrid::with_headers(PLAN_SHEET_NAME));
                sheets.len() - 1
            }
        };

        let plan_sheet = &mut sheets[plan_idx];
        if plan_sheet.rows.is_empty() {
            *plan_sheet = SheetGrid {
                name: plan_sheet.name.clone(),
                ..SheetGrid::with_headers(PLAN_SHEET_NAME)
            };
        }
        plan_sheet
            .rows
            .extend(request.rows.iter().map(plan_row_cells));
        let sheet_name = plan_sheet.name.clone();

        let buffer = Self::render_workbook(&sheets)?;
        DatasetEmitter::write_atomic_bytes(path, &buffer)?;

        let rows_after = Self::count_plan_rows(path)?;
        info!(
            path = %path.display(),
            sheet = %sheet_name,
            appended = request.rows.len(),
            rows_after,
            "排产计划已写入"
        );

        Ok(SavePlanResponse {
            ok: true,
            path: path.display().to_string(),
            sheet: sheet_name,
            appended: request.rows.len(),
            rows_after,
        })
    }

    /// 读取已有工作簿的全部工作表
    fn read_existing(path: &Path) -> ApiResult<Vec<SheetGrid>> {
        let mut book = CalamineWorkbook::open(path)?;
        let mut sheets = Vec::new();

        for name in book.sheet_names() {
            let (start_row, start_col, rows) = book.read_grid(&name)?;
            debug!(sheet = %name, rows = rows.len(), "保留已有工作表");
            sheets.push(SheetGrid {
                name,
                start_row,
                start_col,
                rows,
            });
        }

        Ok(sheets)
    }

    /// 生成 xlsx 字节
    fn render_workbook(sheets: &[SheetGrid]) -> ApiResult<Vec<u8>> {
        let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);
        let mut workbook = Workbook::new();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            Self::write_grid(worksheet, sheet, &date_format)?;
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn write_grid(worksheet: &mut Worksheet, sheet: &SheetGrid, date_format: &Format) -> ApiResult<()> {
        let start_col = u16::try_from(sheet.start_col).map_err(|_| {
            ApiError::PlanWriteError(format!("工作表 {} 列偏移超出范围", sheet.name))
        })?;

        for (r, cells) in sheet.rows.iter().enumerate() {
            let row = sheet.start_row + r as u32;
            for (c, cell) in cells.iter().enumerate() {
                let col = start_col + c as u16;
                match cell {
                    CellValue::Text(s) if s.is_empty() => {}
                    CellValue::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row, col, *b)?;
                    }
                    CellValue::Date(dt) => {
                        worksheet.write_number_with_format(
                            row,
                            col,
                            datetime_to_excel_serial(dt),
                            date_format,
                        )?;
                    }
                }
            }
        }

        Ok(())
    }

    /// 重新读取 line_plan 数据行数（不含表头）
    fn count_plan_rows(path: &Path) -> ApiResult<usize> {
        let mut book = CalamineWorkbook::open(path)?;
        let sheet = book.sheet_names().into_iter().find(|n| is_plan_sheet(n));

        match sheet {
            Some(name) => Ok(book.read_sheet(&name)?.len()),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn row(date: &str, sku: &str, qty: f64) -> PlanRow {
        PlanRow {
            date: date.to_string(),
            line: "Line A".to_string(),
            sku: sku.to_string(),
            name: format!("{} name", sku),
            qty,
        }
    }

    #[test]
    fn test_empty_rows_rejected() {
        let dir = TempDir::new().unwrap();
        let api = PlanApi::new(dir.path().join("Production.xlsx"));

        let err = api.save_plan(&SavePlanRequest::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref m) if m == "No rows"));
        assert!(!api.plan_path().exists());
    }

    #[test]
    fn test_creates_file_then_appends() {
        let dir = TempDir::new().unwrap();
        let api = PlanApi::new(dir.path().join("Production.xlsx"));

        let first = api
            .save_plan(&SavePlanRequest {
                rows: vec![row("2025-10-20", "FG-100", 12.0)],
            })
            .unwrap();
        assert!(first.ok);
        assert_eq!(first.sheet, "line_plan");
        assert_eq!(first.appended, 1);
        assert_eq!(first.rows_after, 1);

        let second = api
            .save_plan(&SavePlanRequest {
                rows: vec![row("2025-10-21", "FG-100", 8.0), row("2025-10-21", "FG-200", 4.0)],
            })
            .unwrap();
        assert_eq!(second.appended, 2);
        assert_eq!(second.rows_after, 3);

        let mut book = CalamineWorkbook::open(api.plan_path()).unwrap();
        let records = book.read_sheet("line_plan").unwrap();
        assert_eq!(records[0]["Date"], CellValue::from("2025-10-20"));
        assert_eq!(records[0]["ItemName"], CellValue::from("FG-100 name"));
        assert_eq!(records[2]["Qty"], CellValue::Number(4.0));
    }
}
