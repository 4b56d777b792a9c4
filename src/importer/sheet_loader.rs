// ==========================================
// 库存运营看板 - 工作表加载器
// ==========================================
// 支持: Excel (.xlsx / .xls)，经 calamine 自动识别格式
// 职责: 工作表 → 行记录（列名 → 单元格值）
// 红线: 可选工作表缺失 / 读取失败 → 零行 + warn，不中断导入
// ==========================================

use crate::domain::sheet::{CellValue, RawRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::workbook_trait::{WorkbookOpener, WorkbookSource};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// 1899-12-30 距公元元年的天数
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

/// 空表头的占位列名
const EMPTY_HEADER: &str = "__EMPTY";

// ==========================================
// Excel 序列日期转换
// ==========================================
// 1900 日期系统: 序列号 0 对应 1899-12-30（已包含 1900 闰年缺陷的修正）
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    base.checked_add_signed(Duration::milliseconds(millis))
}

/// 日期时间 → Excel 序列号（写回工作簿时使用）
pub fn datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let days = dt.date().num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE;
    days as f64 + dt.num_seconds_from_midnight() as f64 / 86_400.0
}

/// calamine 单元格 → CellValue
fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::empty(),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .map(CellValue::Date)
            .unwrap_or_else(|_| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

// ==========================================
// 表格 → 行记录
// ==========================================

/// 表头去重与补名
///
/// - 空表头: `__EMPTY`、`__EMPTY_1`、`__EMPTY_2`...
/// - 重复表头: `Name`、`Name_1`、`Name_2`...
pub fn build_headers(header_row: &[CellValue]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(header_row.len());

    for cell in header_row {
        let text = DataCleaner::text(cell);
        let base = if text.is_empty() {
            EMPTY_HEADER.to_string()
        } else {
            text
        };

        let name = match seen.get(&base).copied() {
            None => base.clone(),
            Some(start) => {
                let mut n = start;
                loop {
                    let candidate = format!("{}_{}", base, n);
                    if !seen.contains_key(&candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        let next = seen.get(&base).copied().map(|n| n + 1).unwrap_or(1);
        seen.insert(base, next);
        seen.entry(name.clone()).or_insert(1);
        headers.push(name);
    }

    headers
}

/// 二维表格（首行为表头）→ 行记录
pub fn rows_to_records<I>(mut rows: I) -> Vec<RawRecord>
where
    I: Iterator<Item = Vec<CellValue>>,
{
    let header_row = match rows.next() {
        Some(row) => row,
        None => return Vec::new(),
    };
    let headers = build_headers(&header_row);

    let mut records = Vec::new();
    for data_row in rows {
        // 跳过完全空白的行
        if data_row.iter().all(CellValue::is_empty) {
            continue;
        }

        let mut record = RawRecord::new();
        for (col_idx, header) in headers.iter().enumerate() {
            let value = data_row.get(col_idx).cloned().unwrap_or_default();
            record.insert(header.clone(), value);
        }
        records.push(record);
    }

    records
}

// ==========================================
// CalamineWorkbook - 基于 calamine 的工作簿
// ==========================================
pub struct CalamineWorkbook {
    path: PathBuf,
    inner: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    pub fn open(path: &Path) -> ImportResult<Self> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let inner = open_workbook_auto(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// 读取工作表原始单元格网格
    ///
    /// 返回 (起始行, 起始列, 网格)；空工作表返回 (0, 0, 空网格)
    pub fn read_grid(&mut self, name: &str) -> ImportResult<(u32, u32, Vec<Vec<CellValue>>)> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| ImportError::SheetReadError {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let grid = range
            .rows()
            .map(|row| row.iter().map(to_cell_value).collect())
            .collect();
        Ok((start_row, start_col, grid))
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> ImportResult<Vec<RawRecord>> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|e| ImportError::SheetReadError {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(to_cell_value).collect::<Vec<_>>());
        Ok(rows_to_records(rows))
    }
}

/// 默认打开器
pub struct CalamineOpener;

impl WorkbookOpener for CalamineOpener {
    fn open(&self, path: &Path) -> ImportResult<Box<dyn WorkbookSource>> {
        Ok(Box::new(CalamineWorkbook::open(path)?))
    }
}

// ==========================================
// SheetLoader - 别名匹配 + 降级加载
// ==========================================
pub struct SheetLoader;

impl SheetLoader {
    /// 按别名顺序匹配工作表，返回实际工作表名
    pub fn resolve_sheet_name(sheet_names: &[String], aliases: &[&str]) -> Option<String> {
        let normalized: Vec<(String, &String)> = sheet_names
            .iter()
            .map(|name| (DataCleaner::normalize_sheet_key(name), name))
            .collect();

        aliases.iter().find_map(|alias| {
            let key = DataCleaner::normalize_sheet_key(alias);
            normalized
                .iter()
                .find(|(norm, _)| *norm == key)
                .map(|(_, name)| (*name).clone())
        })
    }

    /// 加载第一个匹配别名的工作表
    ///
    /// 工作表不存在、读取失败时返回空集合
    pub fn load_sheet_any(book: &mut dyn WorkbookSource, aliases: &[&str]) -> Vec<RawRecord> {
        let sheet = match Self::resolve_sheet_name(&book.sheet_names(), aliases) {
            Some(name) => name,
            None => {
                debug!(
                    workbook = %book.path().display(),
                    aliases = ?aliases,
                    "未找到匹配的工作表"
                );
                return Vec::new();
            }
        };

        match book.read_sheet(&sheet) {
            Ok(records) => {
                debug!(
                    workbook = %book.path().display(),
                    sheet = %sheet,
                    rows = records.len(),
                    "工作表加载完成"
                );
                records
            }
            Err(e) => {
                warn!(
                    workbook = %book.path().display(),
                    sheet = %sheet,
                    error = %e,
                    "工作表读取失败，按空表处理"
                );
                Vec::new()
            }
        }
    }

    /// 可选工作簿版本: 工作簿缺失时返回空集合
    pub fn load_optional(
        book: Option<&mut Box<dyn WorkbookSource>>,
        aliases: &[&str],
    ) -> Vec<RawRecord> {
        match book {
            Some(book) => Self::load_sheet_any(book.as_mut(), aliases),
            None => Vec::new(),
        }
    }
}

// ==========================================
// 内存工作簿（单元测试用）
// ==========================================
#[cfg(test)]
pub(crate) struct MemoryWorkbook {
    pub path: PathBuf,
    pub sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

#[cfg(test)]
impl WorkbookSource for MemoryWorkbook {
    fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> ImportResult<Vec<RawRecord>> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, grid)| rows_to_records(grid.clone().into_iter()))
            .ok_or_else(|| ImportError::SheetReadError {
                sheet: name.to_string(),
                message: "工作表不存在".to_string(),
            })
    }
}
