// ==========================================
// 库存运营看板 - 工作簿定位器
// ==========================================
// 职责: 在数据目录中定位主数据 / PO / SO / 杂项工作簿
// 规则:
// - 主数据: MasterData.xls 优先，其次 MasterData.xlsx；缺失为致命错误
// - 其它工作簿: 按文件名排序遍历，第一个含匹配工作表的文件胜出
// - 无法打开的候选文件跳过（warn），不中断导入
// ==========================================

use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_aliases::{sheet_aliases, MASTER_WORKBOOK_FILES};
use crate::importer::workbook_trait::WorkbookOpener;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// 是否为 Excel 工作簿文件（.xls / .xlsx，不区分大小写）
pub fn is_workbook_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            e == "xls" || e == "xlsx"
        })
        .unwrap_or(false)
}

/// 列出目录下的工作簿文件（按文件名排序）
pub fn list_workbook_files(data_dir: &Path) -> ImportResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(data_dir).map_err(|e| ImportError::DataDirUnreadable {
        path: data_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_workbook_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// 一次导入所用的工作簿路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedWorkbooks {
    pub master: PathBuf,
    pub po: Option<PathBuf>,
    pub so: Option<PathBuf>,
    pub misc: Option<PathBuf>,
}

pub struct WorkbookLocator {
    data_dir: PathBuf,
    opener: Arc<dyn WorkbookOpener>,
}

impl WorkbookLocator {
    pub fn new(data_dir: impl Into<PathBuf>, opener: Arc<dyn WorkbookOpener>) -> Self {
        Self {
            data_dir: data_dir.into(),
            opener,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 定位主数据工作簿
    pub fn locate_master(&self) -> ImportResult<PathBuf> {
        MASTER_WORKBOOK_FILES
            .iter()
            .map(|name| self.data_dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| ImportError::MasterWorkbookMissing {
                data_dir: self.data_dir.display().to_string(),
            })
    }

    /// 第一个包含任一别名工作表的工作簿
    pub fn find_workbook_with_any(&self, aliases: &[&str]) -> Option<PathBuf> {
        let targets: Vec<String> = aliases
            .iter()
            .map(|a| DataCleaner::normalize_sheet_key(a))
            .collect();

        let files = match list_workbook_files(&self.data_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!(error = %e, "无法枚举数据目录，按未找到处理");
                return None;
            }
        };

        for path in files {
            let book = match self.opener.open(&path) {
                Ok(book) => book,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "工作簿无法打开，已跳过");
                    continue;
                }
            };

            let sheets: HashSet<String> = book
                .sheet_names()
                .iter()
                .map(|s| DataCleaner::normalize_sheet_key(s))
                .collect();
            if targets.iter().any(|t| sheets.contains(t)) {
                debug!(file = %path.display(), aliases = ?aliases, "已定位工作簿");
                return Some(path);
            }
        }

        None
    }

    /// 定位全部工作簿（含回退规则）
    ///
    /// - SO 工作簿回退到 PO 工作簿
    /// - 杂项工作簿依次回退到 PO、SO 工作簿
    pub fn locate_all(&self) -> ImportResult<LocatedWorkbooks> {
        let master = self.locate_master()?;
        let po = self.find_workbook_with_any(sheet_aliases::PO_COMBINED);
        let so = self
            .find_workbook_with_any(sheet_aliases::SO_COMBINED)
            .or_else(|| po.clone());
        let misc = self
            .find_workbook_with_any(sheet_aliases::MISC_WORKBOOK)
            .or_else(|| po.clone())
            .or_else(|| so.clone());

        debug!(
            master = %master.display(),
            po = ?po,
            so = ?so,
            misc = ?misc,
            "工作簿定位完成"
        );

        Ok(LocatedWorkbooks {
            master,
            po,
            so,
            misc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_workbook_file() {
        assert!(is_workbook_file(Path::new("a/MasterData.XLS")));
        assert!(is_workbook_file(Path::new("po.xlsx")));
        assert!(!is_workbook_file(Path::new("notes.csv")));
        assert!(!is_workbook_file(Path::new("xlsx")));
    }

    #[test]
    fn test_list_workbook_files_missing_dir() {
        let result = list_workbook_files(Path::new("/nonexistent/inventory-ops-data"));
        assert!(matches!(result, Err(ImportError::DataDirUnreadable { .. })));
    }
}
