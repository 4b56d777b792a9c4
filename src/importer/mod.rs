// ==========================================
// 库存运营看板 - 导入层
// ==========================================
// 职责: 工作簿定位 → 工作表加载 → 字段标准化
// 支持: Excel (.xlsx / .xls)
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_aliases;
pub mod field_mapper;
pub mod sheet_loader;
pub mod workbook_locator;
pub mod workbook_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use sheet_loader::{CalamineOpener, CalamineWorkbook, SheetLoader};
pub use workbook_locator::{list_workbook_files, LocatedWorkbooks, WorkbookLocator};

// 重导出 Trait 接口
pub use workbook_trait::{WorkbookOpener, WorkbookSource};
