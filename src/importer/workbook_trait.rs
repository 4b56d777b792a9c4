// ==========================================
// 库存运营看板 - 工作簿读取 Trait
// ==========================================
// 职责: 定义工作簿读取接口（不包含实现）
// 实现者: sheet_loader::CalamineWorkbook / 测试用内存工作簿
// ==========================================

use crate::domain::sheet::RawRecord;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// WorkbookSource Trait
// ==========================================
// 用途: 已打开的单个工作簿
pub trait WorkbookSource {
    /// 工作簿文件路径（内存工作簿返回虚拟路径）
    fn path(&self) -> &Path;

    /// 工作表名称（保持文件内顺序）
    fn sheet_names(&self) -> Vec<String>;

    /// 读取指定工作表为行记录
    ///
    /// # 规则
    /// - 首行为表头，空表头命名为 `__EMPTY`、`__EMPTY_1`...
    /// - 重复表头追加 `_1`、`_2` 后缀
    /// - 完全空白的行跳过，缺失单元格为空字符串
    fn read_sheet(&mut self, name: &str) -> ImportResult<Vec<RawRecord>>;
}

// ==========================================
// WorkbookOpener Trait
// ==========================================
// 用途: 按路径打开工作簿（定位器与加载器共用）
pub trait WorkbookOpener: Send + Sync {
    fn open(&self, path: &Path) -> ImportResult<Box<dyn WorkbookSource>>;
}
