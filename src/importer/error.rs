// ==========================================
// 库存运营看板 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分级: 致命（主数据缺失） / 降级为空（可选工作簿） / 解析兜底（日期、数值）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 致命错误 =====
    #[error("主数据工作簿不存在: {data_dir} 下未找到 MasterData.xls / MasterData.xlsx")]
    MasterWorkbookMissing { data_dir: String },

    #[error("数据目录不可读: {path}: {message}")]
    DataDirUnreadable { path: String, message: String },

    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 写入失败: {0}")]
    ExcelWriteError(String),

    #[error("工作表读取失败 (sheet: {sheet}): {message}")]
    SheetReadError { sheet: String, message: String },

    // ===== 输出错误 =====
    #[error("数据集输出失败 ({path}): {message}")]
    EmitError { path: String, message: String },

    #[error("序列化失败: {0}")]
    SerializationError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ImportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ImportError::ExcelWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::SerializationError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
