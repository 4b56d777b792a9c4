// ==========================================
// 库存运营看板 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入层错误为调用方可读的错误消息
// 约定: 写入路径的失败原样携带底层错误文本，不做回滚
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 快照尚未生成（首次导入未完成或失败）
    #[error("数据快照不可用: {0}")]
    SnapshotUnavailable(String),

    // ==========================================
    // 导入 / 写入错误
    // ==========================================
    #[error("工作簿导入失败: {0}")]
    ImportError(String),

    #[error("排产计划写入失败: {0}")]
    PlanWriteError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::MasterWorkbookMissing { .. } | ImportError::DataDirUnreadable { .. } => {
                ApiError::ImportError(err.to_string())
            }
            ImportError::ExcelWriteError(msg) => ApiError::PlanWriteError(msg),
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件不存在: {}", path)),
            ImportError::UnsupportedFormat(ext) => {
                ApiError::InvalidInput(format!("不支持的文件格式: {}", ext))
            }
            ImportError::SerializationError(msg) => ApiError::InvalidInput(msg),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for ApiError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ApiError::PlanWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(format!("JSON 解析失败: {}", err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
