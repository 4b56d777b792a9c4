// ==========================================
// 库存运营看板 - 应用层
// ==========================================
// 职责: 装配 API，驱动一次性生成与监听模式
// ==========================================

pub mod state;
pub mod watcher;

// 重导出
pub use state::{today, AppState};
pub use watcher::{fingerprint, PollOutcome, WorkbookWatcher};
