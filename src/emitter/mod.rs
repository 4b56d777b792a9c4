// ==========================================
// 库存运营看板 - 输出层
// ==========================================
// 职责: 快照 → TypeScript 数据模块 / JSON 文档
// ==========================================

pub mod dataset_emitter;

pub use dataset_emitter::{DatasetEmitter, MODULE_HEADER};
