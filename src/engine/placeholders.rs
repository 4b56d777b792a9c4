// ==========================================
// 库存运营看板 - 未计算指标占位值
// ==========================================
// 源数据暂无对应信号的指标，统一在此声明
// 接入真实数据后替换对应常量的使用点即可
// ==========================================

use crate::domain::types::Priority;

/// 预留量: 源数据没有分配信息，恒为 0
pub const RESERVED_NOT_YET_COMPUTED: f64 = 0.0;

/// 销售订单已分配量: 同上
pub const ALLOCATED_NOT_YET_COMPUTED: f64 = 0.0;

/// 14 天内在途量: 采购明细没有预计到货日
pub const INCOMING_14D_NOT_YET_COMPUTED: f64 = 0.0;

/// 采购订单是否逾期: 没有可依据的交期规则，恒为 false
pub const IS_LATE_NOT_YET_COMPUTED: bool = false;

/// 销售订单优先级: 源数据无优先级字段
pub const DEFAULT_SALES_PRIORITY: Priority = Priority::Medium;
