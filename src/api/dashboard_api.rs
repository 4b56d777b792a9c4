// ==========================================
// 库存运营看板 - 看板 API
// ==========================================
// 职责: 持有当前快照，触发全量导入，提供 BOM 可生产量查询
// 红线: 快照整体替换；导入失败时保留上一份快照
// ==========================================

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::item::BomCapacityResult;
use crate::domain::snapshot::DashboardSnapshot;
use crate::engine::bom_capacity::BomCapacityEngine;
use crate::engine::ingestion::IngestionPipeline;

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 职责：
/// 1. 执行导入并替换当前快照
/// 2. 读取当前快照（只读共享）
/// 3. BOM 可生产量查询
pub struct DashboardApi {
    pipeline: IngestionPipeline,
    bom_engine: BomCapacityEngine,
    current: RwLock<Option<Arc<DashboardSnapshot>>>,
}

impl DashboardApi {
    pub fn new(pipeline: IngestionPipeline) -> Self {
        Self {
            pipeline,
            bom_engine: BomCapacityEngine::new(),
            current: RwLock::new(None),
        }
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    /// 重新导入并替换当前快照
    ///
    /// # 参数
    /// - today: 账龄计算基准日期
    ///
    /// # 返回
    /// - Ok(Arc<DashboardSnapshot>): 新快照
    /// - Err(ApiError): 导入失败，当前快照保持不变
    pub fn refresh(&self, today: NaiveDate) -> ApiResult<Arc<DashboardSnapshot>> {
        let snapshot = match self.pipeline.run(today) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!(error = %e, "导入失败，保留上一份快照");
                return Err(e.into());
            }
        };

        self.install(snapshot.clone())?;
        info!(
            stock_items = snapshot.stock_items.len(),
            purchase_orders = snapshot.purchase_orders.len(),
            sales_orders = snapshot.sales_orders.len(),
            "快照已更新"
        );
        Ok(snapshot)
    }

    /// 替换当前快照
    pub fn install(&self, snapshot: Arc<DashboardSnapshot>) -> ApiResult<()> {
        let mut guard = self
            .current
            .write()
            .map_err(|e| ApiError::InternalError(format!("快照锁已损坏: {}", e)))?;
        *guard = Some(snapshot);
        Ok(())
    }

    /// 当前快照（尚未导入时为 None）
    pub fn current(&self) -> Option<Arc<DashboardSnapshot>> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    /// 当前快照，未导入时返回 SnapshotUnavailable
    pub fn snapshot(&self) -> ApiResult<Arc<DashboardSnapshot>> {
        self.current()
            .ok_or_else(|| ApiError::SnapshotUnavailable("尚未完成导入".to_string()))
    }

    /// 计算父件的最大可生产量
    ///
    /// # 参数
    /// - parent: 父件 SKU
    ///
    /// # 返回
    /// - Ok(BomCapacityResult): 可生产量与瓶颈子件
    /// - Err(NotFound): 父件没有 BOM 行
    pub fn compute_bom_capacity(&self, parent: &str) -> ApiResult<BomCapacityResult> {
        if parent.trim().is_empty() {
            return Err(ApiError::InvalidInput("父件 SKU 不能为空".to_string()));
        }

        let snapshot = self.snapshot()?;
        self.bom_engine
            .compute(parent, &snapshot.bom_lines, &snapshot.stock_items)
            .ok_or_else(|| ApiError::NotFound(format!("父件 {} 没有 BOM 行", parent.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_unavailable_before_refresh() {
        let dir = TempDir::new().unwrap();
        let api = DashboardApi::new(IngestionPipeline::with_calamine(dir.path()));

        assert!(api.current().is_none());
        assert!(matches!(
            api.snapshot(),
            Err(ApiError::SnapshotUnavailable(_))
        ));
        assert!(matches!(
            api.compute_bom_capacity("FG-100"),
            Err(ApiError::SnapshotUnavailable(_))
        ));
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let api = DashboardApi::new(IngestionPipeline::with_calamine(dir.path()));

        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let previous = Arc::new(DashboardSnapshot::empty(today));
        api.install(previous.clone()).unwrap();

        // 目录下没有主数据工作簿
        let err = api.refresh(today).unwrap_err();
        assert!(matches!(err, ApiError::ImportError(_)));
        assert!(Arc::ptr_eq(&api.snapshot().unwrap(), &previous));
    }

    #[test]
    fn test_bom_capacity_rejects_blank_parent() {
        let dir = TempDir::new().unwrap();
        let api = DashboardApi::new(IngestionPipeline::with_calamine(dir.path()));
        assert!(matches!(
            api.compute_bom_capacity("  "),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
