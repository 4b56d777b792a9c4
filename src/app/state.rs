// ==========================================
// 库存运营看板 - 应用状态
// ==========================================
// 职责: 按运行配置装配 API 实例，供命令行与监听模式共享
// ==========================================

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::api::{ApiResult, DashboardApi, PlanApi};
use crate::config::DashboardConfig;
use crate::domain::snapshot::DashboardSnapshot;
use crate::emitter::DatasetEmitter;
use crate::engine::ingestion::IngestionPipeline;
use crate::importer::workbook_trait::WorkbookOpener;

/// 本地日期（账龄计算基准）
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 应用状态
///
/// 包含所有API实例和运行配置
pub struct AppState {
    pub config: DashboardConfig,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,

    /// 排产计划API
    pub plan_api: Arc<PlanApi>,
}

impl AppState {
    /// 使用 calamine 读取工作簿
    pub fn new(config: DashboardConfig) -> Self {
        tracing::info!(
            data_dir = %config.data_dir.display(),
            output = ?config.output,
            json_output = ?config.json_output,
            "初始化AppState"
        );
        let pipeline = IngestionPipeline::with_calamine(config.data_dir.clone());
        Self::assemble(config, pipeline)
    }

    /// 使用自定义打开器（测试替身）
    pub fn with_opener(config: DashboardConfig, opener: Arc<dyn WorkbookOpener>) -> Self {
        let pipeline = IngestionPipeline::new(config.data_dir.clone(), opener);
        Self::assemble(config, pipeline)
    }

    fn assemble(config: DashboardConfig, pipeline: IngestionPipeline) -> Self {
        let dashboard_api = Arc::new(DashboardApi::new(pipeline));
        let plan_api = Arc::new(PlanApi::new(config.plan_path()));
        Self {
            config,
            dashboard_api,
            plan_api,
        }
    }

    /// 全量导入并输出到已配置的目标
    ///
    /// 导入失败时不输出，已有输出文件保持不变
    pub fn generate(&self, today: NaiveDate) -> ApiResult<Arc<DashboardSnapshot>> {
        let snapshot = self.dashboard_api.refresh(today)?;
        DatasetEmitter::emit(
            &snapshot,
            self.config.output.as_deref(),
            self.config.json_output.as_deref(),
        )?;
        Ok(snapshot)
    }
}
