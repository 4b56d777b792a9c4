// ==========================================
// 库存运营看板 - 工作簿监听
// ==========================================
// 方式: 定时轮询数据目录下 .xls / .xlsx 的修改时间与大小
// 变化时: 全量重新导入 → 替换快照 → 重新输出
// 失败时: 保留上一份快照与输出，等待下一次变化
// ==========================================

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::app::state::{today, AppState};
use crate::importer::error::ImportResult;
use crate::importer::workbook_locator::list_workbook_files;

/// 目录指纹: 工作簿路径 → (修改时间, 文件大小)
pub type DirFingerprint = BTreeMap<PathBuf, (Option<SystemTime>, u64)>;

/// 计算数据目录的工作簿指纹
pub fn fingerprint(data_dir: &Path) -> ImportResult<DirFingerprint> {
    let mut fp = DirFingerprint::new();
    for path in list_workbook_files(data_dir)? {
        // 轮询期间文件可能被删除
        let Ok(meta) = std::fs::metadata(&path) else {
            continue;
        };
        fp.insert(path, (meta.modified().ok(), meta.len()));
    }
    Ok(fp)
}

/// 一次轮询的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Unchanged,
    Reloaded,
    Failed,
}

pub struct WorkbookWatcher {
    state: Arc<AppState>,
    interval: Duration,
    last: Option<DirFingerprint>,
}

impl WorkbookWatcher {
    pub fn new(state: Arc<AppState>) -> Self {
        let interval = state.config.watch_interval;
        Self {
            state,
            interval,
            last: None,
        }
    }

    /// 单次轮询；首次调用总会触发导入
    pub async fn poll_once(&mut self) -> PollOutcome {
        let data_dir = self.state.config.data_dir.clone();
        let fp = match fingerprint(&data_dir) {
            Ok(fp) => fp,
            Err(e) => {
                warn!(error = %e, "数据目录扫描失败");
                return PollOutcome::Failed;
            }
        };

        if self.last.as_ref() == Some(&fp) {
            return PollOutcome::Unchanged;
        }
        debug!(files = fp.len(), "检测到工作簿变化");
        self.last = Some(fp);

        let state = self.state.clone();
        match tokio::task::spawn_blocking(move || state.generate(today())).await {
            Ok(Ok(snapshot)) => {
                info!(
                    stock_items = snapshot.stock_items.len(),
                    "工作簿变化，数据集已重新生成"
                );
                PollOutcome::Reloaded
            }
            Ok(Err(e)) => {
                error!(error = %e, "重新导入失败，保留上一份输出");
                PollOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "导入任务异常退出");
                PollOutcome::Failed
            }
        }
    }

    /// 持续轮询直到 shutdown 完成
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            data_dir = %self.state.config.data_dir.display(),
            interval_ms = self.interval.as_millis() as u64,
            "开始监听工作簿"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("停止监听工作簿");
                    break;
                }
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
            }
        }
    }
}
