// ==========================================
// 库存运营看板 - 导入编排（单次全量导入）
// ==========================================
// 流程: 定位工作簿 → 加载工作表 → 字段标准化 → 指标派生 → 快照
// 红线:
// - 主数据缺失为致命错误，不产出任何快照
// - 可选工作簿 / 工作表缺失按零行处理
// - 同一快照内所有集合来自同一次导入
// ==========================================

use crate::domain::item::Item;
use crate::domain::order::OrderSide;
use crate::domain::sheet::RawRecord;
use crate::domain::snapshot::{DashboardSnapshot, DebugSample, ExcelDebug};
use crate::engine::dashboard_alerts::DashboardAlertsEngine;
use crate::engine::order_aggregation::OrderAggregationEngine;
use crate::engine::stock_derivation::{ItemSources, StockDerivationEngine};
use crate::importer::error::ImportResult;
use crate::importer::field_aliases::sheet_aliases;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::sheet_loader::{CalamineOpener, SheetLoader};
use crate::importer::workbook_locator::WorkbookLocator;
use crate::importer::workbook_trait::{WorkbookOpener, WorkbookSource};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// 诊断样本行数
const SAMPLE_FINISHED_GOODS: usize = 3;
const SAMPLE_PO_COMBINED: usize = 2;
const SAMPLE_SO_COMBINED: usize = 2;

fn map_items(rows: &[RawRecord]) -> Vec<Item> {
    rows.iter().filter_map(FieldMapper::map_item).collect()
}

fn sample(rows: &[RawRecord], n: usize) -> Vec<RawRecord> {
    rows.iter().take(n).cloned().collect()
}

/// 一次导入加载到的原始工作表
#[derive(Debug, Default)]
struct RawSheets {
    finished_goods: Vec<RawRecord>,
    raw_materials: Vec<RawRecord>,
    legacy_items: Vec<RawRecord>,
    bom: Vec<RawRecord>,
    po_combined: Vec<RawRecord>,
    so_combined: Vec<RawRecord>,
    receipts: Vec<RawRecord>,
    production: Vec<RawRecord>,
    movements: Vec<RawRecord>,
}

// ==========================================
// IngestionPipeline
// ==========================================
pub struct IngestionPipeline {
    locator: WorkbookLocator,
    opener: Arc<dyn WorkbookOpener>,
    stock: StockDerivationEngine,
    orders: OrderAggregationEngine,
    alerts: DashboardAlertsEngine,
}

impl IngestionPipeline {
    pub fn new(data_dir: impl Into<PathBuf>, opener: Arc<dyn WorkbookOpener>) -> Self {
        Self {
            locator: WorkbookLocator::new(data_dir, opener.clone()),
            opener,
            stock: StockDerivationEngine::new(),
            orders: OrderAggregationEngine::new(),
            alerts: DashboardAlertsEngine::new(),
        }
    }

    /// 使用 calamine 读取工作簿
    pub fn with_calamine(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(data_dir, Arc::new(CalamineOpener))
    }

    pub fn data_dir(&self) -> &Path {
        self.locator.data_dir()
    }

    /// 执行一次全量导入
    ///
    /// # 参数
    /// - today: 计算账龄 / 订单天数的基准日期
    ///
    /// # 返回
    /// - Ok(DashboardSnapshot): 完整快照
    /// - Err(MasterWorkbookMissing): 主数据缺失
    #[instrument(skip(self), fields(data_dir = %self.data_dir().display()))]
    pub fn run(&self, today: NaiveDate) -> ImportResult<DashboardSnapshot> {
        info!("开始导入工作簿");

        // ==========================================
        // 步骤1: 定位工作簿
        // ==========================================
        let located = self.locator.locate_all().map_err(|e| {
            error!(error = %e, "工作簿定位失败，本次导入中止");
            e
        })?;

        // ==========================================
        // 步骤2: 加载工作表
        // ==========================================
        let mut master = self.opener.open(&located.master).map_err(|e| {
            error!(file = %located.master.display(), error = %e, "主数据工作簿无法读取");
            e
        })?;
        let mut po_book = self.open_optional(located.po.as_deref());
        let mut so_book = self.open_optional(located.so.as_deref());
        let mut misc_book = self.open_optional(located.misc.as_deref());

        let raw = Self::load_sheets(
            master.as_mut(),
            &mut po_book,
            &mut so_book,
            &mut misc_book,
        );

        // ==========================================
        // 步骤3: 字段标准化
        // ==========================================
        let finished_goods = map_items(&raw.finished_goods);
        let raw_materials = map_items(&raw.raw_materials);
        let legacy_items = map_items(&raw.legacy_items);
        let bom_lines: Vec<_> = raw
            .bom
            .iter()
            .filter_map(FieldMapper::map_bom_line)
            .collect();
        let po_lines: Vec<_> = raw
            .po_combined
            .iter()
            .map(|r| FieldMapper::map_order_line(r, OrderSide::Purchase))
            .collect();
        let so_lines: Vec<_> = raw
            .so_combined
            .iter()
            .map(|r| FieldMapper::map_order_line(r, OrderSide::Sales))
            .collect();
        let receipts: Vec<_> = raw
            .receipts
            .iter()
            .enumerate()
            .map(|(i, r)| FieldMapper::map_receipt(r, i))
            .collect();
        let production_records: Vec<_> = raw
            .production
            .iter()
            .enumerate()
            .map(|(i, r)| FieldMapper::map_production(r, i))
            .collect();
        let movements: Vec<_> = raw
            .movements
            .iter()
            .filter_map(FieldMapper::map_movement)
            .collect();

        // ==========================================
        // 步骤4: 指标派生
        // ==========================================
        let stock_items = self.stock.derive(
            ItemSources {
                finished_goods: &finished_goods,
                raw_materials: &raw_materials,
                legacy_items: &legacy_items,
            },
            &movements,
        );
        let sales_orders = self.orders.derive_sales_orders(&so_lines, today);
        let purchase_orders = self.orders.derive_purchase_orders(&po_lines, today);

        let dashboard_kpis = self
            .alerts
            .kpis(&stock_items, &purchase_orders, &sales_orders);
        let morning_list_items = self.alerts.morning_list(&purchase_orders, &stock_items);
        let expedite_items = self.alerts.expedite_items(&purchase_orders);
        let recent_activity = self.alerts.recent_activity(&receipts, &production_records);

        // ==========================================
        // 步骤5: 诊断信息
        // ==========================================
        let excel_debug = ExcelDebug {
            data_dir: self.data_dir().display().to_string(),
            master_path: located.master.display().to_string(),
            po_workbook: located.po.as_ref().map(|p| p.display().to_string()),
            so_workbook: located.so.as_ref().map(|p| p.display().to_string()),
            misc_workbook: located.misc.as_ref().map(|p| p.display().to_string()),
            counts: Self::row_counts(&raw, bom_lines.len()),
            sample: DebugSample {
                finished_goods: sample(&raw.finished_goods, SAMPLE_FINISHED_GOODS),
                po_combined: sample(&raw.po_combined, SAMPLE_PO_COMBINED),
                so_combined: sample(&raw.so_combined, SAMPLE_SO_COMBINED),
            },
        };

        info!(
            stock_items = stock_items.len(),
            purchase_orders = purchase_orders.len(),
            sales_orders = sales_orders.len(),
            receipts = receipts.len(),
            production_records = production_records.len(),
            bom_lines = bom_lines.len(),
            "导入完成"
        );

        Ok(DashboardSnapshot {
            generated_at: Utc::now(),
            as_of: today,
            dashboard_kpis,
            morning_list_items,
            expedite_items,
            recent_activity,
            sales_orders,
            purchase_orders,
            receipts,
            production_records,
            stock_items,
            bom_lines,
            excel_debug,
        })
    }

    /// 打开可选工作簿，失败时降级为 None
    fn open_optional(&self, path: Option<&Path>) -> Option<Box<dyn WorkbookSource>> {
        let path = path?;
        match self.opener.open(path) {
            Ok(book) => Some(book),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "可选工作簿无法读取，按零行处理");
                None
            }
        }
    }

    fn load_sheets(
        master: &mut dyn WorkbookSource,
        po_book: &mut Option<Box<dyn WorkbookSource>>,
        so_book: &mut Option<Box<dyn WorkbookSource>>,
        misc_book: &mut Option<Box<dyn WorkbookSource>>,
    ) -> RawSheets {
        let finished_goods = SheetLoader::load_sheet_any(master, sheet_aliases::FINISHED_GOODS);
        let raw_materials = SheetLoader::load_sheet_any(master, sheet_aliases::RAW_MATERIALS);
        let bom = SheetLoader::load_sheet_any(master, sheet_aliases::BOM);

        // 兼容旧版: 成品与原料均为空时读取 Items
        let legacy_items = if finished_goods.is_empty() && raw_materials.is_empty() {
            SheetLoader::load_sheet_any(master, sheet_aliases::LEGACY_ITEMS)
        } else {
            Vec::new()
        };

        let po_combined =
            SheetLoader::load_optional(po_book.as_mut(), sheet_aliases::PO_COMBINED);
        let so_combined =
            SheetLoader::load_optional(so_book.as_mut(), sheet_aliases::SO_COMBINED);
        let receipts = SheetLoader::load_optional(misc_book.as_mut(), sheet_aliases::RECEIPTS);
        let production =
            SheetLoader::load_optional(misc_book.as_mut(), sheet_aliases::PRODUCTION);
        let movements = SheetLoader::load_optional(misc_book.as_mut(), sheet_aliases::MOVEMENTS);

        if finished_goods.is_empty() {
            warn!("成品工作表不存在或为空");
        }

        let raw = RawSheets {
            finished_goods,
            raw_materials,
            legacy_items,
            bom,
            po_combined,
            so_combined,
            receipts,
            production,
            movements,
        };
        debug!(counts = ?Self::row_counts(&raw, 0), "工作表加载完成");
        raw
    }

    fn row_counts(raw: &RawSheets, valid_bom_lines: usize) -> BTreeMap<String, usize> {
        [
            ("finishedGoods", raw.finished_goods.len()),
            ("rawMaterials", raw.raw_materials.len()),
            ("legacyItems", raw.legacy_items.len()),
            ("bom", raw.bom.len()),
            ("bomValid", valid_bom_lines),
            ("PO_Combined", raw.po_combined.len()),
            ("SO_Combined", raw.so_combined.len()),
            ("Trascations", raw.receipts.len()),
            ("Production", raw.production.len()),
            ("Movements", raw.movements.len()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}
