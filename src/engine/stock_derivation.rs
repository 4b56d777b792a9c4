// ==========================================
// 库存运营看板 - 库存派生引擎
// ==========================================
// 输入: 成品 / 原料 / 旧版物料行 + 库存流水
// 输出: StockItem 列表（每个 SKU 一条，按首次出现顺序）
// 口径:
// - 在库量取主数据快照（同 SKU 多行时后出现者覆盖）
// - available = on_hand - reserved
// - 最近流水日期取该 SKU 全部可解析日期的最大值
// ==========================================

use crate::domain::activity::InventoryMovement;
use crate::domain::item::{Item, StockItem};
use crate::domain::types::{StockCategory, StockStatus};
use crate::engine::placeholders::{INCOMING_14D_NOT_YET_COMPUTED, RESERVED_NOT_YET_COMPUTED};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::instrument;

/// 物料来源表
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemSources<'a> {
    pub finished_goods: &'a [Item],
    pub raw_materials: &'a [Item],
    pub legacy_items: &'a [Item],
}

impl<'a> ItemSources<'a> {
    /// 全部物料行（成品 → 原料 → 旧版）
    pub fn all(&self) -> impl Iterator<Item = &'a Item> {
        self.finished_goods
            .iter()
            .chain(self.raw_materials.iter())
            .chain(self.legacy_items.iter())
    }
}

// ==========================================
// StockDerivationEngine
// ==========================================
#[derive(Debug, Default)]
pub struct StockDerivationEngine;

impl StockDerivationEngine {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip_all, fields(
        fg = sources.finished_goods.len(),
        rm = sources.raw_materials.len(),
        legacy = sources.legacy_items.len(),
        movements = movements.len()
    ))]
    pub fn derive(
        &self,
        sources: ItemSources<'_>,
        movements: &[InventoryMovement],
    ) -> Vec<StockItem> {
        let fg_skus: HashSet<&str> = sources
            .finished_goods
            .iter()
            .map(|i| i.sku.as_str())
            .collect();
        let rm_skus: HashSet<&str> = sources
            .raw_materials
            .iter()
            .map(|i| i.sku.as_str())
            .collect();

        // 在库量: 后出现者覆盖
        let mut on_hand: HashMap<&str, f64> = HashMap::new();
        for item in sources.all() {
            on_hand.insert(item.sku.as_str(), item.on_hand);
        }

        let last_movement = Self::last_movement_dates(movements);

        let mut seen: HashSet<&str> = HashSet::new();
        let mut stock_items = Vec::new();
        for item in sources.all() {
            if item.sku.is_empty() || !seen.insert(item.sku.as_str()) {
                continue;
            }

            let category = if fg_skus.contains(item.sku.as_str()) {
                StockCategory::FinishedGoods
            } else if rm_skus.contains(item.sku.as_str()) {
                StockCategory::RawMaterials
            } else {
                item.category_label
                    .as_deref()
                    .and_then(StockCategory::from_label)
                    .unwrap_or(StockCategory::RawMaterials)
            };

            let on_hand = on_hand.get(item.sku.as_str()).copied().unwrap_or(0.0);
            let reserved = RESERVED_NOT_YET_COMPUTED;
            let available = on_hand - reserved;

            stock_items.push(StockItem {
                id: (stock_items.len() + 1).to_string(),
                sku: item.sku.clone(),
                description: item.name.clone(),
                category,
                uom: item.uom.clone(),
                on_hand,
                reserved,
                available,
                incoming_14d: INCOMING_14D_NOT_YET_COMPUTED,
                min: item.min,
                max: item.max,
                status: StockStatus::classify(available, item.min),
                last_movement: last_movement
                    .get(item.sku.as_str())
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                location: item.location.clone(),
            });
        }

        stock_items
    }

    /// 每个 SKU 的最近流水日期（日期无法解析的流水忽略）
    fn last_movement_dates(movements: &[InventoryMovement]) -> HashMap<&str, NaiveDate> {
        let mut latest: HashMap<&str, NaiveDate> = HashMap::new();
        for mv in movements {
            let date = match mv.date {
                Some(d) => d,
                None => continue,
            };
            latest
                .entry(mv.sku.as_str())
                .and_modify(|cur| {
                    if date > *cur {
                        *cur = date;
                    }
                })
                .or_insert(date);
        }
        latest
    }
}
