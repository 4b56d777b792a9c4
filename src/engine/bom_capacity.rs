// ==========================================
// 库存运营看板 - BOM 可生产量计算
// ==========================================
// 口径:
// - 同一父件下重复的子件，以最后一行用量为准
// - 子件可用量取库存视图 available，未知 SKU 按 0
// - 最大可生产量 = min(floor(available / qty_per))，下限 0
// - 瓶颈: available < qty_per，按缺口降序
// ==========================================

use crate::domain::item::{BomBottleneck, BomCapacityResult, BomLine, StockItem};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct BomCapacityEngine;

impl BomCapacityEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算父件的最大可生产量；父件没有 BOM 行时返回 None
    pub fn compute(
        &self,
        parent: &str,
        bom_lines: &[BomLine],
        stock_items: &[StockItem],
    ) -> Option<BomCapacityResult> {
        let parent = parent.trim();

        // 子件去重: 保留首次出现顺序，用量取最后一行
        let mut components: Vec<(&str, f64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for line in bom_lines
            .iter()
            .filter(|l| l.parent == parent && l.is_valid())
        {
            match index.get(line.component.as_str()) {
                Some(&slot) => components[slot].1 = line.qty_per,
                None => {
                    index.insert(line.component.as_str(), components.len());
                    components.push((line.component.as_str(), line.qty_per));
                }
            }
        }

        if components.is_empty() {
            return None;
        }

        let available_of = |sku: &str| {
            stock_items
                .iter()
                .find(|s| s.sku == sku)
                .map(|s| s.available)
                .unwrap_or(0.0)
        };

        let mut max_buildable = i64::MAX;
        let mut bottlenecks = Vec::new();
        for (component, qty_per) in components {
            let available = available_of(component);
            let can_make = (available / qty_per).floor() as i64;
            max_buildable = max_buildable.min(can_make);

            if available < qty_per {
                bottlenecks.push(BomBottleneck {
                    sku: component.to_string(),
                    available,
                    required: qty_per,
                    shortfall: qty_per - available,
                });
            }
        }

        bottlenecks.sort_by(|a, b| b.shortfall.total_cmp(&a.shortfall));

        Some(BomCapacityResult {
            parent: parent.to_string(),
            max_buildable: max_buildable.max(0),
            bottlenecks,
        })
    }
}
