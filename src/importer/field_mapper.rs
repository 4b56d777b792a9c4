// ==========================================
// 库存运营看板 - 字段映射器实现
// ==========================================
// 职责: 源字段（候选列名列表）→ 标准字段映射 + 类型转换
// 规则:
// - 文本字段取第一个非空候选
// - 数值字段取第一个在行中存在的候选列（即使为空）
// - 日期字段取第一个可解析的候选
// ==========================================

use crate::domain::activity::{InventoryMovement, ProductionRecord, Receipt};
use crate::domain::item::{BomLine, Item};
use crate::domain::order::{CombinedOrderLine, OrderSide};
use crate::domain::sheet::{CellValue, RawRecord};
use crate::domain::types::MovementType;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::field_aliases::{
    bom_fields, combined_fields, item_fields, movement_fields, production_fields, receipt_fields,
};

pub struct FieldMapper;

impl FieldMapper {
    // ==========================================
    // 候选列解析
    // ==========================================

    /// 文本: 第一个非空候选（已 trim），都为空时返回空串
    pub fn resolve_text(row: &RawRecord, candidates: &[&str]) -> String {
        candidates
            .iter()
            .filter_map(|key| row.get(*key))
            .map(DataCleaner::text)
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    /// 第一个在行中存在的候选单元格
    pub fn resolve_cell<'a>(row: &'a RawRecord, candidates: &[&str]) -> Option<&'a CellValue> {
        candidates.iter().find_map(|key| row.get(*key))
    }

    /// 数值: 第一个存在的候选列，缺失或无法解析时取默认值
    pub fn resolve_number(row: &RawRecord, candidates: &[&str], default: f64) -> f64 {
        Self::resolve_cell(row, candidates)
            .map(|cell| DataCleaner::to_number(cell, default))
            .unwrap_or(default)
    }

    /// 日期: 第一个可解析的候选，格式 `YYYY-MM-DD`，都不可解析时返回空串
    pub fn resolve_date(row: &RawRecord, candidates: &[&str]) -> String {
        candidates
            .iter()
            .filter_map(|key| row.get(*key))
            .map(DataCleaner::to_date_only)
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    /// 可选文本: 空串视为缺失
    fn resolve_optional_text(row: &RawRecord, candidates: &[&str]) -> Option<String> {
        Some(Self::resolve_text(row, candidates)).filter(|v| !v.is_empty())
    }

    // ==========================================
    // 记录映射
    // ==========================================

    /// 物料行 → Item（SKU 为空时返回 None）
    pub fn map_item(row: &RawRecord) -> Option<Item> {
        let sku = Self::resolve_text(row, item_fields::SKU);
        if sku.is_empty() {
            return None;
        }

        let name = Self::resolve_optional_text(row, item_fields::NAME).unwrap_or_else(|| sku.clone());

        Some(Item {
            name,
            category_label: Self::resolve_optional_text(row, item_fields::CATEGORY),
            uom: Self::resolve_text(row, item_fields::UOM),
            on_hand: Self::resolve_number(row, item_fields::ON_HAND, 0.0),
            min: Self::resolve_number(row, item_fields::MIN, 0.0),
            max: Self::resolve_number(row, item_fields::MAX, 0.0),
            location: Self::resolve_text(row, item_fields::LOCATION),
            sku,
        })
    }

    /// BOM 行 → BomLine（缺父件 / 子件 / 正用量时返回 None）
    pub fn map_bom_line(row: &RawRecord) -> Option<BomLine> {
        let scrap_pct = Self::resolve_cell(row, bom_fields::SCRAP_PCT)
            .filter(|cell| !cell.is_empty())
            .map(|cell| DataCleaner::to_number(cell, 0.0));

        let line = BomLine {
            parent: Self::resolve_text(row, bom_fields::PARENT),
            component: Self::resolve_text(row, bom_fields::COMPONENT),
            qty_per: Self::resolve_number(row, bom_fields::QTY_PER, 0.0),
            scrap_pct,
            alt_group: Self::resolve_optional_text(row, bom_fields::ALT_GROUP),
        };

        if line.is_valid() {
            Some(line)
        } else {
            None
        }
    }

    /// PO_Combined / SO_Combined 行 → CombinedOrderLine
    pub fn map_order_line(row: &RawRecord, side: OrderSide) -> CombinedOrderLine {
        let (number_keys, party_keys, date_keys, sku_keys, qty_keys) = match side {
            OrderSide::Purchase => (
                combined_fields::PO_NUMBER,
                combined_fields::VENDOR,
                combined_fields::PO_DATE,
                combined_fields::PO_SKU,
                combined_fields::PO_QUANTITY,
            ),
            OrderSide::Sales => (
                combined_fields::SO_NUMBER,
                combined_fields::CUSTOMER,
                combined_fields::SO_DATE,
                combined_fields::SO_SKU,
                combined_fields::SO_QUANTITY,
            ),
        };

        CombinedOrderLine {
            side,
            file_name: Self::resolve_text(row, combined_fields::FILE_NAME),
            file_link: Self::resolve_text(row, combined_fields::FILE_LINK),
            counterparty: Self::resolve_text(row, party_keys),
            invoice_id: Self::resolve_text(row, combined_fields::INVOICE_ID),
            order_number: Self::resolve_text(row, number_keys),
            invoice_date: Self::resolve_date(row, combined_fields::INVOICE_DATE),
            order_date: Self::resolve_date(row, date_keys),
            product_description: Self::resolve_text(row, combined_fields::PRODUCT_DESCRIPTION),
            product_code: Self::resolve_text(row, combined_fields::PRODUCT_CODE),
            sku: Self::resolve_text(row, sku_keys),
            quantity: Self::resolve_number(row, qty_keys, 0.0),
            qty_ordered: Self::resolve_number(row, combined_fields::QTY_ORDERED, 0.0),
            unit: Self::resolve_text(row, combined_fields::UNIT),
        }
    }

    /// 收货行 → Receipt（id 为 1 起的行序号）
    pub fn map_receipt(row: &RawRecord, index: usize) -> Receipt {
        Receipt {
            id: (index + 1).to_string(),
            date: Self::resolve_date(row, receipt_fields::DATE),
            po_number: Self::resolve_text(row, receipt_fields::PO_NUMBER),
            vendor: Self::resolve_text(row, receipt_fields::VENDOR),
            sku: Self::resolve_text(row, receipt_fields::SKU),
            qty: Self::resolve_number(row, receipt_fields::QTY, 0.0),
            variance: Self::resolve_number(row, receipt_fields::VARIANCE, 0.0),
            receiver: Self::resolve_text(row, receipt_fields::RECEIVER),
            remarks: Self::resolve_text(row, receipt_fields::REMARKS),
        }
    }

    /// 生产行 → ProductionRecord（id 为 1 起的行序号）
    pub fn map_production(row: &RawRecord, index: usize) -> ProductionRecord {
        ProductionRecord {
            id: (index + 1).to_string(),
            date: Self::resolve_date(row, production_fields::DATE),
            line: Self::resolve_text(row, production_fields::LINE),
            sku: Self::resolve_text(row, production_fields::SKU),
            qty: Self::resolve_number(row, production_fields::QTY, 0.0),
            shift: Self::resolve_text(row, production_fields::SHIFT),
            item_name: Self::resolve_text(row, production_fields::ITEM_NAME),
            qty_rejected: Self::resolve_number(row, production_fields::QTY_REJECTED, 0.0),
            reject_pct: Self::resolve_number(row, production_fields::REJECT_PCT, 0.0),
            male: Self::resolve_number(row, production_fields::MALE, 0.0),
            female: Self::resolve_number(row, production_fields::FEMALE, 0.0),
            operator: Self::resolve_text(row, production_fields::OPERATOR),
        }
    }

    /// 流水行 → InventoryMovement（SKU 为空时返回 None）
    pub fn map_movement(row: &RawRecord) -> Option<InventoryMovement> {
        let sku = Self::resolve_text(row, movement_fields::SKU);
        if sku.is_empty() {
            return None;
        }

        Some(InventoryMovement {
            sku,
            date: Self::resolve_cell(row, movement_fields::DATE).and_then(DataCleaner::to_date),
            movement_type: MovementType::from_label(&Self::resolve_text(
                row,
                movement_fields::MOVEMENT_TYPE,
            )),
            qty_delta: Self::resolve_number(row, movement_fields::QTY_DELTA, 0.0),
            ref_type: Self::resolve_text(row, movement_fields::REF_TYPE),
            ref_no: Self::resolve_text(row, movement_fields::REF_NO),
            location: Self::resolve_text(row, movement_fields::LOCATION),
        })
    }
}
