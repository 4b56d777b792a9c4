// ==========================================
// 库存运营看板 - 源数据字段映射表
// ==========================================
// 职责: 工作表别名 + 每个目标字段的候选列名（按优先级排列）
// 约定: 只放数据，不放逻辑；源表结构漂移时只改这里
// ==========================================

/// 工作表别名（匹配前统一做小写 + 去标点归一化）
pub mod sheet_aliases {
    pub const FINISHED_GOODS: &[&str] = &[
        "finished goods",
        "finished_goods",
        "finishedgoods",
        "finishgoods",
        "FG",
    ];
    pub const RAW_MATERIALS: &[&str] = &[
        "raw material",
        "raw materials",
        "raw_material",
        "rawmaterial",
        "RM",
    ];
    /// 旧版合并物料表，仅当成品表与原料表均为空时读取
    pub const LEGACY_ITEMS: &[&str] = &["Items"];
    pub const BOM: &[&str] = &["bom", "BOM"];

    pub const PO_COMBINED: &[&str] = &["PO_Combined"];
    pub const SO_COMBINED: &[&str] = &["SO_Combined"];
    // "Trascations" 为源文件中的既有拼写，需保留
    pub const RECEIPTS: &[&str] = &["Trascations", "Transactions", "Receipts"];
    pub const PRODUCTION: &[&str] = &["ProductionLog", "Production"];
    pub const MOVEMENTS: &[&str] = &["Movements"];

    /// 定位“杂项”工作簿（收货 / 生产 / 流水）所用的工作表名
    pub const MISC_WORKBOOK: &[&str] = &[
        "Trascations",
        "Transactions",
        "Production",
        "ProductionLog",
        "Movements",
    ];
}

/// 主数据工作簿文件名（按优先级）
pub const MASTER_WORKBOOK_FILES: &[&str] = &["MasterData.xls", "MasterData.xlsx"];

/// 物料表字段
pub mod item_fields {
    pub const SKU: &[&str] = &["PartNo"];
    pub const NAME: &[&str] = &["PartName", "ItemName"];
    pub const CATEGORY: &[&str] = &["Category"];
    pub const UOM: &[&str] = &["UoM", "Unit"];
    pub const ON_HAND: &[&str] = &["qty", "Qty", "OnHand"];
    pub const MIN: &[&str] = &["Min"];
    pub const MAX: &[&str] = &["Max"];
    pub const LOCATION: &[&str] = &["Location"];
}

/// BOM 字段
pub mod bom_fields {
    pub const PARENT: &[&str] = &["ParentPartNo", "parent"];
    pub const COMPONENT: &[&str] = &["ComponentPartNo", "component"];
    pub const QTY_PER: &[&str] = &["QtyPer", "qtyPer"];
    pub const SCRAP_PCT: &[&str] = &["ScrapPct"];
    pub const ALT_GROUP: &[&str] = &["AltGroup"];
}

/// PO_Combined / SO_Combined 共用字段
pub mod combined_fields {
    pub const FILE_NAME: &[&str] = &["FileName"];
    pub const FILE_LINK: &[&str] = &["FileLink"];
    pub const INVOICE_ID: &[&str] = &["InvoiceId"];
    pub const INVOICE_DATE: &[&str] = &["InvoiceDate"];
    pub const PRODUCT_DESCRIPTION: &[&str] = &["ProductDescription"];
    pub const PRODUCT_CODE: &[&str] = &["ProductCode"];
    pub const UNIT: &[&str] = &["Unit"];
    pub const QTY_ORDERED: &[&str] = &["QtyOrdered"];

    // ===== 采购侧 =====
    pub const PO_NUMBER: &[&str] = &["PurchaseOrder"];
    pub const VENDOR: &[&str] = &["VendorName", "VendorCode"];
    pub const PO_DATE: &[&str] = &["PO-date"];
    pub const PO_SKU: &[&str] = &["part no.", "ProductCode"];
    pub const PO_QUANTITY: &[&str] = &["Quantity", "QtyReceived"];

    // ===== 销售侧（复用采购列名）=====
    pub const SO_NUMBER: &[&str] = &["SaleOrder No.", "PurchaseOrder", "SONumber"];
    pub const CUSTOMER: &[&str] = &["VendorName", "CustomerName"];
    pub const SO_DATE: &[&str] = &["SO-date"];
    pub const SO_SKU: &[&str] = &["part no.", "PartNo", "ProductCode"];
    pub const SO_QUANTITY: &[&str] = &["Quantity", "QtyOrdered"];
}

/// 收货表字段
pub mod receipt_fields {
    pub const DATE: &[&str] = &["PO-date", "InvoiceDate", "Date"];
    pub const PO_NUMBER: &[&str] = &["PurchaseOrder", "PONumber"];
    pub const VENDOR: &[&str] = &["VendorName"];
    pub const SKU: &[&str] = &["ProductCode", "PartNo"];
    pub const QTY: &[&str] = &["Quantity", "QtyReceived"];
    pub const VARIANCE: &[&str] = &["Variance"];
    pub const RECEIVER: &[&str] = &["Receiver"];
    pub const REMARKS: &[&str] = &["Status", "Remarks"];
}

/// 生产记录字段
pub mod production_fields {
    pub const DATE: &[&str] = &["Timestamp", "Date", "ProductionDate", "Production Date"];
    pub const LINE: &[&str] = &["Line"];
    pub const SKU: &[&str] = &["ItemCode", "FGPartNo"];
    pub const QTY: &[&str] = &["QtyProduced", "Qty"];
    pub const ITEM_NAME: &[&str] = &["ItemName", "name"];
    pub const QTY_REJECTED: &[&str] = &["QtyRejected"];
    pub const REJECT_PCT: &[&str] = &["Reject%"];
    pub const MALE: &[&str] = &["Male"];
    pub const FEMALE: &[&str] = &["Female"];
    pub const OPERATOR: &[&str] = &["Name", "Operator"];
    pub const SHIFT: &[&str] = &["Shift"];
}

/// 库存流水字段
pub mod movement_fields {
    pub const SKU: &[&str] = &["PartNo"];
    pub const DATE: &[&str] = &["Date"];
    pub const MOVEMENT_TYPE: &[&str] = &["MovementType"];
    pub const QTY_DELTA: &[&str] = &["QtyDelta"];
    pub const REF_TYPE: &[&str] = &["RefType"];
    pub const REF_NO: &[&str] = &["RefNo"];
    pub const LOCATION: &[&str] = &["Location"];
}
