//! 采购（入库）领域模型
//!
//! 创建请求中的数量与单价都是十进制文本；合计由后端权威计算。

use crate::decimal::DecimalText;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    #[serde(rename = "REGISTRADA")]
    Registered,
    #[serde(rename = "ANULADA")]
    Voided,
    #[serde(rename = "CERRADA")]
    Closed,
}

impl PurchaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseStatus::Registered => "REGISTRADA",
            PurchaseStatus::Voided => "ANULADA",
            PurchaseStatus::Closed => "CERRADA",
        }
    }
}

// =========================================================
// 请求体
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLineIn {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: DecimalText,
    #[serde(rename = "costo_unit")]
    pub unit_cost: DecimalText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCreatePayload {
    #[serde(rename = "proveedor_id")]
    pub supplier_id: i64,
    #[serde(rename = "bodega_id")]
    pub warehouse_id: i64,
    #[serde(rename = "no_documento")]
    pub document_number: String,
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none", default)]
    pub observations: Option<String>,
    #[serde(rename = "items")]
    pub lines: Vec<PurchaseLineIn>,
}

// =========================================================
// 响应体
// =========================================================

/// 历史列表中的采购摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseSummary {
    pub id: i64,
    #[serde(rename = "no_documento")]
    pub document_number: String,
    #[serde(rename = "proveedor_id", default)]
    pub supplier_id: Option<i64>,
    #[serde(rename = "proveedor_nombre", default)]
    pub supplier_name: String,
    #[serde(rename = "bodega_id", default)]
    pub warehouse_id: Option<i64>,
    #[serde(rename = "bodega_nombre", default)]
    pub warehouse_name: String,
    #[serde(rename = "fecha")]
    pub date: String,
    pub total: DecimalText,
    #[serde(rename = "estado")]
    pub status: PurchaseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDetailLine {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "producto_nombre", default)]
    pub product_name: String,
    #[serde(rename = "cantidad")]
    pub quantity: DecimalText,
    #[serde(rename = "costo_unitario")]
    pub unit_cost: DecimalText,
    pub subtotal: DecimalText,
}

/// 采购详情（含明细）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    #[serde(rename = "proveedor_id")]
    pub supplier_id: i64,
    #[serde(rename = "proveedor_nombre", default)]
    pub supplier_name: String,
    #[serde(rename = "bodega_id")]
    pub warehouse_id: i64,
    #[serde(rename = "bodega_nombre", default)]
    pub warehouse_name: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "no_documento")]
    pub document_number: String,
    pub total: DecimalText,
    #[serde(rename = "estado")]
    pub status: PurchaseStatus,
    #[serde(rename = "observaciones", default)]
    pub observations: Option<String>,
    #[serde(rename = "items", default)]
    pub lines: Vec<PurchaseDetailLine>,
}
