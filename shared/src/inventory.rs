use crate::decimal::DecimalText;
use serde::{Deserialize, Serialize};

/// 某产品在某仓库的库存数量（只读投影）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "producto_nombre", default)]
    pub product_name: String,
    #[serde(rename = "bodega_id")]
    pub warehouse_id: i64,
    #[serde(rename = "bodega_nombre", default)]
    pub warehouse_name: String,
    #[serde(rename = "cantidad")]
    pub quantity: DecimalText,
}

impl StockLevel {
    /// 列表渲染用的稳定键
    pub fn row_key(&self) -> String {
        format!("{}-{}", self.warehouse_id, self.product_id)
    }
}
