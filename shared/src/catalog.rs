//! 目录类领域模型：供应商、仓库、产品
//!
//! 字段名与后端 JSON 保持一致（西班牙语），通过 serde rename 映射到 Rust 字段。
//! 表单结构 (`*Form`) 持有原始输入文本，提交前再转换为请求体。

use crate::decimal::DecimalText;
use serde::{Deserialize, Serialize};

// =========================================================
// 供应商 (Proveedor)
// =========================================================

pub const SUPPLIER_STATUS_ACTIVE: &str = "ACTIVO";
pub const SUPPLIER_STATUS_INACTIVE: &str = "INACTIVO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(default)]
    pub cui: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// 后端状态文本，通常为 "ACTIVO" / "INACTIVO"
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

impl Supplier {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() != Some(SUPPLIER_STATUS_INACTIVE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SupplierStatus {
    #[default]
    #[serde(rename = "ACTIVO")]
    Active,
    #[serde(rename = "INACTIVO")]
    Inactive,
}

impl SupplierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Active => SUPPLIER_STATUS_ACTIVE,
            SupplierStatus::Inactive => SUPPLIER_STATUS_INACTIVE,
        }
    }

    pub fn parse(s: &str) -> Self {
        if s == SUPPLIER_STATUS_INACTIVE {
            SupplierStatus::Inactive
        } else {
            SupplierStatus::Active
        }
    }
}

/// 供应商编辑表单（原始输入）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierForm {
    pub name: String,
    pub nit: String,
    pub cui: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub status: SupplierStatus,
}

/// 供应商创建/更新请求体，空白的可选字段不会被发送
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cui: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "estado")]
    pub status: SupplierStatus,
}

impl SupplierForm {
    pub fn from_supplier(s: &Supplier) -> Self {
        Self {
            name: s.name.clone(),
            nit: s.nit.clone().unwrap_or_default(),
            cui: s.cui.clone().unwrap_or_default(),
            phone: s.phone.clone().unwrap_or_default(),
            address: s.address.clone().unwrap_or_default(),
            email: s.email.clone().unwrap_or_default(),
            status: s
                .status
                .as_deref()
                .map(SupplierStatus::parse)
                .unwrap_or_default(),
        }
    }

    /// 客户端校验：名称必填
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre del proveedor es obligatorio.".to_string());
        }
        Ok(())
    }

    pub fn to_payload(&self) -> SupplierPayload {
        SupplierPayload {
            name: self.name.trim().to_string(),
            nit: non_blank(&self.nit),
            cui: non_blank(&self.cui),
            phone: non_blank(&self.phone),
            address: non_blank(&self.address),
            email: non_blank(&self.email),
            status: self.status,
        }
    }
}

// =========================================================
// 仓库 (Bodega)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion", default)]
    pub location: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ubicacion")]
    pub location: String,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl Default for WarehouseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            active: true,
        }
    }
}

impl WarehouseForm {
    pub fn from_warehouse(w: &Warehouse) -> Self {
        Self {
            name: w.name.clone(),
            location: w.location.clone().unwrap_or_default(),
            active: w.active,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("El nombre de la bodega es obligatorio.".to_string());
        }
        Ok(())
    }

    /// 去除首尾空白后的副本
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            active: self.active,
        }
    }
}

// =========================================================
// 产品 (Producto)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(default)]
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "modelo", default)]
    pub model: Option<String>,
    #[serde(rename = "costo_ref", default)]
    pub reference_cost: DecimalText,
    #[serde(rename = "precio_base", default)]
    pub base_price: DecimalText,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductForm {
    pub sku: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "costo_ref")]
    pub reference_cost: DecimalText,
    #[serde(rename = "precio_base")]
    pub base_price: DecimalText,
    #[serde(rename = "activo")]
    pub active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: String::new(),
            model: String::new(),
            reference_cost: DecimalText::new("0.00"),
            base_price: DecimalText::new("0.00"),
            active: true,
        }
    }
}

impl ProductForm {
    pub fn from_product(p: &Product) -> Self {
        Self {
            sku: p.sku.clone(),
            name: p.name.clone(),
            model: p.model.clone().unwrap_or_default(),
            reference_cost: p.reference_cost.clone(),
            base_price: p.base_price.clone(),
            active: p.active,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() || self.name.trim().is_empty() {
            return Err("El SKU y el nombre del producto son obligatorios.".to_string());
        }
        Ok(())
    }

    /// 规范化后的副本：文本去空白，价格按十进制文本规范化
    pub fn normalized(&self) -> Self {
        Self {
            sku: self.sku.trim().to_string(),
            name: self.name.trim().to_string(),
            model: self.model.trim().to_string(),
            reference_cost: DecimalText::from_input(self.reference_cost.as_str()),
            base_price: DecimalText::from_input(self.base_price.as_str()),
            active: self.active,
        }
    }
}

fn default_true() -> bool {
    true
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
