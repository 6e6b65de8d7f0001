use super::{Api, Deactivate};
use crate::catalog::{SUPPLIER_STATUS_INACTIVE, Supplier, SupplierPayload};
use crate::client::SessionProvider;
use crate::error::ApiResult;
use crate::pagination::{ListQuery, Page, decode_page};
use crate::protocol::{ApiRequest, HttpMethod, json_body};
use crate::transport::HttpTransport;
use serde::de::IgnoredAny;
use serde_json::json;

pub const SUPPLIERS_PATH: &str = "/api/v1/catalogos/proveedores/";

// =========================================================
// 端点定义
// =========================================================

pub struct ListSuppliers {
    pub query: ListQuery,
}

impl ApiRequest for ListSuppliers {
    type Response = Page<Supplier>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        SUPPLIERS_PATH.to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        self.query.pairs()
    }

    fn decode(body: &str) -> ApiResult<Self::Response> {
        decode_page(body)
    }
}

pub struct GetSupplier {
    pub id: i64,
}

impl ApiRequest for GetSupplier {
    type Response = Supplier;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{SUPPLIERS_PATH}{}/", self.id)
    }
}

pub struct CreateSupplier {
    pub payload: SupplierPayload,
}

impl ApiRequest for CreateSupplier {
    type Response = Supplier;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        SUPPLIERS_PATH.to_string()
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.payload)
    }
}

pub struct UpdateSupplier {
    pub id: i64,
    pub payload: SupplierPayload,
}

impl ApiRequest for UpdateSupplier {
    type Response = Supplier;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{SUPPLIERS_PATH}{}/", self.id)
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.payload)
    }
}

/// 软停用：只修改 estado，记录保留
pub struct DeactivateSupplier {
    pub id: i64,
}

impl ApiRequest for DeactivateSupplier {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("{SUPPLIERS_PATH}{}/", self.id)
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&json!({ "estado": SUPPLIER_STATUS_INACTIVE }))
    }
}

// =========================================================
// 资源门面
// =========================================================

pub struct Suppliers<'a, T, S: ?Sized>(pub(super) Api<'a, T, S>);

impl<T: HttpTransport, S: SessionProvider + ?Sized> Suppliers<'_, T, S> {
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<Supplier>> {
        self.0
            .send(&ListSuppliers {
                query: query.clone(),
            })
            .await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Supplier> {
        self.0.send(&GetSupplier { id }).await
    }

    pub async fn create(&self, payload: SupplierPayload) -> ApiResult<Supplier> {
        self.0.send(&CreateSupplier { payload }).await
    }

    pub async fn update(&self, id: i64, payload: SupplierPayload) -> ApiResult<Supplier> {
        self.0.send(&UpdateSupplier { id, payload }).await
    }
}

#[async_trait::async_trait(?Send)]
impl<'a, T: HttpTransport, S: SessionProvider + ?Sized> Deactivate for Suppliers<'a, T, S> {
    async fn deactivate(&self, id: i64) -> ApiResult<()> {
        self.0.send(&DeactivateSupplier { id }).await?;
        log::info!("supplier {id} deactivated");
        Ok(())
    }
}
