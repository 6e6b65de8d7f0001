use super::Api;
use crate::client::SessionProvider;
use crate::error::ApiResult;
use crate::pagination::decode_listing;
use crate::protocol::{ApiRequest, HttpMethod, json_body};
use crate::purchase::{Purchase, PurchaseCreatePayload, PurchaseSummary};
use crate::transport::HttpTransport;

pub const PURCHASES_PATH: &str = "/api/v1/compras/";

pub struct ListPurchases;

impl ApiRequest for ListPurchases {
    type Response = Vec<PurchaseSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PURCHASES_PATH.to_string()
    }

    fn decode(body: &str) -> ApiResult<Self::Response> {
        decode_listing(body)
    }
}

pub struct GetPurchase {
    pub id: i64,
}

impl ApiRequest for GetPurchase {
    type Response = Purchase;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{PURCHASES_PATH}{}/", self.id)
    }
}

pub struct CreatePurchase {
    pub payload: PurchaseCreatePayload,
}

impl ApiRequest for CreatePurchase {
    type Response = Purchase;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PURCHASES_PATH.to_string()
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.payload)
    }
}

/// 采购只能新建与查询，后端负责库存与合计
pub struct Purchases<'a, T, S: ?Sized>(pub(super) Api<'a, T, S>);

impl<T: HttpTransport, S: SessionProvider + ?Sized> Purchases<'_, T, S> {
    pub async fn list(&self) -> ApiResult<Vec<PurchaseSummary>> {
        self.0.send(&ListPurchases).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Purchase> {
        self.0.send(&GetPurchase { id }).await
    }

    pub async fn create(&self, payload: PurchaseCreatePayload) -> ApiResult<Purchase> {
        self.0.send(&CreatePurchase { payload }).await
    }
}
