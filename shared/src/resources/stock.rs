use super::Api;
use crate::client::SessionProvider;
use crate::error::ApiResult;
use crate::inventory::StockLevel;
use crate::pagination::decode_listing;
use crate::protocol::{ApiRequest, HttpMethod};
use crate::transport::HttpTransport;

pub const STOCK_PATH: &str = "/api/v1/inventario/existencias/";

pub struct ListStock;

impl ApiRequest for ListStock {
    type Response = Vec<StockLevel>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        STOCK_PATH.to_string()
    }

    fn decode(body: &str) -> ApiResult<Self::Response> {
        decode_listing(body)
    }
}

/// 库存只读
pub struct Stock<'a, T, S: ?Sized>(pub(super) Api<'a, T, S>);

impl<T: HttpTransport, S: SessionProvider + ?Sized> Stock<'_, T, S> {
    pub async fn list(&self) -> ApiResult<Vec<StockLevel>> {
        self.0.send(&ListStock).await
    }
}
