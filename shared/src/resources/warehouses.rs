use super::{Api, Deactivate};
use crate::catalog::{Warehouse, WarehouseForm};
use crate::client::SessionProvider;
use crate::error::ApiResult;
use crate::protocol::{ApiRequest, HttpMethod, json_body};
use crate::transport::HttpTransport;
use serde::de::IgnoredAny;

pub const WAREHOUSES_PATH: &str = "/api/v1/catalogos/bodegas/";

pub struct ListWarehouses;

impl ApiRequest for ListWarehouses {
    type Response = Vec<Warehouse>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        WAREHOUSES_PATH.to_string()
    }
}

pub struct GetWarehouse {
    pub id: i64,
}

impl ApiRequest for GetWarehouse {
    type Response = Warehouse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{WAREHOUSES_PATH}{}/", self.id)
    }
}

pub struct CreateWarehouse {
    pub form: WarehouseForm,
}

impl ApiRequest for CreateWarehouse {
    type Response = Warehouse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        WAREHOUSES_PATH.to_string()
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.form)
    }
}

pub struct UpdateWarehouse {
    pub id: i64,
    pub form: WarehouseForm,
}

impl ApiRequest for UpdateWarehouse {
    type Response = Warehouse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{WAREHOUSES_PATH}{}/", self.id)
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.form)
    }
}

pub struct DeleteWarehouse {
    pub id: i64,
}

impl ApiRequest for DeleteWarehouse {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{WAREHOUSES_PATH}{}/", self.id)
    }
}

pub struct Warehouses<'a, T, S: ?Sized>(pub(super) Api<'a, T, S>);

impl<T: HttpTransport, S: SessionProvider + ?Sized> Warehouses<'_, T, S> {
    pub async fn list(&self) -> ApiResult<Vec<Warehouse>> {
        self.0.send(&ListWarehouses).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Warehouse> {
        self.0.send(&GetWarehouse { id }).await
    }

    pub async fn create(&self, form: &WarehouseForm) -> ApiResult<Warehouse> {
        self.0
            .send(&CreateWarehouse {
                form: form.trimmed(),
            })
            .await
    }

    pub async fn update(&self, id: i64, form: &WarehouseForm) -> ApiResult<Warehouse> {
        self.0
            .send(&UpdateWarehouse {
                id,
                form: form.trimmed(),
            })
            .await
    }
}

#[async_trait::async_trait(?Send)]
impl<'a, T: HttpTransport, S: SessionProvider + ?Sized> Deactivate for Warehouses<'a, T, S> {
    async fn deactivate(&self, id: i64) -> ApiResult<()> {
        self.0.send(&DeleteWarehouse { id }).await?;
        log::info!("warehouse {id} deactivated");
        Ok(())
    }
}
