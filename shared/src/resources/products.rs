use super::{Api, Deactivate};
use crate::catalog::{Product, ProductForm};
use crate::client::SessionProvider;
use crate::error::ApiResult;
use crate::protocol::{ApiRequest, HttpMethod, json_body};
use crate::transport::HttpTransport;
use serde::de::IgnoredAny;

pub const PRODUCTS_PATH: &str = "/api/v1/productos/";

pub struct ListProducts;

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PRODUCTS_PATH.to_string()
    }
}

pub struct GetProduct {
    pub id: i64,
}

impl ApiRequest for GetProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{PRODUCTS_PATH}{}/", self.id)
    }
}

pub struct CreateProduct {
    pub form: ProductForm,
}

impl ApiRequest for CreateProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PRODUCTS_PATH.to_string()
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.form)
    }
}

pub struct UpdateProduct {
    pub id: i64,
    pub form: ProductForm,
}

impl ApiRequest for UpdateProduct {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{PRODUCTS_PATH}{}/", self.id)
    }

    fn body(&self) -> ApiResult<Option<String>> {
        json_body(&self.form)
    }
}

pub struct DeleteProduct {
    pub id: i64,
}

impl ApiRequest for DeleteProduct {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{PRODUCTS_PATH}{}/", self.id)
    }
}

pub struct Products<'a, T, S: ?Sized>(pub(super) Api<'a, T, S>);

impl<T: HttpTransport, S: SessionProvider + ?Sized> Products<'_, T, S> {
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        self.0.send(&ListProducts).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Product> {
        self.0.send(&GetProduct { id }).await
    }

    pub async fn create(&self, form: &ProductForm) -> ApiResult<Product> {
        self.0
            .send(&CreateProduct {
                form: form.normalized(),
            })
            .await
    }

    pub async fn update(&self, id: i64, form: &ProductForm) -> ApiResult<Product> {
        self.0
            .send(&UpdateProduct {
                id,
                form: form.normalized(),
            })
            .await
    }
}

#[async_trait::async_trait(?Send)]
impl<'a, T: HttpTransport, S: SessionProvider + ?Sized> Deactivate for Products<'a, T, S> {
    async fn deactivate(&self, id: i64) -> ApiResult<()> {
        self.0.send(&DeleteProduct { id }).await?;
        log::info!("product {id} deactivated");
        Ok(())
    }
}
