//! 资源访问模块
//!
//! 每个后端资源一个类型化门面。门面只负责把操作映射到固定的 REST 路径，
//! 认证、错误归类都在 `ApiClient::send` 中完成。
//!
//! ```ignore
//! let api = Api::new(&client, &session);
//! api.suppliers().deactivate(7).await?;
//! let page = api.suppliers().list(&ListQuery::new()).await?;
//! ```

mod products;
mod purchases;
mod stock;
mod suppliers;
mod warehouses;

#[cfg(test)]
mod tests;

pub use products::*;
pub use purchases::*;
pub use stock::*;
pub use suppliers::*;
pub use warehouses::*;

use crate::client::{ApiClient, SessionProvider};
use crate::error::ApiResult;
use crate::protocol::ApiRequest;
use crate::transport::HttpTransport;
use std::future::Future;

/// 客户端 + 会话的组合句柄，是所有资源模块的入口
pub struct Api<'a, T, S: ?Sized> {
    client: &'a ApiClient<T>,
    session: &'a S,
}

impl<T, S: ?Sized> Clone for Api<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: ?Sized> Copy for Api<'_, T, S> {}

impl<'a, T, S> Api<'a, T, S>
where
    T: HttpTransport,
    S: SessionProvider + ?Sized,
{
    pub fn new(client: &'a ApiClient<T>, session: &'a S) -> Self {
        Self { client, session }
    }

    pub fn suppliers(self) -> Suppliers<'a, T, S> {
        Suppliers(self)
    }

    pub fn warehouses(self) -> Warehouses<'a, T, S> {
        Warehouses(self)
    }

    pub fn products(self) -> Products<'a, T, S> {
        Products(self)
    }

    pub fn stock(self) -> Stock<'a, T, S> {
        Stock(self)
    }

    pub fn purchases(self) -> Purchases<'a, T, S> {
        Purchases(self)
    }

    pub(crate) async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        self.client.send(self.session, req).await
    }
}

/// 停用记录
///
/// 每个资源自行决定动词：供应商为软停用 (PATCH estado)，仓库与产品为 DELETE。
#[async_trait::async_trait(?Send)]
pub trait Deactivate {
    async fn deactivate(&self, id: i64) -> ApiResult<()>;
}

/// 写入成功后重新拉取列表
///
/// 写入失败时不会重新拉取，错误原样返回。
pub async fn refetch_after<W, L, WF, F, LF>(write: WF, refetch: F) -> ApiResult<(W, L)>
where
    WF: Future<Output = ApiResult<W>>,
    F: FnOnce() -> LF,
    LF: Future<Output = ApiResult<L>>,
{
    let written = write.await?;
    let listing = refetch().await?;
    Ok((written, listing))
}
