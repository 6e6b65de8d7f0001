//! LomaLinda 后台控制台前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 后端访问入口
//! - `components`: UI 组件层

mod api;
mod auth;
pub mod config;
mod components {
    pub mod icons;
    pub mod layout;
    pub mod login;
    pub mod notice;
    pub mod products;
    pub mod purchase_page;
    pub mod stock;
    pub mod suppliers;
    pub mod warehouses;
}

use crate::api::provide_backend;
use crate::auth::AuthContext;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::products::ProductsPage;
use crate::components::purchase_page::PurchasePage;
use crate::components::stock::StockPage;
use crate::components::suppliers::SuppliersPage;
use crate::components::warehouses::WarehousesPage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，实现共享层定义的传输与存储接口。
pub(crate) mod web {
    mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use dialog::confirm;
    pub use http::FetchTransport;
    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Purchases => view! { <Layout><PurchasePage /></Layout> }.into_any(),
        AppRoute::Stock => view! { <Layout><StockPage /></Layout> }.into_any(),
        AppRoute::Products => view! { <Layout><ProductsPage /></Layout> }.into_any(),
        AppRoute::Warehouses => view! { <Layout><WarehousesPage /></Layout> }.into_any(),
        AppRoute::Suppliers => view! { <Layout><SuppliersPage /></Layout> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                    <a class="btn btn-link mt-2" href={AppRoute::auth_success_redirect().to_path()}>
                        "Volver al inicio"
                    </a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();

    // 1. 创建认证上下文（从 LocalStorage 恢复令牌）
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 创建唯一的 API 客户端
    provide_backend(&config, auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
