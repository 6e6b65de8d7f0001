use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, Warehouse};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 已登录页面的外框：侧边栏 + 顶栏 + 内容区
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen bg-base-200 font-sans">
            <Sidebar />
            <div class="flex-1 flex flex-col min-w-0">
                <HeaderBar />
                <main class="p-4 md:p-6 space-y-6">{children()}</main>
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let router = use_router();

    view! {
        <aside class="w-56 shrink-0 bg-neutral text-neutral-content p-4 flex flex-col gap-2">
            <div class="flex items-center gap-2 mb-4 font-bold text-lg">
                <Warehouse attr:class="h-6 w-6" />
                "ERP LomaLinda"
            </div>
            <ul class="menu p-0 gap-1">
                {AppRoute::NAVIGATION
                    .into_iter()
                    .map(|route| {
                        let class = Signal::derive(move || {
                            if router.current_route().get() == route {
                                "active".to_string()
                            } else {
                                String::new()
                            }
                        });
                        view! {
                            <li>
                                <Link to=route class=class>{route.title()}</Link>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </aside>
    }
}

#[component]
fn HeaderBar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let username = move || {
        auth.state
            .with(|s| s.username().map(str::to_string))
            .unwrap_or_else(|| "Sesión activa".to_string())
    };

    view! {
        <header class="navbar bg-base-100 shadow-sm sticky top-0 z-10 px-4">
            <div class="flex-1 font-medium">{move || router.current_route().get().title()}</div>
            <div class="flex-none gap-3">
                <span class="text-sm text-base-content/60">"Usuario: " {username}</span>
                <button class="btn btn-outline btn-error btn-sm gap-2" on:click=move |_| logout(&auth)>
                    <LogOut attr:class="h-4 w-4" />
                    "Cerrar sesión"
                </button>
            </div>
        </header>
    }
}
