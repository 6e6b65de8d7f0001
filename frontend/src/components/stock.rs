use crate::api::{Backend, use_backend};
use crate::components::icons::RefreshCw;
use crate::components::notice::{ErrorAlert, Loading};
use leptos::prelude::*;
use leptos::task::spawn_local;
use lomalinda_shared::error::ApiResult;
use lomalinda_shared::inventory::StockLevel;

async fn fetch_stock(backend: Backend) -> ApiResult<Vec<StockLevel>> {
    let client = backend.client()?;
    backend.api(&client).stock().list().await
}

/// 库存查询（只读）
#[component]
pub fn StockPage() -> impl IntoView {
    let backend = use_backend();

    let rows = RwSignal::new(Vec::<StockLevel>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);

    let load = move || {
        loading.set(true);
        error.set(None);
        spawn_local(async move {
            match fetch_stock(backend).await {
                Ok(data) => rows.set(data),
                Err(e) => {
                    log::error!("loading stock failed: {e}");
                    error.set(Some(e.user_message("No se pudieron cargar las existencias.")));
                }
            }
            loading.set(false);
        });
    };

    load();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <div>
                        <h2 class="card-title">"Existencias de Inventario"</h2>
                        <p class="text-base-content/70 text-sm">"Listado de existencias por producto y bodega."</p>
                    </div>
                    <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>

                <ErrorAlert message=error />

                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <Loading label="Cargando existencias..." /> }
                >
                    <Show
                        when=move || rows.with(|r| !r.is_empty())
                        fallback=|| view! { <p class="py-6 text-center text-base-content/50">"No hay existencias registradas."</p> }
                    >
                        <div class="overflow-x-auto">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Bodega"</th>
                                        <th>"Producto"</th>
                                        <th class="text-right">"Cantidad"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || rows.get()
                                        key=|row| row.row_key()
                                        children=move |row| view! {
                                            <tr>
                                                <td>{row.warehouse_name}</td>
                                                <td>{row.product_name}</td>
                                                <td class="text-right font-mono">{row.quantity.into_inner()}</td>
                                            </tr>
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </Show>
            </div>
        </div>
    }
}
