mod form_state;
mod header_form;
mod history;
mod line_items;

use crate::api::{Backend, use_backend};
use crate::components::notice::{ErrorAlert, Loading, SuccessToast};
use form_state::{Catalogs, FormState};
use header_form::HeaderForm;
use history::PurchaseHistory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use line_items::LineItems;
use lomalinda_shared::catalog::{Product, Supplier, Warehouse};
use lomalinda_shared::draft::{PurchaseDraft, SubmitError, submit_purchase};
use lomalinda_shared::error::ApiResult;
use lomalinda_shared::pagination::ListQuery;
use lomalinda_shared::purchase::{Purchase, PurchaseSummary};

const CATALOG_ERROR: &str =
    "No se pudieron cargar los catálogos de proveedores, bodegas y productos.";
const SUBMIT_ERROR: &str = "No se pudo registrar la compra. Revise los datos e intente de nuevo.";

// =========================================================
// 数据访问
// =========================================================

/// 并发加载三个目录，任一失败即整体失败
async fn fetch_catalogs(
    backend: Backend,
) -> ApiResult<(Vec<Supplier>, Vec<Warehouse>, Vec<Product>)> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let query = ListQuery::new();
    let (suppliers_api, warehouses_api, products_api) =
        (api.suppliers(), api.warehouses(), api.products());
    let (suppliers, warehouses, products) = futures::join!(
        suppliers_api.list(&query),
        warehouses_api.list(),
        products_api.list(),
    );
    // 供应商取第一页结果
    Ok((suppliers?.results, warehouses?, products?))
}

async fn fetch_history(backend: Backend) -> ApiResult<Vec<PurchaseSummary>> {
    let client = backend.client()?;
    backend.api(&client).purchases().list().await
}

/// 提交草稿；成功后重新拉取历史
async fn register_purchase(
    backend: Backend,
    draft: PurchaseDraft,
) -> Result<(Purchase, ApiResult<Vec<PurchaseSummary>>), SubmitError> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let created = submit_purchase(&api.purchases(), &draft).await?;
    let history = api.purchases().list().await;
    Ok((created, history))
}

// =========================================================
// 页面
// =========================================================

/// 采购录入（入库）页面
#[component]
pub fn PurchasePage() -> impl IntoView {
    let backend = use_backend();

    let state = FormState::new();
    let catalogs = Catalogs::new();
    let history = RwSignal::new(Vec::<PurchaseSummary>::new());

    let loading_catalogs = RwSignal::new(true);
    let loading_history = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    spawn_local(async move {
        match fetch_catalogs(backend).await {
            Ok((suppliers, warehouses, products)) => {
                catalogs.suppliers.set(suppliers);
                catalogs.warehouses.set(warehouses);
                catalogs.products.set(products);
            }
            Err(e) => {
                log::error!("loading catalogs failed: {e}");
                error.set(Some(CATALOG_ERROR.to_string()));
            }
        }
        loading_catalogs.set(false);
    });

    spawn_local(async move {
        match fetch_history(backend).await {
            Ok(list) => history.set(list),
            Err(e) => {
                log::warn!("loading purchase history failed: {e}");
                error.set(Some(e.user_message("No se pudieron cargar las compras.")));
            }
        }
        loading_history.set(false);
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        success.set(None);

        let draft = state.draft.get_untracked();
        // 校验失败时直接提示，不发请求
        if let Err(invalid) = draft.validate() {
            error.set(Some(invalid.to_string()));
            return;
        }

        state.saving.set(true);
        spawn_local(async move {
            match register_purchase(backend, draft).await {
                Ok((created, refreshed)) => {
                    success.set(Some(format!(
                        "Compra #{} registrada correctamente. Total: Q{}",
                        created.id, created.total
                    )));
                    state.reset();
                    match refreshed {
                        Ok(list) => history.set(list),
                        Err(e) => log::warn!("refreshing purchase history failed: {e}"),
                    }
                }
                Err(SubmitError::Invalid(invalid)) => error.set(Some(invalid.to_string())),
                Err(SubmitError::Api(e)) => {
                    log::warn!("registering purchase failed: {e}");
                    error.set(Some(e.user_message(SUBMIT_ERROR)));
                }
            }
            state.saving.set(false);
        });
    };

    let on_clear = move |_: leptos::ev::MouseEvent| {
        state.reset();
        error.set(None);
        success.set(None);
    };

    view! {
        <SuccessToast message=success />

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Compras / Ingreso a Bodega"</h2>
                <ErrorAlert message=error />

                <Show when=move || !loading_catalogs.get() fallback=|| view! { <Loading label="Cargando catálogos..." /> }>
                    <form on:submit=on_submit class="space-y-6">
                        <section class="space-y-2">
                            <h3 class="font-semibold">"Datos de la compra"</h3>
                            <HeaderForm state=state catalogs=catalogs />
                        </section>

                        <section class="space-y-2">
                            <h3 class="font-semibold">"Detalle de productos"</h3>
                            <LineItems state=state catalogs=catalogs />
                        </section>

                        <div class="flex gap-3">
                            <button type="submit" class="btn btn-primary" disabled=move || state.saving.get()>
                                {move || if state.saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Guardando compra..." }.into_any()
                                } else {
                                    "Guardar compra".into_any()
                                }}
                            </button>
                            <button type="button" class="btn btn-ghost" on:click=on_clear>
                                "Limpiar formulario"
                            </button>
                        </div>
                    </form>
                </Show>
            </div>
        </div>

        <PurchaseHistory history=history loading=loading_history />
    }
}
