//! 采购历史：列表与单笔详情

use crate::api::{Backend, use_backend};
use crate::components::notice::{ErrorAlert, Loading};
use leptos::prelude::*;
use leptos::task::spawn_local;
use lomalinda_shared::error::ApiResult;
use lomalinda_shared::purchase::{Purchase, PurchaseSummary};

async fn fetch_purchase(backend: Backend, id: i64) -> ApiResult<Purchase> {
    let client = backend.client()?;
    backend.api(&client).purchases().get(id).await
}

#[component]
pub fn PurchaseHistory(
    history: RwSignal<Vec<PurchaseSummary>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let backend = use_backend();

    let detail = RwSignal::new(Option::<Purchase>::None);
    let detail_error = RwSignal::new(Option::<String>::None);

    let open_detail = move |id: i64| {
        detail_error.set(None);
        spawn_local(async move {
            match fetch_purchase(backend, id).await {
                Ok(purchase) => detail.set(Some(purchase)),
                Err(e) => {
                    log::warn!("loading purchase {id} failed: {e}");
                    detail.set(None);
                    detail_error.set(Some(
                        e.user_message("No se pudo cargar el detalle de la compra."),
                    ));
                }
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">"Historial de compras"</h2>
                <ErrorAlert message=detail_error />
                <Show when=move || !loading.get() fallback=|| view! { <Loading label="Cargando compras..." /> }>
                    <Show
                        when=move || history.with(|h| !h.is_empty())
                        fallback=|| view! { <p class="py-4 text-center text-base-content/50">"No hay compras registradas."</p> }
                    >
                        <div class="overflow-x-auto">
                            <table class="table table-sm table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"#"</th>
                                        <th>"Fecha"</th>
                                        <th>"Documento"</th>
                                        <th>"Proveedor"</th>
                                        <th>"Bodega"</th>
                                        <th class="text-right">"Total"</th>
                                        <th>"Estado"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || history.get()
                                        key=|p| p.id
                                        children=move |p| {
                                            let id = p.id;
                                            view! {
                                                <tr class="hover cursor-pointer" on:click=move |_| open_detail(id)>
                                                    <td>{id}</td>
                                                    <td>{p.date}</td>
                                                    <td>{p.document_number}</td>
                                                    <td>{p.supplier_name}</td>
                                                    <td>{p.warehouse_name}</td>
                                                    <td class="text-right font-mono">{format!("Q {}", p.total)}</td>
                                                    <td><span class="badge badge-outline">{p.status.label()}</span></td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </Show>

                {move || detail.get().map(|purchase| view! { <PurchaseDetail purchase=purchase on_close=Callback::new(move |_| detail.set(None)) /> })}
            </div>
        </div>
    }
}

#[component]
fn PurchaseDetail(purchase: Purchase, on_close: Callback<()>) -> impl IntoView {
    let observations = purchase
        .observations
        .clone()
        .filter(|o| !o.trim().is_empty());
    view! {
        <div class="mt-4 rounded-box border border-base-300 p-4 space-y-2">
            <div class="flex items-center justify-between">
                <h3 class="font-bold">
                    {format!("Compra #{} · {}", purchase.id, purchase.document_number)}
                </h3>
                <button type="button" class="btn btn-ghost btn-xs" on:click=move |_| on_close.run(())>"Cerrar"</button>
            </div>
            <p class="text-sm text-base-content/70">
                {format!(
                    "{} · {} → {} · {}",
                    purchase.date,
                    purchase.supplier_name,
                    purchase.warehouse_name,
                    purchase.status.label(),
                )}
            </p>
            {observations.map(|text| view! { <p class="text-sm italic">{text}</p> })}
            <table class="table table-xs w-full">
                <thead>
                    <tr>
                        <th>"Producto"</th>
                        <th class="text-right">"Cantidad"</th>
                        <th class="text-right">"Costo unitario"</th>
                        <th class="text-right">"Subtotal"</th>
                    </tr>
                </thead>
                <tbody>
                    {purchase
                        .lines
                        .into_iter()
                        .map(|line| view! {
                            <tr>
                                <td>{line.product_name}</td>
                                <td class="text-right font-mono">{line.quantity.into_inner()}</td>
                                <td class="text-right font-mono">{line.unit_cost.into_inner()}</td>
                                <td class="text-right font-mono">{line.subtotal.into_inner()}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
            <div class="text-right font-semibold">{format!("Total: Q {}", purchase.total)}</div>
        </div>
    }
}
