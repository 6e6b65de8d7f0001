use crate::api::{Backend, use_backend};
use crate::components::icons::{Plus, RefreshCw, Trash2};
use crate::components::notice::{ErrorAlert, Loading, SuccessToast};
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lomalinda_shared::catalog::{Supplier, SupplierForm, SupplierStatus};
use lomalinda_shared::error::ApiResult;
use lomalinda_shared::pagination::{ListQuery, Page};
use lomalinda_shared::resources::{Deactivate, refetch_after};

// =========================================================
// 数据访问
// =========================================================

async fn fetch_suppliers(backend: Backend, query: ListQuery) -> ApiResult<Page<Supplier>> {
    let client = backend.client()?;
    backend.api(&client).suppliers().list(&query).await
}

async fn fetch_supplier(backend: Backend, id: i64) -> ApiResult<Supplier> {
    let client = backend.client()?;
    backend.api(&client).suppliers().get(id).await
}

/// 创建或更新，成功后按当前查询重新拉取
async fn save_supplier(
    backend: Backend,
    id: Option<i64>,
    form: SupplierForm,
    query: ListQuery,
) -> ApiResult<Page<Supplier>> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let payload = form.to_payload();
    let write = async {
        match id {
            Some(id) => api.suppliers().update(id, payload).await,
            None => api.suppliers().create(payload).await,
        }
    };
    let (_, page) = refetch_after(write, || async move {
        api.suppliers().list(&query).await
    })
    .await?;
    Ok(page)
}

async fn deactivate_supplier(
    backend: Backend,
    id: i64,
    query: ListQuery,
) -> ApiResult<Page<Supplier>> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let ((), page) = refetch_after(api.suppliers().deactivate(id), || async move {
        api.suppliers().list(&query).await
    })
    .await?;
    Ok(page)
}

// =========================================================
// 页面
// =========================================================

/// 供应商管理：搜索 + 分页列表 + 编辑表单
#[component]
pub fn SuppliersPage() -> impl IntoView {
    let backend = use_backend();

    let listing = RwSignal::new(Page::<Supplier>::default());
    let page = RwSignal::new(1u32);
    let search = RwSignal::new(String::new());

    let loading = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    let selected = RwSignal::new(Option::<i64>::None);
    let form = RwSignal::new(SupplierForm::default());

    let current_query = move || {
        ListQuery::new()
            .with_search(&search.get_untracked())
            .with_page(page.get_untracked())
    };

    let load = move || {
        loading.set(true);
        error.set(None);
        let query = current_query();
        spawn_local(async move {
            match fetch_suppliers(backend, query).await {
                Ok(data) => listing.set(data),
                Err(e) => {
                    log::error!("loading suppliers failed: {e}");
                    error.set(Some(e.user_message("No se pudieron cargar los proveedores.")));
                }
            }
            loading.set(false);
        });
    };

    load();

    let reset_form = move || {
        selected.set(None);
        form.set(SupplierForm::default());
    };

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        page.set(1);
        load();
    };

    let on_clear = move |_: leptos::ev::MouseEvent| {
        search.set(String::new());
        page.set(1);
        reset_form();
        load();
    };

    let go_to = move |target: u32| {
        page.set(target.max(1));
        load();
    };

    let on_select = move |id: i64| {
        error.set(None);
        spawn_local(async move {
            match fetch_supplier(backend, id).await {
                Ok(supplier) => {
                    selected.set(Some(supplier.id));
                    form.set(SupplierForm::from_supplier(&supplier));
                }
                Err(e) => error.set(Some(
                    e.user_message("No se pudo cargar el detalle del proveedor."),
                )),
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        let current = form.get_untracked();
        if let Err(msg) = current.validate() {
            error.set(Some(msg));
            return;
        }

        saving.set(true);
        let id = selected.get_untracked();
        let query = current_query();
        spawn_local(async move {
            match save_supplier(backend, id, current, query).await {
                Ok(data) => {
                    listing.set(data);
                    reset_form();
                    success.set(Some("Proveedor guardado correctamente.".to_string()));
                }
                Err(e) => {
                    log::warn!("saving supplier failed: {e}");
                    error.set(Some(
                        e.user_message("No se pudo guardar el proveedor (validación backend)."),
                    ));
                }
            }
            saving.set(false);
        });
    };

    let on_deactivate = move |id: i64| {
        if !confirm("¿Deseas desactivar este proveedor?") {
            return;
        }
        error.set(None);
        let query = current_query();
        spawn_local(async move {
            match deactivate_supplier(backend, id, query).await {
                Ok(data) => {
                    listing.set(data);
                    if selected.get_untracked() == Some(id) {
                        reset_form();
                    }
                    success.set(Some("Proveedor desactivado.".to_string()));
                }
                Err(e) => {
                    log::warn!("deactivating supplier {id} failed: {e}");
                    error.set(Some(e.user_message("No se pudo desactivar el proveedor.")));
                }
            }
        });
    };

    let total_pages = move || listing.with(|l| l.total_pages(backend.page_size));

    let text_field = move |id: &'static str,
                           label: &'static str,
                           get: fn(&SupplierForm) -> String,
                           set: fn(&mut SupplierForm, String)| {
        view! {
            <div class="form-control">
                <label class="label" for=id><span class="label-text">{label}</span></label>
                <input id=id type="text" class="input input-bordered input-sm w-full"
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <SuccessToast message=success />
        <ErrorAlert message=error />

        <form class="flex gap-2" on:submit=on_search>
            <input type="text" class="input input-bordered flex-1"
                placeholder="Buscar por nombre o NIT…"
                prop:value=search
                on:input=move |ev| search.set(event_target_value(&ev))
            />
            <button type="submit" class="btn btn-primary" disabled=move || loading.get()>"Buscar"</button>
            <button type="button" class="btn btn-ghost" on:click=on_clear>"Limpiar"</button>
        </form>

        <div class="grid gap-6 lg:grid-cols-5">
            <div class="card bg-base-100 shadow-xl lg:col-span-3">
                <div class="card-body">
                    <h2 class="card-title">"Listado"</h2>
                    <Show when=move || !loading.get() fallback=|| view! { <Loading label="Cargando proveedores..." /> }>
                        <div class="overflow-x-auto">
                            <table class="table table-sm w-full">
                                <thead>
                                    <tr>
                                        <th>"ID"</th>
                                        <th>"Nombre"</th>
                                        <th>"NIT"</th>
                                        <th>"Estado"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || listing.with(|l| l.results.clone())
                                        key=|s| (s.id, s.name.clone(), s.status.clone())
                                        children=move |s| {
                                            let id = s.id;
                                            let inactive = !s.is_active();
                                            let badge = if inactive { "badge badge-ghost" } else { "badge badge-success badge-outline" };
                                            view! {
                                                <tr
                                                    class=move || {
                                                        if selected.get() == Some(id) {
                                                            "hover cursor-pointer bg-base-200"
                                                        } else {
                                                            "hover cursor-pointer"
                                                        }
                                                    }
                                                    on:click=move |_| on_select(id)
                                                >
                                                    <td>{id}</td>
                                                    <td class="font-medium">{s.name.clone()}</td>
                                                    <td>{s.nit.clone().unwrap_or_default()}</td>
                                                    <td>
                                                        <span class=badge>
                                                            {s.status.clone().unwrap_or_default()}
                                                        </span>
                                                    </td>
                                                    <td class="text-right">
                                                        <button class="btn btn-ghost btn-xs text-error" disabled=inactive
                                                            on:click=move |ev| {
                                                                ev.stop_propagation();
                                                                on_deactivate(id);
                                                            }>
                                                            <Trash2 attr:class="h-4 w-4" />
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </Show>

                    <div class="flex items-center justify-between pt-2">
                        <button class="btn btn-sm"
                            disabled=move || !listing.with(Page::has_previous) || loading.get() || page.get() <= 1
                            on:click=move |_| go_to(page.get_untracked().saturating_sub(1))>
                            "Anterior"
                        </button>
                        <span class="text-sm text-base-content/70">
                            {move || format!(
                                "Página {} / {} · Total: {}",
                                page.get(),
                                total_pages(),
                                listing.with(|l| l.count),
                            )}
                        </span>
                        <button class="btn btn-sm"
                            disabled=move || !listing.with(Page::has_next) || loading.get()
                            on:click=move |_| go_to(page.get_untracked() + 1)>
                            "Siguiente"
                        </button>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <form class="card-body space-y-1" on:submit=on_submit>
                    <h2 class="card-title">
                        {move || match selected.get() {
                            Some(id) => format!("Editar proveedor #{id}"),
                            None => "Nuevo proveedor".to_string(),
                        }}
                    </h2>
                    {text_field("sup_name", "Nombre *", |f| f.name.clone(), |f, v| f.name = v)}
                    {text_field("sup_cui", "CUI", |f| f.cui.clone(), |f, v| f.cui = v)}
                    {text_field("sup_nit", "NIT", |f| f.nit.clone(), |f, v| f.nit = v)}
                    {text_field("sup_phone", "Teléfono", |f| f.phone.clone(), |f, v| f.phone = v)}
                    {text_field("sup_address", "Dirección", |f| f.address.clone(), |f, v| f.address = v)}
                    {text_field("sup_email", "Email", |f| f.email.clone(), |f, v| f.email = v)}
                    <div class="form-control">
                        <label class="label" for="sup_status"><span class="label-text">"Estado"</span></label>
                        <select id="sup_status" class="select select-bordered select-sm"
                            prop:value=move || form.with(|f| f.status.as_str())
                            on:change=move |ev| form.update(|f| f.status = SupplierStatus::parse(&event_target_value(&ev)))
                        >
                            <option value={SupplierStatus::Active.as_str()}>"ACTIVO"</option>
                            <option value={SupplierStatus::Inactive.as_str()}>"INACTIVO"</option>
                        </select>
                    </div>
                    <div class="card-actions justify-end pt-2">
                        <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| reset_form()>
                            <Plus attr:class="h-4 w-4" />
                            "Nuevo"
                        </button>
                        <button type="button" class="btn btn-ghost btn-sm" disabled=move || loading.get()
                            on:click=move |_| load()>
                            <RefreshCw attr:class="h-4 w-4" />
                            "Refrescar"
                        </button>
                        <button type="submit" class="btn btn-primary btn-sm" disabled=move || saving.get()>
                            {move || {
                                if saving.get() {
                                    "Guardando…"
                                } else if selected.get().is_some() {
                                    "Actualizar"
                                } else {
                                    "Crear"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
