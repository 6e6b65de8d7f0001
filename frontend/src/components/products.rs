use crate::api::{Backend, use_backend};
use crate::components::icons::{Plus, Trash2};
use crate::components::notice::{ErrorAlert, Loading, SuccessToast};
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lomalinda_shared::catalog::{Product, ProductForm};
use lomalinda_shared::decimal::DecimalText;
use lomalinda_shared::error::ApiResult;
use lomalinda_shared::resources::{Deactivate, refetch_after};

async fn fetch_products(backend: Backend) -> ApiResult<Vec<Product>> {
    let client = backend.client()?;
    backend.api(&client).products().list().await
}

async fn fetch_product(backend: Backend, id: i64) -> ApiResult<Product> {
    let client = backend.client()?;
    backend.api(&client).products().get(id).await
}

async fn save_product(
    backend: Backend,
    id: Option<i64>,
    form: ProductForm,
) -> ApiResult<Vec<Product>> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let write = async {
        match id {
            Some(id) => api.products().update(id, &form).await,
            None => api.products().create(&form).await,
        }
    };
    let (_, list) = refetch_after(write, || async move { api.products().list().await }).await?;
    Ok(list)
}

async fn deactivate_product(backend: Backend, id: i64) -> ApiResult<Vec<Product>> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let ((), list) = refetch_after(api.products().deactivate(id), || async move {
        api.products().list().await
    })
    .await?;
    Ok(list)
}

/// 产品管理：左侧表单（新建/编辑），右侧列表
#[component]
pub fn ProductsPage() -> impl IntoView {
    let backend = use_backend();

    let products = RwSignal::new(Vec::<Product>::new());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let deleting = RwSignal::new(Option::<i64>::None);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    let form = RwSignal::new(ProductForm::default());
    let editing = RwSignal::new(Option::<i64>::None);

    spawn_local(async move {
        match fetch_products(backend).await {
            Ok(data) => products.set(data),
            Err(e) => error.set(Some(e.user_message("No se pudieron cargar los productos."))),
        }
        loading.set(false);
    });

    let reset_form = move || {
        editing.set(None);
        form.set(ProductForm::default());
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if let Err(msg) = current.validate() {
            error.set(Some(msg));
            return;
        }

        saving.set(true);
        error.set(None);
        let id = editing.get_untracked();
        spawn_local(async move {
            match save_product(backend, id, current).await {
                Ok(list) => {
                    products.set(list);
                    reset_form();
                    success.set(Some("Producto guardado correctamente.".to_string()));
                }
                Err(e) => {
                    log::warn!("saving product failed: {e}");
                    error.set(Some(e.user_message("No se pudo guardar el producto.")));
                }
            }
            saving.set(false);
        });
    };

    // 编辑前重新读取单条记录
    let on_edit = move |p: Product| {
        error.set(None);
        spawn_local(async move {
            match fetch_product(backend, p.id).await {
                Ok(fresh) => {
                    editing.set(Some(fresh.id));
                    form.set(ProductForm::from_product(&fresh));
                }
                Err(e) => error.set(Some(e.user_message("No se pudo cargar el producto."))),
            }
        });
    };

    let on_deactivate = move |p: Product| {
        if !confirm(&format!("¿Desactivar el producto \"{}\"?", p.name)) {
            return;
        }
        error.set(None);
        deleting.set(Some(p.id));
        spawn_local(async move {
            match deactivate_product(backend, p.id).await {
                Ok(list) => {
                    products.set(list);
                    if editing.get_untracked() == Some(p.id) {
                        reset_form();
                    }
                    success.set(Some("Producto desactivado.".to_string()));
                }
                Err(e) => error.set(Some(
                    e.user_message("No se pudo desactivar el producto. Intente nuevamente."),
                )),
            }
            deleting.set(None);
        });
    };

    let text_field = move |id: &'static str,
                           label: &'static str,
                           get: fn(&ProductForm) -> String,
                           set: fn(&mut ProductForm, String)| {
        view! {
            <div class="form-control">
                <label class="label" for=id><span class="label-text">{label}</span></label>
                <input id=id type="text" class="input input-bordered w-full"
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <SuccessToast message=success />
        <ErrorAlert message=error />

        <div class="grid gap-6 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-1">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Editar producto" } else { "Nuevo producto" }}
                    </h2>
                    {text_field("prod_sku", "Código (SKU)", |f| f.sku.clone(), |f, v| f.sku = v)}
                    {text_field("prod_name", "Nombre", |f| f.name.clone(), |f, v| f.name = v)}
                    {text_field("prod_model", "Modelo", |f| f.model.clone(), |f, v| f.model = v)}
                    <div class="grid grid-cols-2 gap-2">
                        {text_field(
                            "prod_cost",
                            "Costo ref",
                            |f| f.reference_cost.to_string(),
                            |f, v| f.reference_cost = DecimalText::new(v),
                        )}
                        {text_field(
                            "prod_price",
                            "Precio base",
                            |f| f.base_price.to_string(),
                            |f, v| f.base_price = DecimalText::new(v),
                        )}
                    </div>
                    <label class="label cursor-pointer justify-start gap-3">
                        <input type="checkbox" class="checkbox checkbox-primary"
                            prop:checked=move || form.with(|f| f.active)
                            on:change=move |ev| form.update(|f| f.active = event_target_checked(&ev))
                        />
                        <span class="label-text">"Activo"</span>
                    </label>
                    <div class="card-actions justify-end">
                        <Show when=move || editing.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| reset_form()>
                                "Cancelar edición"
                            </button>
                        </Show>
                        <button type="submit" class="btn btn-primary gap-2" disabled=move || saving.get()>
                            <Plus attr:class="h-4 w-4" />
                            {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                        </button>
                    </div>
                </form>
            </div>

            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <div class="card-body p-0">
                    <h2 class="card-title p-6 pb-2">"Productos"</h2>
                    <Show when=move || !loading.get() fallback=|| view! { <Loading label="Cargando productos..." /> }>
                        <div class="overflow-x-auto">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Código (SKU)"</th>
                                        <th>"Nombre"</th>
                                        <th>"Modelo"</th>
                                        <th class="text-right">"Costo ref"</th>
                                        <th class="text-right">"Precio base"</th>
                                        <th>"Activo"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || products.get()
                                        key=|p| (p.id, p.name.clone(), p.active, p.base_price.to_string())
                                        children=move |p| {
                                            let id = p.id;
                                            let edit_target = p.clone();
                                            let deactivate_target = p.clone();
                                            view! {
                                                <tr>
                                                    <td class="font-mono">{p.sku.clone()}</td>
                                                    <td class="font-medium">{p.name.clone()}</td>
                                                    <td>{p.model.clone().unwrap_or_default()}</td>
                                                    <td class="text-right font-mono">{p.reference_cost.to_string()}</td>
                                                    <td class="text-right font-mono">{p.base_price.to_string()}</td>
                                                    <td>{if p.active { "Sí" } else { "No" }}</td>
                                                    <td class="flex gap-1 justify-end">
                                                        <button class="btn btn-ghost btn-sm" on:click=move |_| on_edit(edit_target.clone())>
                                                            "Editar"
                                                        </button>
                                                        <button class="btn btn-ghost btn-sm text-error"
                                                            disabled=move || deleting.get() == Some(id)
                                                            on:click=move |_| on_deactivate(deactivate_target.clone())>
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
                </div>
            </div>
        </div>
    }
}
