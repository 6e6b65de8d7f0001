use crate::api::{Backend, use_backend};
use crate::components::icons::{Plus, Trash2};
use crate::components::notice::{ErrorAlert, Loading, SuccessToast};
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lomalinda_shared::catalog::{Warehouse, WarehouseForm};
use lomalinda_shared::error::ApiResult;
use lomalinda_shared::resources::{Deactivate, refetch_after};

async fn fetch_warehouses(backend: Backend) -> ApiResult<Vec<Warehouse>> {
    let client = backend.client()?;
    backend.api(&client).warehouses().list().await
}

async fn fetch_warehouse(backend: Backend, id: i64) -> ApiResult<Warehouse> {
    let client = backend.client()?;
    backend.api(&client).warehouses().get(id).await
}

/// 保存后重新拉取列表
async fn save_warehouse(
    backend: Backend,
    id: Option<i64>,
    form: WarehouseForm,
) -> ApiResult<Vec<Warehouse>> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let write = async {
        match id {
            Some(id) => api.warehouses().update(id, &form).await,
            None => api.warehouses().create(&form).await,
        }
    };
    let (_, list) = refetch_after(write, || async move { api.warehouses().list().await }).await?;
    Ok(list)
}

async fn deactivate_warehouse(backend: Backend, id: i64) -> ApiResult<Vec<Warehouse>> {
    let client = backend.client()?;
    let api = backend.api(&client);
    let ((), list) = refetch_after(api.warehouses().deactivate(id), || async move {
        api.warehouses().list().await
    })
    .await?;
    Ok(list)
}

#[component]
pub fn WarehousesPage() -> impl IntoView {
    let backend = use_backend();

    let warehouses = RwSignal::new(Vec::<Warehouse>::new());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);
    let success = RwSignal::new(Option::<String>::None);

    let form = RwSignal::new(WarehouseForm::default());
    let editing = RwSignal::new(Option::<i64>::None);

    spawn_local(async move {
        match fetch_warehouses(backend).await {
            Ok(data) => warehouses.set(data),
            Err(e) => error.set(Some(e.user_message("No se pudieron cargar las bodegas."))),
        }
        loading.set(false);
    });

    let reset_form = move || {
        editing.set(None);
        form.set(WarehouseForm::default());
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
            match save_warehouse(backend, id, current).await {
                Ok(list) => {
                    warehouses.set(list);
                    reset_form();
                    success.set(Some("Bodega guardada correctamente.".to_string()));
                }
                Err(e) => {
                    log::warn!("saving warehouse failed: {e}");
                    error.set(Some(e.user_message("No se pudo guardar la bodega.")));
                }
            }
            saving.set(false);
        });
    };

    // 编辑前重新读取单条记录
    let on_edit = move |w: Warehouse| {
        error.set(None);
        spawn_local(async move {
            match fetch_warehouse(backend, w.id).await {
                Ok(fresh) => {
                    editing.set(Some(fresh.id));
                    form.set(WarehouseForm::from_warehouse(&fresh));
                }
                Err(e) => error.set(Some(e.user_message("No se pudo cargar la bodega."))),
            }
        });
    };

    let on_deactivate = move |w: Warehouse| {
        if !confirm(&format!("¿Desactivar la bodega \"{}\"?", w.name)) {
            return;
        }
        error.set(None);
        spawn_local(async move {
            match deactivate_warehouse(backend, w.id).await {
                Ok(list) => {
                    warehouses.set(list);
                    if editing.get_untracked() == Some(w.id) {
                        reset_form();
                    }
                    success.set(Some("Bodega desactivada.".to_string()));
                }
                Err(e) => error.set(Some(e.user_message("No se pudo desactivar la bodega."))),
            }
        });
    };

    view! {
        <SuccessToast message=success />
        <ErrorAlert message=error />

        <div class="grid gap-6 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-1">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title">
                        {move || if editing.get().is_some() { "Editar bodega" } else { "Nueva bodega" }}
                    </h2>
                    <div class="form-control">
                        <label class="label" for="wh_name"><span class="label-text">"Nombre"</span></label>
                        <input id="wh_name" type="text" required class="input input-bordered w-full"
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="wh_location"><span class="label-text">"Ubicación"</span></label>
                        <input id="wh_location" type="text" class="input input-bordered w-full"
                            prop:value=move || form.with(|f| f.location.clone())
                            on:input=move |ev| form.update(|f| f.location = event_target_value(&ev))
                        />
                    </div>
                    <label class="label cursor-pointer justify-start gap-3">
                        <input type="checkbox" class="checkbox checkbox-primary"
                            prop:checked=move || form.with(|f| f.active)
                            on:change=move |ev| form.update(|f| f.active = event_target_checked(&ev))
                        />
                        <span class="label-text">"Activa"</span>
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
                    <h2 class="card-title p-6 pb-2">"Bodegas"</h2>
                    <Show when=move || !loading.get() fallback=|| view! { <Loading label="Cargando bodegas..." /> }>
                        <div class="overflow-x-auto">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Nombre"</th>
                                        <th>"Ubicación"</th>
                                        <th>"Estado"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || warehouses.get()
                                        key=|w| (w.id, w.name.clone(), w.active)
                                        children=move |w| {
                                            let edit_target = w.clone();
                                            let deactivate_target = w.clone();
                                            let inactive = !w.active;
                                            view! {
                                                <tr>
                                                    <td class="font-medium">{w.name.clone()}</td>
                                                    <td>{w.location.clone().unwrap_or_default()}</td>
                                                    <td>
                                                        {if w.active {
                                                            view! { <span class="badge badge-success badge-outline">"Activa"</span> }.into_any()
                                                        } else {
                                                            view! { <span class="badge badge-ghost">"Inactiva"</span> }.into_any()
                                                        }}
                                                    </td>
                                                    <td class="flex gap-1 justify-end">
                                                        <button class="btn btn-ghost btn-sm" on:click=move |_| on_edit(edit_target.clone())>
                                                            "Editar"
                                                        </button>
                                                        <button class="btn btn-ghost btn-sm text-error" disabled=inactive
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
