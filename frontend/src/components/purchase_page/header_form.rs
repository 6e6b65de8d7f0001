//! 采购表头：供应商、目标仓库、单据号、备注

use leptos::prelude::*;

use super::form_state::{Catalogs, FormState, parse_selection, selection_value};

#[component]
pub fn HeaderForm(state: FormState, catalogs: Catalogs) -> impl IntoView {
    view! {
        <div class="grid gap-4 md:grid-cols-3">
            <div class="form-control">
                <label for="supplier_id" class="label">
                    <span class="label-text">"Proveedor"</span>
                </label>
                <select id="supplier_id" required
                    class="select select-bordered w-full"
                    prop:value=move || selection_value(state.header(|h| h.supplier_id))
                    on:change=move |ev| {
                        let id = parse_selection(&event_target_value(&ev));
                        state.update_header(|h| h.supplier_id = id);
                    }
                >
                    <option value="">"Seleccione proveedor"</option>
                    <For
                        each=move || catalogs.suppliers.get()
                        key=|s| s.id
                        children=|s| view! { <option value={s.id.to_string()}>{s.name}</option> }
                    />
                </select>
            </div>

            <div class="form-control">
                <label for="warehouse_id" class="label">
                    <span class="label-text">"Bodega destino"</span>
                </label>
                <select id="warehouse_id" required
                    class="select select-bordered w-full"
                    prop:value=move || selection_value(state.header(|h| h.warehouse_id))
                    on:change=move |ev| {
                        let id = parse_selection(&event_target_value(&ev));
                        state.update_header(|h| h.warehouse_id = id);
                    }
                >
                    <option value="">"Seleccione bodega"</option>
                    <For
                        each=move || catalogs.warehouses.get()
                        key=|w| w.id
                        children=|w| view! { <option value={w.id.to_string()}>{w.name}</option> }
                    />
                </select>
            </div>

            <div class="form-control">
                <label for="document_number" class="label">
                    <span class="label-text">"No. Documento"</span>
                </label>
                <input id="document_number" required
                    type="text"
                    class="input input-bordered w-full"
                    prop:value=move || state.header(|h| h.document_number.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update_header(|h| h.document_number = value);
                    }
                />
            </div>
        </div>

        <div class="form-control">
            <label for="observations" class="label">
                <span class="label-text">"Observaciones"</span>
            </label>
            <textarea id="observations" rows="2"
                class="textarea textarea-bordered w-full"
                prop:value=move || state.header(|h| h.observations.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update_header(|h| h.observations = value);
                }
            ></textarea>
        </div>
    }
}
