//! 采购明细行：产品、数量、单价、小计

use crate::components::icons::{Plus, Trash2};
use leptos::prelude::*;

use super::form_state::{Catalogs, FormState, parse_selection, selection_value};

#[component]
pub fn LineItems(state: FormState, catalogs: Catalogs) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="table w-full">
                <thead>
                    <tr>
                        <th>"Producto"</th>
                        <th class="w-32">"Cantidad"</th>
                        <th class="w-36">"Costo unitario"</th>
                        <th class="w-32 text-right">"Subtotal"</th>
                        <th class="w-16"></th>
                    </tr>
                </thead>
                <tbody>
                    // 行没有自身的 id，按位置作为 key，每个单元格按索引从草稿读取
                    <For
                        each=move || 0..state.line_count()
                        key=|index| *index
                        children=move |index| view! { <LineRow state=state catalogs=catalogs index=index /> }
                    />
                </tbody>
            </table>
        </div>

        <div class="flex items-center justify-between pt-2">
            <button type="button" class="btn btn-outline btn-sm gap-2" on:click=move |_| state.add_line()>
                <Plus attr:class="h-4 w-4" />
                "Agregar producto"
            </button>
            <div class="text-lg font-semibold">
                "Total calculado: Q "
                <span class="font-mono">{move || state.draft.with(|d| d.total_text())}</span>
            </div>
        </div>
    }
}

#[component]
fn LineRow(state: FormState, catalogs: Catalogs, index: usize) -> impl IntoView {
    view! {
        <tr>
            <td>
                <select class="select select-bordered select-sm w-full"
                    prop:value=move || selection_value(state.line(index, |l| l.product_id))
                    on:change=move |ev| {
                        let id = parse_selection(&event_target_value(&ev));
                        state.update_line(index, |l| l.product_id = id);
                    }
                >
                    <option value="">"Seleccione producto"</option>
                    <For
                        each=move || catalogs.products.get()
                        key=|p| p.id
                        children=|p| view! {
                            <option value={p.id.to_string()}>{format!("{} - {}", p.sku, p.name)}</option>
                        }
                    />
                </select>
            </td>
            <td>
                <input type="text" inputmode="decimal"
                    class="input input-bordered input-sm w-full"
                    placeholder="0"
                    prop:value=move || state.line(index, |l| l.quantity.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update_line(index, |l| l.quantity = value);
                    }
                />
            </td>
            <td>
                <input type="text" inputmode="decimal"
                    class="input input-bordered input-sm w-full"
                    placeholder="0.00"
                    prop:value=move || state.line(index, |l| l.unit_cost.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        state.update_line(index, |l| l.unit_cost = value);
                    }
                />
            </td>
            <td class="text-right font-mono">
                {move || state.line(index, |l| l.subtotal_text())}
            </td>
            <td>
                <button type="button" class="btn btn-ghost btn-sm text-error"
                    disabled=move || !state.draft.with(|d| d.can_remove_lines())
                    on:click=move |_| state.remove_line(index)
                >
                    <Trash2 attr:class="h-4 w-4" />
                </button>
            </td>
        </tr>
    }
}
