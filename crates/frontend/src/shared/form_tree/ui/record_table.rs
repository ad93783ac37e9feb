use contracts::shared::forms::Record;
use leptos::prelude::*;
use serde_json::Value;

use super::view_model::FormTreeViewModel;
use crate::shared::form_tree::{CrudApi, Operation};

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "yes" } else { "no" }.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Stored records of the entity being edited; a click opens one for update
#[component]
pub fn RecordTable(vm: FormTreeViewModel) -> impl IntoView {
    let records = RwSignal::new(Vec::<Record>::new());
    let error = RwSignal::new(None::<String>);

    {
        let vm = vm.clone();
        Effect::new(move |_| {
            let entity = vm.entity.get();
            vm.saved.track();
            let api = vm.api().clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api.read_all(&entity).await {
                    Ok(list) => {
                        records.set(list);
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        });
    }

    let columns = {
        let vm = vm.clone();
        Memo::new(move |_| {
            let entity = vm.entity.get();
            vm.registry()
                .get(&entity)
                .map(|form| {
                    std::iter::once(form.id_field.clone())
                        .chain(form.fields.iter().map(|f| f.name.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };

    view! {
        <div class="table">
            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}
            <table class="table__data table--striped">
                <thead class="table__head">
                    <tr>
                        {move || columns.get().into_iter().map(|c| view! {
                            <th class="table__header-cell">{c}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let columns = columns.get();
                        let vm = vm.clone();
                        records.get().into_iter().map(move |record| {
                            let id = columns
                                .first()
                                .and_then(|c| record.get(c))
                                .and_then(Value::as_i64);
                            let vm = vm.clone();
                            let cells = columns
                                .iter()
                                .map(|c| view! { <td class="table__cell">{cell_text(record.get(c))}</td> })
                                .collect_view();
                            view! {
                                <tr
                                    class="table__row"
                                    on:click=move |_| {
                                        if let Some(id) = id {
                                            vm.operation.set(Operation::Update);
                                            vm.set_target_id(id.to_string());
                                        }
                                    }
                                >
                                    {cells}
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}
