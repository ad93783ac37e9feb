use contracts::domain::common::RecordId;
use contracts::shared::forms::catalog::{element_name, list_name};
use contracts::shared::forms::FieldKind;
use leptos::prelude::*;

use super::record_table::RecordTable;
use super::view_model::FormTreeViewModel;
use crate::shared::form_tree::{Operation, RowState, RowView};

#[component]
pub fn FormTreeView(vm: FormTreeViewModel) -> impl IntoView {
    vm.load();
    let vm_clone = vm.clone();

    view! {
        <div class="details-container form-tree">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || {
                            let entity = vm.entity.get();
                            format!("{} {}", capitalize(vm.operation.get().as_str()), element_name(&entity))
                        }
                    }
                </h3>
            </div>

            <div class="form-tree__toolbar">
                {Operation::ALL.into_iter().map(|op| {
                    let vm = vm_clone.clone();
                    let checked_vm = vm.clone();
                    view! {
                        <label class="form-tree__operation">
                            <input
                                type="radio"
                                name="operation"
                                prop:checked=move || checked_vm.operation.get() == op
                                on:change=move |_| vm.set_operation(op)
                            />
                            {capitalize(op.as_str())}
                        </label>
                    }
                }).collect_view()}

                {
                    let vm = vm_clone.clone();
                    move || vm.operation.get().needs_target().then(|| {
                        let value_vm = vm.clone();
                        let input_vm = vm.clone();
                        view! {
                            <label class="form-tree__target">
                                {"Record id "}
                                <input
                                    type="number"
                                    min="1"
                                    prop:value=move || value_vm.target_id.get()
                                    on:change=move |ev| input_vm.set_target_id(event_target_value(&ev))
                                />
                            </label>
                        }
                    })
                }
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| {
                    let class = if e.recoverable { "error" } else { "error error--fatal" };
                    let hint = (!e.recoverable)
                        .then_some(" Pick the entity or operation again to start a new form.");
                    view! { <div class=class>{e.message}{hint}</div> }
                })
            }
            {
                let vm = vm_clone.clone();
                move || vm.notice.get().map(|n| view! { <div class="notice">{n}</div> })
            }

            <div class="details-form">
                {
                    let vm = vm_clone.clone();
                    move || {
                        let rows = vm.rows.get();
                        let vm = vm.clone();
                        rows.into_iter().map(move |row| form_row(vm.clone(), row)).collect_view()
                    }
                }
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled={
                        let vm = vm_clone.clone();
                        move || vm.busy.get()
                    }
                    on:click={
                        let vm = vm_clone.clone();
                        move |_| vm.submit()
                    }
                >
                    {
                        let vm = vm_clone.clone();
                        move || match vm.operation.get() {
                            Operation::Create => "Create",
                            Operation::Update => "Save",
                            Operation::Delete => "Delete",
                        }
                    }
                </button>
            </div>

            <RecordTable vm=vm_clone.clone() />
        </div>
    }
}

fn form_row(vm: FormTreeViewModel, row: RowView) -> AnyView {
    let indent = format!("margin-left: {}rem", row.depth as f32 * 1.5);
    let label = if row.depth > 0 {
        format!("{} · {}", element_name(&row.owner_entity), row.title)
    } else {
        row.title.clone()
    };
    let invalid = match &row.state {
        RowState::Invalid { message, .. } => Some(message.clone()),
        _ => None,
    };

    view! {
        <div class="form-group" style=indent>
            <label>
                {label}
                {row.required.then_some(" *")}
            </label>
            {input_for(vm, row)}
            {invalid.map(|m| view! { <span class="form-group__error">{m}</span> })}
        </div>
    }
    .into_any()
}

fn input_for(vm: FormTreeViewModel, row: RowView) -> AnyView {
    let key = row.key.clone();
    let raw = match &row.state {
        RowState::Value(value) => value.to_input_string(),
        RowState::Invalid { raw, .. } => raw.clone(),
        _ => String::new(),
    };

    match row.kind {
        FieldKind::ShortText => view! {
            <input type="text" prop:value=raw on:change=move |ev| vm.set_value(key.clone(), event_target_value(&ev)) />
        }
        .into_any(),
        FieldKind::LongText => view! {
            <textarea prop:value=raw on:change=move |ev| vm.set_value(key.clone(), event_target_value(&ev))></textarea>
        }
        .into_any(),
        FieldKind::Number => view! {
            <input type="number" step="any" prop:value=raw on:change=move |ev| vm.set_value(key.clone(), event_target_value(&ev)) />
        }
        .into_any(),
        FieldKind::Date => view! {
            <input type="date" prop:value=raw on:change=move |ev| vm.set_value(key.clone(), event_target_value(&ev)) />
        }
        .into_any(),
        FieldKind::Boolean => {
            let checked = raw == "true";
            view! {
                <input
                    type="checkbox"
                    prop:checked=checked
                    on:change=move |ev| vm.set_value(key.clone(), event_target_checked(&ev).to_string())
                />
            }
            .into_any()
        }
        FieldKind::ForeignKey => parent_picker(vm, row),
    }
}

fn parent_picker(vm: FormTreeViewModel, row: RowView) -> AnyView {
    let target = row.target_entity.clone().unwrap_or_default();
    let toggle = row.can_create_parent.then(|| {
        let vm = vm.clone();
        let key = row.key.clone();
        view! {
            <label class="form-group__toggle">
                <input
                    type="checkbox"
                    prop:checked=row.creating_new_parent
                    on:change=move |ev| vm.toggle_new_parent(key.clone(), event_target_checked(&ev))
                />
                {format!("New {}", element_name(&target))}
            </label>
        }
    });

    let picker = match row.state {
        RowState::Choice { options, selected } => {
            let key = row.key.clone();
            view! {
                <select on:change=move |ev| {
                    if let Ok(id) = event_target_value(&ev).parse::<RecordId>() {
                        vm.select(key.clone(), id);
                    }
                }>
                    {selected.is_none().then(|| view! {
                        <option value="" selected=true disabled=true>{"Pick again"}</option>
                    })}
                    {options.into_iter().map(|o| view! {
                        <option value=o.id.to_string() selected={selected == Some(o.id)}>{o.label}</option>
                    }).collect_view()}
                </select>
            }
            .into_any()
        }
        RowState::NoOptions => view! {
            <span class="form-group__hint">{format!("No {} yet", list_name(&target).to_lowercase())}</span>
        }
        .into_any(),
        RowState::Deferred => view! {
            <span class="form-group__hint">{"Filled in below"}</span>
        }
        .into_any(),
        _ => view! { <span class="form-group__hint">{"Loading..."}</span> }.into_any(),
    };

    view! {
        <div class="form-group__picker">
            {picker}
            {toggle}
        </div>
    }
    .into_any()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
