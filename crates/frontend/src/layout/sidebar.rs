//! Sidebar listing every entity of the registry

use contracts::shared::forms::catalog::list_name;
use leptos::prelude::*;

use crate::shared::form_tree::ui::FormTreeViewModel;

#[component]
pub fn Sidebar(vm: FormTreeViewModel) -> impl IntoView {
    let entities: Vec<String> = vm.registry().entity_names().map(str::to_string).collect();

    view! {
        <div class="app-sidebar__content">
            {entities.into_iter().map(|entity| {
                let label = list_name(&entity).to_string();
                let active_vm = vm.clone();
                let click_vm = vm.clone();
                let active_entity = entity.clone();
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || active_vm.entity.get() == active_entity
                        style:padding-left="12px"
                        on:click=move |_| click_vm.select_entity(entity.clone())
                    >
                        <span class="app-sidebar__label">{label}</span>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
