use std::sync::Arc;

use contracts::shared::forms::catalog::build_registry;
use leptos::prelude::*;

use crate::layout::sidebar::Sidebar;
use crate::layout::Shell;
use crate::shared::form_tree::ui::{FormTreeView, FormTreeViewModel};
use crate::shared::form_tree::HttpCrudApi;

#[component]
pub fn App() -> impl IntoView {
    // A broken catalog is a programming error; there is nothing to render without it
    let registry = Arc::new(build_registry().expect("entity catalog is inconsistent"));
    let api = HttpCrudApi::from_window();

    let first_entity = registry
        .entity_names()
        .next()
        .unwrap_or_default()
        .to_string();
    let vm = FormTreeViewModel::new(registry, api, first_entity);
    log::info!("job tracker started");

    let left_vm = vm.clone();
    let center_vm = vm.clone();
    view! {
        <Shell
            left=move || view! { <Sidebar vm=left_vm.clone() /> }.into_any()
            center=move || view! { <FormTreeView vm=center_vm.clone() /> }.into_any()
        />
    }
}
