pub mod sidebar;

use leptos::prelude::*;

/// Application shell: entity sidebar on the left, the active form in the centre
///
/// ```text
/// +-----------+-----------------+
/// |  Sidebar  |    Content      |
/// +-----------+-----------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <div class="app-body">
                <aside class="app-sidebar">{left()}</aside>
                <div class="app-main">{center()}</div>
            </div>
        </div>
    }
}
