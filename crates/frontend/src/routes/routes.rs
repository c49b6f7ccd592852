use crate::dashboards::d100_partner::store::use_dashboard_store;
use crate::dashboards::d100_partner::ui::PartnerDashboard;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
pub fn AppRoutes() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let resolved = Memo::new(move |_| state.with(|s| s.session_resolved));
    let authenticated = Memo::new(move |_| state.with(|s| s.is_authenticated()));

    view! {
        // Пока сессия не восстановлена, ничего не показываем
        <Show when=move || resolved.get() fallback=|| view! { <div class="loader"></div> }>
            <Show
                when=move || authenticated.get()
                fallback=|| view! { <LoginPage /> }
            >
                <PartnerDashboard />
            </Show>
        </Show>
    }
}
