use crate::dashboards::d100_partner::api::HttpDocumentStore;
use crate::dashboards::d100_partner::store::PartnerStore;
use crate::routes::routes::AppRoutes;
use crate::system::auth::HttpAuthAdapter;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Хранилище дашборда доступно всему приложению через контекст
    let store = PartnerStore::new(HttpAuthAdapter, HttpDocumentStore);
    provide_context(store);
    store.restore_session();

    view! {
        <AppRoutes />
    }
}
