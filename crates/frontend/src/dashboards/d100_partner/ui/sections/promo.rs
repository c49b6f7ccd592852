use leptos::prelude::*;

use crate::dashboards::d100_partner::aggregation::promo_quota_caption;
use crate::dashboards::d100_partner::reducer::Action;
use crate::dashboards::d100_partner::store::use_dashboard_store;

#[component]
pub fn PromoCodesSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let new_code = RwSignal::new(String::new());

    let codes = Memo::new(move |_| state.with(|s| s.collections.promo_codes.clone()));
    let ready = Memo::new(move |_| state.with(|s| s.collections_ready));

    let on_create = move |_| {
        store.dispatch(Action::CreatePromoCode(new_code.get_untracked()));
        new_code.set(String::new());
    };

    view! {
        <p class="promo-quota">{move || promo_quota_caption(codes.with(|c| c.len()))}</p>
        <div class="promo-create">
            <input
                type="text"
                placeholder="Например, SUMMER2025"
                bind:value=new_code
            />
            <button class="action-button" disabled=move || !ready.get() on:click=on_create>
                "Создать промокод"
            </button>
        </div>
        <table class="stats-table" aria-label="Промокоды">
            <thead>
                <tr>
                    <th>"Промокод"</th>
                    <th>"Использований"</th>
                    <th>"Регистраций"</th>
                    <th>"Доход"</th>
                    <th>"Создан"</th>
                    <th>"Действия"</th>
                </tr>
            </thead>
            <tbody>
                {move || codes
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, promo)| {
                        let code = promo.code.clone();
                        let row_class = if promo.is_active() { "promo-active" } else { "" };
                        view! {
                            <tr class=row_class>
                                <td>{promo.code}</td>
                                <td>{promo.uses}</td>
                                <td>{promo.registrations}</td>
                                <td>{promo.revenue}</td>
                                <td>{promo.created}</td>
                                <td>
                                    <button
                                        class="copy-icon"
                                        title="Копировать промокод"
                                        on:click=move |_| store.dispatch(Action::CopyPromoCode(code.clone()))
                                    >
                                        "Копировать"
                                    </button>
                                    <button
                                        class="delete-icon"
                                        title="Удалить промокод"
                                        disabled=move || !ready.get()
                                        on:click=move |_| store.dispatch(Action::RequestDeletePromoCode(index))
                                    >
                                        "Удалить"
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
