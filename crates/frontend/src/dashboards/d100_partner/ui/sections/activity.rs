use contracts::domain::a005_activity_event::ActivityAction;
use leptos::prelude::*;

use super::WindowSelect;
use crate::dashboards::d100_partner::reducer::{Action, Clock};
use crate::dashboards::d100_partner::store::use_dashboard_store;

const ALL_ACTIONS_KEY: &str = "all";

#[component]
pub fn ActivitySection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();

    let events = Memo::new(move |_| state.with(|s| s.filtered_activity(Clock::system().now)));
    let window = Signal::derive(move || state.with(|s| s.filters.activity.period));

    view! {
        <div class="filters">
            <WindowSelect
                value=window
                on_change=Callback::new(move |w| store.dispatch(Action::SetActivityWindow(w)))
            />
            <label>
                "Действие:"
                <select
                    prop:value=move || {
                        state.with(|s| s.filters.activity.action.map_or(ALL_ACTIONS_KEY, |a| a.key()))
                    }
                    on:change=move |ev| {
                        let action = ActivityAction::from_key(&event_target_value(&ev));
                        store.dispatch(Action::SetActivityAction(action));
                    }
                >
                    <option value=ALL_ACTIONS_KEY>"Все"</option>
                    {[ActivityAction::Registration, ActivityAction::Purchase]
                        .into_iter()
                        .map(|a| view! { <option value=a.key()>{a.label()}</option> })
                        .collect_view()}
                </select>
            </label>
            <input
                type="text"
                placeholder="Поиск по ID реферала"
                prop:value=move || state.with(|s| s.filters.activity.referral_id.clone())
                on:input=move |ev| store.dispatch(Action::SetActivityIdFilter(event_target_value(&ev)))
            />
        </div>
        <table class="stats-table" aria-label="История активности">
            <thead>
                <tr>
                    <th>"ID"</th>
                    <th>"Действие"</th>
                    <th>"Дата"</th>
                    <th>"Источник"</th>
                    <th>"Доход"</th>
                </tr>
            </thead>
            <tbody>
                {move || events
                    .get()
                    .into_iter()
                    .map(|e| {
                        let revenue_class = if e.has_revenue() { "stat-value" } else { "" };
                        view! {
                            <tr>
                                <td>{e.id}</td>
                                <td>{e.action.label()}</td>
                                <td>{e.date}</td>
                                <td>{e.source}</td>
                                <td class=revenue_class>{e.revenue}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
