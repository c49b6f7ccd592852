use contracts::domain::a001_referral::{PLAN_PREMIUM, PLAN_STANDARD, STATUS_ACTIVE, STATUS_INACTIVE};
use leptos::prelude::*;

use super::MetricTable;
use crate::dashboards::d100_partner::aggregation::dashboard_metric_rows;
use crate::dashboards::d100_partner::filters::CategoryFilter;
use crate::dashboards::d100_partner::period::IncomePeriod;
use crate::dashboards::d100_partner::reducer::Action;
use crate::dashboards::d100_partner::state::ChartSlot;
use crate::dashboards::d100_partner::store::use_dashboard_store;
use crate::dashboards::d100_partner::ui::chart::ChartCanvas;
use crate::shared::export::ExportFile;

#[component]
pub fn StatisticsSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();

    let filtered = Memo::new(move |_| state.with(|s| s.filtered_referrals()));

    view! {
        <div class="filters">
            <label>
                "Период:"
                <select
                    prop:value=move || state.with(|s| s.filters.income_period.key())
                    on:change=move |ev| {
                        let period = IncomePeriod::from_key(&event_target_value(&ev)).unwrap_or_default();
                        store.dispatch(Action::SetIncomePeriod(period));
                    }
                >
                    {IncomePeriod::ALL
                        .into_iter()
                        .map(|p| view! { <option value=p.key()>{p.label()}</option> })
                        .collect_view()}
                </select>
            </label>
            <label>
                "Тариф:"
                <select
                    prop:value=move || state.with(|s| s.filters.referrals.tariff.key().to_string())
                    on:change=move |ev| {
                        store.dispatch(Action::SetTariffFilter(CategoryFilter::from_key(&event_target_value(&ev))));
                    }
                >
                    <option value="all">"Все"</option>
                    <option value=PLAN_PREMIUM>{PLAN_PREMIUM}</option>
                    <option value=PLAN_STANDARD>{PLAN_STANDARD}</option>
                </select>
            </label>
            <label>
                "Статус:"
                <select
                    prop:value=move || state.with(|s| s.filters.referrals.status.key().to_string())
                    on:change=move |ev| {
                        store.dispatch(Action::SetStatusFilter(CategoryFilter::from_key(&event_target_value(&ev))));
                    }
                >
                    <option value="all">"Все"</option>
                    <option value=STATUS_ACTIVE>{STATUS_ACTIVE}</option>
                    <option value=STATUS_INACTIVE>{STATUS_INACTIVE}</option>
                </select>
            </label>
        </div>
        <div class="dashboard modal-dashboard">
            <article class="card">
                <h3>"Доход за период"</h3>
                <ChartCanvas slot=ChartSlot::Income />
            </article>
            <article class="card">
                <h3>"Воронка конверсии"</h3>
                <ChartCanvas slot=ChartSlot::Funnel />
            </article>
            <article class="card">
                <h3>"Рефералы"</h3>
                <input
                    type="text"
                    placeholder="Поиск по ID, тарифу, дате"
                    aria-label="Поиск рефералов"
                    prop:value=move || state.with(|s| s.filters.referrals.search.clone())
                    on:input=move |ev| store.dispatch(Action::SetReferralSearch(event_target_value(&ev)))
                />
                <table class="referral-table" aria-label="Таблица рефералов">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Тариф"</th>
                            <th>"Сумма"</th>
                            <th>"Дата"</th>
                            <th>"Статус"</th>
                            <th>"Источник"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || filtered
                            .get()
                            .into_iter()
                            .map(|r| view! {
                                <tr>
                                    <td>{r.id}</td>
                                    <td>{r.plan}</td>
                                    <td>{r.amount}</td>
                                    <td>{r.date}</td>
                                    <td>{r.status}</td>
                                    <td>{r.source}</td>
                                </tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
                <MetricTable rows=dashboard_metric_rows() />
                <button class="action-button" on:click=move |_| store.dispatch(Action::Export(ExportFile::Referrals))>
                    "Экспорт в Excel"
                </button>
            </article>
        </div>
    }
}
