use leptos::prelude::*;

use super::{MetricTable, WindowSelect};
use crate::dashboards::d100_partner::aggregation::referral_overview_rows;
use crate::dashboards::d100_partner::reducer::{Action, Clock};
use crate::dashboards::d100_partner::state::{ChartSlot, REFERRAL_LINK};
use crate::dashboards::d100_partner::store::use_dashboard_store;
use crate::dashboards::d100_partner::ui::chart::ChartCanvas;
use crate::shared::export::ExportFile;

#[component]
pub fn ReferralLinkSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();

    let clicks = Memo::new(move |_| state.with(|s| s.filtered_clicks(Clock::system().now)));
    let window = Signal::derive(move || state.with(|s| s.filters.clicks));

    view! {
        <div class="link-container">
            <p class="link-text">{REFERRAL_LINK}</p>
            <button
                class="copy-icon"
                title="Копировать ссылку"
                on:click=move |_| store.dispatch(Action::CopyReferralLink)
            >
                "Копировать"
            </button>
        </div>
        <p class="stats-header">"Общая статистика"</p>
        <MetricTable rows=referral_overview_rows() />
        <WindowSelect
            value=window
            on_change=Callback::new(move |w| store.dispatch(Action::SetClickWindow(w)))
        />
        <table class="stats-table" aria-label="Статистика переходов">
            <thead>
                <tr>
                    <th>"Дата клика"</th>
                    <th>"Источник"</th>
                    <th>"Уникальный"</th>
                    <th>"Результат"</th>
                </tr>
            </thead>
            <tbody>
                {move || clicks
                    .get()
                    .into_iter()
                    .map(|c| view! {
                        <tr>
                            <td>{c.date}</td>
                            <td>{c.source}</td>
                            <td>{c.unique}</td>
                            <td>{c.result}</td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
        <ChartCanvas slot=ChartSlot::Clicks />
        <button class="action-button" on:click=move |_| store.dispatch(Action::Export(ExportFile::ReferralStats))>
            "Экспорт статистики в Excel"
        </button>
    }
}
