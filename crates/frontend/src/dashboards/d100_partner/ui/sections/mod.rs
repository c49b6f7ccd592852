pub mod activity;
pub mod finance;
pub mod info;
pub mod promo;
pub mod referral;
pub mod settings;
pub mod statistics;

use leptos::prelude::*;

use activity::ActivitySection;
use finance::{CancelWithdrawalSection, FinanceSection, WithdrawalFormSection};
use info::{NotificationsSection, SupportSection, TrainingSection};
use promo::PromoCodesSection;
use referral::ReferralLinkSection;
use settings::SettingsSection;
use statistics::StatisticsSection;

use crate::dashboards::d100_partner::aggregation::MetricRow;
use crate::dashboards::d100_partner::period::PeriodWindow;
use crate::dashboards::d100_partner::state::Section;

/// Таблица "Параметр / Значение"
#[component]
pub fn MetricTable(
    rows: Vec<MetricRow>,
    #[prop(default = "Метрика")] label_header: &'static str,
) -> impl IntoView {
    view! {
        <table class="stats-table">
            <thead>
                <tr>
                    <th>{label_header}</th>
                    <th>"Значение"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| view! {
                        <tr>
                            <td>{row.label}</td>
                            <td class="stat-value">{row.value}</td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

/// Выбор окна "7 / 30 дней / всё время"
#[component]
pub fn WindowSelect(
    #[prop(into)] value: Signal<PeriodWindow>,
    on_change: Callback<PeriodWindow>,
) -> impl IntoView {
    view! {
        <label>
            "Период:"
            <select
                prop:value=move || value.get().key()
                on:change=move |ev| {
                    let window = PeriodWindow::from_key(&event_target_value(&ev)).unwrap_or_default();
                    on_change.run(window);
                }
            >
                {PeriodWindow::ALL
                    .into_iter()
                    .map(|w| view! { <option value=w.key()>{w.label()}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Содержимое открытого раздела
pub fn section_body(section: Section) -> AnyView {
    match section {
        Section::Statistics => view! { <StatisticsSection /> }.into_any(),
        Section::ReferralLink => view! { <ReferralLinkSection /> }.into_any(),
        Section::Finance => view! { <FinanceSection /> }.into_any(),
        Section::WithdrawalRequest => view! { <WithdrawalFormSection /> }.into_any(),
        Section::CancelWithdrawal => view! { <CancelWithdrawalSection /> }.into_any(),
        Section::PromoCodes => view! { <PromoCodesSection /> }.into_any(),
        Section::Activity => view! { <ActivitySection /> }.into_any(),
        Section::Settings => view! { <SettingsSection /> }.into_any(),
        Section::Support => view! { <SupportSection /> }.into_any(),
        Section::Training => view! { <TrainingSection /> }.into_any(),
        Section::Notifications => view! { <NotificationsSection /> }.into_any(),
    }
}
