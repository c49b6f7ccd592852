use leptos::prelude::*;

use super::{MetricTable, WindowSelect};
use crate::dashboards::d100_partner::aggregation::{finance_metric_rows, pending_withdrawals};
use crate::dashboards::d100_partner::mutations::WithdrawalForm;
use crate::dashboards::d100_partner::reducer::{Action, Clock};
use crate::dashboards::d100_partner::state::{ChartSlot, Section};
use crate::dashboards::d100_partner::store::use_dashboard_store;
use crate::dashboards::d100_partner::ui::chart::ChartCanvas;
use crate::shared::export::ExportFile;

#[component]
pub fn FinanceSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();

    let history = Memo::new(move |_| state.with(|s| s.filtered_finance(Clock::system().now)));
    let rows = Memo::new(move |_| state.with(|s| finance_metric_rows(&s.collections.finance_stats)));
    let window = Signal::derive(move || state.with(|s| s.filters.finance));
    let has_pending = Memo::new(move |_| state.with(|s| s.has_pending_withdrawal));
    let ready = Memo::new(move |_| state.with(|s| s.collections_ready));

    view! {
        {move || view! { <MetricTable rows=rows.get() label_header="Параметр" /> }}
        <WindowSelect
            value=window
            on_change=Callback::new(move |w| store.dispatch(Action::SetFinanceWindow(w)))
        />
        <ChartCanvas slot=ChartSlot::Finance />
        <div class="withdrawal-actions">
            <Show
                when=move || has_pending.get()
                fallback=move || view! {
                    <button
                        class="action-button"
                        disabled=move || !ready.get()
                        on:click=move |_| store.dispatch(Action::OpenSection(Section::WithdrawalRequest))
                    >
                        "Запросить вывод"
                    </button>
                }
            >
                <div class="withdrawal-buttons">
                    <button
                        class="action-button cancel"
                        disabled=move || !ready.get()
                        on:click=move |_| store.dispatch(Action::OpenSection(Section::CancelWithdrawal))
                    >
                        "Отменить запрос на вывод"
                    </button>
                    <button
                        class="action-button"
                        disabled=move || !ready.get()
                        on:click=move |_| store.dispatch(Action::OpenSection(Section::WithdrawalRequest))
                    >
                        "Добавить запрос на вывод"
                    </button>
                </div>
            </Show>
        </div>
        <p class="stats-header">"История выплат"</p>
        <table class="stats-table" aria-label="История выплат">
            <thead>
                <tr>
                    <th>"Дата"</th>
                    <th>"Сумма"</th>
                    <th>"Статус"</th>
                </tr>
            </thead>
            <tbody>
                {move || history
                    .get()
                    .into_iter()
                    .map(|e| {
                        let status_class = format!("status-{}", e.status.label().to_lowercase());
                        view! {
                            <tr>
                                <td>{e.date}</td>
                                <td>{e.amount}</td>
                                <td class=status_class>{e.status.label()}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
        <button class="action-button" on:click=move |_| store.dispatch(Action::Export(ExportFile::FinanceStats))>
            "Экспорт истории в Excel"
        </button>
    }
}

#[component]
pub fn WithdrawalFormSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let ready = Memo::new(move |_| state.with(|s| s.collections_ready));
    let recipient_name = RwSignal::new(String::new());
    let bank_name = RwSignal::new(String::new());
    let card_number = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::SubmitWithdrawal(WithdrawalForm {
            recipient_name: recipient_name.get_untracked(),
            bank_name: bank_name.get_untracked(),
            card_number: card_number.get_untracked(),
        }));
    };

    view! {
        <form on:submit=on_submit>
            <label>
                "Имя и Фамилия на карте получателя:"
                <input type="text" bind:value=recipient_name />
            </label>
            <label>
                "Наименование банка:"
                <input type="text" bind:value=bank_name />
            </label>
            <label>
                "Номер карты:"
                <input type="text" placeholder="XXXX-XXXX-XXXX-XXXX" bind:value=card_number />
            </label>
            <button type="submit" class="action-button" disabled=move || !ready.get()>
                "Отправить запрос"
            </button>
        </form>
    }
}

#[component]
pub fn CancelWithdrawalSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let selected = RwSignal::new(Vec::<String>::new());
    let ready = Memo::new(move |_| state.with(|s| s.collections_ready));

    let options = Memo::new(move |_| {
        state.with(|s| pending_withdrawals(&s.filtered_finance(Clock::system().now)))
    });

    let toggle = move |value: String, checked: bool| {
        selected.update(|list| {
            list.retain(|v| v != &value);
            if checked {
                list.push(value);
            }
        });
    };

    view! {
        <p class="stats-header">"Выберите транзакции для отмены"</p>
        <table class="stats-table" aria-label="Не подтверждённые транзакции">
            <thead>
                <tr>
                    <th>"Дата"</th>
                    <th>"Сумма"</th>
                    <th>"Выбрать"</th>
                </tr>
            </thead>
            <tbody>
                {move || options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let value = option.value.clone();
                        view! {
                            <tr>
                                <td>{option.date}</td>
                                <td>{option.amount}</td>
                                <td>
                                    <input
                                        type="checkbox"
                                        value=option.value
                                        on:change=move |ev| toggle(value.clone(), event_target_checked(&ev))
                                    />
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
        <button
            class="action-button"
            disabled=move || !ready.get()
            on:click=move |_| store.dispatch(Action::RequestCancelWithdrawals(selected.get_untracked()))
        >
            "Подтвердить отмену"
        </button>
    }
}
