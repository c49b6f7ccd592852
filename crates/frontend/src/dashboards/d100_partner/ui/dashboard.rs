use leptos::prelude::*;

use super::sections::section_body;
use crate::dashboards::d100_partner::aggregation::{dashboard_cards, DashboardCard};
use crate::dashboards::d100_partner::reducer::Action;
use crate::dashboards::d100_partner::state::{NotificationKind, Section, PARTNER_ID};
use crate::dashboards::d100_partner::store::use_dashboard_store;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;

/// Главный экран партнёра: шапка, карточки разделов и модальное окно открытого раздела
#[component]
pub fn PartnerDashboard() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();

    let open_section = Memo::new(move |_| state.with(|s| s.open_section));
    let is_loading = Signal::derive(move || state.with(|s| s.is_loading));
    let cards = Memo::new(move |_| state.with(|s| dashboard_cards(&s.collections)));

    view! {
        <div class="container">
            <main class="main-content">
                <Header />
                <NotificationToast />
                <SnapshotBanner />
                <section class="dashboard" aria-label="Панель управления">
                    {move || cards
                        .get()
                        .into_iter()
                        .map(|card| view! { <Card card=card /> })
                        .collect_view()}
                </section>
                {move || open_section.get().map(|section| view! {
                    <Modal
                        title=section.title()
                        on_close=Callback::new(move |_| store.dispatch(Action::CloseSection))
                        is_loading=is_loading
                    >
                        {section_body(section)}
                    </Modal>
                })}
                <ConfirmDialog />
            </main>
        </div>
    }
}

/// Данные не загрузились: изменения заблокированы до повторной загрузки
#[component]
fn SnapshotBanner() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let failed = Memo::new(move |_| state.with(|s| s.snapshot_failed));

    view! {
        <Show when=move || failed.get()>
            <div class="notification error snapshot-error">
                "Не удалось загрузить данные."
                <button class="action-button" on:click=move |_| store.dispatch(Action::ReloadSnapshot)>
                    "Повторить"
                </button>
            </div>
        </Show>
    }
}

#[component]
fn Header() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let name = Memo::new(move |_| state.with(|s| s.partner_name().to_string()));

    view! {
        <header class="header">
            <div class="header-info">
                <h1>{move || format!("Добро пожаловать, {}", name.get())}</h1>
                <span
                    class="partner-id"
                    title="Скопировать ID"
                    on:click=move |_| store.dispatch(Action::CopyPartnerId)
                >
                    {format!("ID: {}", PARTNER_ID)}
                </span>
            </div>
            <div class="header-actions">
                <button
                    class="header-button"
                    aria-label="Уведомления"
                    on:click=move |_| store.dispatch(Action::OpenSection(Section::Notifications))
                >
                    {icon("bell")}
                    "Уведомления"
                </button>
                <button
                    class="header-button"
                    aria-label="Выйти"
                    on:click=move |_| store.dispatch(Action::RequestLogout)
                >
                    {icon("logout")}
                    "Выйти"
                </button>
            </div>
        </header>
    }
}

#[component]
fn Card(card: DashboardCard) -> impl IntoView {
    let store = use_dashboard_store();
    let section = card.section;

    view! {
        <article
            class="card"
            role="button"
            tabindex="0"
            on:click=move |_| store.dispatch(Action::OpenSection(section))
        >
            <div class="card-icon">{icon(card.icon)}</div>
            <h2>{card.title()}</h2>
            {card.lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()}
        </article>
    }
}

/// Всплывающее уведомление. Скрывается по таймеру из хранилища.
#[component]
pub fn NotificationToast() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let notification = Memo::new(move |_| state.with(|s| s.notification.clone()));

    view! {
        {move || notification.get().map(|n| {
            let class = match n.kind {
                NotificationKind::Success => "notification success",
                NotificationKind::Error => "notification error",
            };
            view! {
                <div class=class role="status" aria-live="polite">
                    {n.message}
                </div>
            }
        })}
    }
}

#[component]
fn ConfirmDialog() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();
    let confirmation = Memo::new(move |_| state.with(|s| s.confirmation.clone()));

    view! {
        {move || confirmation.get().map(|c| view! {
            <div class="modal confirm-overlay" role="alertdialog">
                <div class="modal-content confirm-dialog">
                    <p>{c.prompt()}</p>
                    <div class="confirm-actions">
                        <button class="action-button" on:click=move |_| store.dispatch(Action::Confirm)>
                            "Да"
                        </button>
                        <button class="action-button cancel" on:click=move |_| store.dispatch(Action::Decline)>
                            "Отмена"
                        </button>
                    </div>
                </div>
            </div>
        })}
    }
}
