use leptos::prelude::*;

use crate::dashboards::d100_partner::reducer::Action;
use crate::dashboards::d100_partner::state::Section;
use crate::dashboards::d100_partner::store::use_dashboard_store;

const SUPPORT_TELEGRAM: &str = "https://t.me/support_channel";
const SUPPORT_WHATSAPP: &str = "https://wa.me/71234567890";

const FAQ: [(&str, &str); 1] = [(
    "Как вывести деньги?",
    "Нажмите \"Запросить вывод\" в разделе Финансы.",
)];

const NOTIFICATIONS: [&str; 2] = [
    "01.03.2025: Реферал 001 зарегистрировался",
    "02.03.2025: Реферал 001 совершил покупку на 50,000 ₸",
];

#[component]
pub fn SupportSection() -> impl IntoView {
    view! {
        <p>"Часы работы: 9:00 - 18:00 (Пн-Пт)"</p>
        <ul class="support-links">
            <li>
                <a href=SUPPORT_TELEGRAM target="_blank" rel="noopener">"Telegram"</a>
            </li>
            <li>
                <a href=SUPPORT_WHATSAPP target="_blank" rel="noopener">"WhatsApp"</a>
            </li>
        </ul>
    }
}

#[component]
pub fn TrainingSection() -> impl IntoView {
    let store = use_dashboard_store();

    view! {
        <p>
            <a href="#">"Видео: Как начать"</a>
        </p>
        <dl class="faq">
            {FAQ
                .into_iter()
                .map(|(question, answer)| view! {
                    <dt>"Q: "{question}</dt>
                    <dd>"A: "{answer}</dd>
                })
                .collect_view()}
        </dl>
        <button
            class="action-button"
            on:click=move |_| store.dispatch(Action::OpenSection(Section::Support))
        >
            "Задать вопрос"
        </button>
    }
}

#[component]
pub fn NotificationsSection() -> impl IntoView {
    view! {
        <ul class="notifications-list">
            {NOTIFICATIONS
                .into_iter()
                .map(|line| view! { <li>{line}</li> })
                .collect_view()}
        </ul>
    }
}
