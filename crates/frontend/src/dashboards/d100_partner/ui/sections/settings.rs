use leptos::prelude::*;

use crate::dashboards::d100_partner::mutations::ProfileForm;
use crate::dashboards::d100_partner::reducer::Action;
use crate::dashboards::d100_partner::store::use_dashboard_store;

const SAVED_MESSAGE: &str = "Настройки сохранены!";

#[component]
pub fn SettingsSection() -> impl IntoView {
    let store = use_dashboard_store();
    let state = store.state();

    let draft = Memo::new(move |_| state.with(|s| s.profile_draft.clone()));
    let saved = Memo::new(move |_| {
        state.with(|s| s.notification.as_ref().is_some_and(|n| n.message == SAVED_MESSAGE))
    });

    // Черновик живёт в состоянии дашборда, поле правится целиком
    let edit = move |apply: fn(&mut ProfileForm, String), value: String| {
        let mut form = draft.get_untracked();
        apply(&mut form, value);
        store.dispatch(Action::EditProfile(form));
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::SaveProfile);
    };

    view! {
        <form on:submit=on_submit>
            <label>
                "Имя:"
                <input
                    type="text"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| edit(|f, v| f.name = v, event_target_value(&ev))
                />
            </label>
            <label>
                "Email:"
                <input
                    type="email"
                    prop:value=move || draft.with(|d| d.email.clone())
                    on:input=move |ev| edit(|f, v| f.email = v, event_target_value(&ev))
                />
            </label>
            <p class="stats-header">"Смена пароля"</p>
            <label>
                "Текущий пароль:"
                <input
                    type="password"
                    prop:value=move || draft.with(|d| d.current_password.clone())
                    on:input=move |ev| edit(|f, v| f.current_password = v, event_target_value(&ev))
                />
            </label>
            <label>
                "Новый пароль:"
                <input
                    type="password"
                    prop:value=move || draft.with(|d| d.new_password.clone())
                    on:input=move |ev| edit(|f, v| f.new_password = v, event_target_value(&ev))
                />
            </label>
            <label>
                "Подтвердите пароль:"
                <input
                    type="password"
                    prop:value=move || draft.with(|d| d.confirm_password.clone())
                    on:input=move |ev| edit(|f, v| f.confirm_password = v, event_target_value(&ev))
                />
            </label>
            <button type="submit" class="action-button">"Сохранить"</button>
            <Show when=move || saved.get()>
                <span class="saved-indicator">"Сохранено"</span>
            </Show>
        </form>
    }
}
