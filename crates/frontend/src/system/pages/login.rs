use leptos::prelude::*;

use crate::dashboards::d100_partner::mutations::{LoginForm, RegistrationForm};
use crate::dashboards::d100_partner::reducer::Action;
use crate::dashboards::d100_partner::state::AuthScreen;
use crate::dashboards::d100_partner::store::use_dashboard_store;
use crate::dashboards::d100_partner::ui::NotificationToast;
use crate::shared::modal::Modal;

#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let store = use_dashboard_store();
    let state = store.state();
    let is_loading = Signal::derive(move || state.with(|s| s.auth_in_flight));
    let show_register = Memo::new(move |_| state.with(|s| s.auth_screen == AuthScreen::Register));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::SubmitLogin(LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        }));
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h2>"Вход"</h2>
                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="login-email">"Email:"</label>
                        <input
                            type="email"
                            id="login-email"
                            placeholder="Введите ваш email"
                            value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="login-password">"Пароль:"</label>
                        <input
                            type="password"
                            id="login-password"
                            placeholder="Введите ваш пароль"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="action-button"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Вход..." } else { "Войти" }}
                    </button>
                    <button
                        type="button"
                        class="action-button secondary"
                        on:click=move |_| store.dispatch(Action::ShowAuthScreen(AuthScreen::Register))
                    >
                        "Регистрация"
                    </button>
                </form>
            </div>

            <Show when=move || show_register.get()>
                <Modal
                    title="Регистрация"
                    on_close=Callback::new(move |_| store.dispatch(Action::ShowAuthScreen(AuthScreen::Login)))
                    is_loading=is_loading
                >
                    <RegisterForm />
                </Modal>
            </Show>

            <NotificationToast />
        </div>
    }
}

#[component]
fn RegisterForm() -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let store = use_dashboard_store();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        store.dispatch(Action::SubmitRegistration(RegistrationForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        }));
    };

    view! {
        <form on:submit=on_submit>
            <label>
                "Имя:"
                <input
                    type="text"
                    placeholder="Введите ваше имя"
                    value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    required
                />
            </label>
            <label>
                "Email:"
                <input
                    type="email"
                    placeholder="Введите ваш email"
                    value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    required
                />
            </label>
            <label>
                "Пароль:"
                <input
                    type="password"
                    placeholder="Минимум 8 символов"
                    value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    required
                />
            </label>
            <button type="submit" class="action-button">"Зарегистрироваться"</button>
        </form>
    }
}
