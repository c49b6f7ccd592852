use leptos::ev;
use leptos::prelude::*;

/// Модальное окно раздела. Пока идёт загрузка, содержимое размыто и показан индикатор.
#[component]
pub fn Modal(
    /// Title of the modal
    title: &'static str,
    /// Callback when modal should close
    on_close: Callback<()>,
    #[prop(into)] is_loading: Signal<bool>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    let keydown = window_event_listener(ev::keydown, move |event: ev::KeyboardEvent| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    // окно открывается и закрывается много раз, слушатель живёт столько же
    on_cleanup(move || keydown.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal" role="dialog" on:click=move |_| on_close.run(())>
            <div
                class="modal-content"
                class:blurred=move || is_loading.get()
                on:click=stop_propagation
            >
                <button class="close" aria-label="Закрыть" on:click=move |_| on_close.run(())>
                    "×"
                </button>
                <Show when=move || is_loading.get()>
                    <div class="loader"></div>
                </Show>
                <h2>{title}</h2>
                <article class="card">{children()}</article>
            </div>
        </div>
    }
}
