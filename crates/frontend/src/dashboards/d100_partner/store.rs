use std::collections::BTreeMap;

use contracts::domain::common::CollectionName;
use contracts::system::auth::UserInfo;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::{HttpDocumentStore, PersistenceAdapter};
use super::error::DashboardError;
use super::period::ChartSeries;
use super::reducer::{reduce, Action, AuthOperation, Clock, Effect, Transition};
use super::state::{ChartSlot, Collections, NotificationKind, Session, ViewState};
use crate::shared::clipboard;
use crate::shared::export::download_text;
use crate::system::auth::{AuthAdapter, HttpAuthAdapter};

/// Хранилище состояния дашборда.
///
/// Все изменения идут через `dispatch`: действие проходит через `reduce`,
/// затем исполняются возвращённые эффекты. Результаты асинхронных эффектов
/// возвращаются обратно как новые действия.
#[derive(Clone, Copy)]
pub struct DashboardStore<A: 'static, P: 'static> {
    state: RwSignal<ViewState>,
    /// Поверхность графиков: подготовленные ряды по местам
    charts: RwSignal<BTreeMap<ChartSlot, ChartSeries>>,
    auth: A,
    persistence: P,
}

pub type PartnerStore = DashboardStore<HttpAuthAdapter, HttpDocumentStore>;

/// Store from context (provided by `App`)
pub fn use_dashboard_store() -> PartnerStore {
    expect_context::<PartnerStore>()
}

impl<A, P> DashboardStore<A, P>
where
    A: AuthAdapter + Copy + Send + Sync + 'static,
    P: PersistenceAdapter + Copy + Send + Sync + 'static,
{
    pub fn new(auth: A, persistence: P) -> Self {
        Self {
            state: RwSignal::new(ViewState::default()),
            charts: RwSignal::new(BTreeMap::new()),
            auth,
            persistence,
        }
    }

    pub fn state(&self) -> ReadSignal<ViewState> {
        self.state.read_only()
    }

    pub fn chart(&self, slot: ChartSlot) -> Option<ChartSeries> {
        self.charts.with(|charts| charts.get(&slot).cloned())
    }

    pub fn dispatch(&self, action: Action) {
        let current = self.state.get_untracked();
        let Transition { state, effects } = reduce(current, action, &Clock::system());
        self.state.set(state);
        for effect in effects {
            self.run(effect);
        }
    }

    /// Восстановить сессию с прошлого запуска
    pub fn restore_session(&self) {
        let store = *self;
        spawn_local(async move {
            let user = store.auth.current_session().await;
            store.dispatch(Action::SessionChanged(user.map(Session::from)));
        });
    }

    fn run(&self, effect: Effect) {
        let store = *self;
        match effect {
            Effect::LoadSnapshot { owner_id } => spawn_local(async move {
                let result = store.load_snapshot(&owner_id).await;
                store.dispatch(Action::SnapshotLoaded { owner_id, result });
            }),
            Effect::Persist { owner_id, items } => spawn_local(async move {
                if let Err(e) = store.persistence.save_all(&owner_id, &items).await {
                    store.dispatch(Action::PersistFailed {
                        collection: items.name(),
                        error: DashboardError::adapter(e),
                    });
                }
            }),
            Effect::Register { form } => spawn_local(async move {
                match store.auth.register(form.email.trim(), &form.password).await {
                    Ok(user) => {
                        // Имя задаётся отдельным запросом сразу после создания аккаунта
                        let named = store.auth.update_display_name(form.name.trim()).await;
                        for action in registration_actions(user, named) {
                            store.dispatch(action);
                        }
                    }
                    Err(e) => store.dispatch(Action::AuthFailed {
                        operation: AuthOperation::Register,
                        error: DashboardError::adapter(e),
                    }),
                }
            }),
            Effect::Login { form } => spawn_local(async move {
                match store.auth.login(form.email.trim(), &form.password).await {
                    Ok(user) => store.dispatch(Action::LoggedIn(Session::from(user))),
                    Err(e) => store.dispatch(Action::AuthFailed {
                        operation: AuthOperation::Login,
                        error: DashboardError::adapter(e),
                    }),
                }
            }),
            Effect::Logout => spawn_local(async move {
                if let Err(e) = store.auth.logout().await {
                    log::warn!("Logout request failed: {}", e);
                }
                store.dispatch(Action::LoggedOut);
            }),
            Effect::UpdateDisplayName { display_name } => spawn_local(async move {
                match store.auth.update_display_name(&display_name).await {
                    Ok(user) => store.dispatch(Action::ProfileSaved(
                        user.display_name.unwrap_or(display_name),
                    )),
                    Err(e) => store.dispatch(Action::ProfileSaveFailed(DashboardError::adapter(e))),
                }
            }),
            Effect::StartLoadingDelay { section, delay_ms } => spawn_local(async move {
                TimeoutFuture::new(delay_ms).await;
                store.dispatch(Action::LoadingElapsed(section));
            }),
            Effect::RenderChart { slot, series } => {
                self.charts.update(|charts| {
                    charts.insert(slot, series);
                });
            }
            Effect::DestroyChart(slot) => {
                self.charts.update(|charts| {
                    charts.remove(&slot);
                });
            }
            Effect::Download { file, content } => {
                if let Err(e) = download_text(&content, file.filename()) {
                    log::error!("Failed to download {}: {}", file.filename(), e);
                }
            }
            Effect::CopyToClipboard {
                text,
                success,
                failure,
            } => spawn_local(async move {
                let (message, kind) = match clipboard::write_text(&text).await {
                    Ok(()) => (success, NotificationKind::Success),
                    Err(e) => {
                        log::warn!("{}", e);
                        (failure, NotificationKind::Error)
                    }
                };
                store.dispatch(Action::Notify { message, kind });
            }),
            Effect::HideNotificationLater { id, delay_ms } => spawn_local(async move {
                TimeoutFuture::new(delay_ms).await;
                store.dispatch(Action::NotificationExpired(id));
            }),
        }
    }

    async fn load_snapshot(&self, owner_id: &str) -> Result<Collections, DashboardError> {
        let mut collections = Collections::default();
        for name in CollectionName::ALL {
            let items = self
                .persistence
                .load_all(owner_id, name)
                .await
                .map_err(DashboardError::adapter)?;
            collections.replace(items);
        }
        Ok(collections)
    }
}

/// Аккаунт уже создан и вход выполнен, поэтому ошибка установки имени
/// не отменяет регистрацию, а показывается как ошибка сохранения профиля.
fn registration_actions(user: UserInfo, named: Result<UserInfo, String>) -> Vec<Action> {
    match named {
        Ok(named) => vec![Action::Registered(Session::from(named))],
        Err(e) => {
            log::warn!("Display name was not saved after registration: {}", e);
            vec![
                Action::Registered(Session::from(user)),
                Action::ProfileSaveFailed(DashboardError::adapter(e)),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: Option<&str>) -> UserInfo {
        UserInfo {
            id: "owner-1".to_string(),
            email: "ivan@example.com".to_string(),
            display_name: display_name.map(str::to_string),
        }
    }

    #[test]
    fn test_registration_with_name() {
        let actions = registration_actions(user(None), Ok(user(Some("Иван"))));
        assert_eq!(actions, vec![Action::Registered(Session::from(user(Some("Иван"))))]);
    }

    #[test]
    fn test_name_failure_keeps_registration() {
        let actions = registration_actions(user(None), Err("Сервис недоступен".to_string()));
        assert_eq!(
            actions,
            vec![
                Action::Registered(Session::from(user(None))),
                Action::ProfileSaveFailed(DashboardError::adapter("Сервис недоступен")),
            ]
        );
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::AuthFailed { .. })));
    }
}
