//! Переходы состояния дашборда.
//!
//! `reduce` ничего не делает сам: побочные действия (сохранение, запросы авторизации,
//! таймеры, графики, скачивание, буфер обмена) возвращаются списком `Effect`,
//! их исполняет `DashboardStore`.

use chrono::{DateTime, Local, NaiveDate, Utc};
use contracts::domain::a005_activity_event::ActivityAction;
use contracts::domain::common::CollectionName;

use super::aggregation::has_pending_withdrawal;
use super::error::DashboardError;
use super::filters::CategoryFilter;
use super::mutations::{
    cancel_withdrawals, create_promo_code, delete_promo_code, submit_withdrawal, validate_login,
    validate_profile, validate_registration, LoginForm, ProfileForm, RegistrationForm,
    WithdrawalForm,
};
use super::period::{ChartSeries, IncomePeriod, PeriodWindow};
use super::state::{
    AuthScreen, ChartSlot, CollectionItems, Collections, Confirmation, Notification,
    NotificationKind, Section, Session, ViewState, PARTNER_ID, REFERRAL_LINK,
};
use crate::shared::date_utils::format_ru_date;
use crate::shared::export::{to_delimited_text, ExportFile};

/// Искусственная задержка загрузки раздела
pub const LOADING_DELAY_MS: u32 = 1000;
/// Время показа уведомления
pub const NOTIFICATION_HIDE_MS: u32 = 2000;

/// Текущий момент для фильтров по периоду и дата для новых записей
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

impl Clock {
    pub fn system() -> Self {
        Self {
            now: Utc::now(),
            today: Local::now().date_naive(),
        }
    }

    pub fn today_label(&self) -> String {
        format_ru_date(self.today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    Register,
}

impl AuthOperation {
    fn failure_prefix(&self) -> &'static str {
        match self {
            AuthOperation::Login => "Ошибка входа: ",
            AuthOperation::Register => "Ошибка регистрации: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Сессия
    SessionChanged(Option<Session>),
    ShowAuthScreen(AuthScreen),
    SubmitLogin(LoginForm),
    SubmitRegistration(RegistrationForm),
    LoggedIn(Session),
    Registered(Session),
    AuthFailed {
        operation: AuthOperation,
        error: DashboardError,
    },
    RequestLogout,
    LoggedOut,

    // Данные
    SnapshotLoaded {
        owner_id: String,
        result: Result<Collections, DashboardError>,
    },
    PersistFailed {
        collection: CollectionName,
        error: DashboardError,
    },
    ReloadSnapshot,

    // Разделы
    OpenSection(Section),
    CloseSection,
    LoadingElapsed(Section),

    // Фильтры
    SetIncomePeriod(IncomePeriod),
    SetReferralSearch(String),
    SetTariffFilter(CategoryFilter),
    SetStatusFilter(CategoryFilter),
    SetClickWindow(PeriodWindow),
    SetFinanceWindow(PeriodWindow),
    SetActivityWindow(PeriodWindow),
    SetActivityAction(Option<ActivityAction>),
    SetActivityIdFilter(String),

    // Изменения
    CreatePromoCode(String),
    RequestDeletePromoCode(usize),
    SubmitWithdrawal(WithdrawalForm),
    RequestCancelWithdrawals(Vec<String>),
    EditProfile(ProfileForm),
    SaveProfile,
    ProfileSaved(String),
    ProfileSaveFailed(DashboardError),
    Confirm,
    Decline,

    // Прочее
    Export(ExportFile),
    CopyReferralLink,
    CopyPromoCode(String),
    CopyPartnerId,
    Notify {
        message: String,
        kind: NotificationKind,
    },
    NotificationExpired(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadSnapshot {
        owner_id: String,
    },
    /// Полная перезапись документа коллекции
    Persist {
        owner_id: String,
        items: CollectionItems,
    },
    Register {
        form: RegistrationForm,
    },
    Login {
        form: LoginForm,
    },
    Logout,
    UpdateDisplayName {
        display_name: String,
    },
    StartLoadingDelay {
        section: Section,
        delay_ms: u32,
    },
    RenderChart {
        slot: ChartSlot,
        series: ChartSeries,
    },
    DestroyChart(ChartSlot),
    Download {
        file: ExportFile,
        content: String,
    },
    CopyToClipboard {
        text: String,
        success: String,
        failure: String,
    },
    HideNotificationLater {
        id: u64,
        delay_ms: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    pub effects: Vec<Effect>,
}

struct Reducer<'a> {
    state: ViewState,
    effects: Vec<Effect>,
    clock: &'a Clock,
}

pub fn reduce(state: ViewState, action: Action, clock: &Clock) -> Transition {
    let mut reducer = Reducer {
        state,
        effects: Vec::new(),
        clock,
    };
    reducer.apply(action);
    Transition {
        state: reducer.state,
        effects: reducer.effects,
    }
}

impl Reducer<'_> {
    fn apply(&mut self, action: Action) {
        match action {
            Action::SessionChanged(Some(session)) => self.start_session(session),
            Action::SessionChanged(None) => self.end_session(),
            Action::ShowAuthScreen(screen) => self.state.auth_screen = screen,
            Action::SubmitLogin(form) => match validate_login(&form) {
                Ok(()) => {
                    self.state.auth_in_flight = true;
                    self.effects.push(Effect::Login { form });
                }
                Err(e) => self.notify_error(e.to_string()),
            },
            Action::SubmitRegistration(form) => match validate_registration(&form) {
                Ok(()) => {
                    self.state.auth_in_flight = true;
                    self.effects.push(Effect::Register { form });
                }
                Err(e) => self.notify_error(e.to_string()),
            },
            Action::LoggedIn(session) => {
                self.state.auth_in_flight = false;
                self.start_session(session);
                self.notify_success("Вход выполнен!");
            }
            Action::Registered(session) => self.registered(session),
            Action::AuthFailed { operation, error } => {
                self.state.auth_in_flight = false;
                self.notify_error(format!("{}{}", operation.failure_prefix(), error));
            }
            Action::RequestLogout => self.state.confirmation = Some(Confirmation::Logout),
            Action::LoggedOut => {
                self.end_session();
                self.notify_success("Выход выполнен!");
            }

            Action::SnapshotLoaded { owner_id, result } => self.snapshot_loaded(owner_id, result),
            Action::PersistFailed { collection, error } => {
                log::error!("Failed to persist {}: {}", collection, error);
                self.notify_error(error.to_string());
            }
            Action::ReloadSnapshot => self.reload_snapshot(),

            Action::OpenSection(section) => {
                self.state.open_section = Some(section);
                self.state.is_loading = true;
                self.effects.push(Effect::StartLoadingDelay {
                    section,
                    delay_ms: LOADING_DELAY_MS,
                });
                self.sync_charts(&[]);
            }
            Action::CloseSection => self.close_section(),
            Action::LoadingElapsed(section) => {
                self.state.is_loading = false;
                if section == Section::Finance || self.state.is_open(Section::Finance) {
                    self.refresh_withdrawal_flag();
                }
                self.sync_charts(&[]);
            }

            Action::SetIncomePeriod(period) => {
                self.state.filters.income_period = period;
                self.sync_charts(&[ChartSlot::Income]);
            }
            Action::SetReferralSearch(search) => self.state.filters.referrals.search = search,
            Action::SetTariffFilter(filter) => self.state.filters.referrals.tariff = filter,
            Action::SetStatusFilter(filter) => self.state.filters.referrals.status = filter,
            Action::SetClickWindow(window) => {
                self.state.filters.clicks = window;
                self.sync_charts(&[ChartSlot::Clicks]);
            }
            Action::SetFinanceWindow(window) => {
                self.state.filters.finance = window;
                self.refresh_withdrawal_flag();
                self.sync_charts(&[ChartSlot::Finance]);
            }
            Action::SetActivityWindow(window) => self.state.filters.activity.period = window,
            Action::SetActivityAction(action) => self.state.filters.activity.action = action,
            Action::SetActivityIdFilter(id) => self.state.filters.activity.referral_id = id,

            Action::CreatePromoCode(code) => self.create_promo_code(code),
            Action::RequestDeletePromoCode(index) => {
                if !self.collections_writable() {
                    return;
                }
                match self.state.collections.promo_codes.get(index) {
                    Some(promo) => {
                        self.state.confirmation = Some(Confirmation::DeletePromoCode {
                            index,
                            code: promo.code.clone(),
                        })
                    }
                    None => self.notify_error("Промокод не найден!"),
                }
            }
            Action::SubmitWithdrawal(form) => self.submit_withdrawal(form),
            Action::RequestCancelWithdrawals(amounts) => {
                if !self.collections_writable() {
                    return;
                }
                // Выбор проверяется до запроса подтверждения
                match cancel_withdrawals(&self.state.collections.finance_stats, &amounts) {
                    Ok(_) => {
                        self.state.confirmation = Some(Confirmation::CancelWithdrawals { amounts })
                    }
                    Err(e) => self.notify_error(e.to_string()),
                }
            }
            Action::EditProfile(form) => self.state.profile_draft = form,
            Action::SaveProfile => self.save_profile(),
            Action::ProfileSaved(display_name) => {
                if let Some(session) = self.state.session.as_mut() {
                    session.display_name = Some(display_name.clone());
                }
                self.state.profile_draft = ProfileForm {
                    name: display_name,
                    email: self.state.profile_draft.email.clone(),
                    ..Default::default()
                };
                self.notify_success("Настройки сохранены!");
            }
            Action::ProfileSaveFailed(error) => {
                self.notify_error(format!("Ошибка сохранения настроек: {}", error))
            }
            Action::Confirm => {
                if let Some(confirmation) = self.state.confirmation.take() {
                    self.confirmed(confirmation);
                }
            }
            Action::Decline => self.state.confirmation = None,

            Action::Export(file) => self.export(file),
            Action::CopyReferralLink => self.effects.push(Effect::CopyToClipboard {
                text: REFERRAL_LINK.to_string(),
                success: "Ссылка скопирована!".to_string(),
                failure: "Ошибка копирования!".to_string(),
            }),
            Action::CopyPromoCode(code) => self.effects.push(Effect::CopyToClipboard {
                success: format!("Промокод {} скопирован!", code),
                failure: "Ошибка копирования!".to_string(),
                text: code,
            }),
            Action::CopyPartnerId => self.effects.push(Effect::CopyToClipboard {
                text: PARTNER_ID.to_string(),
                success: "ID партнёра скопирован!".to_string(),
                failure: "Ошибка копирования ID!".to_string(),
            }),
            Action::Notify { message, kind } => self.notify(message, kind),
            Action::NotificationExpired(id) => {
                if self.state.notification.as_ref().map(|n| n.id) == Some(id) {
                    self.state.notification = None;
                }
            }
        }
    }

    fn start_session(&mut self, session: Session) {
        self.state.session_resolved = true;
        self.state.profile_draft = ProfileForm {
            name: session.partner_name().to_string(),
            email: session.email.clone(),
            ..Default::default()
        };
        self.state.collections = Collections::default();
        self.state.collections_ready = false;
        self.state.snapshot_failed = false;
        self.state.confirmation = None;
        self.state.has_pending_withdrawal = false;
        self.effects.push(Effect::LoadSnapshot {
            owner_id: session.owner_id.clone(),
        });
        self.state.session = Some(session);
    }

    fn end_session(&mut self) {
        self.state.session = None;
        self.state.session_resolved = true;
        self.state.auth_in_flight = false;
        self.state.collections = Collections::default();
        self.state.collections_ready = false;
        self.state.snapshot_failed = false;
        self.state.open_section = None;
        self.state.is_loading = false;
        self.state.confirmation = None;
        self.state.has_pending_withdrawal = false;
        self.state.profile_draft = ProfileForm::default();
        self.sync_charts(&[]);
    }

    /// Новый партнёр получает демонстрационные данные, они сразу сохраняются
    fn registered(&mut self, session: Session) {
        self.state.auth_in_flight = false;
        self.state.session_resolved = true;
        self.state.auth_screen = AuthScreen::Login;
        self.state.profile_draft = ProfileForm {
            name: session.partner_name().to_string(),
            email: session.email.clone(),
            ..Default::default()
        };
        self.state.session = Some(session);
        self.seed_collections();
        self.notify_success("Регистрация успешна!");
    }

    fn snapshot_loaded(&mut self, owner_id: String, result: Result<Collections, DashboardError>) {
        let current_owner = self.state.session.as_ref().map(|s| s.owner_id.as_str());
        if current_owner != Some(owner_id.as_str()) {
            log::debug!("Ignoring snapshot for stale owner {}", owner_id);
            return;
        }
        match result {
            Ok(snapshot) if snapshot.is_new_owner() => self.seed_collections(),
            Ok(snapshot) => {
                self.state.collections = snapshot;
                self.state.collections_ready = true;
                self.state.snapshot_failed = false;
                self.refresh_withdrawal_flag();
            }
            // Коллекции остаются незагруженными, изменения запрещены до повторной загрузки
            Err(e) => {
                log::error!("Failed to load collections for {}: {}", owner_id, e);
                self.state.snapshot_failed = true;
                self.notify_error(format!("Ошибка загрузки данных: {}", e));
            }
        }
    }

    fn reload_snapshot(&mut self) {
        let Some(session) = self.state.session.as_ref() else {
            return;
        };
        if self.state.collections_ready {
            return;
        }
        self.state.snapshot_failed = false;
        self.effects.push(Effect::LoadSnapshot {
            owner_id: session.owner_id.clone(),
        });
    }

    /// Изменения коллекций разрешены только после загрузки или засева
    fn collections_writable(&mut self) -> bool {
        if self.state.collections_ready {
            return true;
        }
        self.notify_error(DashboardError::NotLoaded.to_string());
        false
    }

    fn seed_collections(&mut self) {
        self.state.collections = Collections::seeded();
        self.state.collections_ready = true;
        self.state.snapshot_failed = false;
        for name in CollectionName::ALL {
            self.persist(name);
        }
        self.refresh_withdrawal_flag();
    }

    fn close_section(&mut self) {
        self.state.open_section = None;
        self.state.is_loading = false;
        self.sync_charts(&[]);
    }

    fn create_promo_code(&mut self, code: String) {
        if !self.collections_writable() {
            return;
        }
        let today = self.clock.today_label();
        match create_promo_code(&self.state.collections.promo_codes, &code, &today) {
            Ok(next) => {
                self.state.collections.promo_codes = next;
                self.persist(CollectionName::PromoCodes);
                self.notify_success(format!("Промокод {} создан!", code.trim()));
            }
            Err(e) => self.notify_error(e.to_string()),
        }
    }

    fn submit_withdrawal(&mut self, form: WithdrawalForm) {
        if !self.collections_writable() {
            return;
        }
        let today = self.clock.today_label();
        match submit_withdrawal(&self.state.collections.finance_stats, &form, &today) {
            Ok(next) => {
                self.state.collections.finance_stats = next;
                self.persist(CollectionName::FinanceStats);
                self.refresh_withdrawal_flag();
                self.notify_success(format!(
                    "Запрос на вывод ({}, {}, {}) отправлен! Статус будет обновлён в течение 24 часов.",
                    form.recipient_name, form.bank_name, form.card_number
                ));
                self.close_section();
            }
            Err(e) => self.notify_error(e.to_string()),
        }
    }

    /// Смена пароля проверяется формой, но в сервис авторизации уходит только имя
    fn save_profile(&mut self) {
        if self.state.session.is_none() {
            return;
        }
        match validate_profile(&self.state.profile_draft) {
            Ok(update) => self.effects.push(Effect::UpdateDisplayName {
                display_name: update.display_name,
            }),
            Err(e) => self.notify_error(e.to_string()),
        }
    }

    fn confirmed(&mut self, confirmation: Confirmation) {
        let mutates = !matches!(confirmation, Confirmation::Logout);
        if mutates && !self.collections_writable() {
            return;
        }
        match confirmation {
            Confirmation::DeletePromoCode { index, code } => {
                match delete_promo_code(&self.state.collections.promo_codes, index) {
                    Ok(next) => {
                        self.state.collections.promo_codes = next;
                        self.persist(CollectionName::PromoCodes);
                        self.notify_success(format!("Промокод {} удалён!", code));
                    }
                    Err(e) => self.notify_error(e.to_string()),
                }
            }
            Confirmation::CancelWithdrawals { amounts } => {
                match cancel_withdrawals(&self.state.collections.finance_stats, &amounts) {
                    Ok(next) => {
                        self.state.collections.finance_stats = next;
                        self.persist(CollectionName::FinanceStats);
                        self.refresh_withdrawal_flag();
                        self.notify_success("Выбранные запросы на вывод отменены.");
                        self.close_section();
                    }
                    Err(e) => self.notify_error(e.to_string()),
                }
            }
            Confirmation::Logout => self.effects.push(Effect::Logout),
        }
    }

    fn export(&mut self, file: ExportFile) {
        let now = self.clock.now;
        let content = match file {
            ExportFile::Referrals => {
                to_delimited_text(file.header(), &self.state.filtered_referrals(), |r| {
                    vec![
                        r.id.clone(),
                        r.plan.clone(),
                        r.amount.clone(),
                        r.date.clone(),
                        r.status.clone(),
                        r.source.clone(),
                    ]
                })
            }
            ExportFile::ReferralStats => {
                to_delimited_text(file.header(), &self.state.filtered_clicks(now), |c| {
                    vec![
                        c.date.clone(),
                        c.source.clone(),
                        c.unique.clone(),
                        c.result.clone(),
                    ]
                })
            }
            ExportFile::FinanceStats => {
                to_delimited_text(file.header(), &self.state.filtered_finance(now), |e| {
                    vec![e.date.clone(), e.amount.clone(), e.status.label().to_string()]
                })
            }
        };
        self.effects.push(Effect::Download { file, content });
        let message = match file {
            ExportFile::Referrals => "Данные экспортированы в Excel!",
            ExportFile::ReferralStats => "Статистика экспортирована в Excel!",
            ExportFile::FinanceStats => "История выплат экспортирована в Excel!",
        };
        self.notify_success(message);
    }

    /// Каждое изменение коллекции сохраняется отдельно, без объединения записей
    fn persist(&mut self, name: CollectionName) {
        let Some(session) = self.state.session.as_ref() else {
            return;
        };
        if !self.state.collections_ready {
            log::error!("Refusing to persist {} before collections are loaded", name);
            return;
        }
        self.effects.push(Effect::Persist {
            owner_id: session.owner_id.clone(),
            items: self.state.collections.items(name),
        });
    }

    fn refresh_withdrawal_flag(&mut self) {
        let filtered = self.state.filtered_finance(self.clock.now);
        self.state.has_pending_withdrawal = has_pending_withdrawal(&filtered);
    }

    /// Приводит отрисованные графики к видимым. Слоты из `refresh` перерисовываются,
    /// старый график уничтожается перед созданием нового.
    fn sync_charts(&mut self, refresh: &[ChartSlot]) {
        let visible = self.state.visible_chart_slots();
        let stale: Vec<ChartSlot> = self
            .state
            .rendered_charts
            .difference(&visible)
            .copied()
            .collect();
        for slot in stale {
            self.state.rendered_charts.remove(&slot);
            self.effects.push(Effect::DestroyChart(slot));
        }
        for slot in visible {
            let rendered = self.state.rendered_charts.contains(&slot);
            if rendered && !refresh.contains(&slot) {
                continue;
            }
            if rendered {
                self.effects.push(Effect::DestroyChart(slot));
            }
            self.state.rendered_charts.insert(slot);
            self.effects.push(Effect::RenderChart {
                slot,
                series: slot.series(&self.state.filters),
            });
        }
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        self.notify(message.into(), NotificationKind::Success);
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(message.into(), NotificationKind::Error);
    }

    fn notify(&mut self, message: String, kind: NotificationKind) {
        self.state.next_notification_id += 1;
        let id = self.state.next_notification_id;
        self.state.notification = Some(Notification { id, message, kind });
        self.effects.push(Effect::HideNotificationLater {
            id,
            delay_ms: NOTIFICATION_HIDE_MS,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::a003_finance_entry::{FinanceEntry, PayoutStatus};

    fn clock() -> Clock {
        Clock {
            now: Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
            today: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        }
    }

    fn session() -> Session {
        Session {
            owner_id: "owner-1".to_string(),
            email: "partner@example.com".to_string(),
            display_name: None,
        }
    }

    fn run(state: ViewState, actions: Vec<Action>) -> (ViewState, Vec<Effect>) {
        let mut state = state;
        let mut effects = Vec::new();
        for action in actions {
            let t = reduce(state, action, &clock());
            state = t.state;
            effects.extend(t.effects);
        }
        (state, effects)
    }

    fn signed_in(collections: Collections) -> ViewState {
        let (state, _) = run(
            ViewState::default(),
            vec![
                Action::SessionChanged(Some(session())),
                Action::SnapshotLoaded {
                    owner_id: "owner-1".to_string(),
                    result: Ok(collections),
                },
            ],
        );
        state
    }

    fn persisted(effects: &[Effect]) -> Vec<CollectionName> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Persist { items, .. } => Some(items.name()),
                _ => None,
            })
            .collect()
    }

    fn pending(amount: &str) -> FinanceEntry {
        FinanceEntry {
            date: "05.03.2025".to_string(),
            amount: amount.to_string(),
            status: PayoutStatus::Pending,
        }
    }

    fn message(state: &ViewState) -> &str {
        state
            .notification
            .as_ref()
            .map(|n| n.message.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn test_session_change_loads_snapshot() {
        let t = reduce(
            ViewState::default(),
            Action::SessionChanged(Some(session())),
            &clock(),
        );
        assert!(t.state.session_resolved);
        assert_eq!(t.state.profile_draft.name, "Иван Иванов");
        assert_eq!(t.state.profile_draft.email, "partner@example.com");
        assert_eq!(
            t.effects,
            vec![Effect::LoadSnapshot {
                owner_id: "owner-1".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_snapshot_seeds_and_persists_everything() {
        let (state, effects) = run(
            ViewState::default(),
            vec![
                Action::SessionChanged(Some(session())),
                Action::SnapshotLoaded {
                    owner_id: "owner-1".to_string(),
                    result: Ok(Collections::default()),
                },
            ],
        );
        assert_eq!(state.collections, Collections::seeded());
        assert!(state.collections_ready);
        assert_eq!(persisted(&effects), CollectionName::ALL.to_vec());
        // В засеянной истории есть ожидающая выплата
        assert!(state.has_pending_withdrawal);
    }

    #[test]
    fn test_existing_snapshot_is_adopted_without_writes() {
        let mut snapshot = Collections::seeded();
        snapshot.promo_codes.clear();
        let (state, effects) = run(
            ViewState::default(),
            vec![
                Action::SessionChanged(Some(session())),
                Action::SnapshotLoaded {
                    owner_id: "owner-1".to_string(),
                    result: Ok(snapshot.clone()),
                },
            ],
        );
        assert_eq!(state.collections, snapshot);
        assert!(persisted(&effects).is_empty());
    }

    #[test]
    fn test_stale_snapshot_is_ignored() {
        let (state, effects) = run(
            ViewState::default(),
            vec![
                Action::SessionChanged(Some(session())),
                Action::SnapshotLoaded {
                    owner_id: "someone-else".to_string(),
                    result: Ok(Collections::default()),
                },
            ],
        );
        assert!(!state.collections_ready);
        assert!(persisted(&effects).is_empty());
    }

    #[test]
    fn test_snapshot_error_is_surfaced() {
        let (state, _) = run(
            ViewState::default(),
            vec![
                Action::SessionChanged(Some(session())),
                Action::SnapshotLoaded {
                    owner_id: "owner-1".to_string(),
                    result: Err(DashboardError::adapter("Хранилище недоступно")),
                },
            ],
        );
        assert_eq!(message(&state), "Ошибка загрузки данных: Хранилище недоступно");
        assert_eq!(state.collections, Collections::default());
        assert!(!state.collections_ready);
        assert!(state.snapshot_failed);
    }

    fn failed_load() -> ViewState {
        let (state, _) = run(
            ViewState::default(),
            vec![
                Action::SessionChanged(Some(session())),
                Action::SnapshotLoaded {
                    owner_id: "owner-1".to_string(),
                    result: Err(DashboardError::adapter("timeout")),
                },
            ],
        );
        state
    }

    fn withdrawal_form() -> WithdrawalForm {
        WithdrawalForm {
            recipient_name: "Иван Иванов".to_string(),
            bank_name: "Kaspi".to_string(),
            card_number: "1234567812345678".to_string(),
        }
    }

    #[test]
    fn test_mutation_after_failed_load_writes_nothing() {
        let (state, effects) = run(
            failed_load(),
            vec![
                Action::CreatePromoCode("SPRING25".to_string()),
                Action::SubmitWithdrawal(withdrawal_form()),
                Action::RequestDeletePromoCode(0),
                Action::RequestCancelWithdrawals(vec!["20,000".to_string()]),
            ],
        );
        assert!(persisted(&effects).is_empty());
        assert!(state.collections.promo_codes.is_empty());
        assert!(state.collections.finance_stats.is_empty());
        assert!(state.confirmation.is_none());
        assert_eq!(message(&state), "Данные ещё не загружены. Повторите попытку позже.");
    }

    #[test]
    fn test_mutation_before_snapshot_writes_nothing() {
        let t = reduce(
            ViewState::default(),
            Action::SessionChanged(Some(session())),
            &clock(),
        );
        let (state, effects) = run(t.state, vec![Action::SubmitWithdrawal(withdrawal_form())]);
        assert!(persisted(&effects).is_empty());
        assert!(state.collections.finance_stats.is_empty());
        assert!(!state.has_pending_withdrawal);
    }

    #[test]
    fn test_parked_confirmation_needs_loaded_collections() {
        let mut state = failed_load();
        state.confirmation = Some(Confirmation::DeletePromoCode {
            index: 0,
            code: "PARTNER10".to_string(),
        });
        let (state, effects) = run(state, vec![Action::Confirm]);
        assert!(persisted(&effects).is_empty());
        assert!(state.confirmation.is_none());

        // Выход подтверждается и без загруженных данных
        let mut state = state;
        state.confirmation = Some(Confirmation::Logout);
        let (_, effects) = run(state, vec![Action::Confirm]);
        assert_eq!(effects, vec![Effect::Logout]);
    }

    #[test]
    fn test_reload_after_failed_load() {
        let t = reduce(failed_load(), Action::ReloadSnapshot, &clock());
        assert!(!t.state.snapshot_failed);
        assert_eq!(
            t.effects,
            vec![Effect::LoadSnapshot {
                owner_id: "owner-1".to_string()
            }]
        );

        let (state, effects) = run(
            t.state,
            vec![
                Action::SnapshotLoaded {
                    owner_id: "owner-1".to_string(),
                    result: Ok(Collections::seeded()),
                },
                Action::CreatePromoCode("SPRING25".to_string()),
            ],
        );
        assert!(state.collections_ready);
        assert_eq!(state.collections.promo_codes.len(), 2);
        assert_eq!(persisted(&effects), vec![CollectionName::PromoCodes]);

        // Загруженные коллекции повторно не запрашиваются
        let t = reduce(state, Action::ReloadSnapshot, &clock());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn test_name_failure_after_registration_keeps_session() {
        let (state, effects) = run(
            ViewState::default(),
            vec![
                Action::Registered(session()),
                Action::ProfileSaveFailed(DashboardError::adapter("Сервис недоступен")),
            ],
        );
        assert!(state.is_authenticated());
        assert!(state.collections_ready);
        assert_eq!(state.collections, Collections::seeded());
        assert_eq!(persisted(&effects).len(), 5);
        assert_eq!(message(&state), "Ошибка сохранения настроек: Сервис недоступен");
    }

    #[test]
    fn test_weak_password_registration_has_no_effects_besides_notice() {
        let form = RegistrationForm {
            name: "Иван".to_string(),
            email: "ivan@example.com".to_string(),
            password: "1234567".to_string(),
        };
        let t = reduce(ViewState::default(), Action::SubmitRegistration(form), &clock());
        assert!(t.state.session.is_none());
        assert!(!t.state.auth_in_flight);
        assert_eq!(message(&t.state), "Пароль должен быть минимум 8 символов!");
        assert!(t
            .effects
            .iter()
            .all(|e| matches!(e, Effect::HideNotificationLater { .. })));
    }

    #[test]
    fn test_registration_seeds_collections() {
        let form = RegistrationForm {
            name: "Иван".to_string(),
            email: "ivan@example.com".to_string(),
            password: "12345678".to_string(),
        };
        let t = reduce(ViewState::default(), Action::SubmitRegistration(form.clone()), &clock());
        assert!(t.state.auth_in_flight);
        assert_eq!(t.effects, vec![Effect::Register { form }]);

        let registered = Session {
            display_name: Some("Иван".to_string()),
            ..session()
        };
        let (state, effects) = run(t.state, vec![Action::Registered(registered)]);
        assert!(!state.auth_in_flight);
        assert_eq!(state.partner_name(), "Иван");
        assert_eq!(state.collections, Collections::seeded());
        assert_eq!(persisted(&effects).len(), 5);
        assert_eq!(message(&state), "Регистрация успешна!");
    }

    #[test]
    fn test_auth_failure_message_passes_through() {
        let (state, _) = run(
            ViewState::default(),
            vec![
                Action::SubmitLogin(LoginForm {
                    email: "a@b.kz".to_string(),
                    password: "secret".to_string(),
                }),
                Action::AuthFailed {
                    operation: AuthOperation::Login,
                    error: DashboardError::adapter("Неверный email или пароль"),
                },
            ],
        );
        assert!(!state.auth_in_flight);
        assert_eq!(message(&state), "Ошибка входа: Неверный email или пароль");
    }

    #[test]
    fn test_withdrawal_scenario() {
        let collections = Collections {
            finance_stats: vec![pending("20,000 ₸")],
            referrals: crate::dashboards::d100_partner::seed::referrals(),
            ..Default::default()
        };
        let state = signed_in(collections);
        assert_eq!(state.filtered_finance(clock().now).len(), 1);
        assert!(state.has_pending_withdrawal);

        let (state, effects) = run(
            state,
            vec![
                Action::RequestCancelWithdrawals(vec!["20,000".to_string()]),
                Action::Confirm,
            ],
        );
        assert_eq!(state.collections.finance_stats[0].status, PayoutStatus::Cancelled);
        assert!(!state.has_pending_withdrawal);
        assert_eq!(persisted(&effects), vec![CollectionName::FinanceStats]);
        assert_eq!(message(&state), "Выбранные запросы на вывод отменены.");
    }

    #[test]
    fn test_declined_confirmation_changes_nothing() {
        let state = signed_in(Collections::seeded());
        let (after, effects) = run(
            state.clone(),
            vec![Action::RequestDeletePromoCode(0), Action::Decline],
        );
        assert_eq!(after.collections, state.collections);
        assert!(after.confirmation.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_delete_promo_after_confirmation() {
        let state = signed_in(Collections::seeded());
        let (state, _) = run(state, vec![Action::RequestDeletePromoCode(0)]);
        assert_eq!(
            state.confirmation.as_ref().map(Confirmation::prompt).as_deref(),
            Some("Удалить промокод PARTNER10?")
        );
        let (state, effects) = run(state, vec![Action::Confirm]);
        assert!(state.collections.promo_codes.is_empty());
        assert_eq!(persisted(&effects), vec![CollectionName::PromoCodes]);
        assert_eq!(message(&state), "Промокод PARTNER10 удалён!");
    }

    #[test]
    fn test_cancel_without_selection_never_asks() {
        let state = signed_in(Collections::seeded());
        let (state, _) = run(state, vec![Action::RequestCancelWithdrawals(vec![])]);
        assert!(state.confirmation.is_none());
        assert_eq!(message(&state), "Выберите хотя бы одну транзакцию для отмены!");
    }

    #[test]
    fn test_each_mutation_persists_independently() {
        let state = signed_in(Collections::seeded());
        let (state, effects) = run(
            state,
            vec![
                Action::CreatePromoCode("SPRING25".to_string()),
                Action::CreatePromoCode("SUMMER25".to_string()),
            ],
        );
        assert_eq!(state.collections.promo_codes.len(), 3);
        assert_eq!(state.collections.promo_codes[1].created, "10.03.2025");
        assert_eq!(
            persisted(&effects),
            vec![CollectionName::PromoCodes, CollectionName::PromoCodes]
        );
    }

    #[test]
    fn test_invalid_promo_code_keeps_collection() {
        let state = signed_in(Collections::seeded());
        let (after, effects) = run(state.clone(), vec![Action::CreatePromoCode("AB12".to_string())]);
        assert_eq!(after.collections, state.collections);
        assert!(persisted(&effects).is_empty());
        assert_eq!(
            message(&after),
            "Промокод должен содержать 6-15 букв и/или цифр без пробелов!"
        );
    }

    #[test]
    fn test_submit_withdrawal_closes_section() {
        let mut state = signed_in(Collections {
            referrals: crate::dashboards::d100_partner::seed::referrals(),
            ..Default::default()
        });
        assert!(!state.has_pending_withdrawal);
        state.open_section = Some(Section::WithdrawalRequest);
        let form = WithdrawalForm {
            recipient_name: "Иван Иванов".to_string(),
            bank_name: "Kaspi".to_string(),
            card_number: "1234567812345678".to_string(),
        };
        let (state, effects) = run(state, vec![Action::SubmitWithdrawal(form)]);
        assert!(state.open_section.is_none());
        assert!(state.has_pending_withdrawal);
        assert_eq!(state.collections.finance_stats[0].date, "10.03.2025");
        assert_eq!(persisted(&effects), vec![CollectionName::FinanceStats]);
        assert_eq!(
            message(&state),
            "Запрос на вывод (Иван Иванов, Kaspi, 1234567812345678) отправлен! Статус будет обновлён в течение 24 часов."
        );
    }

    #[test]
    fn test_open_section_waits_for_loading_before_charts() {
        let state = signed_in(Collections::seeded());
        let t = reduce(state, Action::OpenSection(Section::Statistics), &clock());
        assert!(t.state.is_loading);
        assert_eq!(
            t.effects,
            vec![Effect::StartLoadingDelay {
                section: Section::Statistics,
                delay_ms: LOADING_DELAY_MS
            }]
        );

        let t = reduce(t.state, Action::LoadingElapsed(Section::Statistics), &clock());
        assert!(!t.state.is_loading);
        let rendered: Vec<ChartSlot> = t
            .effects
            .iter()
            .filter_map(|e| match e {
                Effect::RenderChart { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, vec![ChartSlot::Income, ChartSlot::Funnel]);
    }

    #[test]
    fn test_filter_change_destroys_before_rerender() {
        let state = signed_in(Collections::seeded());
        let (state, _) = run(
            state,
            vec![
                Action::OpenSection(Section::Statistics),
                Action::LoadingElapsed(Section::Statistics),
            ],
        );
        let t = reduce(state, Action::SetIncomePeriod(IncomePeriod::Year), &clock());
        assert_eq!(t.effects.len(), 2);
        assert_eq!(t.effects[0], Effect::DestroyChart(ChartSlot::Income));
        match &t.effects[1] {
            Effect::RenderChart { slot, series } => {
                assert_eq!(*slot, ChartSlot::Income);
                assert_eq!(series.labels, vec!["2023", "2024", "2025"]);
            }
            other => panic!("unexpected effect {:?}", other),
        }

        let t = reduce(t.state, Action::CloseSection, &clock());
        assert!(t.state.rendered_charts.is_empty());
        assert_eq!(
            t.effects,
            vec![
                Effect::DestroyChart(ChartSlot::Income),
                Effect::DestroyChart(ChartSlot::Funnel)
            ]
        );
    }

    #[test]
    fn test_switching_sections_mid_delay() {
        let state = signed_in(Collections::seeded());
        let (state, effects) = run(
            state,
            vec![
                Action::OpenSection(Section::Statistics),
                Action::OpenSection(Section::Finance),
                Action::LoadingElapsed(Section::Statistics),
            ],
        );
        assert!(state.is_open(Section::Finance));
        assert!(!state.is_loading);
        assert_eq!(
            state.rendered_charts.iter().copied().collect::<Vec<_>>(),
            vec![ChartSlot::Finance]
        );
        assert!(!effects
            .iter()
            .any(|e| matches!(e, Effect::RenderChart { slot: ChartSlot::Income, .. })));
    }

    #[test]
    fn test_finance_window_recomputes_flag() {
        let state = signed_in(Collections::seeded());
        assert!(state.has_pending_withdrawal);
        // 05.03.2025 попадает в последние 7 дней
        let (state, _) = run(state, vec![Action::SetFinanceWindow(PeriodWindow::Last7Days)]);
        assert!(state.has_pending_withdrawal);

        let mut old = Collections::seeded();
        old.finance_stats = vec![FinanceEntry {
            date: "15.01.2025".to_string(),
            ..pending("20,000 ₸")
        }];
        let state = signed_in(old);
        assert!(state.has_pending_withdrawal);
        let (state, _) = run(state, vec![Action::SetFinanceWindow(PeriodWindow::Last30Days)]);
        assert!(!state.has_pending_withdrawal);
    }

    #[test]
    fn test_logout_requires_confirmation() {
        let state = signed_in(Collections::seeded());
        let t = reduce(state, Action::RequestLogout, &clock());
        assert_eq!(t.state.confirmation, Some(Confirmation::Logout));
        assert!(t.effects.is_empty());

        let t = reduce(t.state, Action::Confirm, &clock());
        assert_eq!(t.effects, vec![Effect::Logout]);
        assert!(t.state.session.is_some());

        let t = reduce(t.state, Action::LoggedOut, &clock());
        assert!(t.state.session.is_none());
        assert_eq!(t.state.collections, Collections::default());
        assert_eq!(message(&t.state), "Выход выполнен!");
    }

    #[test]
    fn test_profile_save_pushes_display_name_only() {
        let state = signed_in(Collections::seeded());
        let draft = ProfileForm {
            name: "Мария".to_string(),
            email: "partner@example.com".to_string(),
            current_password: "old-password".to_string(),
            new_password: "new-password".to_string(),
            confirm_password: "new-password".to_string(),
        };
        let (state, effects) = run(state, vec![Action::EditProfile(draft), Action::SaveProfile]);
        assert_eq!(
            effects,
            vec![Effect::UpdateDisplayName {
                display_name: "Мария".to_string()
            }]
        );

        let (state, _) = run(state, vec![Action::ProfileSaved("Мария".to_string())]);
        assert_eq!(state.partner_name(), "Мария");
        assert!(state.profile_draft.new_password.is_empty());
        assert_eq!(message(&state), "Настройки сохранены!");
    }

    #[test]
    fn test_export_uses_filtered_rows() {
        let state = signed_in(Collections::seeded());
        let (state, effects) = run(
            state,
            vec![
                Action::SetReferralSearch("002".to_string()),
                Action::Export(ExportFile::Referrals),
            ],
        );
        let download = effects.iter().find_map(|e| match e {
            Effect::Download { file, content } => Some((*file, content.clone())),
            _ => None,
        });
        assert_eq!(
            download,
            Some((
                ExportFile::Referrals,
                "ID,Тариф,Сумма,Дата,Статус,Источник\n002,Стандарт,20,000 ₸,02.03.2025,Неактивен,Сайт"
                    .to_string()
            ))
        );
        assert_eq!(message(&state), "Данные экспортированы в Excel!");
    }

    #[test]
    fn test_notification_expiry_matches_id() {
        let state = signed_in(Collections::seeded());
        let (state, _) = run(state, vec![Action::CopyReferralLink]);
        assert!(state.notification.is_none());

        let (state, _) = run(
            state,
            vec![
                Action::Notify {
                    message: "Ссылка скопирована!".to_string(),
                    kind: NotificationKind::Success,
                },
                Action::Notify {
                    message: "Ошибка копирования!".to_string(),
                    kind: NotificationKind::Error,
                },
            ],
        );
        let latest = state.notification.as_ref().map(|n| n.id).unwrap();
        let (state, _) = run(state, vec![Action::NotificationExpired(latest - 1)]);
        assert_eq!(message(&state), "Ошибка копирования!");
        let (state, _) = run(state, vec![Action::NotificationExpired(latest)]);
        assert!(state.notification.is_none());
    }
}
