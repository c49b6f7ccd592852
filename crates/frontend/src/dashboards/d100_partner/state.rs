use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use contracts::domain::a001_referral::Referral;
use contracts::domain::a002_referral_click::ReferralClick;
use contracts::domain::a003_finance_entry::FinanceEntry;
use contracts::domain::a004_promo_code::PromoCode;
use contracts::domain::a005_activity_event::ActivityEvent;
use contracts::domain::common::{CollectionDocument, CollectionName};
use contracts::system::auth::UserInfo;

use super::filters::{
    filter_activity, filter_clicks, filter_finance, filter_referrals, ActivityFilter,
    ReferralFilter,
};
use super::mutations::ProfileForm;
use super::period::{click_series, finance_series, funnel_series, income_series, ChartSeries};
use super::period::{IncomePeriod, PeriodWindow};

/// Имя, которое показывается, пока партнёр не задал своё
pub const DEFAULT_PARTNER_NAME: &str = "Иван Иванов";
pub const PARTNER_ID: &str = "P12345";
pub const REFERRAL_LINK: &str = "https://example.com/ref/partner123";

/// Авторизованный партнёр, владелец пространства данных
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub owner_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl Session {
    pub fn partner_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_PARTNER_NAME)
    }
}

impl From<UserInfo> for Session {
    fn from(user: UserInfo) -> Self {
        Self {
            owner_id: user.id,
            email: user.email,
            display_name: user.display_name,
        }
    }
}

/// Все пять коллекций владельца
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collections {
    pub referrals: Vec<Referral>,
    pub referral_stats: Vec<ReferralClick>,
    pub finance_stats: Vec<FinanceEntry>,
    pub promo_codes: Vec<PromoCode>,
    pub activity_data: Vec<ActivityEvent>,
}

impl Collections {
    /// Новый владелец определяется по пустой коллекции рефералов
    pub fn is_new_owner(&self) -> bool {
        self.referrals.is_empty()
    }

    pub fn items(&self, name: CollectionName) -> CollectionItems {
        match name {
            CollectionName::Referrals => CollectionItems::Referrals(self.referrals.clone()),
            CollectionName::ReferralStats => {
                CollectionItems::ReferralStats(self.referral_stats.clone())
            }
            CollectionName::FinanceStats => CollectionItems::FinanceStats(self.finance_stats.clone()),
            CollectionName::PromoCodes => CollectionItems::PromoCodes(self.promo_codes.clone()),
            CollectionName::ActivityData => CollectionItems::ActivityData(self.activity_data.clone()),
        }
    }

    pub fn replace(&mut self, items: CollectionItems) {
        match items {
            CollectionItems::Referrals(v) => self.referrals = v,
            CollectionItems::ReferralStats(v) => self.referral_stats = v,
            CollectionItems::FinanceStats(v) => self.finance_stats = v,
            CollectionItems::PromoCodes(v) => self.promo_codes = v,
            CollectionItems::ActivityData(v) => self.activity_data = v,
        }
    }
}

/// Содержимое одной коллекции вместе с её именем
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionItems {
    Referrals(Vec<Referral>),
    ReferralStats(Vec<ReferralClick>),
    FinanceStats(Vec<FinanceEntry>),
    PromoCodes(Vec<PromoCode>),
    ActivityData(Vec<ActivityEvent>),
}

impl CollectionItems {
    pub fn name(&self) -> CollectionName {
        match self {
            CollectionItems::Referrals(_) => CollectionName::Referrals,
            CollectionItems::ReferralStats(_) => CollectionName::ReferralStats,
            CollectionItems::FinanceStats(_) => CollectionName::FinanceStats,
            CollectionItems::PromoCodes(_) => CollectionName::PromoCodes,
            CollectionItems::ActivityData(_) => CollectionName::ActivityData,
        }
    }

    /// Документ `{ "items": [...] }` для хранилища
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            CollectionItems::Referrals(v) => serde_json::to_value(CollectionDocument::new(v.clone())),
            CollectionItems::ReferralStats(v) => {
                serde_json::to_value(CollectionDocument::new(v.clone()))
            }
            CollectionItems::FinanceStats(v) => {
                serde_json::to_value(CollectionDocument::new(v.clone()))
            }
            CollectionItems::PromoCodes(v) => serde_json::to_value(CollectionDocument::new(v.clone())),
            CollectionItems::ActivityData(v) => {
                serde_json::to_value(CollectionDocument::new(v.clone()))
            }
        }
    }

    pub fn from_document(
        name: CollectionName,
        document: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match name {
            CollectionName::Referrals => {
                Self::Referrals(serde_json::from_value::<CollectionDocument<_>>(document)?.items)
            }
            CollectionName::ReferralStats => {
                Self::ReferralStats(serde_json::from_value::<CollectionDocument<_>>(document)?.items)
            }
            CollectionName::FinanceStats => {
                Self::FinanceStats(serde_json::from_value::<CollectionDocument<_>>(document)?.items)
            }
            CollectionName::PromoCodes => {
                Self::PromoCodes(serde_json::from_value::<CollectionDocument<_>>(document)?.items)
            }
            CollectionName::ActivityData => {
                Self::ActivityData(serde_json::from_value::<CollectionDocument<_>>(document)?.items)
            }
        })
    }
}

/// Текущие значения всех фильтров дашборда
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub income_period: IncomePeriod,
    pub referrals: ReferralFilter,
    pub clicks: PeriodWindow,
    pub finance: PeriodWindow,
    pub activity: ActivityFilter,
}

/// Разделы (модальные окна) дашборда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Statistics,
    ReferralLink,
    Finance,
    WithdrawalRequest,
    CancelWithdrawal,
    PromoCodes,
    Activity,
    Settings,
    Support,
    Training,
    Notifications,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Statistics => "Статистика",
            Section::ReferralLink => "Реферальная ссылка",
            Section::Finance => "Финансы",
            Section::WithdrawalRequest => "Запрос на вывод",
            Section::CancelWithdrawal => "Отменить запрос на вывод",
            Section::PromoCodes => "Мои промокоды",
            Section::Activity => "История активности",
            Section::Settings => "Настройки",
            Section::Support => "Поддержка",
            Section::Training => "Обучение и FAQ",
            Section::Notifications => "Уведомления",
        }
    }

    pub fn chart_slots(&self) -> &'static [ChartSlot] {
        match self {
            Section::Statistics => &[ChartSlot::Income, ChartSlot::Funnel],
            Section::ReferralLink => &[ChartSlot::Clicks],
            Section::Finance => &[ChartSlot::Finance],
            _ => &[],
        }
    }
}

/// Место для графика внутри раздела. В каждом месте живёт не больше одного графика.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartSlot {
    Income,
    Funnel,
    Clicks,
    Finance,
}

impl ChartSlot {
    pub fn element_id(&self) -> &'static str {
        match self {
            ChartSlot::Income => "incomeChart",
            ChartSlot::Funnel => "funnelChart",
            ChartSlot::Clicks => "referralChart",
            ChartSlot::Finance => "financeChart",
        }
    }

    pub fn series(&self, filters: &Filters) -> ChartSeries {
        match self {
            ChartSlot::Income => income_series(filters.income_period.key()),
            ChartSlot::Funnel => funnel_series(),
            ChartSlot::Clicks => click_series(filters.clicks.key()),
            ChartSlot::Finance => finance_series(filters.finance.key()),
        }
    }
}

/// Действие, ожидающее подтверждения пользователя
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeletePromoCode { index: usize, code: String },
    CancelWithdrawals { amounts: Vec<String> },
    Logout,
}

impl Confirmation {
    pub fn prompt(&self) -> String {
        match self {
            Confirmation::DeletePromoCode { code, .. } => format!("Удалить промокод {}?", code),
            Confirmation::CancelWithdrawals { amounts } => format!(
                "Вы уверены, что хотите отменить выбранные запросы на вывод на сумму {} ₸?",
                amounts.join(", ")
            ),
            Confirmation::Logout => "Вы уверены, что хотите выйти?".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// Экран авторизации: вход или регистрация
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScreen {
    #[default]
    Login,
    Register,
}

/// Полное состояние дашборда. Меняется только через `reduce`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub session: Option<Session>,
    /// Восстановление сессии при запуске завершено
    pub session_resolved: bool,
    pub auth_screen: AuthScreen,
    /// Запрос к сервису авторизации ещё не вернулся
    pub auth_in_flight: bool,
    pub collections: Collections,
    /// Коллекции владельца загружены (или засеяны)
    pub collections_ready: bool,
    /// Последняя загрузка коллекций завершилась ошибкой
    pub snapshot_failed: bool,
    pub filters: Filters,
    pub open_section: Option<Section>,
    pub is_loading: bool,
    pub has_pending_withdrawal: bool,
    pub notification: Option<Notification>,
    pub confirmation: Option<Confirmation>,
    pub rendered_charts: BTreeSet<ChartSlot>,
    pub profile_draft: ProfileForm,
    pub(crate) next_notification_id: u64,
}

impl ViewState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn partner_name(&self) -> &str {
        self.session
            .as_ref()
            .map(Session::partner_name)
            .unwrap_or(DEFAULT_PARTNER_NAME)
    }

    pub fn is_open(&self, section: Section) -> bool {
        self.open_section == Some(section)
    }

    pub fn filtered_referrals(&self) -> Vec<Referral> {
        filter_referrals(&self.collections.referrals, &self.filters.referrals)
    }

    pub fn filtered_clicks(&self, now: DateTime<Utc>) -> Vec<ReferralClick> {
        filter_clicks(&self.collections.referral_stats, self.filters.clicks, now)
    }

    pub fn filtered_finance(&self, now: DateTime<Utc>) -> Vec<FinanceEntry> {
        filter_finance(&self.collections.finance_stats, self.filters.finance, now)
    }

    pub fn filtered_activity(&self, now: DateTime<Utc>) -> Vec<ActivityEvent> {
        filter_activity(&self.collections.activity_data, &self.filters.activity, now)
    }

    /// Графики, которые должны быть на экране прямо сейчас
    pub fn visible_chart_slots(&self) -> BTreeSet<ChartSlot> {
        match self.open_section {
            Some(section) if !self.is_loading => section.chart_slots().iter().copied().collect(),
            _ => BTreeSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_finance_entry::PayoutStatus;

    #[test]
    fn test_partner_name_fallback() {
        let mut session = Session {
            owner_id: "u1".to_string(),
            email: "p@example.com".to_string(),
            display_name: None,
        };
        assert_eq!(session.partner_name(), "Иван Иванов");
        session.display_name = Some("Мария".to_string());
        assert_eq!(session.partner_name(), "Мария");
        assert_eq!(ViewState::default().partner_name(), "Иван Иванов");
    }

    #[test]
    fn test_collection_items_document_shape() {
        let items = CollectionItems::FinanceStats(vec![FinanceEntry {
            date: "05.03.2025".to_string(),
            amount: "20,000 ₸".to_string(),
            status: PayoutStatus::Pending,
        }]);
        let doc = items.to_document().unwrap();
        assert_eq!(doc["items"][0]["status"], "Ожидает");

        let back = CollectionItems::from_document(CollectionName::FinanceStats, doc).unwrap();
        assert_eq!(back, items);
        assert_eq!(back.name(), CollectionName::FinanceStats);
    }

    #[test]
    fn test_from_document_rejects_wrong_shape() {
        let doc = serde_json::json!({ "items": [{ "code": 1 }] });
        assert!(CollectionItems::from_document(CollectionName::PromoCodes, doc).is_err());
    }

    #[test]
    fn test_replace_and_items() {
        let mut collections = Collections::default();
        assert!(collections.is_new_owner());
        let referrals = crate::dashboards::d100_partner::seed::referrals();
        collections.replace(CollectionItems::Referrals(referrals));
        assert!(!collections.is_new_owner());
        assert_eq!(
            collections.items(CollectionName::Referrals),
            CollectionItems::Referrals(collections.referrals.clone())
        );
    }

    #[test]
    fn test_visible_charts_follow_section_and_loading() {
        let mut state = ViewState::default();
        assert!(state.visible_chart_slots().is_empty());

        state.open_section = Some(Section::Statistics);
        state.is_loading = true;
        assert!(state.visible_chart_slots().is_empty());

        state.is_loading = false;
        let slots: Vec<_> = state.visible_chart_slots().into_iter().collect();
        assert_eq!(slots, vec![ChartSlot::Income, ChartSlot::Funnel]);

        state.open_section = Some(Section::Settings);
        assert!(state.visible_chart_slots().is_empty());
    }

    #[test]
    fn test_confirmation_prompts() {
        let prompt = Confirmation::CancelWithdrawals {
            amounts: vec!["20,000".to_string(), "15,000".to_string()],
        }
        .prompt();
        assert_eq!(
            prompt,
            "Вы уверены, что хотите отменить выбранные запросы на вывод на сумму 20,000, 15,000 ₸?"
        );
        assert_eq!(Confirmation::Logout.prompt(), "Вы уверены, что хотите выйти?");
    }
}
