//! Фильтры таблиц. Каждая функция чистая и сохраняет исходный порядок записей.

use chrono::{DateTime, Utc};
use contracts::domain::a001_referral::Referral;
use contracts::domain::a002_referral_click::ReferralClick;
use contracts::domain::a003_finance_entry::FinanceEntry;
use contracts::domain::a005_activity_event::{ActivityAction, ActivityEvent};

use super::period::{classify_by_window, PeriodWindow};

/// Фильтр по категориальному полю ("all" пропускает всё)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// "all" и пустая строка означают отсутствие фильтра
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(value) => value,
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(expected) => expected.to_lowercase() == value.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferralFilter {
    pub search: String,
    pub tariff: CategoryFilter,
    pub status: CategoryFilter,
}

impl ReferralFilter {
    pub fn matches(&self, referral: &Referral) -> bool {
        let search = self.search.as_str();
        let search_lower = search.to_lowercase();
        let search_hit = referral.id.contains(search)
            || referral.plan.to_lowercase().contains(&search_lower)
            || referral.date.contains(search);
        search_hit && self.tariff.matches(&referral.plan) && self.status.matches(&referral.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityFilter {
    pub period: PeriodWindow,
    /// `None` означает все действия
    pub action: Option<ActivityAction>,
    pub referral_id: String,
}

pub fn filter_referrals(referrals: &[Referral], filter: &ReferralFilter) -> Vec<Referral> {
    referrals
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Проверка окна; записи с некорректной датой исключаются из выборки
fn in_window(date: &str, window: PeriodWindow, now: DateTime<Utc>) -> bool {
    match classify_by_window(date, window, now) {
        Ok(hit) => hit,
        Err(e) => {
            log::warn!("Skipping record: {}", e);
            false
        }
    }
}

pub fn filter_clicks(
    clicks: &[ReferralClick],
    window: PeriodWindow,
    now: DateTime<Utc>,
) -> Vec<ReferralClick> {
    clicks
        .iter()
        .filter(|c| in_window(&c.date, window, now))
        .cloned()
        .collect()
}

pub fn filter_finance(
    entries: &[FinanceEntry],
    window: PeriodWindow,
    now: DateTime<Utc>,
) -> Vec<FinanceEntry> {
    entries
        .iter()
        .filter(|e| in_window(&e.date, window, now))
        .cloned()
        .collect()
}

pub fn filter_activity(
    events: &[ActivityEvent],
    filter: &ActivityFilter,
    now: DateTime<Utc>,
) -> Vec<ActivityEvent> {
    let id_needle = filter.referral_id.trim().to_lowercase();
    events
        .iter()
        .filter(|e| filter.action.map_or(true, |action| e.action == action))
        .filter(|e| id_needle.is_empty() || e.id.to_lowercase().contains(&id_needle))
        .filter(|e| in_window(&e.date, filter.period, now))
        .cloned()
        .collect()
}
