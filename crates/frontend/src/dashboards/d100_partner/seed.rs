//! Демонстрационные данные, которые записываются новому партнёру при первом входе.

use contracts::domain::a001_referral::{
    Referral, PLAN_PREMIUM, PLAN_STANDARD, STATUS_ACTIVE, STATUS_INACTIVE,
};
use contracts::domain::a002_referral_click::{ReferralClick, RESULT_NONE, UNIQUE_NO, UNIQUE_YES};
use contracts::domain::a003_finance_entry::{FinanceEntry, PayoutStatus};
use contracts::domain::a004_promo_code::PromoCode;
use contracts::domain::a005_activity_event::{ActivityAction, ActivityEvent};

use super::state::Collections;

fn s(value: &str) -> String {
    value.to_string()
}

pub fn referrals() -> Vec<Referral> {
    vec![
        Referral {
            id: s("001"),
            plan: s(PLAN_PREMIUM),
            amount: s("50,000 ₸"),
            date: s("01.03.2025"),
            status: s(STATUS_ACTIVE),
            source: s("Соцсети"),
        },
        Referral {
            id: s("002"),
            plan: s(PLAN_STANDARD),
            amount: s("20,000 ₸"),
            date: s("02.03.2025"),
            status: s(STATUS_INACTIVE),
            source: s("Сайт"),
        },
    ]
}

pub fn referral_stats() -> Vec<ReferralClick> {
    vec![
        ReferralClick {
            date: s("01.03.2025"),
            source: s("Соцсети"),
            unique: s(UNIQUE_YES),
            result: s("Регистрация"),
        },
        ReferralClick {
            date: s("02.03.2025"),
            source: s("Сайт"),
            unique: s(UNIQUE_NO),
            result: s(RESULT_NONE),
        },
    ]
}

pub fn finance_stats() -> Vec<FinanceEntry> {
    let entry = |date: &str, amount: &str, status| FinanceEntry {
        date: s(date),
        amount: s(amount),
        status,
    };
    vec![
        entry("10.02.2025", "30,000 ₸", PayoutStatus::Paid),
        entry("15.01.2025", "45,000 ₸", PayoutStatus::Paid),
        entry("05.03.2025", "20,000 ₸", PayoutStatus::Pending),
        entry("03.03.2025", "15,000 ₸", PayoutStatus::Cancelled),
    ]
}

pub fn promo_codes() -> Vec<PromoCode> {
    vec![PromoCode {
        code: s("PARTNER10"),
        uses: 25,
        registrations: 10,
        revenue: s("50,000 ₸"),
        created: s("01.03.2025"),
    }]
}

pub fn activity_data() -> Vec<ActivityEvent> {
    let event = |action, date: &str, source: &str, revenue: &str, id: &str| ActivityEvent {
        id: s(id),
        action,
        date: s(date),
        source: s(source),
        revenue: s(revenue),
    };
    vec![
        event(ActivityAction::Registration, "01.03.2025", "Соцсети", "0 ₸", "001"),
        event(ActivityAction::Purchase, "02.03.2025", "PARTNER10", "50,000 ₸", "001"),
        event(ActivityAction::Registration, "03.03.2025", "Сайт", "0 ₸", "002"),
    ]
}

impl Collections {
    pub fn seeded() -> Self {
        Self {
            referrals: referrals(),
            referral_stats: referral_stats(),
            finance_stats: finance_stats(),
            promo_codes: promo_codes(),
            activity_data: activity_data(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{parse_tenge, CollectionName};

    #[test]
    fn test_seed_sizes() {
        let seeded = Collections::seeded();
        assert_eq!(seeded.referrals.len(), 2);
        assert_eq!(seeded.referral_stats.len(), 2);
        assert_eq!(seeded.finance_stats.len(), 4);
        assert_eq!(seeded.promo_codes.len(), 1);
        assert_eq!(seeded.activity_data.len(), 3);
        assert!(!seeded.is_new_owner());
        for name in CollectionName::ALL {
            assert!(!seeded.items(name).is_empty());
        }
    }

    #[test]
    fn test_seed_amounts_are_currency_strings() {
        for r in referrals() {
            assert!(r.amount.ends_with(" ₸"));
            assert!(parse_tenge(&r.amount).is_some());
        }
        for e in activity_data() {
            assert_eq!(e.has_revenue(), e.action == ActivityAction::Purchase);
        }
    }

    #[test]
    fn test_seed_serializes_with_labels() {
        let json = serde_json::to_value(finance_stats()).unwrap();
        assert_eq!(json[2]["status"], "Ожидает");
        let json = serde_json::to_value(activity_data()).unwrap();
        assert_eq!(json[1]["action"], "purchase");
    }
}
