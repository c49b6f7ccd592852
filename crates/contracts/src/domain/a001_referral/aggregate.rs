use serde::{Deserialize, Serialize};

pub const PLAN_PREMIUM: &str = "Премиум";
pub const PLAN_STANDARD: &str = "Стандарт";
pub const STATUS_ACTIVE: &str = "Активен";
pub const STATUS_INACTIVE: &str = "Неактивен";

/// Реферал партнёра
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referral {
    /// Идентификатор реферала ("001")
    pub id: String,
    /// Тариф ("Премиум" / "Стандарт")
    pub plan: String,
    /// Сумма с валютой ("50,000 ₸")
    pub amount: String,
    /// Дата в формате DD.MM.YYYY
    pub date: String,
    /// Статус ("Активен" / "Неактивен")
    pub status: String,
    /// Источник перехода
    pub source: String,
}
