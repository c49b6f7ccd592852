use serde::{Deserialize, Serialize};

pub const UNIQUE_YES: &str = "Да";
pub const UNIQUE_NO: &str = "Нет";
/// Результат клика, который ни к чему не привёл
pub const RESULT_NONE: &str = "Нет";

/// Один переход по реферальной ссылке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralClick {
    pub date: String,
    pub source: String,
    /// "Да" / "Нет"
    pub unique: String,
    /// Итог перехода ("Регистрация") или "Нет"
    pub result: String,
}

impl ReferralClick {
    pub fn is_unique(&self) -> bool {
        self.unique == UNIQUE_YES
    }
}
