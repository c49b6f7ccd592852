use serde::{Deserialize, Serialize};

/// Максимальное количество промокодов у одного партнёра
pub const PROMO_CODE_LIMIT: usize = 3;
pub const PROMO_CODE_MIN_LEN: usize = 6;
pub const PROMO_CODE_MAX_LEN: usize = 15;

/// Промокод партнёра
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub uses: u32,
    pub registrations: u32,
    pub revenue: String,
    /// Дата создания в формате DD.MM.YYYY
    pub created: String,
}

impl PromoCode {
    /// Промокод, который уже использовали, подсвечивается в списке
    pub fn is_active(&self) -> bool {
        self.uses > 0
    }
}

/// 6-15 ASCII letters and/or digits, nothing else
pub fn is_valid_promo_code(code: &str) -> bool {
    let len = code.chars().count();
    (PROMO_CODE_MIN_LEN..=PROMO_CODE_MAX_LEN).contains(&len)
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promo_code_shape() {
        assert!(is_valid_promo_code("PARTNER10"));
        assert!(is_valid_promo_code("abc123"));
        assert!(is_valid_promo_code("ABCDEFGHIJKLMNO"));
        assert!(!is_valid_promo_code("AB12"));
        assert!(!is_valid_promo_code("ABCDEFGHIJKLMNOP"));
        assert!(!is_valid_promo_code("PARTNER 10"));
        assert!(!is_valid_promo_code("ПАРТНЁР10"));
        assert!(!is_valid_promo_code(""));
    }
}
