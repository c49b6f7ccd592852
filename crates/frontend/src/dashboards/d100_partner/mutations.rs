//! Проверяемые изменения коллекций. Каждая операция получает текущую коллекцию
//! и типизированный ввод формы и возвращает новую коллекцию либо ошибку.

use contracts::domain::a003_finance_entry::{FinanceEntry, PayoutStatus};
use contracts::domain::a004_promo_code::{is_valid_promo_code, PromoCode, PROMO_CODE_LIMIT};
use contracts::domain::common::{format_tenge, strip_currency};

use super::error::DashboardError;

/// Сумма демонстрационного запроса на вывод
pub const WITHDRAWAL_DEMO_AMOUNT: i64 = 20_000;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const CARD_NUMBER_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WithdrawalForm {
    pub recipient_name: String,
    pub bank_name: String,
    pub card_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn wants_password_change(&self) -> bool {
        !self.current_password.is_empty()
            || !self.new_password.is_empty()
            || !self.confirm_password.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Результат проверки формы настроек
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub email: String,
}

/// Проверка вида `local@domain.tld`: без пробелов, ровно одна `@`,
/// в доменной части есть точка с непустыми частями по обе стороны.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn create_promo_code(
    codes: &[PromoCode],
    code: &str,
    today: &str,
) -> Result<Vec<PromoCode>, DashboardError> {
    let code = code.trim();
    if !is_valid_promo_code(code) {
        return Err(DashboardError::validation(
            "Промокод должен содержать 6-15 букв и/или цифр без пробелов!",
        ));
    }
    if codes.iter().any(|p| p.code == code) {
        return Err(DashboardError::Duplicate(
            "Этот промокод уже существует!".to_string(),
        ));
    }
    if codes.len() >= PROMO_CODE_LIMIT {
        return Err(DashboardError::Limit(format!(
            "Достигнут лимит в {} промокода! Удалите один, чтобы добавить новый.",
            PROMO_CODE_LIMIT
        )));
    }

    let mut next = codes.to_vec();
    next.push(PromoCode {
        code: code.to_string(),
        uses: 0,
        registrations: 0,
        revenue: format_tenge(0),
        created: today.to_string(),
    });
    Ok(next)
}

pub fn delete_promo_code(codes: &[PromoCode], index: usize) -> Result<Vec<PromoCode>, DashboardError> {
    if index >= codes.len() {
        return Err(DashboardError::validation("Промокод не найден!"));
    }
    let mut next = codes.to_vec();
    next.remove(index);
    Ok(next)
}

/// Новый запрос на вывод всегда на фиксированную демонстрационную сумму
pub fn submit_withdrawal(
    entries: &[FinanceEntry],
    form: &WithdrawalForm,
    today: &str,
) -> Result<Vec<FinanceEntry>, DashboardError> {
    if form.recipient_name.trim().is_empty()
        || form.bank_name.trim().is_empty()
        || form.card_number.trim().is_empty()
    {
        return Err(DashboardError::validation("Пожалуйста, заполните все поля!"));
    }
    let card = form.card_number.trim();
    if card.len() != CARD_NUMBER_LEN || !card.chars().all(|c| c.is_ascii_digit()) {
        return Err(DashboardError::Format(
            "Неверный формат номера карты! Введите 16 цифр.".to_string(),
        ));
    }

    let mut next = entries.to_vec();
    next.push(FinanceEntry {
        date: today.to_string(),
        amount: format_tenge(WITHDRAWAL_DEMO_AMOUNT),
        status: PayoutStatus::Pending,
    });
    Ok(next)
}

/// Отмена ожидающих запросов, сумма которых (без символа валюты) выбрана.
/// Совпадение по сумме: все ожидающие записи с одинаковой суммой отменяются вместе.
pub fn cancel_withdrawals(
    entries: &[FinanceEntry],
    selected_amounts: &[String],
) -> Result<Vec<FinanceEntry>, DashboardError> {
    if selected_amounts.is_empty() {
        return Err(DashboardError::validation(
            "Выберите хотя бы одну транзакцию для отмены!",
        ));
    }
    let next = entries
        .iter()
        .map(|entry| {
            let selected = selected_amounts
                .iter()
                .any(|amount| amount.as_str() == strip_currency(&entry.amount));
            if selected && entry.status.can_transition_to(PayoutStatus::Cancelled) {
                FinanceEntry {
                    status: PayoutStatus::Cancelled,
                    ..entry.clone()
                }
            } else {
                entry.clone()
            }
        })
        .collect();
    Ok(next)
}

/// Проверка формы настроек. Смена пароля проверяется, но никуда не отправляется.
pub fn validate_profile(form: &ProfileForm) -> Result<ProfileUpdate, DashboardError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(DashboardError::validation("Введите имя!"));
    }
    let email = form.email.trim();
    if !is_valid_email(email) {
        return Err(DashboardError::validation("Некорректный email!"));
    }
    if form.wants_password_change() {
        if form.current_password.is_empty() {
            return Err(DashboardError::validation("Введите текущий пароль!"));
        }
        if form.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DashboardError::validation(
                "Новый пароль должен содержать минимум 8 символов!",
            ));
        }
        if form.new_password != form.confirm_password {
            return Err(DashboardError::validation("Пароли не совпадают!"));
        }
    }
    Ok(ProfileUpdate {
        display_name: name.to_string(),
        email: email.to_string(),
    })
}

pub fn validate_registration(form: &RegistrationForm) -> Result<(), DashboardError> {
    if form.name.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty() {
        return Err(DashboardError::validation("Заполните все поля!"));
    }
    if !is_valid_email(form.email.trim()) {
        return Err(DashboardError::Format("Некорректный email!".to_string()));
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DashboardError::Weakness(
            "Пароль должен быть минимум 8 символов!".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_login(form: &LoginForm) -> Result<(), DashboardError> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(DashboardError::validation("Заполните все поля!"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_partner::seed;

    const TODAY: &str = "10.03.2025";

    fn pending(amount: &str) -> FinanceEntry {
        FinanceEntry {
            date: "05.03.2025".to_string(),
            amount: amount.to_string(),
            status: PayoutStatus::Pending,
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("partner@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("partner@example"));
        assert!(!is_valid_email("partner example@mail.ru"));
        assert!(!is_valid_email("@mail.ru"));
        assert!(!is_valid_email("a@b@c.ru"));
        assert!(!is_valid_email("a@.ru"));
    }

    #[test]
    fn test_create_promo_code_appends() {
        let codes = seed::promo_codes();
        let next = create_promo_code(&codes, "SPRING2025", TODAY).unwrap();
        assert_eq!(next.len(), 2);
        let created = &next[1];
        assert_eq!(created.code, "SPRING2025");
        assert_eq!(created.uses, 0);
        assert_eq!(created.registrations, 0);
        assert_eq!(created.revenue, "0 ₸");
        assert_eq!(created.created, TODAY);
    }

    #[test]
    fn test_short_promo_code_is_rejected() {
        let codes = seed::promo_codes();
        let err = create_promo_code(&codes, "AB12", TODAY).unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(codes, seed::promo_codes());
    }

    #[test]
    fn test_duplicate_promo_code() {
        let once = create_promo_code(&[], "PARTNER20", TODAY).unwrap();
        let err = create_promo_code(&once, "PARTNER20", TODAY).unwrap_err();
        assert!(matches!(err, DashboardError::Duplicate(_)));
        assert_eq!(once.iter().filter(|p| p.code == "PARTNER20").count(), 1);
    }

    #[test]
    fn test_promo_limit_holds_across_sequences() {
        let mut codes = Vec::new();
        let attempts = ["CODE0001", "CODE0002", "CODE0003", "CODE0004", "CODE0005"];
        for (i, code) in attempts.iter().enumerate() {
            match create_promo_code(&codes, code, TODAY) {
                Ok(next) => codes = next,
                Err(e) => assert!(matches!(e, DashboardError::Limit(_))),
            }
            if i == 3 {
                codes = delete_promo_code(&codes, 0).unwrap();
            }
            assert!(codes.len() <= PROMO_CODE_LIMIT);
        }
        let names: Vec<_> = codes.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(names, vec!["CODE0002", "CODE0003", "CODE0005"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        assert!(delete_promo_code(&seed::promo_codes(), 5).is_err());
    }

    #[test]
    fn test_submit_withdrawal() {
        let form = WithdrawalForm {
            recipient_name: "Иван Иванов".to_string(),
            bank_name: "Kaspi".to_string(),
            card_number: "4400123412341234".to_string(),
        };
        let next = submit_withdrawal(&[], &form, TODAY).unwrap();
        assert_eq!(next, vec![FinanceEntry {
            date: TODAY.to_string(),
            amount: "20,000 ₸".to_string(),
            status: PayoutStatus::Pending,
        }]);

        let empty = WithdrawalForm {
            bank_name: String::new(),
            ..form.clone()
        };
        assert!(matches!(
            submit_withdrawal(&[], &empty, TODAY),
            Err(DashboardError::Validation(_))
        ));

        let short_card = WithdrawalForm {
            card_number: "4400 1234".to_string(),
            ..form
        };
        assert!(matches!(
            submit_withdrawal(&[], &short_card, TODAY),
            Err(DashboardError::Format(_))
        ));
    }

    #[test]
    fn test_cancel_withdrawals_by_amount() {
        let entries = vec![pending("20,000 ₸")];
        let next = cancel_withdrawals(&entries, &["20,000".to_string()]).unwrap();
        assert_eq!(next[0].status, PayoutStatus::Cancelled);
    }

    #[test]
    fn test_cancel_withdrawals_touches_only_pending() {
        let mut entries = seed::finance_stats();
        entries.push(pending("30,000 ₸"));
        let next = cancel_withdrawals(&entries, &["30,000".to_string()]).unwrap();
        // Выплаченная запись на ту же сумму не меняется
        assert_eq!(next[0].status, PayoutStatus::Paid);
        assert_eq!(next[4].status, PayoutStatus::Cancelled);
        assert_eq!(next[2].status, PayoutStatus::Pending);
    }

    #[test]
    fn test_cancel_duplicate_amounts_together() {
        let entries = vec![pending("20,000 ₸"), pending("20,000 ₸")];
        let next = cancel_withdrawals(&entries, &["20,000".to_string()]).unwrap();
        assert!(next.iter().all(|e| e.status == PayoutStatus::Cancelled));
    }

    #[test]
    fn test_cancel_requires_selection() {
        let entries = vec![pending("20,000 ₸")];
        assert!(matches!(
            cancel_withdrawals(&entries, &[]),
            Err(DashboardError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_profile() {
        let base = ProfileForm {
            name: "  Иван Иванов ".to_string(),
            email: "ivan@example.com".to_string(),
            ..Default::default()
        };
        let update = validate_profile(&base).unwrap();
        assert_eq!(update.display_name, "Иван Иванов");

        let missing_current = ProfileForm {
            new_password: "newpassword".to_string(),
            confirm_password: "newpassword".to_string(),
            ..base.clone()
        };
        assert_eq!(
            validate_profile(&missing_current).unwrap_err().to_string(),
            "Введите текущий пароль!"
        );

        let mismatch = ProfileForm {
            current_password: "oldpass".to_string(),
            new_password: "newpassword".to_string(),
            confirm_password: "newpassw0rd".to_string(),
            ..base.clone()
        };
        assert_eq!(
            validate_profile(&mismatch).unwrap_err().to_string(),
            "Пароли не совпадают!"
        );

        let short = ProfileForm {
            current_password: "oldpass".to_string(),
            new_password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..base.clone()
        };
        assert!(validate_profile(&short).is_err());

        let no_name = ProfileForm {
            name: " ".to_string(),
            ..base
        };
        assert_eq!(validate_profile(&no_name).unwrap_err().to_string(), "Введите имя!");
    }

    #[test]
    fn test_validate_registration() {
        let form = RegistrationForm {
            name: "Иван".to_string(),
            email: "ivan@example.com".to_string(),
            password: "1234567".to_string(),
        };
        assert!(matches!(
            validate_registration(&form),
            Err(DashboardError::Weakness(_))
        ));

        let bad_email = RegistrationForm {
            email: "ivan.example.com".to_string(),
            password: "12345678".to_string(),
            ..form.clone()
        };
        assert!(matches!(
            validate_registration(&bad_email),
            Err(DashboardError::Format(_))
        ));

        let ok = RegistrationForm {
            password: "12345678".to_string(),
            ..form
        };
        assert!(validate_registration(&ok).is_ok());
        assert!(validate_registration(&RegistrationForm::default()).is_err());
    }

    #[test]
    fn test_validate_login() {
        assert!(validate_login(&LoginForm::default()).is_err());
        assert!(validate_login(&LoginForm {
            email: "x".to_string(),
            password: "y".to_string(),
        })
        .is_ok());
    }
}
