use anyhow::Result;
use chrono::Utc;

use super::repository::{self, User};
use crate::shared::error::ApiError;
use crate::system::auth::password;

/// Простая проверка email: одна `@`, непустые части, точка в домене
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        _ => false,
    }
}

/// Register a new partner account
pub async fn register(email: &str, password_plain: &str) -> Result<User, ApiError> {
    let email = email.trim();
    if email.is_empty() || password_plain.is_empty() {
        return Err(ApiError::BadRequest("Заполните все поля!".to_string()));
    }
    if !is_valid_email(email) {
        return Err(ApiError::BadRequest("Некорректный email!".to_string()));
    }
    password::validate_password_strength(password_plain)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if repository::get_by_email(email).await?.is_some() {
        return Err(ApiError::Conflict(
            "Пользователь с таким email уже существует".to_string(),
        ));
    }

    let password_hash = password::hash_password(password_plain)?;
    let now = Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.to_string(),
        display_name: None,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;
    tracing::info!("Registered user {}", user.id);

    Ok(user)
}

/// Verify credentials; `None` when email or password is wrong
pub async fn verify_credentials(email: &str, password_plain: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_email(email.trim()).await? else {
        return Ok(None);
    };

    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        return Ok(None);
    };

    if !password::verify_password(password_plain, &hash)? {
        return Ok(None);
    }

    repository::update_last_login(&user.id, &Utc::now().to_rfc3339()).await?;
    Ok(Some(user))
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn update_display_name(user_id: &str, display_name: &str) -> Result<User, ApiError> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::BadRequest("Введите имя!".to_string()));
    }

    let now = Utc::now().to_rfc3339();
    if !repository::update_display_name(user_id, display_name, &now).await? {
        return Err(ApiError::NotFound("Пользователь не найден".to_string()));
    }

    repository::get_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Пользователь не найден".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("partner@example.com"));
        assert!(!is_valid_email("partner@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
        assert!(!is_valid_email("par tner@example.com"));
    }
}
