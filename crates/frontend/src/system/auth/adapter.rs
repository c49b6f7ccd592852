//! Клиентская часть сервиса авторизации.

use contracts::system::auth::{LoginResponse, UserInfo};

use super::{api, storage};

/// Жизненный цикл сессии партнёра. Ошибки возвращаются текстом сервиса без изменений.
#[allow(async_fn_in_trait)]
pub trait AuthAdapter {
    async fn register(&self, email: &str, password: &str) -> Result<UserInfo, String>;
    async fn login(&self, email: &str, password: &str) -> Result<UserInfo, String>;
    async fn logout(&self) -> Result<(), String>;
    /// Сессия, сохранённая с прошлого запуска, если она ещё действительна
    async fn current_session(&self) -> Option<UserInfo>;
    async fn update_display_name(&self, display_name: &str) -> Result<UserInfo, String>;
}

/// Авторизация через backend; токены живут в localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpAuthAdapter;

fn remember(response: LoginResponse) -> UserInfo {
    storage::save_tokens(&response.access_token, &response.refresh_token);
    response.user
}

impl AuthAdapter for HttpAuthAdapter {
    async fn register(&self, email: &str, password: &str) -> Result<UserInfo, String> {
        let response = api::register(email.to_string(), password.to_string()).await?;
        Ok(remember(response))
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserInfo, String> {
        let response = api::login(email.to_string(), password.to_string()).await?;
        Ok(remember(response))
    }

    async fn logout(&self) -> Result<(), String> {
        let result = match storage::get_refresh_token() {
            Some(refresh_token) => api::logout(refresh_token).await,
            None => Ok(()),
        };
        storage::clear_tokens();
        result
    }

    async fn current_session(&self) -> Option<UserInfo> {
        let access_token = storage::get_access_token()?;
        if let Ok(user) = api::get_current_user(&access_token).await {
            return Some(user);
        }

        // Access token expired, try refresh
        let Some(refresh_token) = storage::get_refresh_token() else {
            storage::clear_tokens();
            return None;
        };
        match api::refresh_token(refresh_token).await {
            Ok(response) => {
                storage::save_access_token(&response.access_token);
                api::get_current_user(&response.access_token).await.ok()
            }
            Err(e) => {
                log::warn!("Session refresh failed: {}", e);
                storage::clear_tokens();
                None
            }
        }
    }

    async fn update_display_name(&self, display_name: &str) -> Result<UserInfo, String> {
        let access_token = storage::get_access_token().ok_or("Сессия истекла")?;
        api::update_profile(&access_token, display_name.to_string()).await
    }
}
