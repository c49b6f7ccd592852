use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::TokenClaims;

use crate::shared::error::ApiError;

/// Current user from the JWT claims (set by `require_auth`)
/// Usage in handlers: `async fn handler(CurrentUser(claims): CurrentUser) -> Response`
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    /// Пространство данных принадлежит только своему владельцу
    pub fn ensure_owner(&self, owner_id: &str) -> Result<(), ApiError> {
        if self.0.sub == owner_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Требуется авторизация".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_check() {
        let user = CurrentUser(TokenClaims {
            sub: "owner-a".to_string(),
            email: "a@example.com".to_string(),
            exp: 0,
            iat: 0,
        });
        assert!(user.ensure_owner("owner-a").is_ok());
        assert!(matches!(user.ensure_owner("owner-b"), Err(ApiError::Forbidden)));
    }
}
