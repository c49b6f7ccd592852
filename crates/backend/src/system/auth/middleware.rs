use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::shared::error::ApiError;

/// Middleware that requires a valid access token; claims go to request extensions
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Требуется авторизация".to_string()))?;

    let claims = super::jwt::validate_token(token)
        .await
        .map_err(|_| ApiError::Unauthorized("Сессия истекла".to_string()))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
