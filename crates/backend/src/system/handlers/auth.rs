use axum::{extract::Json, http::StatusCode};
use chrono::Utc;
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, RegisterRequest,
    UpdateProfileRequest, UserInfo,
};

use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::jwt;
use crate::system::users::repository::{self, User};
use crate::system::users::service as user_service;

/// Выдать пару токенов и вернуть профиль
async fn issue_session(user: User) -> ApiResult<LoginResponse> {
    let access_token = jwt::generate_access_token(&user.id, &user.email).await?;

    let refresh_token = jwt::generate_refresh_token();
    repository::store_refresh_token(
        &user.id,
        &jwt::hash_token(&refresh_token),
        &jwt::calculate_refresh_token_expiration(),
    )
    .await?;

    Ok(LoginResponse {
        access_token,
        refresh_token,
        user: user.into(),
    })
}

/// Register handler; the new partner is signed in right away
pub async fn register(Json(request): Json<RegisterRequest>) -> ApiResult<Json<LoginResponse>> {
    let user = user_service::register(&request.email, &request.password).await?;
    Ok(Json(issue_session(user).await?))
}

/// Login handler
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<Json<LoginResponse>> {
    let user = user_service::verify_credentials(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Неверный email или пароль".to_string()))?;

    tracing::info!("User {} logged in", user.id);
    Ok(Json(issue_session(user).await?))
}

/// Refresh token handler
pub async fn refresh(Json(request): Json<RefreshRequest>) -> ApiResult<Json<RefreshResponse>> {
    let now = Utc::now().to_rfc3339();
    let user_id = repository::find_refresh_token_owner(&jwt::hash_token(&request.refresh_token), &now)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Сессия истекла".to_string()))?;

    let user = user_service::get_by_id(&user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Сессия истекла".to_string()))?;

    let access_token = jwt::generate_access_token(&user.id, &user.email).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Logout handler (revokes the refresh token)
pub async fn logout(Json(request): Json<RefreshRequest>) -> ApiResult<StatusCode> {
    repository::revoke_refresh_token(
        &jwt::hash_token(&request.refresh_token),
        &Utc::now().to_rfc3339(),
    )
    .await?;

    Ok(StatusCode::OK)
}

/// Get current user handler (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> ApiResult<Json<UserInfo>> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| ApiError::NotFound("Пользователь не найден".to_string()))?;

    Ok(Json(user.into()))
}

/// Update display name (protected by middleware)
pub async fn update_profile(
    CurrentUser(claims): CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserInfo>> {
    let user = user_service::update_display_name(&claims.sub, &request.display_name).await?;
    Ok(Json(user.into()))
}
