use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::account::{
        GoogleLoginRequest, GoogleLoginResponse, LoginRequest, LoginResponse,
        RefreshTokenRequest, TokenPairResponse,
    },
    services::auth::AuthService,
    AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await?;
    Ok(Json(response))
}

pub async fn logout(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<Value>, AppError> {
    AuthService::logout(&state.db, &body.refresh_token).await?;
    Ok(Json(json!({ "message": "Logged out" })))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair = AuthService::refresh(
        &state.db,
        &body.refresh_token,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await?;
    Ok(Json(pair))
}

pub async fn login_google(
    State(state): State<AppState>,
    Json(body): Json<GoogleLoginRequest>,
) -> Result<Json<GoogleLoginResponse>, AppError> {
    let response = AuthService::login_with_google(
        &state.db,
        &state.google,
        &body.code,
        &state.config.jwt_secret,
        &state.config.jwt_refresh_secret,
        state.config.jwt_expiry_seconds,
        state.config.jwt_refresh_expiry_days,
    )
    .await?;
    Ok(Json(response))
}
