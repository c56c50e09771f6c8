use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use validator::Validate;

use crate::auth::service;
use crate::models::auth::{
    LoginRequest, RegisterRequest, SessionView, UserView, WholesalerSignupRequest,
};
use crate::state::AppState;

use super::extract::ApiJson;
use super::{ApiResponse, HttpError, created, ok};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/wholesaler/signup", post(wholesaler_signup))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserView>>), HttpError> {
    payload.validate()?;
    let user = service::register(&state.database, payload).await?;
    Ok(created("User registered successfully", UserView::from(user)))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<SessionView>>, HttpError> {
    payload.validate()?;
    let session = service::login(&state.database, &state.tokens, &state.mock_otp, payload).await?;
    Ok(ok("Login successful", session))
}

async fn wholesaler_signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<WholesalerSignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionView>>), HttpError> {
    payload.validate()?;
    let session =
        service::wholesaler_signup(&state.database, &state.tokens, &state.mock_otp, payload)
            .await?;
    Ok(created("Wholesaler account created successfully", session))
}
