use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use validator::Validate;

use crate::auth::WholesalerUser;
use crate::models::wholesaler::{
    CreatedWholesaler, DocumentUrls, DocumentsCreated, OwnProfileRequest, WholesalerDetail,
};
use crate::state::AppState;
use crate::verification;

use super::extract::ApiJson;
use super::{ApiResponse, HttpError, created, ok};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", post(create_profile).get(get_profile))
        .route("/profile/documents", post(submit_documents))
}

async fn create_profile(
    WholesalerUser(caller): WholesalerUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<OwnProfileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedWholesaler>>), HttpError> {
    payload.validate()?;
    let outcome =
        verification::create_own_profile(&state.database, caller.user_id, payload).await?;
    Ok(created("Wholesaler profile created successfully", outcome))
}

async fn submit_documents(
    WholesalerUser(caller): WholesalerUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DocumentUrls>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentsCreated>>), HttpError> {
    payload.validate()?;
    let outcome =
        verification::submit_own_documents(&state.database, caller.user_id, payload).await?;
    Ok(created("Documents submitted successfully", outcome))
}

async fn get_profile(
    WholesalerUser(caller): WholesalerUser,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WholesalerDetail>>, HttpError> {
    let detail = verification::get_own_profile(&state.database, caller.user_id).await?;
    Ok(ok("Wholesaler profile fetched successfully", detail))
}
