use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use validator::Validate;

use crate::auth::AdminUser;
use crate::models::wholesaler::{
    CreateWholesalerRequest, CreatedWholesaler, DeletedWholesaler, DocumentStatusUpdateRequest,
    DocumentStatusesUpdated, DocumentUrls, DocumentsCreated, StatusUpdateRequest, StatusUpdated,
    VerificationOutcome, VerifyRequest, WholesalerDetail, WholesalerListQuery, WholesalerPage,
};
use crate::state::AppState;
use crate::verification;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiResponse, HttpError, created, ok};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_wholesaler).get(list_wholesalers))
        .route("/{id}", get(get_wholesaler).delete(delete_wholesaler))
        .route("/{id}/documents", post(submit_documents))
        .route("/{id}/status", patch(update_status))
        .route("/{id}/documents/status", patch(update_document_statuses))
        .route("/{id}/verify", patch(verify_wholesaler))
}

async fn create_wholesaler(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateWholesalerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedWholesaler>>), HttpError> {
    payload.validate()?;
    let outcome = verification::create_wholesaler(&state.database, admin.actor(), payload).await?;
    Ok(created("Wholesaler created successfully", outcome))
}

async fn submit_documents(
    AdminUser(_admin): AdminUser,
    ApiPath(wholesaler_id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DocumentUrls>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentsCreated>>), HttpError> {
    payload.validate()?;
    let outcome = verification::submit_documents(&state.database, wholesaler_id, payload).await?;
    Ok(created("Documents submitted successfully", outcome))
}

async fn update_status(
    AdminUser(_admin): AdminUser,
    ApiPath(wholesaler_id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<StatusUpdated>>, HttpError> {
    let outcome = verification::set_status(&state.database, wholesaler_id, payload.status).await?;
    Ok(ok("Wholesaler status updated successfully", outcome))
}

async fn update_document_statuses(
    AdminUser(_admin): AdminUser,
    ApiPath(wholesaler_id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DocumentStatusUpdateRequest>,
) -> Result<Json<ApiResponse<DocumentStatusesUpdated>>, HttpError> {
    let outcome =
        verification::set_document_statuses(&state.database, wholesaler_id, payload).await?;
    Ok(ok("Document statuses updated successfully", outcome))
}

async fn verify_wholesaler(
    AdminUser(admin): AdminUser,
    ApiPath(wholesaler_id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<VerifyRequest>,
) -> Result<Json<ApiResponse<VerificationOutcome>>, HttpError> {
    payload.validate()?;
    let outcome =
        verification::verify(&state.database, admin.actor(), wholesaler_id, payload).await?;
    Ok(ok("Wholesaler verification updated successfully", outcome))
}

async fn list_wholesalers(
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<WholesalerListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WholesalerPage>>, HttpError> {
    query.validate()?;
    let page = verification::list_wholesalers(&state.database, &query).await?;
    Ok(ok("Wholesalers fetched successfully", page))
}

async fn get_wholesaler(
    AdminUser(_admin): AdminUser,
    ApiPath(wholesaler_id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WholesalerDetail>>, HttpError> {
    let detail = verification::get_wholesaler(&state.database, wholesaler_id).await?;
    Ok(ok("Wholesaler fetched successfully", detail))
}

async fn delete_wholesaler(
    AdminUser(_admin): AdminUser,
    ApiPath(wholesaler_id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DeletedWholesaler>>, HttpError> {
    let outcome = verification::delete_wholesaler(&state.database, wholesaler_id).await?;
    Ok(ok("Wholesaler deleted successfully", outcome))
}
