use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use validator::ValidationErrors;

use crate::auth::AuthError;
use crate::error::DomainError;
use crate::state::AppState;

mod admin_wholesalers;
mod auth;
mod business_categories;
mod extract;
mod wholesaler;

#[cfg(test)]
mod tests;

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    assert!(
        state.start_time.elapsed() < Duration::from_secs(86_400),
        "Application uptime exceeds 24 hours before router creation"
    );

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(cors_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([ACCEPT, AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .nest("/auth", auth::router())
        .nest("/admin/wholesalers", admin_wholesalers::router())
        .nest("/admin/business-categories", business_categories::router())
        .nest("/wholesaler", wholesaler::router());

    Router::new()
        .route("/health", get(health_live))
        .route("/health/ready", get(health_ready))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// An empty list allows any origin.
fn allowed_origins(origins: &[String]) -> AllowOrigin {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();
    if parsed.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parsed)
    }
}

async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "live",
        uptime_seconds: uptime,
    })
}

async fn health_ready(State(state): State<AppState>) -> Result<Json<HealthResponse>, HttpError> {
    state.database.ping().await.map_err(|err| {
        error!("Readiness check failed: {err}");
        HttpError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database unavailable".to_string(),
        )
    })?;

    Ok(Json(HealthResponse {
        status: "ready",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

/// Response envelope shared by every `/api` endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

pub fn ok<T: Serialize>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.to_string(),
        data: Some(data),
    })
}

pub fn created<T: Serialize>(message: &str, data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok(message, data))
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: String) -> Self {
        assert!(status != StatusCode::OK, "Error status cannot be 200");
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        info!(status = self.status.as_u16(), "HTTP error: {}", self.message);
        let body = Json(ApiResponse::<()> {
            success: false,
            message: self.message,
            data: None,
        });
        (self.status, body).into_response()
    }
}

impl From<DomainError> for HttpError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::InvalidReference | DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::Unknown(source) => {
                error!("Unhandled database error: {source}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.public_message())
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        let status = match err {
            AuthError::Domain(domain) => return Self::from(domain),
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::InvalidOtp => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Issue(source) => {
                error!("Token issuance failed: {source}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, message)
    }
}

impl From<ValidationErrors> for HttpError {
    fn from(err: ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        collect_messages(&err, "", &mut messages);
        messages.sort();
        let message = if messages.is_empty() {
            "Validation failed".to_string()
        } else {
            messages.join(", ")
        };
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for field_error in field_errors {
                    match &field_error.message {
                        Some(message) => out.push(message.to_string()),
                        None => out.push(format!("{path} is invalid")),
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        HttpError::from(self).into_response()
    }
}
