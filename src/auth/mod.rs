//! Authentication: mock OTP login, token issuance and role-guarded extractors.

pub mod service;
pub mod token;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use thiserror::Error;
use tracing::debug;

use crate::entities::user::Role;
use crate::error::DomainError;
use crate::state::AppState;
use crate::verification::Actor;

pub use token::{TokenError, TokenIssuer};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Insufficient role for this resource")]
    Forbidden,
    #[error("Invalid OTP")]
    InvalidOtp,
    #[error("Failed to issue token")]
    Issue(#[source] TokenError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Domain(err.into())
    }
}

/// Caller identity taken from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: Role,
}

impl AuthUser {
    pub fn actor(self) -> Actor {
        Actor {
            user_id: self.user_id,
            role: self.role,
        }
    }

    fn require(self, role: Role) -> Result<Self, AuthError> {
        if self.role == role {
            Ok(self)
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        let claims = state.tokens.verify(token).map_err(|err| {
            debug!(uri = %parts.uri, "Rejected bearer token: {err}");
            AuthError::InvalidToken
        })?;

        let user = AuthUser {
            user_id: claims.sub,
            role: claims.role,
        };
        parts.extensions.insert(user);
        Ok(user)
    }
}

/// Admin-only extractor.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Role::Admin).map(Self)
    }
}

/// Wholesaler-only extractor.
#[derive(Debug, Clone, Copy)]
pub struct WholesalerUser(pub AuthUser);

impl FromRequestParts<AppState> for WholesalerUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        user.require(Role::Wholesaler).map(Self)
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
