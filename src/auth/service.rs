use sea_orm::DatabaseConnection;
use tracing::info;

use crate::business_categories;
use crate::entities::user::{self, Role};
use crate::error::{ConflictKind, DomainError, Resource};
use crate::models::auth::{
    LoginRequest, RegisterRequest, SessionView, UserView, WholesalerSignupRequest,
};
use crate::normalize::{generate_username, normalize_email};
use crate::users::{self, NewUser};

use super::{AuthError, TokenIssuer};

pub async fn register(
    db: &DatabaseConnection,
    request: RegisterRequest,
) -> Result<user::Model, DomainError> {
    let phone = request.phone.trim().to_string();
    if users::find_by_phone(db, &phone).await?.is_some() {
        return Err(DomainError::Conflict(ConflictKind::AccountAlreadyExists));
    }
    if let Some(category_id) = request.business_category_id {
        business_categories::ensure_active(db, category_id).await?;
    }

    let created = users::insert(
        db,
        NewUser {
            username: request.username.trim().to_string(),
            email: normalize_email(request.email),
            phone,
            role: request.role.into(),
            business_category_id: request.business_category_id,
        },
    )
    .await?;
    info!(user_id = created.id, role = created.role.as_str(), "User registered");
    Ok(created)
}

/// Phone + OTP login. The OTP is a configured fixed code until an SMS
/// provider is wired in.
pub async fn login(
    db: &DatabaseConnection,
    tokens: &TokenIssuer,
    mock_otp: &str,
    request: LoginRequest,
) -> Result<SessionView, AuthError> {
    check_otp(mock_otp, &request.otp)?;
    let account = users::find_by_phone(db, request.phone.trim())
        .await?
        .ok_or(DomainError::NotFound(Resource::User))?;
    session(tokens, account)
}

/// Creates a wholesaler account from a verified phone number. The username is
/// generated and the business category must be active.
pub async fn wholesaler_signup(
    db: &DatabaseConnection,
    tokens: &TokenIssuer,
    mock_otp: &str,
    request: WholesalerSignupRequest,
) -> Result<SessionView, AuthError> {
    check_otp(mock_otp, &request.otp)?;
    let phone = request.phone.trim().to_string();
    if users::find_by_phone(db, &phone).await?.is_some() {
        return Err(DomainError::Conflict(ConflictKind::AccountAlreadyExists).into());
    }
    business_categories::ensure_active(db, request.business_category_id).await?;

    let username = generate_username(Role::Wholesaler, &mut rand::thread_rng());
    let account = users::insert(
        db,
        NewUser {
            username,
            email: None,
            phone,
            role: Role::Wholesaler,
            business_category_id: Some(request.business_category_id),
        },
    )
    .await?;
    info!(user_id = account.id, "Wholesaler signed up via OTP");
    session(tokens, account)
}

fn check_otp(expected: &str, provided: &str) -> Result<(), AuthError> {
    if provided.trim() == expected {
        Ok(())
    } else {
        Err(AuthError::InvalidOtp)
    }
}

fn session(tokens: &TokenIssuer, account: user::Model) -> Result<SessionView, AuthError> {
    let token = tokens
        .issue(account.id, account.role)
        .map_err(AuthError::Issue)?;
    Ok(SessionView {
        token,
        user: UserView::from(account),
    })
}
