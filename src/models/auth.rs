use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::user::{self, Role};

use super::validate_mobile;

/// Roles open to self-registration. Admins are provisioned from config and
/// wholesalers sign up through the OTP flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrableRole {
    Retailer,
    Agent,
}

impl From<RegistrableRole> for Role {
    fn from(role: RegistrableRole) -> Self {
        match role {
            RegistrableRole::Retailer => Role::Retailer,
            RegistrableRole::Agent => Role::Agent,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,
    pub role: RegistrableRole,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub business_category_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,
    #[validate(length(min = 4, max = 8, message = "OTP must be 4 to 8 digits"))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WholesalerSignupRequest {
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,
    #[validate(length(min = 4, max = 8, message = "OTP must be 4 to 8 digits"))]
    pub otp: String,
    pub business_category_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub phone: String,
    pub role: Role,
    pub business_category_id: Option<i32>,
    pub is_verified: bool,
}

impl From<user::Model> for UserView {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            role: user.role,
            business_category_id: user.business_category_id,
            is_verified: user.is_verified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub token: String,
    pub user: UserView,
}
