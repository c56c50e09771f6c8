pub mod auth;
pub mod business_category;
pub mod wholesaler;

use validator::ValidationError;

use crate::normalize::is_mobile_number;

/// Field validator for ten-digit Indian mobile numbers.
pub fn validate_mobile(phone: &str) -> Result<(), ValidationError> {
    if is_mobile_number(phone) {
        Ok(())
    } else {
        let mut error = ValidationError::new("mobile");
        error.message = Some("Phone must be a valid 10 digit mobile number".into());
        Err(error)
    }
}
