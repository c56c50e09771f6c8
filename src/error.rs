//! Domain error taxonomy shared by every service.
//!
//! Repositories hand back raw [`DbErr`]s; [`classify_db_error`] is the only
//! place that inspects driver error codes. Callers above the service layer
//! only ever see [`DomainError`] variants.

use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

/// Rows a not-found condition can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Wholesaler,
    Documents,
    BusinessCategory,
}

impl Resource {
    pub fn message(self) -> &'static str {
        match self {
            Self::User => "User not found",
            Self::Wholesaler => "Wholesaler not found",
            Self::Documents => "Wholesaler documents not found",
            Self::BusinessCategory => "Business category not found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Any unique key collision reported by the database.
    DuplicateValue,
    DocumentsAlreadySubmitted,
    ProfileAlreadyExists,
    AccountAlreadyExists,
}

impl ConflictKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::DuplicateValue => "A record with the same unique value already exists",
            Self::DocumentsAlreadySubmitted => "Documents have already been submitted",
            Self::ProfileAlreadyExists => "Wholesaler profile already exists for this account",
            Self::AccountAlreadyExists => "An account with this phone number already exists",
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{}", .0.message())]
    NotFound(Resource),
    #[error("{}", .0.message())]
    Conflict(ConflictKind),
    #[error("Invalid reference to a related record")]
    InvalidReference,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unexpected database error: {0}")]
    Unknown(#[source] DbErr),
}

impl DomainError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Client-facing text. Never carries driver output.
    pub fn public_message(&self) -> String {
        match self {
            Self::NotFound(resource) => resource.message().to_string(),
            Self::Conflict(kind) => kind.message().to_string(),
            Self::InvalidReference => "Invalid reference to a related record".to_string(),
            Self::InvalidInput(reason) => reason.clone(),
            Self::Unknown(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DbErr> for DomainError {
    fn from(err: DbErr) -> Self {
        classify_db_error(err)
    }
}

/// Not-null, check and malformed-value violations (Postgres SQLSTATE and the
/// SQLite extended result codes used by the test database).
const INVALID_INPUT_CODES: [&str; 6] = ["23502", "23514", "22P02", "22001", "1299", "275"];
const UNIQUE_CODES: [&str; 3] = ["23505", "2067", "1555"];
const FOREIGN_KEY_CODES: [&str; 2] = ["23503", "787"];

pub fn classify_db_error(err: DbErr) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            return DomainError::Conflict(ConflictKind::DuplicateValue);
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => return DomainError::InvalidReference,
        _ => {}
    }

    let Some(code) = database_error_code(&err) else {
        return DomainError::Unknown(err);
    };

    if UNIQUE_CODES.contains(&code.as_str()) {
        DomainError::Conflict(ConflictKind::DuplicateValue)
    } else if FOREIGN_KEY_CODES.contains(&code.as_str()) {
        DomainError::InvalidReference
    } else if INVALID_INPUT_CODES.contains(&code.as_str()) {
        DomainError::invalid_input("Invalid input")
    } else {
        DomainError::Unknown(err)
    }
}

fn database_error_code(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err)))
        | DbErr::Query(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err))) => {
            db_err.code().map(|code| code.into_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_driver_errors_are_unknown() {
        let err = classify_db_error(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DomainError::Unknown(_)));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn record_not_found_is_not_reclassified() {
        let err = classify_db_error(DbErr::RecordNotFound("wholesalers".to_string()));
        assert!(matches!(err, DomainError::Unknown(_)));
    }

    #[test]
    fn messages_are_table_driven() {
        assert_eq!(
            DomainError::NotFound(Resource::Documents).public_message(),
            "Wholesaler documents not found"
        );
        assert_eq!(
            DomainError::Conflict(ConflictKind::DocumentsAlreadySubmitted).to_string(),
            "Documents have already been submitted"
        );
        assert_eq!(
            DomainError::invalid_input("status is required").public_message(),
            "status is required"
        );
    }

    #[test]
    fn unknown_errors_hide_driver_text() {
        let err = DomainError::Unknown(DbErr::Custom("relation \"users\" does not exist".into()));
        assert!(!err.public_message().contains("relation"));
    }
}
