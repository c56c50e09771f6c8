use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::auth::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub tokens: Arc<TokenIssuer>,
    pub mock_otp: Arc<str>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(database: DatabaseConnection, tokens: Arc<TokenIssuer>, mock_otp: &str) -> Self {
        assert!(!mock_otp.is_empty(), "Mock OTP must be configured");
        Self {
            database,
            tokens,
            mock_otp: Arc::from(mock_otp),
            start_time: Instant::now(),
        }
    }
}
