//! Shared fixtures for database-backed tests.

use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection};

use crate::entities::business_category::{self, CategoryStatus};

pub async fn memory_database() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let database = Database::connect(options)
        .await
        .expect("in-memory database should open");
    migration::Migrator::up(&database, None)
        .await
        .expect("migrations should apply to sqlite");
    database
}

pub async fn seed_category(db: &DatabaseConnection, name: &str) -> business_category::Model {
    seed_category_with_status(db, name, CategoryStatus::Active).await
}

pub async fn seed_category_with_status(
    db: &DatabaseConnection,
    name: &str,
    status: CategoryStatus,
) -> business_category::Model {
    let now = Utc::now().fixed_offset();
    business_category::ActiveModel {
        name: Set(name.to_string()),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("category insert")
}
