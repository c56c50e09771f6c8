//! Account lookups shared by the auth flows and the verification workflow.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};
use sea_orm::sea_query::Expr;
use tracing::info;

use crate::entities::user::{self, Role};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub phone: String,
    pub role: Role,
    pub business_category_id: Option<i32>,
}

pub async fn find_by_id<C>(db: &C, user_id: i32) -> Result<Option<user::Model>, DbErr>
where
    C: ConnectionTrait,
{
    user::Entity::find_by_id(user_id).one(db).await
}

pub async fn find_by_phone<C>(db: &C, phone: &str) -> Result<Option<user::Model>, DbErr>
where
    C: ConnectionTrait,
{
    user::Entity::find()
        .filter(user::Column::Phone.eq(phone))
        .one(db)
        .await
}

pub async fn insert<C>(db: &C, new_user: NewUser) -> Result<user::Model, DbErr>
where
    C: ConnectionTrait,
{
    assert!(!new_user.phone.is_empty(), "Phone must be set before insert");
    let now = Utc::now().fixed_offset();
    user::ActiveModel {
        username: Set(new_user.username),
        email: Set(new_user.email),
        phone: Set(new_user.phone),
        role: Set(new_user.role),
        business_category_id: Set(new_user.business_category_id),
        is_verified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Returns the number of rows touched so callers can detect a missing user.
pub async fn set_verified<C>(db: &C, user_id: i32, verified: bool) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    let result = user::Entity::update_many()
        .col_expr(user::Column::IsVerified, Expr::value(verified))
        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Ensures an admin account exists for the given phone. An existing account is
/// returned unchanged, whatever its role.
pub async fn find_or_create_admin<C>(
    db: &C,
    username: &str,
    phone: &str,
) -> Result<user::Model, DbErr>
where
    C: ConnectionTrait,
{
    if let Some(existing) = find_by_phone(db, phone).await? {
        return Ok(existing);
    }

    let created = insert(
        db,
        NewUser {
            username: username.to_string(),
            email: None,
            phone: phone.to_string(),
            role: Role::Admin,
            business_category_id: None,
        },
    )
    .await?;
    info!(user_id = created.id, "Bootstrap admin account created");
    Ok(created)
}
