//! Business category administration.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use tracing::info;

use crate::entities::business_category::{self, CategoryStatus};
use crate::error::{DomainError, Resource};
use crate::models::business_category::{CategoryListQuery, CategorySort, SortOrder};

pub const DEFAULT_PAGE_SIZE: u64 = 20;

pub async fn list<C>(
    db: &C,
    query: &CategoryListQuery,
) -> Result<(Vec<business_category::Model>, u64), DomainError>
where
    C: ConnectionTrait,
{
    let mut select = business_category::Entity::find();

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search.to_lowercase());
        select = select.filter(
            Expr::expr(Func::lower(Expr::col(business_category::Column::Name))).like(pattern),
        );
    }
    if let Some(status) = query.status {
        select = select.filter(business_category::Column::Status.eq(status));
    }

    let total = select.clone().count(db).await?;

    let column = match query.sort {
        CategorySort::Id => business_category::Column::Id,
        CategorySort::Name => business_category::Column::Name,
        CategorySort::CreatedAt => business_category::Column::CreatedAt,
    };
    select = match query.order {
        SortOrder::Asc => select.order_by_asc(column),
        SortOrder::Desc => select.order_by_desc(column),
    };

    let items = select
        .limit(query.limit.unwrap_or(DEFAULT_PAGE_SIZE))
        .offset(query.offset.unwrap_or(0))
        .all(db)
        .await?;
    Ok((items, total))
}

pub async fn get<C>(db: &C, category_id: i32) -> Result<business_category::Model, DomainError>
where
    C: ConnectionTrait,
{
    business_category::Entity::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(DomainError::NotFound(Resource::BusinessCategory))
}

/// Signup may only reference a category that exists and is active.
pub async fn ensure_active<C>(db: &C, category_id: i32) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let found = business_category::Entity::find_by_id(category_id)
        .filter(business_category::Column::Status.eq(CategoryStatus::Active))
        .one(db)
        .await?;
    match found {
        Some(_) => Ok(()),
        None => Err(DomainError::InvalidReference),
    }
}

pub async fn create<C>(db: &C, name: &str) -> Result<business_category::Model, DomainError>
where
    C: ConnectionTrait,
{
    let name = clean_name(name)?;
    let now = Utc::now().fixed_offset();
    let created = business_category::ActiveModel {
        name: Set(name),
        status: Set(CategoryStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(category_id = created.id, "Business category created");
    Ok(created)
}

pub async fn rename<C>(
    db: &C,
    category_id: i32,
    name: &str,
) -> Result<business_category::Model, DomainError>
where
    C: ConnectionTrait,
{
    let name = clean_name(name)?;
    let existing = get(db, category_id).await?;
    let mut active: business_category::ActiveModel = existing.into();
    active.name = Set(name);
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(active.update(db).await?)
}

pub async fn set_status<C>(
    db: &C,
    category_id: i32,
    status: CategoryStatus,
) -> Result<business_category::Model, DomainError>
where
    C: ConnectionTrait,
{
    let existing = get(db, category_id).await?;
    let mut active: business_category::ActiveModel = existing.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(active.update(db).await?)
}

/// Fails with `InvalidReference` while users or wholesalers still point at it.
pub async fn delete<C>(db: &C, category_id: i32) -> Result<(), DomainError>
where
    C: ConnectionTrait,
{
    let result = business_category::Entity::delete_by_id(category_id)
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(DomainError::NotFound(Resource::BusinessCategory));
    }
    info!(category_id, "Business category deleted");
    Ok(())
}

fn clean_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.len() < 2 {
        return Err(DomainError::invalid_input("Name must be at least 2 characters"));
    }
    Ok(trimmed.to_string())
}
