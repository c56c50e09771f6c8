use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::business_category::{self, CategoryStatus};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryNameRequest {
    #[validate(length(min = 2, max = 128, message = "Name must be 2 to 128 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CategoryStatusRequest {
    pub status: CategoryStatus,
}

/// Sort keys accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySort {
    #[default]
    Id,
    Name,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryListQuery {
    #[validate(length(max = 128))]
    pub search: Option<String>,
    pub status: Option<CategoryStatus>,
    #[serde(default)]
    pub sort: CategorySort,
    #[serde(default)]
    pub order: SortOrder,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub status: CategoryStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<business_category::Model> for CategoryView {
    fn from(category: business_category::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            status: category.status,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub items: Vec<CategoryView>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}
