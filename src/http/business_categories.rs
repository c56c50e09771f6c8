use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use validator::Validate;

use crate::auth::AdminUser;
use crate::business_categories;
use crate::models::business_category::{
    CategoryListQuery, CategoryNameRequest, CategoryPage, CategoryStatusRequest, CategoryView,
};
use crate::state::AppState;

use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::{ApiResponse, HttpError, created, ok};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(rename_category).delete(delete_category),
        )
        .route("/{id}/status", patch(update_status))
}

async fn list_categories(
    ApiQuery(query): ApiQuery<CategoryListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryPage>>, HttpError> {
    query.validate()?;
    let (items, total) = business_categories::list(&state.database, &query).await?;
    let page = CategoryPage {
        items: items.into_iter().map(CategoryView::from).collect(),
        total,
        limit: query.limit.unwrap_or(business_categories::DEFAULT_PAGE_SIZE),
        offset: query.offset.unwrap_or(0),
    };
    Ok(ok("Business categories fetched successfully", page))
}

async fn get_category(
    ApiPath(category_id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryView>>, HttpError> {
    let category = business_categories::get(&state.database, category_id).await?;
    Ok(ok("Business category fetched successfully", CategoryView::from(category)))
}

async fn create_category(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CategoryNameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryView>>), HttpError> {
    payload.validate()?;
    let category = business_categories::create(&state.database, &payload.name).await?;
    Ok(created("Business category created successfully", CategoryView::from(category)))
}

async fn rename_category(
    AdminUser(_admin): AdminUser,
    ApiPath(category_id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CategoryNameRequest>,
) -> Result<Json<ApiResponse<CategoryView>>, HttpError> {
    payload.validate()?;
    let category =
        business_categories::rename(&state.database, category_id, &payload.name).await?;
    Ok(ok("Business category updated successfully", CategoryView::from(category)))
}

async fn update_status(
    AdminUser(_admin): AdminUser,
    ApiPath(category_id): ApiPath<i32>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CategoryStatusRequest>,
) -> Result<Json<ApiResponse<CategoryView>>, HttpError> {
    let category =
        business_categories::set_status(&state.database, category_id, payload.status).await?;
    Ok(ok("Business category status updated successfully", CategoryView::from(category)))
}

async fn delete_category(
    AdminUser(_admin): AdminUser,
    ApiPath(category_id): ApiPath<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CategoryView>>, HttpError> {
    let category = business_categories::get(&state.database, category_id).await?;
    business_categories::delete(&state.database, category_id).await?;
    Ok(ok("Business category deleted successfully", CategoryView::from(category)))
}
