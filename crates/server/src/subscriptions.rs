use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use service::dto::{
    CreateSubscriptionRequest, SubscriptionResponse, TotalPriceFilter, TotalPriceResponse,
    UpdateSubscriptionRequest,
};
use service::errors::ServiceError;
use service::{mapper, subscription_service};

use crate::errors::ApiError;
use crate::routes::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    tag = "subscriptions",
    request_body = crate::openapi::CreateSubscriptionRequestDoc,
    responses(
        (status = 201, description = "Subscription created", body = crate::openapi::SubscriptionResponseDoc),
        (status = 400, description = "Invalid payload"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let created = subscription_service::create(&state.db, req).await?;
    info!(id = created.id, "create: subscription created");
    Ok((StatusCode::CREATED, Json(mapper::to_response(&created))))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    tag = "subscriptions",
    responses(
        (status = 200, description = "All subscriptions", body = [crate::openapi::SubscriptionResponseDoc]),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubscriptionResponse>>, ApiError> {
    let subs = subscription_service::list_all(&state.db).await?;
    info!(count = subs.len(), "list: subscriptions listed");
    Ok(Json(subs.iter().map(mapper::to_response).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = i64, Path, description = "Subscription id")),
    responses(
        (status = 200, description = "Subscription found", body = crate::openapi::SubscriptionResponseDoc),
        (status = 400, description = "Bad id"),
        (status = 404, description = "Not found"),
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    match subscription_service::get_by_id(&state.db, id).await? {
        Some(sub) => Ok(Json(mapper::to_response(&sub))),
        None => Err(ApiError(ServiceError::not_found("subscription"))),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = i64, Path, description = "Subscription id")),
    request_body = crate::openapi::UpdateSubscriptionRequestDoc,
    responses(
        (status = 200, description = "Subscription updated", body = crate::openapi::SubscriptionResponseDoc),
        (status = 400, description = "Bad id or payload"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let updated = subscription_service::update(&state.db, id, req).await?;
    info!(id, "update: subscription updated");
    Ok(Json(mapper::to_response(&updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/subscriptions/{id}",
    tag = "subscriptions",
    params(("id" = i64, Path, description = "Subscription id")),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 400, description = "Bad id"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    subscription_service::delete(&state.db, id).await?;
    info!(id, "delete: subscription deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/subscriptions/total",
    tag = "subscriptions",
    params(
        ("user_id" = String, Query, description = "Owner UUID (required)"),
        ("service_name" = Option<String>, Query, description = "Case-insensitive service-name substring"),
        ("from" = Option<String>, Query, description = "Range start, DD-MM-YYYY"),
        ("to" = Option<String>, Query, description = "Range end, DD-MM-YYYY"),
    ),
    responses(
        (status = 200, description = "Summed price over the filtered set", body = crate::openapi::TotalPriceResponseDoc),
        (status = 400, description = "Bad query"),
        (status = 500, description = "Storage error"),
    )
)]
pub async fn total_price(
    State(state): State<AppState>,
    Query(filter): Query<TotalPriceFilter>,
) -> Result<Json<TotalPriceResponse>, ApiError> {
    let total = subscription_service::total_price(&state.db, filter).await?;
    Ok(Json(TotalPriceResponse { total }))
}
