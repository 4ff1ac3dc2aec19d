//! OpenAPI document. Wire schemas live in the `service` crate; the doc
//! mirrors them here so that crate stays free of documentation concerns.
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct CreateSubscriptionRequestDoc {
    pub service_name: String,
    /// Positive integer, single implicit currency
    pub price: i32,
    pub user_id: Uuid,
    /// MM-YYYY
    pub start_date: String,
    /// MM-YYYY, absent means no end
    pub end_date: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateSubscriptionRequestDoc {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub user_id: Option<Uuid>,
    /// MM-YYYY
    pub start_date: Option<String>,
    /// MM-YYYY; the empty string clears the end date
    pub end_date: Option<String>,
}

#[derive(ToSchema)]
pub struct SubscriptionResponseDoc {
    pub id: i64,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    /// MM-YYYY
    pub start_date: String,
    /// MM-YYYY, omitted while the subscription is still active
    pub end_date: Option<String>,
}

#[derive(ToSchema)]
pub struct TotalPriceResponseDoc {
    pub total: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::subscriptions::create,
        crate::subscriptions::list,
        crate::subscriptions::get_by_id,
        crate::subscriptions::update,
        crate::subscriptions::remove,
        crate::subscriptions::total_price,
    ),
    components(
        schemas(
            HealthResponse,
            CreateSubscriptionRequestDoc,
            UpdateSubscriptionRequestDoc,
            SubscriptionResponseDoc,
            TotalPriceResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "subscriptions"),
    )
)]
pub struct ApiDoc;
