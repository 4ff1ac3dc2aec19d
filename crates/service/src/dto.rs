//! Wire schemas for the subscription API.
//!
//! Update fields are optional wrappers so that "field omitted" is
//! distinguishable from "field set to a falsy value"; omitting a field
//! always means "leave unchanged".
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    /// MM-YYYY
    pub start_date: String,
    /// MM-YYYY, absent means no end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// MM-YYYY
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// MM-YYYY; the empty string clears a previously-set end date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub id: i64,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Query-string filter for the aggregate sum. Note the external contract
/// quirk: these dates are DD-MM-YYYY while body dates are MM-YYYY.
#[derive(Debug, Clone, Deserialize)]
pub struct TotalPriceFilter {
    pub user_id: String,
    #[serde(default)]
    pub service_name: Option<String>,
    /// DD-MM-YYYY
    #[serde(default)]
    pub from: Option<String>,
    /// DD-MM-YYYY
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalPriceResponse {
    pub total: i64,
}
