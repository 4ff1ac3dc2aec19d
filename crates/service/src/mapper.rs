//! Pure conversions between wire schemas and the subscription entity.
//! No I/O happens here; date parsing failures surface as validation errors.
use chrono::{Datelike, NaiveDate};
use models::subscription;

use crate::dto::{CreateSubscriptionRequest, SubscriptionResponse, UpdateSubscriptionRequest};
use crate::errors::ServiceError;

/// Parse strict fixed-width `MM-YYYY`, e.g. `"01-2025"`.
pub fn parse_month_year(s: &str) -> Result<NaiveDate, ServiceError> {
    let invalid =
        || ServiceError::Validation(format!("invalid month-year {:?}, expected MM-YYYY", s));
    let bytes = s.as_bytes();
    if bytes.len() != 7 || bytes[2] != b'-' {
        return Err(invalid());
    }
    let (mm, yyyy) = (&s[..2], &s[3..]);
    if !mm.bytes().all(|b| b.is_ascii_digit()) || !yyyy.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let month: u32 = mm.parse().map_err(|_| invalid())?;
    let year: i32 = yyyy.parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

/// Inverse of [`parse_month_year`]; total for valid dates.
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{:02}-{:04}", date.month(), date.year())
}

/// Parse `DD-MM-YYYY`, the format the total-price query filter uses.
pub fn parse_day_month_year(s: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(s, "%d-%m-%Y")
        .map_err(|_| ServiceError::Validation(format!("invalid date {:?}, expected DD-MM-YYYY", s)))
}

/// Build a new record from a create request. The id is a placeholder;
/// storage assigns the real one on insert.
pub fn to_model(req: &CreateSubscriptionRequest) -> Result<subscription::Model, ServiceError> {
    subscription::validate_service_name(&req.service_name)?;
    subscription::validate_price(req.price)?;
    let start_date = parse_month_year(&req.start_date)
        .map_err(|_| ServiceError::Validation(format!("invalid start_date format: {:?}", req.start_date)))?;
    let end_date = match req.end_date.as_deref() {
        Some(s) => Some(parse_month_year(s).map_err(|_| {
            ServiceError::Validation(format!("invalid end_date format: {:?}", s))
        })?),
        None => None,
    };
    Ok(subscription::Model {
        id: 0,
        service_name: req.service_name.clone(),
        price: req.price,
        user_id: req.user_id,
        start_date,
        end_date,
    })
}

pub fn to_response(sub: &subscription::Model) -> SubscriptionResponse {
    SubscriptionResponse {
        id: sub.id,
        service_name: sub.service_name.clone(),
        price: sub.price,
        user_id: sub.user_id,
        start_date: format_month_year(sub.start_date),
        end_date: sub.end_date.map(format_month_year),
    }
}

/// Merge an update request onto the current record. Fields omitted from
/// the request keep their stored value; an explicit empty-string end_date
/// clears the end date.
pub fn merge_update(
    id: i64,
    req: &UpdateSubscriptionRequest,
    current: subscription::Model,
) -> Result<subscription::Model, ServiceError> {
    let mut sub = current;
    sub.id = id;

    if let Some(name) = &req.service_name {
        sub.service_name = name.clone();
    }
    if let Some(price) = req.price {
        sub.price = price;
    }
    if let Some(user_id) = req.user_id {
        sub.user_id = user_id;
    }
    if let Some(s) = &req.start_date {
        sub.start_date = parse_month_year(s).map_err(|_| {
            ServiceError::Validation(format!("invalid start_date format: {:?}", s))
        })?;
    }
    if let Some(s) = &req.end_date {
        if s.is_empty() {
            // explicit empty string is the clear sentinel
            sub.end_date = None;
        } else {
            sub.end_date = Some(parse_month_year(s).map_err(|_| {
                ServiceError::Validation(format!("invalid end_date format: {:?}", s))
            })?);
        }
    }

    Ok(sub)
}
