//! Orchestration for subscription operations: map the request, hit the
//! storage gateway exactly once per persistence call, log the outcome.
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use uuid::Uuid;

use models::subscription;

use crate::dto::{CreateSubscriptionRequest, TotalPriceFilter, UpdateSubscriptionRequest};
use crate::errors::ServiceError;
use crate::mapper;

/// Create a subscription; storage assigns the id.
pub async fn create(
    db: &DatabaseConnection,
    req: CreateSubscriptionRequest,
) -> Result<subscription::Model, ServiceError> {
    let sub = mapper::to_model(&req).map_err(|e| {
        warn!(error = %e, "create: invalid subscription data");
        e
    })?;
    let created = subscription::insert(db, sub).await.map_err(|e| {
        error!(error = %e, "failed to create subscription");
        ServiceError::from(e)
    })?;
    info!(
        id = created.id,
        service_name = %created.service_name,
        user_id = %created.user_id,
        "subscription created"
    );
    Ok(created)
}

/// Get a subscription by id. `Ok(None)` means no such record, which is
/// distinct from a storage failure.
pub async fn get_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<subscription::Model>, ServiceError> {
    let found = subscription::find_by_id(db, id).await.map_err(|e| {
        error!(id, error = %e, "failed to get subscription");
        ServiceError::from(e)
    })?;
    if found.is_none() {
        warn!(id, "subscription not found");
    }
    Ok(found)
}

/// List every subscription. No pagination at this scope.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<subscription::Model>, ServiceError> {
    let subs = subscription::find_all(db).await.map_err(|e| {
        error!(error = %e, "failed to list subscriptions");
        ServiceError::from(e)
    })?;
    Ok(subs)
}

/// Partial update: fetch current, merge supplied fields, persist the full
/// row. A missing id short-circuits with NotFound before any write.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    req: UpdateSubscriptionRequest,
) -> Result<subscription::Model, ServiceError> {
    let current = subscription::find_by_id(db, id).await.map_err(|e| {
        error!(id, error = %e, "failed to get subscription for update");
        ServiceError::from(e)
    })?;
    let Some(current) = current else {
        warn!(id, "subscription to update not found");
        return Err(ServiceError::not_found("subscription"));
    };

    let merged = mapper::merge_update(id, &req, current).map_err(|e| {
        warn!(id, error = %e, "update: invalid subscription data");
        e
    })?;

    subscription::update_full(db, &merged).await.map_err(|e| {
        error!(id, error = %e, "failed to update subscription");
        ServiceError::from(e)
    })?;

    info!(id = merged.id, user_id = %merged.user_id, "subscription updated");
    Ok(merged)
}

/// Delete by id. Deleting a nonexistent id is a silent no-op.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ServiceError> {
    let affected = subscription::delete(db, id).await.map_err(|e| {
        error!(id, error = %e, "failed to delete subscription");
        ServiceError::from(e)
    })?;
    info!(id, affected, "subscription deleted");
    Ok(())
}

/// Sum of subscription prices for a user over an inclusive start-date
/// range, optionally narrowed by a case-insensitive service-name
/// substring. An empty match is 0, not an error.
pub async fn total_price(
    db: &DatabaseConnection,
    filter: TotalPriceFilter,
) -> Result<i64, ServiceError> {
    let user_id = Uuid::parse_str(filter.user_id.trim()).map_err(|_| {
        warn!(user_id = %filter.user_id, "invalid user_id format");
        ServiceError::Validation(format!("invalid user_id: {:?}", filter.user_id))
    })?;
    // Absent bounds widen to the full representable range
    let from = match filter.from.as_deref() {
        Some(s) => mapper::parse_day_month_year(s)?,
        None => NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN),
    };
    let to = match filter.to.as_deref() {
        Some(s) => mapper::parse_day_month_year(s)?,
        None => NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX),
    };
    let service_name = filter
        .service_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let total = subscription::sum_filtered(db, Some(user_id), service_name, from, to)
        .await
        .map_err(|e| {
            error!(%user_id, error = %e, "failed to calculate total subscription price");
            ServiceError::from(e)
        })?;

    info!(
        %user_id,
        service_name = service_name.unwrap_or(""),
        %from,
        %to,
        total,
        "calculated total subscription price"
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn create_req(user: Uuid, name: &str, price: i32, start: &str) -> CreateSubscriptionRequest {
        CreateSubscriptionRequest {
            service_name: name.into(),
            price,
            user_id: user,
            start_date: start.into(),
            end_date: None,
        }
    }

    #[tokio::test]
    async fn subscription_lifecycle() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let user = Uuid::new_v4();
        let created = create(&db, create_req(user, "Netflix", 500, "01-2025")).await?;
        assert!(created.id > 0);

        let found = get_by_id(&db, created.id).await?.expect("record exists");
        assert_eq!(found, created);

        let all = list_all(&db).await?;
        assert!(all.iter().any(|s| s.id == created.id));

        // partial update touching only the price
        let req = UpdateSubscriptionRequest { price: Some(650), ..Default::default() };
        let updated = update(&db, created.id, req).await?;
        assert_eq!(updated.price, 650);
        assert_eq!(updated.service_name, "Netflix");
        assert_eq!(updated.user_id, user);
        assert_eq!(updated.start_date, created.start_date);

        // set then clear the end date through the merge sentinel
        let req = UpdateSubscriptionRequest { end_date: Some("06-2025".into()), ..Default::default() };
        let updated = update(&db, created.id, req).await?;
        assert!(updated.end_date.is_some());
        let req = UpdateSubscriptionRequest { end_date: Some(String::new()), ..Default::default() };
        let updated = update(&db, created.id, req).await?;
        assert!(updated.end_date.is_none());

        delete(&db, created.id).await?;
        assert!(get_by_id(&db, created.id).await?.is_none());
        // deleting again is a silent no-op
        delete(&db, created.id).await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let req = UpdateSubscriptionRequest { price: Some(100), ..Default::default() };
        let res = update(&db, i64::MAX, req).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_payloads() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let user = Uuid::new_v4();
        let res = create(&db, create_req(user, "Netflix", 0, "01-2025")).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        let res = create(&db, create_req(user, "Netflix", 500, "13-2025")).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        // price = 1 is the smallest accepted value
        let ok = create(&db, create_req(user, "Netflix", 1, "01-2025")).await?;
        delete(&db, ok.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn total_price_filters_and_defaults() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let user = Uuid::new_v4();
        let a = create(&db, create_req(user, "Netflix", 100, "01-2025")).await?;
        let b = create(&db, create_req(user, "Spotify", 200, "03-2025")).await?;

        let filter = TotalPriceFilter {
            user_id: user.to_string(),
            service_name: None,
            from: Some("01-01-2025".into()),
            to: Some("28-02-2025".into()),
        };
        assert_eq!(total_price(&db, filter).await?, 100);

        // case-insensitive substring narrows to the Netflix record
        let filter = TotalPriceFilter {
            user_id: user.to_string(),
            service_name: Some("flix".into()),
            from: None,
            to: None,
        };
        assert_eq!(total_price(&db, filter).await?, 100);

        // unbounded range sums both
        let filter = TotalPriceFilter {
            user_id: user.to_string(),
            service_name: None,
            from: None,
            to: None,
        };
        assert_eq!(total_price(&db, filter).await?, 300);

        // no matches is 0, not an error
        let filter = TotalPriceFilter {
            user_id: Uuid::new_v4().to_string(),
            service_name: None,
            from: None,
            to: None,
        };
        assert_eq!(total_price(&db, filter).await?, 0);

        delete(&db, a.id).await?;
        delete(&db, b.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn total_price_rejects_bad_query() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let filter = TotalPriceFilter {
            user_id: "not-a-uuid".into(),
            service_name: None,
            from: None,
            to: None,
        };
        let res = total_price(&db, filter).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));

        let filter = TotalPriceFilter {
            user_id: Uuid::new_v4().to_string(),
            service_name: None,
            from: Some("2025-01-01".into()),
            to: None,
        };
        let res = total_price(&db, filter).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
