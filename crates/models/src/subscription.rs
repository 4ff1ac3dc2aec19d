//! Subscription entity and the single point of query construction.
//!
//! All persistence calls go through this module; every query is built with
//! the parameterized query builder, never with string concatenation.
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveValue::NotSet, DatabaseConnection, FromQueryResult, QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_service_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("service_name must not be empty".into()));
    }
    Ok(())
}

pub fn validate_price(price: i32) -> Result<(), ModelError> {
    if price < 1 {
        return Err(ModelError::Validation("price must be a positive integer".into()));
    }
    Ok(())
}

/// Insert a new row; the database assigns the id.
pub async fn insert(db: &DatabaseConnection, sub: Model) -> Result<Model, ModelError> {
    validate_service_name(&sub.service_name)?;
    validate_price(sub.price)?;
    let am = ActiveModel {
        id: NotSet,
        service_name: Set(sub.service_name),
        price: Set(sub.price),
        user_id: Set(sub.user_id),
        start_date: Set(sub.start_date),
        end_date: Set(sub.end_date),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Absent row is `Ok(None)`, distinct from a query failure.
pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

/// Full-row overwrite keyed by id. Returns affected rows; a missing id is
/// a no-op, not an error.
pub async fn update_full(db: &DatabaseConnection, sub: &Model) -> Result<u64, ModelError> {
    validate_service_name(&sub.service_name)?;
    validate_price(sub.price)?;
    let res = Entity::update_many()
        .col_expr(Column::ServiceName, Expr::value(sub.service_name.clone()))
        .col_expr(Column::Price, Expr::value(sub.price))
        .col_expr(Column::UserId, Expr::value(sub.user_id))
        .col_expr(Column::StartDate, Expr::value(sub.start_date))
        .col_expr(Column::EndDate, Expr::value(sub.end_date))
        .filter(Column::Id.eq(sub.id))
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

/// Delete by id. Returns affected rows; a missing id is a no-op.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<u64, ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

#[derive(Debug, FromQueryResult)]
struct PriceSum {
    total: Option<i64>,
}

/// Sum of `price` over an inclusive `start_date` range, optionally
/// narrowed (AND-composed) by owner and a case-insensitive service-name
/// substring. An empty result set sums to 0.
pub async fn sum_filtered(
    db: &DatabaseConnection,
    user_id: Option<Uuid>,
    service_name: Option<&str>,
    from: Date,
    to: Date,
) -> Result<i64, ModelError> {
    let mut finder = Entity::find()
        .select_only()
        .column_as(Expr::col(Column::Price).sum(), "total")
        .filter(Column::StartDate.gte(from))
        .filter(Column::StartDate.lte(to));
    if let Some(uid) = user_id {
        finder = finder.filter(Column::UserId.eq(uid));
    }
    if let Some(pattern) = service_name {
        finder = finder.filter(Expr::col(Column::ServiceName).ilike(format!("%{}%", pattern)));
    }
    let row = finder
        .into_model::<PriceSum>()
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(row.and_then(|r| r.total).unwrap_or(0))
}
