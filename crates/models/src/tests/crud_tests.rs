use crate::db::connect;
use crate::subscription;
use anyhow::Result;
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

/// Setup test database with migrations; `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

fn sample(user_id: Uuid, name: &str, price: i32, start: NaiveDate) -> subscription::Model {
    subscription::Model {
        id: 0,
        service_name: name.to_string(),
        price,
        user_id,
        start_date: start,
        end_date: None,
    }
}

#[tokio::test]
async fn subscription_crud_roundtrip() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let user = Uuid::new_v4();
    let created =
        subscription::insert(&db, sample(user, "Netflix", 500, month(2025, 1))).await?;
    assert!(created.id > 0);
    assert_eq!(created.service_name, "Netflix");
    assert_eq!(created.price, 500);
    assert_eq!(created.user_id, user);
    assert_eq!(created.start_date, month(2025, 1));
    assert!(created.end_date.is_none());

    let found = subscription::find_by_id(&db, created.id).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let all = subscription::find_all(&db).await?;
    assert!(all.iter().any(|s| s.id == created.id));

    // full-row overwrite
    let mut updated = created.clone();
    updated.price = 600;
    updated.end_date = Some(month(2025, 6));
    let affected = subscription::update_full(&db, &updated).await?;
    assert_eq!(affected, 1);
    let found = subscription::find_by_id(&db, created.id).await?.expect("row exists");
    assert_eq!(found.price, 600);
    assert_eq!(found.end_date, Some(month(2025, 6)));

    let affected = subscription::delete(&db, created.id).await?;
    assert_eq!(affected, 1);
    let found = subscription::find_by_id(&db, created.id).await?;
    assert!(found.is_none());

    Ok(())
}

#[tokio::test]
async fn missing_id_is_a_noop() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let mut ghost = sample(Uuid::new_v4(), "Ghost", 10, month(2030, 1));
    ghost.id = i64::MAX;

    assert_eq!(subscription::update_full(&db, &ghost).await?, 0);
    assert_eq!(subscription::delete(&db, ghost.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn insert_rejects_invalid_fields() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let user = Uuid::new_v4();
    let res = subscription::insert(&db, sample(user, "", 100, month(2025, 1))).await;
    assert!(res.is_err());
    let res = subscription::insert(&db, sample(user, "Spotify", 0, month(2025, 1))).await;
    assert!(res.is_err());
    Ok(())
}

#[tokio::test]
async fn sum_filtered_composes_predicates() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let user = Uuid::new_v4();
    let a = subscription::insert(&db, sample(user, "Netflix", 100, month(2025, 1))).await?;
    let b = subscription::insert(&db, sample(user, "Spotify", 200, month(2025, 3))).await?;

    // inclusive range catching only the January record
    let total = subscription::sum_filtered(
        &db,
        Some(user),
        None,
        month(2025, 1),
        NaiveDate::from_ymd_opt(2025, 2, 28).expect("valid date"),
    )
    .await?;
    assert_eq!(total, 100);

    // case-insensitive substring
    let total =
        subscription::sum_filtered(&db, Some(user), Some("flix"), month(2025, 1), month(2025, 12))
            .await?;
    assert_eq!(total, 100);

    // both bounds are inclusive
    let total =
        subscription::sum_filtered(&db, Some(user), None, month(2025, 1), month(2025, 3)).await?;
    assert_eq!(total, 300);

    // empty set coalesces to 0
    let total =
        subscription::sum_filtered(&db, Some(user), None, month(1999, 1), month(1999, 12)).await?;
    assert_eq!(total, 0);

    subscription::delete(&db, a.id).await?;
    subscription::delete(&db, b.id).await?;
    Ok(())
}
