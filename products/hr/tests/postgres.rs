mod common;

use common::{SCHEMA_SQL, ann};
use products_hr::{Employee, EmployeeStore, HrError};
use sea_orm::{ConnectionTrait, Database};

async fn setup_pg() -> Option<EmployeeStore> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping Postgres employee tests: TEST_DATABASE_URL not set");
            return None;
        }
    };
    let conn = Database::connect(&url).await.ok()?;
    conn.execute_unprepared("DROP TABLE IF EXISTS employees")
        .await
        .ok()?;
    conn.execute_unprepared(SCHEMA_SQL).await.ok()?;
    Some(EmployeeStore::new(conn))
}

#[tokio::test]
async fn postgres_round_trip_and_errors() {
    let Some(store) = setup_pg().await else {
        return;
    };

    store.insert(&ann()).await.unwrap();
    assert_eq!(store.get_by_id(1).await.unwrap(), ann());

    let err = store.insert(&ann()).await.unwrap_err();
    assert!(matches!(err, HrError::DuplicateKey(1)), "unexpected: {err:?}");

    let changes = Employee::new(1, "Ann Lee", "ann@x.com", 60_000.0, "Eng");
    store.update(1, &changes).await.unwrap();
    assert_eq!(store.get_by_id(1).await.unwrap(), changes);
    assert!(matches!(
        store.update(2, &changes).await.unwrap_err(),
        HrError::NotFound(2)
    ));

    // LIKE is case-sensitive under the default Postgres collation.
    assert_eq!(store.search("Lee").await.unwrap().len(), 1);
    assert!(store.search("lee").await.unwrap().is_empty());

    assert!(store.delete(1).await.unwrap());
    assert!(!store.delete(1).await.unwrap());
}
