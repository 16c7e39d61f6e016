use platform_db::{DatabaseSettings, DbError, connect, ping};

#[tokio::test]
async fn connects_and_pings_sqlite() {
    let pool = connect(&DatabaseSettings::new("sqlite::memory:"))
        .await
        .expect("sqlite pool");
    ping(&pool).await.expect("ping");
}

#[tokio::test]
async fn unknown_driver_is_a_connect_error() {
    let err = connect(&DatabaseSettings::new("nosuchdb://localhost/hr"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Connect(_)), "unexpected: {err:?}");
}

#[tokio::test]
async fn unusable_credentials_url_is_rejected_before_connecting() {
    let settings = DatabaseSettings::new("not a url").with_credentials("hr", "pw");
    let err = connect(&settings).await.unwrap_err();
    assert!(matches!(err, DbError::InvalidUrl(_)), "unexpected: {err:?}");
}
