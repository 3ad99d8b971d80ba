mod common;

use common::{classic_tee, money, order_request};
use sea_orm::{ConnectionTrait, Statement};
use storefront_api::{
    db::{create_pool, orm_from_pool, run_migrations},
    error::AppError,
    services::order_service,
    state::AppState,
    store::{DocumentStore, PgStore},
};

// Same workflow as the in-memory tests, against a real database.
#[tokio::test]
async fn order_commit_against_postgres() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the Postgres flow test."
            );
            return Ok(());
        }
    };

    let pool = create_pool(&database_url, 5).await?;
    run_migrations(&pool).await?;

    let orm = orm_from_pool(pool.clone());
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        r#"TRUNCATE TABLE "order", product"#,
    ))
    .await?;

    let store = PgStore::new(orm);
    let state = AppState::new(store.clone());

    let tee_id = store.insert_product(classic_tee(5, true)).await?;

    let order = order_service::place_order(
        &state,
        order_request(vec![(tee_id.to_string(), 3)], "5.00"),
    )
    .await?;
    assert_eq!(order.subtotal, money("59.97"));
    assert_eq!(order.total, money("64.97"));
    assert_eq!(store.find_product(tee_id).await?.unwrap().stock_qty, 2);

    // stock is now 2: a second order for 3 must fail and change nothing
    let err = order_service::place_order(
        &state,
        order_request(vec![(tee_id.to_string(), 3)], "0"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(store.find_product(tee_id).await?.unwrap().stock_qty, 2);
    assert_eq!(store.list_orders(50).await?.len(), 1);

    let fetched = store.find_order(order.id).await?.expect("order persisted");
    assert_eq!(fetched.items, order.items);

    pool.close().await;
    Ok(())
}
