use storefront_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    services::product_service::seed_catalog,
    state::AppState,
    store::PgStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let state = AppState::new(PgStore::new(orm_from_pool(pool.clone())));
    let report = seed_catalog(&state).await?;

    pool.close().await;
    println!("{} ({} products)", report.message, report.count);
    Ok(())
}
