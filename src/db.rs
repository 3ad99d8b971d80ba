use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::{migrate::Migrator, postgres::PgPoolOptions};

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create the shared Postgres pool. Everything else borrows connections from it.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Wrap an existing pool in a SeaORM connection without opening a second pool.
pub fn orm_from_pool(pool: DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
