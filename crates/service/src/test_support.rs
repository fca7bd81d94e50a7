#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connect and migrate. Errors are returned, not unwrapped, so tests on a
/// machine without Postgres can skip instead of failing.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    MIGRATED
        .get_or_try_init(|| async {
            let cfg = configs::DatabaseConfig::from_file_or_env();
            let db = connect_with_config(&cfg).await?;
            migration::Migrator::up(&db, None).await?;
            drop(db);
            Ok::<(), anyhow::Error>(())
        })
        .await?;

    // Fresh connection for the current test's runtime
    let mut cfg = configs::DatabaseConfig::from_file_or_env();
    cfg.max_connections = cfg.max_connections.max(20);
    cfg.min_connections = 1;
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    Ok(db)
}

/// Skip guard shared by the DB-backed tests.
#[macro_export]
macro_rules! require_db {
    () => {{
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        match $crate::test_support::get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        }
    }};
}
