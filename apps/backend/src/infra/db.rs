use db_infra::db::{validate_db_config, DbKind, RuntimeEnv};
use db_infra::{build_app_pool, orchestrate_migration, orchestrate_migration_internal};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Connect the application pool and bring the schema up to date.
///
/// In-memory SQLite exists only inside its single pooled connection, so it
/// is migrated through the app pool itself. Every other kind is migrated
/// with owner credentials before the app pool is opened.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    validate_db_config(env, kind)?;

    let conn = if kind == DbKind::SqliteMemory {
        let pool = build_app_pool(env, kind).await?;
        orchestrate_migration_internal(&pool, env, kind, MigrationCommand::Up).await?;
        pool
    } else {
        orchestrate_migration(env, kind, MigrationCommand::Up).await?;
        build_app_pool(env, kind).await?
    };

    info!(?env, ?kind, "Database ready");
    Ok(conn)
}
