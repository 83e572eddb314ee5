use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, trace, warn};

use crate::config::db::{
    build_session_statements, make_conn_spec, validate_db_config, DbKind, DbOwner, RuntimeEnv,
};
use crate::error::DbInfraError;

const APP_NAME: &str = "example-decisions";

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

async fn connect_with(
    db_kind: DbKind,
    url: String,
    max_connections: u32,
) -> Result<DatabaseConnection, DbInfraError> {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match db_kind {
        // Every pooled connection to `sqlite::memory:` would be a separate database.
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::SqliteFile => {
            opt.min_connections(1).max_connections(max_connections.min(4));
        }
        DbKind::Postgres => {
            opt.min_connections(1).max_connections(max_connections);
        }
    }

    let pool = if matches!(db_kind, DbKind::Postgres) {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt).await.map_err(|e| DbInfraError::Connect {
                        message: format!("failed to connect to Postgres: {e}"),
                    })
                }
            },
            5,
            500,
        )
        .await?
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to connect to SQLite: {e}"),
            })?
    };

    apply_db_settings(&pool, db_kind).await?;
    Ok(pool)
}

/// Single-connection pool with owner credentials, used for migrations.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::Owner)?;
    connect_with(db_kind, url, 1).await
}

/// Application pool with app credentials.
pub async fn build_app_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;
    info!(
        engine = get_db_engine(db_kind),
        url = %sanitize_db_url(&url),
        "connecting application pool"
    );
    connect_with(db_kind, url, 10).await
}

/// Sanitize database URL by masking password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.split_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if auth_part[..colon_pos].contains("//") => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    let expected_count = Migrator::migrations().len();

    let current_count = match Migrator::get_applied_migrations(conn).await {
        Ok(migrations) => migrations.len(),
        Err(DbErr::Exec(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::Migration {
                message: format!("failed to get applied migrations: {e}"),
            });
        }
    };

    let is_up_to_date = current_count == expected_count;
    trace!(
        fastpath = if is_up_to_date { "hit" } else { "miss" },
        current_count,
        expected_count
    );
    Ok(is_up_to_date)
}

/// Connect with owner credentials and run a migration command.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    validate_db_config(env, db_kind)?;
    let admin_pool = build_admin_pool(env, db_kind).await?;
    orchestrate_migration_internal(&admin_pool, env, db_kind, command).await
}

/// Run a migration command on an existing pool.
///
/// In-memory SQLite must migrate through the pool the application will use.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(
        "migrate=start env={:?} db_kind={:?} engine={}",
        env,
        db_kind,
        get_db_engine(db_kind)
    );

    if matches!(command, MigrationCommand::Up) && fast_path_schema_check(pool).await? {
        info!("migrate=skipped up_to_date=true");
        return Ok(());
    }

    if matches!(db_kind, DbKind::SqliteFile) {
        setup_sqlite_file_prerequisites(pool).await?;
    }

    migrate(pool, command.clone())
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        })?;

    if matches!(
        command,
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
    ) {
        let expected_count = Migrator::migrations().len();
        let applied_count = Migrator::get_applied_migrations(pool)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        if applied_count != expected_count {
            return Err(DbInfraError::Migration {
                message: format!(
                    "Migration verification failed: expected {expected_count} migrations, but {applied_count} were applied (env={env:?}, db_kind={db_kind:?})"
                ),
            });
        }
    }

    info!("migrate=done");
    Ok(())
}

async fn apply_db_settings(pool: &DatabaseConnection, db_kind: DbKind) -> Result<(), DbInfraError> {
    let backend = sea_orm::DatabaseBackend::from(db_kind);
    for stmt in build_session_statements(db_kind, APP_NAME) {
        pool.execute(sea_orm::Statement::from_string(backend, stmt))
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to apply db settings: {e}"),
            })?;
    }
    Ok(())
}

async fn setup_sqlite_file_prerequisites(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    use sea_orm::{DatabaseBackend, Statement};

    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        pool.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await
            .map_err(|e| DbInfraError::Connect {
                message: format!("failed to apply '{pragma}': {e}"),
            })?;
    }
    Ok(())
}
