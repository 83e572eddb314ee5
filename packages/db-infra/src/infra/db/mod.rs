pub mod core;

pub use core::{
    build_admin_pool, build_app_pool, orchestrate_migration, orchestrate_migration_internal,
    sanitize_db_url,
};
