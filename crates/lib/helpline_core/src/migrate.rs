//! Database migration support.
//!
//! Embeds and runs SQL migrations from `helpline_core/migrations/`, which
//! create the `chat_logs` collection table.

use sqlx::PgPool;

/// Run all embedded database migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
