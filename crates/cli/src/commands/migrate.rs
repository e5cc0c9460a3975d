//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! devrewoh-cli migrate
//! ```
//!
//! Applies the migrations embedded from `crates/site/migrations/` to the
//! database named by `DATABASE_URL`. Already-applied migrations are skipped.

use devrewoh_site::db::MIGRATOR;

use super::{CommandError, connect};

/// Run site database migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!(
        available = MIGRATOR.iter().count(),
        "Running site migrations..."
    );
    MIGRATOR.run(&pool).await?;

    pool.close().await;
    tracing::info!("Site migrations complete!");
    Ok(())
}
