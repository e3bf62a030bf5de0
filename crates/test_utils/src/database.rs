//! Database test helpers
//!
//! Tests run against an in-memory SQLite database. Because the in-memory
//! database lives and dies with its connection, the pool is capped at a
//! single connection.

use infra_db::{create_pool, run_migrations, DatabaseConfig, DatabasePool};

/// Creates a fresh, fully-migrated in-memory database
pub async fn test_pool() -> DatabasePool {
    let config = DatabaseConfig::new("sqlite::memory:").max_connections(1);
    let pool = create_pool(config)
        .await
        .expect("in-memory pool should always connect");
    run_migrations(&pool)
        .await
        .expect("migrations should apply to an empty database");
    pool
}
