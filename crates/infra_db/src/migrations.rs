//! Schema migrations
//!
//! The schema is applied idempotently at startup. Statements only create
//! objects that do not already exist, so re-running against a populated
//! database is safe.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DatabaseError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id              TEXT PRIMARY KEY,
        digital_token   TEXT NOT NULL,
        username        TEXT NOT NULL,
        password_hash   TEXT NOT NULL,
        full_name       TEXT NOT NULL,
        email           TEXT NOT NULL,
        phone           TEXT NOT NULL,
        date_of_birth   TEXT NOT NULL,
        age             INTEGER NOT NULL,
        gender          TEXT NOT NULL,
        address         TEXT NOT NULL,
        pan             TEXT NOT NULL,
        face_verified   INTEGER NOT NULL DEFAULT 0,
        retina_verified INTEGER NOT NULL DEFAULT 0,
        profile_photo   TEXT,
        status          TEXT NOT NULL,
        created_at      TEXT NOT NULL,
        last_login      TEXT
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_customers_username ON customers (username)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_customers_email ON customers (email)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_customers_pan ON customers (pan)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_customers_token ON customers (digital_token)",
    r#"
    CREATE TABLE IF NOT EXISTS policies (
        id                    TEXT PRIMARY KEY,
        policy_number         TEXT NOT NULL,
        customer_id           TEXT NOT NULL REFERENCES customers (id),
        plan_code             TEXT NOT NULL,
        cover_minor           INTEGER NOT NULL,
        currency              TEXT NOT NULL,
        annual_premium_minor  INTEGER NOT NULL,
        monthly_premium_minor INTEGER NOT NULL,
        nominee_id            TEXT,
        nominee_name          TEXT,
        nominee_relationship  TEXT,
        status                TEXT NOT NULL,
        applied_at            TEXT NOT NULL,
        activated_at          TEXT,
        cancelled_at          TEXT,
        cancel_reason         TEXT,
        lapsed_at             TEXT,
        lapse_reason          TEXT,
        created_at            TEXT NOT NULL,
        updated_at            TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_policies_number ON policies (policy_number)",
    "CREATE INDEX IF NOT EXISTS idx_policies_customer ON policies (customer_id)",
    r#"
    CREATE TABLE IF NOT EXISTS claims (
        id                   TEXT PRIMARY KEY,
        claim_number         TEXT NOT NULL,
        policy_id            TEXT NOT NULL REFERENCES policies (id),
        customer_id          TEXT NOT NULL REFERENCES customers (id),
        status               TEXT NOT NULL,
        claim_type           TEXT NOT NULL,
        loss_date            TEXT NOT NULL,
        claimed_amount_minor INTEGER NOT NULL,
        currency             TEXT NOT NULL,
        description          TEXT NOT NULL,
        documents            TEXT NOT NULL DEFAULT '[]',
        decision_note        TEXT,
        created_at           TEXT NOT NULL,
        updated_at           TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_claims_number ON claims (claim_number)",
    "CREATE INDEX IF NOT EXISTS idx_claims_customer ON claims (customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_claims_policy ON claims (policy_id)",
    r#"
    CREATE TABLE IF NOT EXISTS reports (
        id              TEXT PRIMARY KEY,
        customer_id     TEXT NOT NULL REFERENCES customers (id),
        category        TEXT NOT NULL,
        subject         TEXT NOT NULL,
        description     TEXT NOT NULL,
        status          TEXT NOT NULL,
        resolution_note TEXT,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reports_customer ON reports (customer_id)",
];

/// Applies the schema to the given pool
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    }
    info!("schema migrations applied");
    Ok(())
}
