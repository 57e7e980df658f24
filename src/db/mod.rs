//! # Database — PostgreSQL Storage Layer
//!
//! Provides async database operations for voter records via `sqlx::PgPool`.
//!
//! ## Schema
//!
//! - `voters`: id, name, voter_no (unique), address, created_at
//!
//! ## Module Structure
//!
//! - [`voters`] — Voter record operations (list, search, create, lookup)
//!
//! ## Error Taxonomy
//!
//! Voter operations return [`VoterStoreError`] so callers can map failures to
//! distinct HTTP statuses: `Validation` (missing required fields),
//! `Conflict` (duplicate voter number), `Database` (everything else).
//! Connection bootstrap and the health probe stay on `anyhow::Result`.

mod voters;

use anyhow::Result;
use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Registry schema, applied by the `init-db` subcommand and the test harness.
const SCHEMA_SQL: &str = include_str!("../../migrations/001_create_voters.sql");

// ── Voter types ─────────────────────────────────────────────────

/// A persisted voter record. Serializes in the camelCase wire format
/// (`voterNo`, `createdAt`); columns stay snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VoterRecord {
    pub id: i64,
    pub name: String,
    pub voter_no: String,
    pub address: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Input for voter registration. All three fields are required.
#[derive(Debug, Clone, Default)]
pub struct NewVoter {
    pub name: String,
    pub voter_no: String,
    pub address: String,
}

impl NewVoter {
    /// Presence check: every field must be non-empty after trimming.
    pub fn validate(&self) -> Result<(), VoterStoreError> {
        if self.name.trim().is_empty()
            || self.voter_no.trim().is_empty()
            || self.address.trim().is_empty()
        {
            return Err(VoterStoreError::Validation);
        }
        Ok(())
    }
}

/// Failure categories for voter operations.
#[derive(Debug, thiserror::Error)]
pub enum VoterStoreError {
    /// A required field is missing or empty.
    #[error("name, voterNo and address are required")]
    Validation,

    /// The voter number is already registered (unique-constraint violation).
    #[error("voterNo already registered")]
    Conflict,

    /// Any other storage failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Build an ILIKE pattern that matches `term` as a literal substring.
///
/// `%`, `_` and `\` are pattern metacharacters to the storage engine; escaping
/// them keeps the search a plain case-insensitive substring match, independent
/// of what the caller typed.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ── Database struct and connection ──────────────────────────────

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL using the provided database URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Database { pool })
    }

    /// Create a pool without touching the network. Connections are established
    /// on first use, so the server can come up before the database does.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy(database_url)?;
        Ok(Database { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the registry schema. Idempotent (`CREATE TABLE IF NOT EXISTS`),
    /// so it is safe to run against an already-initialized database.
    pub async fn apply_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Health check: execute `SELECT 1` to verify database connectivity.
    ///
    /// Used by the `/readyz` readiness probe. Returns `Ok(())` if the
    /// database responds, or an error if the connection is broken.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────
