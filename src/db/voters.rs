//! Voter record operations — list, search, create, and lookup.
//!
//! This module handles all database operations for the `voters` table. The
//! search path binds a single escaped pattern into an `ILIKE` disjunction over
//! the three text columns; everything else is a straight parameterized query.
//! Records are append-only: there is no update or delete.

use super::{like_pattern, Database, NewVoter, VoterRecord, VoterStoreError};

impl Database {
    /// List every voter record in insertion (id) order.
    pub async fn list_voters(&self) -> Result<Vec<VoterRecord>, VoterStoreError> {
        let rows = sqlx::query_as::<_, VoterRecord>(
            "SELECT id, name, voter_no, address, created_at FROM voters ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Case-insensitive substring search across name, voter number and
    /// address. A term matching nothing yields an empty vec, not an error.
    /// An empty term matches every record.
    pub async fn search_voters(&self, term: &str) -> Result<Vec<VoterRecord>, VoterStoreError> {
        let rows = sqlx::query_as::<_, VoterRecord>(
            "SELECT id, name, voter_no, address, created_at FROM voters
             WHERE name ILIKE $1 OR voter_no ILIKE $1 OR address ILIKE $1
             ORDER BY id",
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Register a new voter and return the persisted record with its
    /// generated id and timestamp.
    ///
    /// Validates field presence first. A duplicate voter number surfaces as
    /// [`VoterStoreError::Conflict`] — the unique constraint resolves races
    /// between concurrent registrations, so exactly one of two identical
    /// creates succeeds. The insert is a single statement: it writes one row
    /// or nothing.
    pub async fn create_voter(&self, new: &NewVoter) -> Result<VoterRecord, VoterStoreError> {
        new.validate()?;
        sqlx::query_as::<_, VoterRecord>(
            "INSERT INTO voters (name, voter_no, address)
             VALUES ($1, $2, $3)
             RETURNING id, name, voter_no, address, created_at",
        )
        .bind(&new.name)
        .bind(&new.voter_no)
        .bind(&new.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                VoterStoreError::Conflict
            } else {
                VoterStoreError::Database(e)
            }
        })
    }

    /// Look up a single voter by id. `None` for an unknown id.
    pub async fn get_voter(&self, id: i64) -> Result<Option<VoterRecord>, VoterStoreError> {
        let row = sqlx::query_as::<_, VoterRecord>(
            "SELECT id, name, voter_no, address, created_at FROM voters WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Total number of registered voters (feeds the registry-size gauge).
    pub async fn count_voters(&self) -> Result<i64, VoterStoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM voters")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
