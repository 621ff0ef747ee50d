use std::collections::HashSet;

use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::database::pool::{create_pool, run_migrations};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, NewCandidate};

/// Relational store for candidates and the job offers they reference.
///
/// Email uniqueness is enforced by the `UNIQUE` constraint on
/// `candidates.email`, so concurrent inserts of the same address cannot both
/// succeed no matter what the caller checked beforehand.
#[derive(Clone)]
pub struct CandidateStore {
    pool: SqlitePool,
}

impl CandidateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the pool and brings the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = create_pool(config).await?;
        run_migrations(&pool).await?;
        tracing::info!(url = %config.url, "Candidate store ready");
        Ok(Self::new(pool))
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Returns the subset of `ids` that exist in `job_offers`.
    pub async fn find_offer_ids(&self, ids: &[i64]) -> Result<HashSet<i64>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("SELECT id FROM job_offers WHERE id IN ({})", placeholders);

        let mut statement = sqlx::query_scalar::<_, i64>(&query);
        for id in ids {
            statement = statement.bind(id);
        }
        let found = statement.fetch_all(&self.pool).await?;

        Ok(found.into_iter().collect())
    }

    /// Inserts a candidate and returns its assigned id.
    ///
    /// A clash on the email constraint surfaces as [`Error::DuplicateEmail`];
    /// every other database failure as [`Error::StorageFailure`].
    pub async fn insert_candidate(&self, candidate: &NewCandidate) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO candidates
                (first_name, last_name, email, phone, experience_years, notes, status, consent_date, offers)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&candidate.first_name)
        .bind(&candidate.last_name)
        .bind(&candidate.email)
        .bind(&candidate.phone)
        .bind(candidate.experience_years)
        .bind(&candidate.notes)
        .bind(&candidate.status)
        .bind(&candidate.consent_date)
        .bind(Json(&candidate.offers))
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(Error::DuplicateEmail)
            }
            Err(other) => Err(Error::StorageFailure(other)),
        }
    }

    pub async fn list_candidates(&self, limit: i64, offset: i64) -> Result<Vec<Candidate>> {
        let items = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, first_name, last_name, email, phone, experience_years, notes, status, consent_date, offers
            FROM candidates
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn count_candidates(&self) -> Result<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM candidates")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}
