use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::core::SearchPattern;
use crate::models::{
    CandidateQuery, OwnerRef, TripListing, TripStatus, UsageAction, UsageCounters,
    CANCELLED_STATUSES,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL store for trip listings and usage counters
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a client whose pool connects on first use
    ///
    /// No connection is opened and no migrations are run here.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Load open trips whose destination contains the search pattern
    ///
    /// Any spelling in `CANCELLED_STATUSES` is excluded, matching
    /// `TripStatus::from_db`. The owner is joined in so that listings with a
    /// dangling `created_by` come back without one.
    pub async fn find_candidates(
        &self,
        candidates: &CandidateQuery,
    ) -> Result<Vec<TripListing>, PostgresError> {
        let query = r#"
            SELECT
                t.id, t.destination, t.start_date, t.end_date, t.budget,
                t.interests, t.travel_style, t.status,
                u.id AS owner_id, u.name AS owner_name, u.avatar AS owner_avatar
            FROM trips t
            LEFT JOIN users u ON u.id = t.created_by
            WHERE LOWER(TRIM(t.status)) <> ALL($3)
              AND t.destination ILIKE $1 ESCAPE '\'
            ORDER BY t.created_at, t.id
            LIMIT $2
        "#;

        let pattern = SearchPattern::new(&candidates.search_pattern);
        let rows = sqlx::query(query)
            .bind(pattern.to_like_pattern())
            .bind(candidates.limit as i64)
            .bind(CANCELLED_STATUSES.to_vec())
            .fetch_all(&self.pool)
            .await?;

        let trips = rows
            .iter()
            .map(trip_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tracing::debug!(
            "Loaded {} candidate trips for pattern {:?}",
            trips.len(),
            pattern.as_str()
        );

        Ok(trips)
    }

    /// Get usage counters for a user, zero when none were recorded
    pub async fn get_usage(&self, user_id: &str) -> Result<UsageCounters, PostgresError> {
        let query = r#"
            SELECT trips_created, trips_joined
            FROM usage_counters
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(counters_from_row(&row)?),
            None => Ok(UsageCounters::default()),
        }
    }

    /// Atomically count one `action` for a user if it stays within `limit`
    ///
    /// Returns the updated counters, or `None` when the limit was already
    /// reached. A `None` limit means unlimited.
    pub async fn try_increment_usage(
        &self,
        user_id: &str,
        action: UsageAction,
        limit: Option<u32>,
    ) -> Result<Option<UsageCounters>, PostgresError> {
        if limit == Some(0) {
            return Ok(None);
        }

        let column = match action {
            UsageAction::CreateTrip => "trips_created",
            UsageAction::JoinTrip => "trips_joined",
        };
        let limit = limit.map(i64::from).unwrap_or(i64::MAX);

        let query = format!(
            r#"
            INSERT INTO usage_counters (user_id, {column}, updated_at)
            VALUES ($1, 1, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                {column} = usage_counters.{column} + 1,
                updated_at = NOW()
            WHERE usage_counters.{column} < $2
            RETURNING trips_created, trips_joined
            "#,
            column = column
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_optional(&self.pool)
            .await?;

        let counters = row.as_ref().map(counters_from_row).transpose()?;

        match &counters {
            Some(c) => tracing::debug!("Recorded {} for {}: {:?}", action.as_str(), user_id, c),
            None => tracing::debug!("Quota reached for {} on {}", user_id, action.as_str()),
        }

        Ok(counters)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn trip_from_row(row: &PgRow) -> Result<TripListing, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let owner_id: Option<String> = row.try_get("owner_id")?;

    let owner = match owner_id {
        Some(id) => Some(OwnerRef {
            id,
            name: row.try_get("owner_name")?,
            avatar: row.try_get("owner_avatar")?,
        }),
        None => None,
    };

    Ok(TripListing {
        id: row.try_get("id")?,
        destination: row.try_get("destination")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        budget: row.try_get("budget")?,
        interests: row.try_get("interests")?,
        travel_style: row.try_get("travel_style")?,
        status: TripStatus::from_db(&status),
        owner,
    })
}

fn counters_from_row(row: &PgRow) -> Result<UsageCounters, sqlx::Error> {
    let created: i32 = row.try_get("trips_created")?;
    let joined: i32 = row.try_get("trips_joined")?;

    Ok(UsageCounters {
        trips_created: created.max(0) as u32,
        trips_joined: joined.max(0) as u32,
    })
}
