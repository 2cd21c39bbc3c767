use async_trait::async_trait;
use jiff::Timestamp;
use shortlink_core::repository::Result;
use shortlink_core::{Link, LinkId, LinkRepository, ReadLinkRepository, StorageError};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;
use tracing::debug;

/// Schema for the `links` table.
pub const SCHEMA: &str = include_str!("../ddl/postgres/links.sql");

/// PostgreSQL implementation of the repository contract.
///
/// `created_at` is stored as `TIMESTAMPTZ` and exchanged with the database
/// as microseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository from an existing PostgreSQL connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new PostgreSQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `links` table if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("links schema is in place");
        Ok(())
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn row_to_link(row: &PgRow) -> Result<Link> {
    let id: String = row.try_get("id").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at_us").map_err(map_sqlx_error)?;

    Ok(Link::with_created_at(
        LinkId::new_unchecked(id),
        original_url,
        parse_created_at(created_at)?,
    ))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadLinkRepository for PostgresRepository {
    async fn get(&self, id: &LinkId) -> Result<Option<Link>> {
        let row = sqlx::query(
            r#"
            SELECT id,
                   original_url,
                   (EXTRACT(EPOCH FROM created_at) * 1000000)::BIGINT AS created_at_us
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_link).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Link>> {
        let rows = sqlx::query(
            r#"
            SELECT id,
                   original_url,
                   (EXTRACT(EPOCH FROM created_at) * 1000000)::BIGINT AS created_at_us
            FROM links
            ORDER BY created_at DESC, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_link).collect()
    }
}

#[async_trait]
impl LinkRepository for PostgresRepository {
    async fn create(&self, link: &Link) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (id, original_url, created_at)
            VALUES ($1, $2, TIMESTAMPTZ 'epoch' + $3::BIGINT * INTERVAL '1 microsecond')
            "#,
        )
        .bind(link.id.as_str())
        .bind(&link.original_url)
        .bind(link.created_at.as_microsecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(link.id.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, id: &LinkId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
