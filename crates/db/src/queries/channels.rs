use catalog::error::{CatalogError, CatalogResult};
use catalog::slug::{slugify, MAX_REFERENCE_LEN};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::Channel;

/// Idempotent get-or-create keyed on the reference derived from `name`.
///
/// Takes a connection rather than a pool so the importer can run it inside
/// its transaction. A unique violation from a concurrent create is absorbed
/// by one re-select before it is surfaced.
pub async fn upsert(conn: &mut PgConnection, name: &str) -> CatalogResult<Channel> {
    let reference = slugify(name, MAX_REFERENCE_LEN);
    if reference.is_empty() {
        return Err(CatalogError::Validation(format!(
            "channel name {name:?} yields an empty reference"
        )));
    }

    if let Some(existing) = get_by_reference(&mut *conn, &reference).await? {
        return Ok(existing);
    }

    let id = format!("ch_{}", nanoid::nanoid!(12));
    let inserted = sqlx::query_as::<_, Channel>(
        r#"
        INSERT INTO channels (id, name, reference)
        VALUES ($1, $2, $3)
        RETURNING id, name, reference, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(&reference)
    .fetch_one(&mut *conn)
    .await;

    match inserted {
        Ok(channel) => Ok(channel),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Lost a benign race with a concurrent import.
            get_by_reference(&mut *conn, &reference)
                .await?
                .ok_or_else(|| {
                    CatalogError::ConstraintViolation(format!(
                        "could not allocate unique reference {reference}"
                    ))
                })
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn get_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: &str,
) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, name, reference, created_at, updated_at
        FROM channels
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_reference<'e>(
    executor: impl PgExecutor<'e>,
    reference: &str,
) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, name, reference, created_at, updated_at
        FROM channels
        WHERE reference = $1
        "#,
    )
    .bind(reference)
    .fetch_optional(executor)
    .await
}

pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, name, reference, created_at, updated_at
        FROM channels
        ORDER BY name
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM channels")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
