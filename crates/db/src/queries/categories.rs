use catalog::error::{CatalogError, CatalogResult};
use catalog::slug::compose_reference;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::{Category, CategoryListRow, Channel};

/// Idempotent get-or-create on the `(channel, parent, name)` triple.
///
/// On create, the reference is composed from the ancestry chain (parent
/// reference, or channel reference for roots). A unique violation raced in
/// by a concurrent import is absorbed by one re-select of the triple; a
/// violation that still has no matching row means the derived reference
/// collided with a different branch and is surfaced as a constraint error.
pub async fn upsert(
    conn: &mut PgConnection,
    channel: &Channel,
    parent: Option<&Category>,
    name: &str,
) -> CatalogResult<Category> {
    if let Some(parent) = parent {
        if parent.channel_id != channel.id {
            return Err(CatalogError::ConstraintViolation(format!(
                "parent {} belongs to another channel",
                parent.reference
            )));
        }
    }

    let parent_id = parent.map(|p| p.id.as_str());
    if let Some(existing) = get_by_triple(&mut *conn, &channel.id, parent_id, name).await? {
        return Ok(existing);
    }

    let reference = compose_reference(
        &channel.reference,
        parent.map(|p| p.reference.as_str()),
        name,
    );
    let id = format!("cat_{}", nanoid::nanoid!(12));

    let inserted = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (id, channel_id, parent_id, name, reference)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, channel_id, parent_id, name, reference, created_at, updated_at
        "#,
    )
    .bind(&id)
    .bind(&channel.id)
    .bind(parent_id)
    .bind(name)
    .bind(&reference)
    .fetch_one(&mut *conn)
    .await;

    match inserted {
        Ok(category) => Ok(category),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            get_by_triple(&mut *conn, &channel.id, parent_id, name)
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

/// Sibling lookup; `IS NOT DISTINCT FROM` makes the null parent (root)
/// case part of the same key.
async fn get_by_triple<'e>(
    executor: impl PgExecutor<'e>,
    channel_id: &str,
    parent_id: Option<&str>,
    name: &str,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, channel_id, parent_id, name, reference, created_at, updated_at
        FROM categories
        WHERE channel_id = $1
          AND parent_id IS NOT DISTINCT FROM $2
          AND name = $3
        "#,
    )
    .bind(channel_id)
    .bind(parent_id)
    .bind(name)
    .fetch_optional(executor)
    .await
}

pub async fn get_by_reference<'e>(
    executor: impl PgExecutor<'e>,
    reference: &str,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, channel_id, parent_id, name, reference, created_at, updated_at
        FROM categories
        WHERE reference = $1
        "#,
    )
    .bind(reference)
    .fetch_optional(executor)
    .await
}

/// Every category of one channel, name-ordered. One flat fetch feeds both
/// the channel detail payload and the recursive category detail shaping.
pub async fn list_for_channel(
    pool: &PgPool,
    channel_id: &str,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, channel_id, parent_id, name, reference, created_at, updated_at
        FROM categories
        WHERE channel_id = $1
        ORDER BY name
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<CategoryListRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryListRow>(
        r#"
        SELECT c.reference, c.name, ch.reference AS channel,
               p.reference AS parent_reference
        FROM categories c
        JOIN channels ch ON ch.id = c.channel_id
        LEFT JOIN categories p ON p.id = c.parent_id
        ORDER BY c.name, c.reference
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
