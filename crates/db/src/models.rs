use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Top-level namespace a seller publishes products into. One row per
/// distinct name; `reference` is the unique slug derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Node of a channel-scoped category tree. `parent_id` is null for roots
/// and always points at a category of the same channel.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: String,
    pub channel_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub reference: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Single-level list row for the category list endpoints: the channel and
/// parent are flattened to their references.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryListRow {
    pub reference: String,
    pub name: String,
    pub channel: String,
    pub parent_reference: Option<String>,
}
