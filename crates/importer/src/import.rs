//! Reads a category CSV and materializes the tree under one channel.
//!
//! The whole import runs in a single transaction: a constraint violation on
//! any node rolls back everything. Every step is get-or-create, so re-running
//! an import over the same file is a no-op beyond the first run.

use std::io::Read;
use std::path::Path;

use sqlx::PgPool;
use tracing::warn;

use catalog::error::{CatalogError, CatalogResult};
use catalog::paths::split_segments;
use catalog::plan::ImportPlan;
use db::models::Category;

const PATH_COLUMN: &str = "Category";

#[derive(Debug)]
pub struct ImportSummary {
    pub channel_reference: String,
    /// Categories visited (created or already present) this run.
    pub categories: usize,
    /// Rows without usable path data.
    pub skipped_rows: usize,
}

pub async fn run(pool: &PgPool, channel_name: &str, file: &Path) -> CatalogResult<ImportSummary> {
    let reader = std::fs::File::open(file).map_err(|err| {
        CatalogError::Validation(format!("cannot open {}: {err}", file.display()))
    })?;
    let (paths, skipped_rows) = collect_paths(reader)?;
    let plan = ImportPlan::build(&paths);

    let mut tx = pool.begin().await?;

    let channel = db::queries::channels::upsert(&mut tx, channel_name).await?;

    let mut visited: Vec<Category> = Vec::with_capacity(plan.len());
    for node in plan.nodes() {
        let parent = node.parent.map(|index| visited[index].clone());
        let category =
            db::queries::categories::upsert(&mut tx, &channel, parent.as_ref(), &node.name)
                .await?;
        visited.push(category);
    }

    tx.commit().await?;

    Ok(ImportSummary {
        channel_reference: channel.reference,
        categories: visited.len(),
        skipped_rows,
    })
}

/// Pulls the `Category` column out of every record. Rows whose path yields
/// no segments are skipped and counted; a file without the column is
/// rejected before any storage work begins.
fn collect_paths<R: Read>(reader: R) -> CatalogResult<(Vec<String>, usize)> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| CatalogError::Validation(format!("unreadable csv header: {err}")))?;
    let column = headers
        .iter()
        .position(|h| h.trim() == PATH_COLUMN)
        .ok_or_else(|| {
            CatalogError::Validation(format!("csv file has no {PATH_COLUMN} column"))
        })?;

    let mut paths = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record
            .map_err(|err| CatalogError::Validation(format!("malformed csv row: {err}")))?;
        let path = record.get(column).unwrap_or("");
        if split_segments(path).is_empty() {
            warn!(row = row + 2, "skipping row without path data");
            skipped += 1;
            continue;
        }
        paths.push(path.to_string());
    }

    Ok((paths, skipped))
}
