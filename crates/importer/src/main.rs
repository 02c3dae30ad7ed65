use std::path::PathBuf;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod import;

use catalog::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "catalog-import")]
#[command(about = "Imports a channel's category tree from a CSV file", version)]
struct Args {
    /// Display name of the channel, e.g. "Amazon".
    #[arg(long)]
    channel: String,
    /// CSV file with a `Category` column of slash-delimited paths.
    file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let args = Args::parse();
    let settings = Settings::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    let summary = import::run(&pool, &args.channel, &args.file).await?;

    info!(
        channel = %summary.channel_reference,
        categories = summary.categories,
        skipped_rows = summary.skipped_rows,
        "import finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "catalog-import",
            "--channel",
            "Amazon",
            "categories.csv",
        ])
        .unwrap();

        assert_eq!(args.channel, "Amazon");
        assert_eq!(args.file, PathBuf::from("categories.csv"));
    }

    #[test]
    fn test_args_require_channel() {
        let result = Args::try_parse_from(["catalog-import", "categories.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_require_file() {
        let result = Args::try_parse_from(["catalog-import", "--channel", "Amazon"]);
        assert!(result.is_err());
    }
}
