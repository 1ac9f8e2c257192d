//! Seed script for development — creates the `cartoes` table and imports a
//! championship CSV export.
//!
//! Usage: `cargo run --bin seed -- [path/to/Cartoes-Campeonato.csv]`
//!
//! Requires the `DATABASE_URL` environment variable (reads .env).

use std::fs::File;

use anyhow::Context;
use cardstats::services::import;

const DEFAULT_CSV: &str = "Cartoes-Campeonato.csv";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = cardstats::config::AppConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = cardstats::db::create_pool(&config.database_url, 5, config.connect_timeout()).await?;

    // Run migrations first
    cardstats::db::migrate(&pool).await?;

    println!("=== Card statistics seed script ===");

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CSV.to_string());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cartoes")
        .fetch_one(&pool)
        .await?;
    if count > 0 {
        println!("[skip] Cards already exist ({count})");
        return Ok(());
    }

    let file = File::open(&path).with_context(|| format!("Cannot open {path}"))?;
    let batch = import::read_csv(file).with_context(|| format!("Cannot parse {path}"))?;
    let inserted = import::insert_batch(&pool, &batch.cards).await?;

    println!("[done] Imported {path}");
    println!("Records processed: {}", batch.processed());
    println!("Records inserted: {inserted}");
    println!("Records skipped (blank or invalid values): {}", batch.skipped);

    Ok(())
}
