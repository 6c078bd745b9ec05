use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use cl_core::{Result, SnapshotStorage};
use cl_scraper::{ScrapeConfig, ScrapeManager};
use cl_storage::JsonSnapshot;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Days of articles considered fresh; every run re-scans the whole window.
const WINDOW_DAYS: i64 = 14;

const SNAPSHOT_FILE: &str = "kanto_images.json";

/// Scrape Kanto City League Top8 results and rewrite the JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "cl_top8", version, about)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let since = Local::now().date_naive() - Duration::days(WINDOW_DAYS);
    info!(%since, "scraping the recent window");

    let manager = ScrapeManager::new(ScrapeConfig::default())?;
    let outcome = manager.run(since).await?;

    for (url, reason) in &outcome.skipped {
        info!(url = %url, %reason, "skipped");
    }

    let store = JsonSnapshot::new(SNAPSHOT_FILE);
    store.save_all(&outcome.records).await?;

    let latest_items = outcome.records.iter().map(|r| r.article_date).max();
    println!("updated {} items", outcome.records.len());
    println!("latest_seen_article_date: {}", format_date(outcome.latest_seen));
    println!("latest_items_date: {}", format_date(latest_items));

    Ok(())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "(none)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_dates_print_as_none() {
        assert_eq!(format_date(None), "(none)");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 3, 10)),
            "2024-03-10"
        );
    }
}
