use std::collections::HashSet;

use chrono::NaiveDate;
use cl_core::{Result, ScrapeOutcome, SkipReason};
use tracing::{debug, info, warn};

use crate::article;
use crate::config::ScrapeConfig;
use crate::fetch::{Fetch, HttpFetcher};
use crate::listing::ListingCrawler;

/// Drives one scrape run: listing crawl, then a sequential fold over the
/// discovered article URLs. One article's failure never aborts the run.
pub struct ScrapeManager {
    fetcher: Box<dyn Fetch>,
    config: ScrapeConfig,
}

impl ScrapeManager {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout)?;
        Ok(Self {
            fetcher: Box::new(fetcher),
            config,
        })
    }

    pub fn with_fetcher(fetcher: Box<dyn Fetch>, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// Collect every whitelisted store record published on or after `since`.
    ///
    /// Only a failure to reach the listing on first contact is fatal. Every
    /// per-article problem lands in `ScrapeOutcome::skipped` instead, and
    /// `latest_seen` advances on every article whose date was obtainable,
    /// whether or not it produced records.
    pub async fn run(&self, since: NaiveDate) -> Result<ScrapeOutcome> {
        let crawler = ListingCrawler::new(self.fetcher.as_ref(), &self.config);
        let urls = crawler.crawl().await?;
        info!(candidates = urls.len(), %since, "starting article pass");

        let mut outcome = ScrapeOutcome::default();
        let mut dup_keys: HashSet<(String, String)> = HashSet::new();

        for url in urls {
            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %url, error = %e, "article fetch failed; skipping");
                    outcome.skipped.push((url, SkipReason::FetchFailed(e.to_string())));
                    continue;
                }
            };
            tokio::time::sleep(self.config.polite_delay).await;

            let output = article::process_article(&html, &url, since, &self.config, &mut dup_keys);
            match output.date {
                None => {
                    debug!(url = %url, "no parseable article date");
                    outcome.skipped.push((url.clone(), SkipReason::NoDate));
                }
                Some(date) => {
                    outcome.latest_seen = Some(match outcome.latest_seen {
                        Some(current) => current.max(date),
                        None => date,
                    });
                    if date < since {
                        debug!(url = %url, %date, "article predates the cutoff");
                        outcome.skipped.push((url.clone(), SkipReason::OutOfWindow(date)));
                    }
                }
            }

            if !output.records.is_empty() {
                debug!(url = %url, records = output.records.len(), "extracted records");
            }
            outcome.records.extend(output.records);
        }

        info!(
            records = outcome.records.len(),
            skipped = outcome.skipped.len(),
            latest_seen = ?outcome.latest_seen,
            "scrape run finished"
        );
        Ok(outcome)
    }
}
