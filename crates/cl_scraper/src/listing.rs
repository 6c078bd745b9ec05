use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::config::ScrapeConfig;
use crate::fetch::Fetch;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Walks the paginated category listing and accumulates results-article
/// URLs, deduplicated, in first-seen order.
pub struct ListingCrawler<'a> {
    fetcher: &'a dyn Fetch,
    config: &'a ScrapeConfig,
}

impl<'a> ListingCrawler<'a> {
    pub fn new(fetcher: &'a dyn Fetch, config: &'a ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    /// Follows the next-page affordance until it disappears, a page fails,
    /// or `max_list_pages` fetches have been spent. A failure on the very
    /// first page is fatal; later failures just stop pagination early.
    pub async fn crawl(&self) -> cl_core::Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();
        let mut page_url = self.config.list_url.clone();
        let mut pages_fetched = 0usize;

        loop {
            if let Some(max) = self.config.max_list_pages {
                if pages_fetched >= max {
                    break;
                }
            }

            let html = match self.fetcher.fetch(&page_url).await {
                Ok(html) => html,
                Err(e) if pages_fetched == 0 => return Err(e),
                Err(e) => {
                    warn!(url = %page_url, error = %e, "listing page fetch failed; stopping pagination");
                    break;
                }
            };
            pages_fetched += 1;
            tokio::time::sleep(self.config.polite_delay).await;

            // scraper::Html is not Send; keep it out of await scope.
            let next = {
                let doc = Html::parse_document(&html);
                for link in article_links(&doc, &page_url, self.config) {
                    if seen.insert(link.clone()) {
                        urls.push(link);
                    }
                }
                next_page_url(&doc, &page_url, self.config)
            };

            match next {
                Some(next_url) => page_url = next_url,
                None => break,
            }
        }

        debug!(pages = pages_fetched, articles = urls.len(), "listing crawl finished");
        Ok(urls)
    }
}

/// Links whose destination matches the archive path and whose visible text
/// carries the results-summary marker phrase.
fn article_links(doc: &Html, base: &str, config: &ScrapeConfig) -> Vec<String> {
    let mut out = Vec::new();
    for anchor in doc.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(&config.archive_path) {
            continue;
        }
        let text = anchor.text().collect::<String>();
        if !text.contains(&config.article_marker) {
            continue;
        }
        if let Some(resolved) = resolve(base, href) {
            out.push(resolved);
        }
    }
    out
}

/// Destination of the next-page affordance, resolved against the current
/// page. `None` when absent or unresolvable, which ends the walk.
fn next_page_url(doc: &Html, base: &str, config: &ScrapeConfig) -> Option<String> {
    doc.select(&ANCHOR).find_map(|anchor| {
        let text = anchor.text().collect::<String>();
        if !config.next_page_labels.iter().any(|label| text.contains(label.as_str())) {
            return None;
        }
        let href = anchor.value().attr("href")?;
        resolve(base, href)
    })
}

fn resolve(base: &str, href: &str) -> Option<String> {
    Url::parse(base).ok()?.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://pokecabook.com/archives/category/tournament/city-league";

    fn config() -> ScrapeConfig {
        ScrapeConfig {
            polite_delay: std::time::Duration::ZERO,
            ..ScrapeConfig::default()
        }
    }

    #[test]
    fn keeps_only_marked_archive_links() {
        let doc = Html::parse_document(
            r#"<body>
                <a href="/archives/100">シティリーグ ベスト16デッキまとめ 3/10</a>
                <a href="/archives/101">他の記事</a>
                <a href="/about">ベスト16デッキまとめ</a>
                <a href="https://pokecabook.com/archives/102">シティリーグ ベスト16デッキまとめ 3/9</a>
            </body>"#,
        );

        let links = article_links(&doc, BASE, &config());
        assert_eq!(
            links,
            vec![
                "https://pokecabook.com/archives/100",
                "https://pokecabook.com/archives/102",
            ]
        );
    }

    #[test]
    fn next_page_resolves_relative_href_against_current_page() {
        let doc = Html::parse_document(
            r#"<body><a href="/archives/category/tournament/city-league/page/2">次のページ</a></body>"#,
        );

        assert_eq!(
            next_page_url(&doc, BASE, &config()),
            Some("https://pokecabook.com/archives/category/tournament/city-league/page/2".to_string())
        );
    }

    #[test]
    fn missing_next_page_ends_the_walk() {
        let doc = Html::parse_document(r#"<body><a href="/archives/100">ベスト16デッキまとめ</a></body>"#);
        assert_eq!(next_page_url(&doc, BASE, &config()), None);
    }

    mod crawl {
        use super::*;
        use crate::fetch::testing::MapFetcher;

        const PAGE2: &str = "https://pokecabook.com/archives/category/tournament/city-league/page/2";

        fn listing_page(links: &str, next_href: Option<&str>) -> String {
            let next = next_href
                .map(|href| format!(r#"<a href="{}">次のページ</a>"#, href))
                .unwrap_or_default();
            format!("<body>{}{}</body>", links, next)
        }

        #[tokio::test]
        async fn budget_of_one_means_one_listing_fetch_even_with_a_next_page() {
            let fetcher = MapFetcher::new([(
                BASE,
                listing_page(
                    r#"<a href="/archives/100">ベスト16デッキまとめ</a>"#,
                    Some("/archives/category/tournament/city-league/page/2"),
                ),
            )]);
            let config = ScrapeConfig {
                max_list_pages: Some(1),
                ..config()
            };

            let urls = ListingCrawler::new(&fetcher, &config).crawl().await.unwrap();
            assert_eq!(urls, vec!["https://pokecabook.com/archives/100"]);
            assert_eq!(fetcher.call_count(), 1);
        }

        #[tokio::test]
        async fn follows_pagination_and_deduplicates_across_pages() {
            let fetcher = MapFetcher::new([
                (
                    BASE,
                    listing_page(
                        r#"<a href="/archives/100">ベスト16デッキまとめ 3/10</a>
                           <a href="/archives/101">ベスト16デッキまとめ 3/9</a>"#,
                        Some("/archives/category/tournament/city-league/page/2"),
                    ),
                ),
                (
                    PAGE2,
                    listing_page(
                        r#"<a href="/archives/101">ベスト16デッキまとめ 3/9</a>
                           <a href="/archives/102">ベスト16デッキまとめ 3/8</a>"#,
                        None,
                    ),
                ),
            ]);

            let urls = ListingCrawler::new(&fetcher, &config()).crawl().await.unwrap();
            assert_eq!(
                urls,
                vec![
                    "https://pokecabook.com/archives/100",
                    "https://pokecabook.com/archives/101",
                    "https://pokecabook.com/archives/102",
                ]
            );
            assert_eq!(fetcher.call_count(), 2);
        }

        #[tokio::test]
        async fn first_page_failure_is_fatal() {
            let fetcher = MapFetcher::new(Vec::<(String, String)>::new());
            let result = ListingCrawler::new(&fetcher, &config()).crawl().await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn later_page_failure_stops_pagination_with_results_kept() {
            let fetcher = MapFetcher::new([(
                BASE,
                listing_page(
                    r#"<a href="/archives/100">ベスト16デッキまとめ</a>"#,
                    Some("/archives/category/tournament/city-league/page/2"),
                ),
            )]);

            let urls = ListingCrawler::new(&fetcher, &config()).crawl().await.unwrap();
            assert_eq!(urls, vec!["https://pokecabook.com/archives/100"]);
            assert_eq!(fetcher.call_count(), 2);
        }
    }
}
