use std::time::Duration;

/// Kanto prefectures eligible for extraction.
pub const KANTO_PREFS: [&str; 7] = ["東京", "神奈川", "千葉", "埼玉", "茨城", "栃木", "群馬"];

/// Category listing for City League results articles.
pub const LIST_URL: &str = "https://pokecabook.com/archives/category/tournament/city-league";

/// Visible-text marker identifying a results-summary article link.
pub const ARTICLE_MARKER: &str = "ベスト16デッキまとめ";

/// Path fragment every article permalink carries.
pub const ARCHIVE_PATH: &str = "/archives/";

/// Link texts of the listing's next-page affordance.
pub const NEXT_PAGE_LABELS: [&str; 2] = ["次のページ", "次へ"];

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub list_url: String,
    /// Prefecture whitelist; headings tagged with anything else are skipped.
    pub prefs: Vec<String>,
    pub article_marker: String,
    pub archive_path: String,
    pub next_page_labels: Vec<String>,
    /// Listing page budget. `None` is unbounded.
    pub max_list_pages: Option<usize>,
    /// Minimum spacing after every page fetch.
    pub polite_delay: Duration,
    pub fetch_timeout: Duration,
    /// Cap on images kept per record.
    pub top_n: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            list_url: LIST_URL.to_string(),
            prefs: KANTO_PREFS.iter().map(|p| p.to_string()).collect(),
            article_marker: ARTICLE_MARKER.to_string(),
            archive_path: ARCHIVE_PATH.to_string(),
            next_page_labels: NEXT_PAGE_LABELS.iter().map(|l| l.to_string()).collect(),
            max_list_pages: Some(3),
            polite_delay: Duration::from_millis(400),
            fetch_timeout: Duration::from_secs(30),
            top_n: 8,
        }
    }
}

impl ScrapeConfig {
    pub fn is_whitelisted(&self, pref: &str) -> bool {
        self.prefs.iter().any(|p| p == pref)
    }
}
