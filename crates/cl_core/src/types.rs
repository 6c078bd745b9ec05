use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One store placement extracted from a results article, keyed by the
/// article page and the store heading text. Write-once: a run produces a
/// fresh set of these and the snapshot is replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub article_date: NaiveDate,
    pub page: String,
    pub title: String,
    pub pref: String,
    /// At most 8 image URLs, in document order.
    pub images_top8: Vec<String>,
    /// Total distinct images found in the section before the Top8 cap.
    pub images_found: usize,
    /// True iff an earlier record in the same run shares (page, title).
    /// Duplicates are flagged, not dropped, so anomalies stay auditable.
    pub dup_same_page: bool,
}

/// Why an article URL yielded nothing this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No parseable date anywhere in the document.
    NoDate,
    /// Dated before the since-cutoff.
    OutOfWindow(NaiveDate),
    /// Navigation or fetch failure, with the underlying message.
    FetchFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoDate => write!(f, "no parseable article date"),
            SkipReason::OutOfWindow(date) => write!(f, "article dated {} is before the cutoff", date),
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
        }
    }
}

/// The product of one scrape run.
#[derive(Debug, Default)]
pub struct ScrapeOutcome {
    pub records: Vec<StoreRecord>,
    /// Most recent article date actually visited, updated even when the
    /// article yielded zero records. Distinguishes "nothing newer was
    /// published" from "nothing newer was extractable".
    pub latest_seen: Option<NaiveDate>,
    /// Articles visited but not extracted, with the reason.
    pub skipped: Vec<(String, SkipReason)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_iso_date_and_spec_field_names() {
        let record = StoreRecord {
            article_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            page: "https://example.com/archives/1".to_string(),
            title: "（東京）Store X".to_string(),
            pref: "東京".to_string(),
            images_top8: vec!["https://img.example.com/a.jpg".to_string()],
            images_found: 1,
            dup_same_page: false,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["article_date"], "2024-03-10");
        assert_eq!(json["pref"], "東京");
        assert_eq!(json["images_top8"].as_array().unwrap().len(), 1);
        assert_eq!(json["dup_same_page"], false);
    }

    #[test]
    fn record_round_trips() {
        let record = StoreRecord {
            article_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            page: "https://example.com/archives/1".to_string(),
            title: "（千葉）Store Y".to_string(),
            pref: "千葉".to_string(),
            images_top8: vec![],
            images_found: 0,
            dup_same_page: true,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: StoreRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
