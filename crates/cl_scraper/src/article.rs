use std::collections::HashSet;

use chrono::NaiveDate;
use cl_core::StoreRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::config::ScrapeConfig;
use crate::{date, images, section};

static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static HEADINGS: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h4").unwrap());

/// Full-width bracket segment carrying the prefecture, e.g. 「（東京）Store X」.
static PREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"（([^）]+)）").unwrap());

/// What one article contributed to the run. `date` is reported even when
/// the article was out of window, so the caller can keep `latest_seen`
/// honest; traversal order of the listing is not guaranteed chronological.
#[derive(Debug, Default)]
pub struct ArticleOutput {
    pub records: Vec<StoreRecord>,
    pub date: Option<NaiveDate>,
}

/// Extract every whitelisted store section from one fetched article.
///
/// `dup_keys` is the run-wide (page, heading text) identity set; a repeat
/// pair is emitted with `dup_same_page` set rather than dropped.
pub fn process_article(
    html: &str,
    url: &str,
    since: NaiveDate,
    config: &ScrapeConfig,
    dup_keys: &mut HashSet<(String, String)>,
) -> ArticleOutput {
    let doc = Html::parse_document(html);

    let Some(article_date) = document_date(&doc) else {
        return ArticleOutput::default();
    };
    if article_date < since {
        return ArticleOutput {
            records: Vec::new(),
            date: Some(article_date),
        };
    }

    let mut records = Vec::new();
    for heading in doc.select(&HEADINGS) {
        let title = heading.text().collect::<String>().trim().to_string();
        let Some(pref) = pref_code(&title) else {
            continue;
        };
        if !config.is_whitelisted(pref) {
            continue;
        }

        let cleaned = images::clean_image_urls(section::collect_section_images(heading));
        if cleaned.is_empty() {
            // A store heading without surviving Top8 images yields no record.
            continue;
        }

        let pref = pref.to_string();
        let key = (url.to_string(), title.clone());
        let dup_same_page = !dup_keys.insert(key);

        records.push(StoreRecord {
            article_date,
            page: url.to_string(),
            title,
            pref,
            images_found: cleaned.len(),
            images_top8: cleaned.into_iter().take(config.top_n).collect(),
            dup_same_page,
        });
    }

    ArticleOutput {
        records,
        date: Some(article_date),
    }
}

/// Date fallback chain: `time[datetime]` attribute, then the time element's
/// text, then the whole body text. The source templates are inconsistent
/// about where the publication date lives.
pub fn document_date(doc: &Html) -> Option<NaiveDate> {
    if let Some(time_el) = doc.select(&TIME).next() {
        if let Some(attr) = time_el.value().attr("datetime") {
            if let Some(found) = date::find_date(attr) {
                return Some(found);
            }
        }
        let text = time_el.text().collect::<String>();
        if let Some(found) = date::find_date(&text) {
            return Some(found);
        }
    }

    let body_text = doc
        .select(&BODY)
        .next()
        .map(|body| body.text().collect::<String>())
        .unwrap_or_else(|| doc.root_element().text().collect());
    date::find_date(&body_text)
}

fn pref_code(title: &str) -> Option<&str> {
    PREF.captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}
