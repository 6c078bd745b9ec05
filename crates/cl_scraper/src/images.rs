use std::collections::HashSet;

/// Normalize and deduplicate raw image URLs.
///
/// Keeps only http(s) URLs, dropping inline `data:` payloads. Duplicate
/// detection is deliberately coarse: the same underlying image is often
/// re-served with different cache-busting query strings, so the key is the
/// URL with its query stripped. First occurrence wins, order is preserved.
pub fn clean_image_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for url in urls {
        let url = url.as_ref().trim();
        if url.starts_with("data:") {
            continue;
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            continue;
        }
        let key = url.split('?').next().unwrap_or(url).to_string();
        if seen.insert(key) {
            out.push(url.to_string());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_data_payloads_and_non_http_schemes() {
        let cleaned = clean_image_urls([
            "data:image/png;base64,AAAA",
            "ftp://example.com/a.jpg",
            "/relative/path.jpg",
            "https://example.com/a.jpg",
            "  http://example.com/b.jpg  ",
        ]);
        assert_eq!(
            cleaned,
            vec!["https://example.com/a.jpg", "http://example.com/b.jpg"]
        );
    }

    #[test]
    fn deduplicates_by_prefix_before_query_first_wins() {
        let cleaned = clean_image_urls([
            "https://example.com/a.jpg?v=1",
            "https://example.com/a.jpg?v=2",
            "https://example.com/a.jpg",
            "https://example.com/b.jpg",
        ]);
        assert_eq!(
            cleaned,
            vec!["https://example.com/a.jpg?v=1", "https://example.com/b.jpg"]
        );
    }

    #[test]
    fn preserves_first_seen_order() {
        let cleaned = clean_image_urls([
            "https://example.com/c.jpg",
            "https://example.com/a.jpg",
            "https://example.com/b.jpg",
            "https://example.com/a.jpg?cache=9",
        ]);
        assert_eq!(
            cleaned,
            vec![
                "https://example.com/c.jpg",
                "https://example.com/a.jpg",
                "https://example.com/b.jpg",
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(clean_image_urls(Vec::<String>::new()).is_empty());
    }
}
