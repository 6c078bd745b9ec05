use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Lazy-load placeholder attributes take precedence over the eager `src`.
const IMG_SRC_ATTRS: [&str; 4] = ["data-src", "data-lazy-src", "data-original", "src"];

/// Sections are not explicit containers: a store block is implicitly bounded
/// by the next heading of the same structural class, so the stop condition is
/// re-checked on every sibling.
pub fn is_section_heading(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "h2" | "h4")
}

/// Collect raw image URLs from every sibling strictly after `heading`, up to
/// but not including the next section-start heading.
pub fn collect_section_images(heading: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();

    for node in heading.next_siblings() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if is_section_heading(&element) {
            break;
        }
        push_image_sources(element, &mut out);
    }

    out
}

fn push_image_sources(element: ElementRef<'_>, out: &mut Vec<String>) {
    // ElementRef::select matches descendants only, so a sibling that is
    // itself an <img> needs inspecting directly.
    if element.value().name() == "img" {
        if let Some(src) = image_source(&element) {
            out.push(src.to_string());
        }
        return;
    }
    for img in element.select(&IMG) {
        if let Some(src) = image_source(&img) {
            out.push(src.to_string());
        }
    }
}

fn image_source<'a>(img: &ElementRef<'a>) -> Option<&'a str> {
    IMG_SRC_ATTRS.iter().find_map(|attr| img.value().attr(attr))
}
