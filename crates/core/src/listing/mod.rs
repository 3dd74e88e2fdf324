//! Listing extractor: search-results pages into summary records.
//!
//! Each field is read by its own rule so a markup change touches one
//! function. Missing markup degrades to empty values; only the site's
//! "Not Found" heading changes the shape of the result.

mod pager;
mod types;

pub use pager::{clamp_total_pages, parse_pagination, PagerForm, LAST_PAGE_MARKER};
pub use types::*;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::html::{select_attr, select_text, split_nbsp_list};
use crate::item_id::item_id_from_href;

/// Cover path the site uses when an item has no artwork.
pub const DEFAULT_COVER_PATH: &str = "/images/default_cover.jpg";

/// Host that actually serves [`DEFAULT_COVER_PATH`].
pub const FALLBACK_COVER_HOST: &str = "http://audiobookbay.se";

const NOT_FOUND_HEADING: &str = "Not Found";

static NOT_FOUND: Lazy<Selector> = Lazy::new(|| Selector::parse("#content h3").unwrap());
static ENTRY: Lazy<Selector> = Lazy::new(|| Selector::parse("#content div.post").unwrap());
static TITLE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.postTitle h2 a").unwrap());
static COVER: Lazy<Selector> = Lazy::new(|| Selector::parse(".postContent img").unwrap());
static SIZE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".postContent span[style="color:#00f;"]"#).unwrap());
static FORMAT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#".postContent span[style="color:#a00;"]:nth-child(2)"#).unwrap()
});
static UNIT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#".postContent span[style="color:#a00;"]:nth-child(3)"#).unwrap()
});
static DETAIL_LINE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"p[style="text-align:center;"]"#).unwrap());
static INFO: Lazy<Selector> = Lazy::new(|| Selector::parse(".postInfo").unwrap());
static KEYWORDS: Lazy<Selector> = Lazy::new(|| Selector::parse(".postInfo span").unwrap());

/// Parse one search-results page.
///
/// Returns `None` when the site reports "Not Found": zero pages, stop
/// paginating. Entries without a title (stickies, ads) are skipped.
pub fn parse_listing_page(html: &str) -> Option<ListingPage> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    if is_not_found(root) {
        debug!("Listing page reports Not Found");
        return None;
    }

    let records: Vec<SummaryRecord> = root.select(&ENTRY).filter_map(parse_entry).collect();
    let pagination = parse_pagination(root, records.len());

    debug!(
        records = records.len(),
        current_page = pagination.current_page,
        total_pages = pagination.total_pages,
        "Parsed listing page"
    );

    Some(ListingPage {
        records,
        pagination,
    })
}

/// Whether the primary heading area reads "Not Found".
pub fn is_not_found(root: ElementRef<'_>) -> bool {
    select_text(root, &NOT_FOUND).trim() == NOT_FOUND_HEADING
}

fn parse_entry(entry: ElementRef<'_>) -> Option<SummaryRecord> {
    let title = entry_title(entry);
    if title.is_empty() {
        return None;
    }

    let info_text = select_text(entry, &INFO);
    let size = entry_size(entry);
    let size_unit = entry_size_unit(entry, &size);

    Some(SummaryRecord {
        url: entry_item_id(entry),
        category: info_categories(&info_text),
        keywords: entry_keywords(entry),
        lang: info_language(&info_text),
        posted: entry_posted(entry),
        cover: entry_cover(entry),
        info: SummaryInfo {
            format: select_text(entry, &FORMAT),
            size,
            size_unit,
            unit: select_text(entry, &UNIT),
        },
        title,
    })
}

fn entry_title(entry: ElementRef<'_>) -> String {
    entry
        .select(&TITLE_LINK)
        .next()
        .map(crate::html::text_of)
        .unwrap_or_default()
}

fn entry_item_id(entry: ElementRef<'_>) -> String {
    select_attr(entry, &TITLE_LINK, "href")
        .map(|href| item_id_from_href(&href))
        .unwrap_or_default()
}

fn entry_cover(entry: ElementRef<'_>) -> String {
    match select_attr(entry, &COVER, "src") {
        Some(src) if src == DEFAULT_COVER_PATH => format!("{}{}", FALLBACK_COVER_HOST, src),
        Some(src) => src,
        None => String::new(),
    }
}

fn entry_size(entry: ElementRef<'_>) -> String {
    select_text(entry, &SIZE)
}

/// Text between the size and its next occurrence in the centered detail line.
fn entry_size_unit(entry: ElementRef<'_>, size: &str) -> Option<String> {
    if size.is_empty() {
        return None;
    }
    select_text(entry, &DETAIL_LINE)
        .split(size)
        .nth(1)
        .map(|rest| rest.trim().to_string())
}

fn entry_posted(entry: ElementRef<'_>) -> String {
    select_text(entry, &DETAIL_LINE)
        .split("Posted:")
        .nth(1)
        .and_then(|rest| rest.split("Format:").next())
        .map(|posted| posted.trim().to_string())
        .unwrap_or_default()
}

fn entry_keywords(entry: ElementRef<'_>) -> Vec<String> {
    let text = select_text(entry, &KEYWORDS);
    split_nbsp_list(text.replacen("Keywords:", "", 1).trim())
}

fn info_categories(info_text: &str) -> Vec<String> {
    let before_language = info_text.split("Language:").next().unwrap_or_default();
    split_nbsp_list(before_language.replacen("Category:", "", 1).trim())
}

fn info_language(info_text: &str) -> String {
    info_text
        .split("Language:")
        .nth(1)
        .and_then(|rest| rest.split("Keywords:").next())
        .map(|lang| lang.trim().to_string())
        .unwrap_or_default()
}
