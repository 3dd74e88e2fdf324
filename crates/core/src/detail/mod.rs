//! Detail extractor: one item page into a [`DetailRecord`].

mod types;

pub use types::*;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::html::{select_text, text_of, text_with_line_breaks};
use crate::item_id::item_id_from_href;

const TRACKER_LABEL: &str = "Tracker:";
const INFO_HASH_LABEL: &str = "Info Hash:";
const RELATED_HEADING: &str = "Related";

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".postTitle h1").unwrap());
static CATEGORY_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(".postInfo a").unwrap());
static LANGUAGE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".postInfo a span[itemprop="inLanguage"]"#).unwrap());
static AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".desc span[class="author"]"#).unwrap());
static NARRATOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".desc span[class="narrator"]"#).unwrap());
static ABRIDGED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".desc span[class="is_abridged"]"#).unwrap());
static BITRATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".desc span[class="bitrate"]"#).unwrap());
static FORMAT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#".desc span[class="format"]"#).unwrap());
static TABLE_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse(".postContent table tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static TORRENT_SIZE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".postContent table tr:nth-last-child(11) td:last-child").unwrap()
});
static SIDEBAR_SECTION: Lazy<Selector> = Lazy::new(|| Selector::parse("#rsidebar ul li").unwrap());
static SECTION_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static SECTION_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("ul li").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// Description paragraphs, tried in order. Pages with an embedded audio
/// sample leave `.desc` empty and put the text straight in `.postContent`.
static DESCRIPTION_LAYOUTS: Lazy<[Selector; 2]> = Lazy::new(|| {
    [
        Selector::parse(".desc p:not(:first-child)").unwrap(),
        Selector::parse(".postContent p:not(:first-child)").unwrap(),
    ]
});

/// Parse an item page. Missing elements yield empty fields.
pub fn parse_detail_page(html: &str) -> DetailRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let record = DetailRecord {
        title: select_text(root, &TITLE),
        author: select_text(root, &AUTHOR),
        narrator: select_text(root, &NARRATOR),
        abridged: select_text(root, &ABRIDGED),
        language: select_text(root, &LANGUAGE),
        category: categories(root),
        description: description(root),
        specs: AudioSpecs {
            bitrate: select_text(root, &BITRATE),
            format: select_text(root, &FORMAT),
        },
        related: related_items(root),
        torrent: torrent_info(root),
    };

    debug!(
        title = %record.title,
        trackers = record.torrent.trackers.len(),
        related = record.related.len(),
        "Parsed detail page"
    );

    record
}

/// Links tagged `rel="category tag"` in the info block.
fn categories(root: ElementRef<'_>) -> Vec<String> {
    root.select(&CATEGORY_LINK)
        .filter(|a| a.value().attr("rel") == Some("category tag"))
        .map(text_of)
        .collect()
}

/// Trackers accumulate in row order; the last "Info Hash:" row wins.
fn torrent_info(root: ElementRef<'_>) -> TorrentInfo {
    let mut info = TorrentInfo {
        size: select_text(root, &TORRENT_SIZE),
        ..TorrentInfo::default()
    };

    for row in root.select(&TABLE_ROW) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
        let (Some(label), Some(value)) = (cells.first(), cells.last()) else {
            continue;
        };
        match text_of(*label).trim() {
            TRACKER_LABEL => info.trackers.push(text_of(*value)),
            INFO_HASH_LABEL => info.hash = text_of(*value),
            _ => {}
        }
    }

    info
}

/// Entries of the sidebar section headed "Related…"; links without href are skipped.
fn related_items(root: ElementRef<'_>) -> Vec<RelatedItem> {
    root.select(&SIDEBAR_SECTION)
        .filter(|section| select_text(*section, &SECTION_HEADING).contains(RELATED_HEADING))
        .flat_map(|section| section.select(&SECTION_ITEM))
        .filter_map(|item| {
            let link = item.select(&LINK).next()?;
            let href = link.value().attr("href")?;
            Some(RelatedItem {
                title: text_of(link),
                url: item_id_from_href(href),
            })
        })
        .collect()
}

/// First description layout with any text, paragraphs joined by newlines.
fn description(root: ElementRef<'_>) -> String {
    let Some(layout) = DESCRIPTION_LAYOUTS
        .iter()
        .find(|layout| !select_text(root, layout).is_empty())
    else {
        return String::new();
    };

    root.select(layout)
        .map(text_with_line_breaks)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
