//! Testing utilities: a mock page fetcher and HTML fixtures shaped like the
//! source site's markup.
//!
//! # Example
//!
//! ```rust,ignore
//! use abb_core::testing::{fixtures, MockPageFetcher};
//!
//! let fetcher = MockPageFetcher::new();
//! fetcher
//!     .set_page("/page/1/", fixtures::listing_page(&[fixtures::ListingEntry::new("Dune", "dune")], None))
//!     .await;
//! ```

mod mock_fetcher;

pub use mock_fetcher::{MockPageFetcher, RecordedRequest};

/// Test fixtures and helper functions.
///
/// Text fields are inserted into the markup verbatim.
pub mod fixtures {
    use crate::item_id::item_path;
    use crate::listing::{SummaryInfo, SummaryRecord};

    /// One entry of a search-results page.
    #[derive(Debug, Clone)]
    pub struct ListingEntry {
        pub title: String,
        pub id: String,
        pub cover: String,
        pub categories: Vec<String>,
        pub language: String,
        pub keywords: Vec<String>,
        pub posted: String,
        pub format: String,
        pub unit: String,
        pub size: String,
        pub size_unit: String,
    }

    impl ListingEntry {
        pub fn new(title: &str, id: &str) -> Self {
            Self {
                title: title.to_string(),
                id: id.to_string(),
                cover: format!("http://cdn.example.com/{}.jpg", id),
                categories: vec!["Sci-Fi".to_string()],
                language: "English".to_string(),
                keywords: vec!["audiobook".to_string()],
                posted: "01 Jan 2020".to_string(),
                format: "MP3".to_string(),
                unit: "64 Kbps".to_string(),
                size: "500".to_string(),
                size_unit: "MBs".to_string(),
            }
        }

        fn to_html(&self) -> String {
            format!(
                concat!(
                    r#"<div class="post">"#,
                    r#"<div class="postTitle"><h2><a href="{path}" rel="bookmark">{title}</a></h2></div>"#,
                    r#"<div class="postInfo">Category: {categories} <br>Language: {language}<br>"#,
                    r#"<span>Keywords: {keywords}</span></div>"#,
                    r#"<div class="postContent">"#,
                    r#"<div class="center"><p class="center"><a href="{path}"><img src="{cover}" alt="cover"></a></p></div>"#,
                    r#"<p style="text-align:center;">Posted: {posted}<br>"#,
                    r#"Format: <span style="color:#a00;">{format}</span> / Bitrate: <span style="color:#a00;">{unit}</span><br>"#,
                    r#"File Size: <span style="color:#00f;">{size}</span> {size_unit}</p>"#,
                    r#"</div></div>"#,
                ),
                path = item_path(&self.id),
                title = self.title,
                categories = self.categories.join("&nbsp;"),
                language = self.language,
                keywords = self.keywords.join("&nbsp;"),
                cover = self.cover,
                posted = self.posted,
                format = self.format,
                unit = self.unit,
                size = self.size,
                size_unit = self.size_unit,
            )
        }
    }

    /// A search-results page. `pager` is `(current, total)`; `None` omits
    /// the pager, as the site does for single-page results.
    pub fn listing_page(entries: &[ListingEntry], pager: Option<(u32, u32)>) -> String {
        let posts: String = entries.iter().map(ListingEntry::to_html).collect();
        let navigation = pager
            .map(|(current, total)| pager_html(current, total))
            .unwrap_or_default();

        page_shell(&format!(
            r#"<div id="content">{}{}</div>"#,
            posts, navigation
        ))
    }

    /// Pager as rendered before the last page (arrow form) and on it
    /// (number form).
    fn pager_html(current: u32, total: u32) -> String {
        let mut links = String::new();
        if current > 1 {
            links.push_str(&format!(r#"<a class="previouspostslink" href="/page/{}/?s=q">«</a>"#, current - 1));
        }
        if current >= total && current > 1 {
            links.push_str(&format!(r#"<a href="/page/{0}/?s=q">{0}</a>"#, current - 1));
        }
        links.push_str(&format!(r#"<span class="current">{}</span>"#, current));
        if current < total {
            links.push_str(&format!(r#"<a href="/page/{0}/?s=q">{0}</a>"#, current + 1));
            links.push_str(&format!(
                r#"<a class="nextpostslink" href="/page/{}/?s=q">»</a>"#,
                current + 1
            ));
            links.push_str(&format!(r#"<a class="last" href="/page/{}/?s=q">»»</a>"#, total));
        }

        format!(
            r#"<div class="navigation"><div class="wp-pagenavi">{}</div></div>"#,
            links
        )
    }

    /// The site's empty-search page.
    pub fn not_found_page() -> String {
        page_shell(
            r#"<div id="content"><h3>Not Found</h3><p>Sorry, but you are looking for something that isn't here.</p></div>"#,
        )
    }

    /// A parsed summary record with reasonable defaults.
    pub fn summary_record(title: &str, id: &str) -> SummaryRecord {
        SummaryRecord {
            title: title.to_string(),
            url: id.to_string(),
            category: vec!["Sci-Fi".to_string()],
            keywords: vec!["audiobook".to_string()],
            lang: "English".to_string(),
            posted: "01 Jan 2020".to_string(),
            cover: format!("http://cdn.example.com/{}.jpg", id),
            info: SummaryInfo {
                format: "MP3".to_string(),
                size: "500".to_string(),
                size_unit: Some("MBs".to_string()),
                unit: "64 Kbps".to_string(),
            },
        }
    }

    /// One item page.
    #[derive(Debug, Clone)]
    pub struct DetailPage {
        pub title: String,
        pub author: String,
        pub narrator: String,
        pub abridged: String,
        pub language: String,
        pub categories: Vec<String>,
        pub format: String,
        pub bitrate: String,
        /// Paragraph bodies; markup allowed.
        pub description: Vec<String>,
        /// Render the layout with an audio player, where the description
        /// sits directly in `.postContent`.
        pub audio_sample_layout: bool,
        pub trackers: Vec<String>,
        pub hash: String,
        pub size: String,
        /// Sidebar related links as `(title, href)`.
        pub related: Vec<(String, Option<String>)>,
    }

    impl DetailPage {
        pub fn new(title: &str) -> Self {
            Self {
                title: title.to_string(),
                author: "Frank Herbert".to_string(),
                narrator: "Scott Brick".to_string(),
                abridged: "Unabridged".to_string(),
                language: "English".to_string(),
                categories: vec!["Sci-Fi".to_string()],
                format: "MP3".to_string(),
                bitrate: "64 Kbps".to_string(),
                description: vec!["A desert planet.".to_string()],
                audio_sample_layout: false,
                trackers: vec!["udp://tracker.opentrackr.org:1337/announce".to_string()],
                hash: "c0ffee00c0ffee00c0ffee00c0ffee00c0ffee00".to_string(),
                size: "1.05 GBs".to_string(),
                related: Vec::new(),
            }
        }
    }

    /// An item page. The size row is placed 11th from the end of the
    /// torrent table, where the site puts it.
    pub fn detail_page(page: &DetailPage) -> String {
        let categories: String = page
            .categories
            .iter()
            .map(|c| format!(r#"<a href="/audio-books/type/{0}/" rel="category tag">{0}</a> "#, c))
            .collect();

        let metadata = format!(
            concat!(
                r#"<p>Written by <span class="author">{}</span> "#,
                r#"Read by <span class="narrator">{}</span> "#,
                r#"Format: <span class="format">{}</span> "#,
                r#"Bitrate: <span class="bitrate">{}</span> "#,
                r#"<span class="is_abridged">{}</span></p>"#,
            ),
            page.author, page.narrator, page.format, page.bitrate, page.abridged
        );
        let paragraphs: String = page
            .description
            .iter()
            .map(|d| format!("<p>{}</p>", d))
            .collect();

        let content = if page.audio_sample_layout {
            format!(
                r#"<p>Audio sample: <audio src="/samples/sample.mp3" controls></audio></p><div class="desc">{}</div>{}"#,
                metadata, paragraphs
            )
        } else {
            format!(r#"<div class="desc">{}{}</div>"#, metadata, paragraphs)
        };

        let related: String = page
            .related
            .iter()
            .map(|(title, href)| match href {
                Some(href) => format!(r#"<li><a href="{}">{}</a></li>"#, href, title),
                None => format!("<li><a>{}</a></li>", title),
            })
            .collect();

        page_shell(&format!(
            concat!(
                r#"<div id="content"><div class="post">"#,
                r#"<div class="postTitle"><h1>{title}</h1></div>"#,
                r#"<div class="postInfo">Category: {categories}Language: "#,
                r#"<a href="/audio-books/language/{language}/"><span itemprop="inLanguage">{language}</span></a></div>"#,
                r#"<div class="postContent">{content}<table class="torrent_info">{rows}</table></div>"#,
                r#"</div></div>"#,
                r#"<div id="rsidebar"><ul><li><h2>Related Audiobooks</h2><ul>{related}</ul></li></ul></div>"#,
            ),
            title = page.title,
            categories = categories,
            language = page.language,
            content = content,
            rows = torrent_rows(page),
            related = related,
        ))
    }

    fn torrent_rows(page: &DetailPage) -> String {
        let mut rows: Vec<(&str, String)> = page
            .trackers
            .iter()
            .map(|t| ("Tracker:", t.clone()))
            .collect();
        rows.push(("Info Hash:", page.hash.clone()));
        while rows.len() < 10 {
            rows.push(("Piece Size:", "1 MB".to_string()));
        }
        let size_row = rows.len() - 10;
        rows.insert(size_row, ("Combined File Size:", page.size.clone()));

        rows.iter()
            .map(|(label, value)| format!("<tr><td>{}</td><td>{}</td></tr>", label, value))
            .collect()
    }

    fn page_shell(body: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>AudioBook Bay</title></head><body>{}</body></html>",
            body
        )
    }
}
