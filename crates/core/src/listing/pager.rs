//! Pager reading.
//!
//! The site renders the pager in two shapes: when more pages follow, the last
//! link is an arrow whose href points at the final page; on the tail pages the
//! arrow is gone and the second-to-last link carries a page number.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Selector};

use crate::html::{select_attr, select_text};

use super::PaginationInfo;

/// Visible glyph of the "last page" link.
pub const LAST_PAGE_MARKER: &str = "»»";

static CURRENT: Lazy<Selector> = Lazy::new(|| Selector::parse(".navigation .current").unwrap());
static LAST_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".navigation .wp-pagenavi a:last-child").unwrap());
static SECOND_TO_LAST_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".navigation .wp-pagenavi a:nth-last-child(2)").unwrap());

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)").unwrap());
static PAGE_IN_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"/page/(\d+)").unwrap());

/// Which markup shape carries the total page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerForm {
    /// Last link is the arrow marker; the total lives in its href.
    LastLinkArrow { href: Option<String> },
    /// Second-to-last link's visible text is the total.
    LastLinkNumber { text: String },
}

impl PagerForm {
    /// Classify the pager under `root`.
    pub fn detect(root: ElementRef<'_>) -> Self {
        if select_text(root, &LAST_LINK) == LAST_PAGE_MARKER {
            PagerForm::LastLinkArrow {
                href: select_attr(root, &LAST_LINK, "href"),
            }
        } else {
            PagerForm::LastLinkNumber {
                text: select_text(root, &SECOND_TO_LAST_LINK),
            }
        }
    }

    /// Total page count carried by this form; 0 when unreadable.
    pub fn total_pages(&self) -> u32 {
        match self {
            PagerForm::LastLinkArrow { href } => href
                .as_deref()
                .and_then(|h| PAGE_IN_HREF.captures(h))
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0),
            PagerForm::LastLinkNumber { text } => parse_leading_number(text).unwrap_or(0),
        }
    }
}

/// Read the pager of a listing page holding `count` records.
pub fn parse_pagination(root: ElementRef<'_>, count: usize) -> PaginationInfo {
    let mut pagination = PaginationInfo {
        count,
        current_page: 0,
        total_pages: 0,
    };

    let current_text = select_text(root, &CURRENT);
    if current_text.is_empty() {
        return pagination;
    }

    pagination.current_page = parse_leading_number(&current_text).unwrap_or(0);
    let total = PagerForm::detect(root).total_pages();
    pagination.total_pages = clamp_total_pages(pagination.current_page, total);
    pagination
}

/// On the final page the pager reports one page less than the current one.
pub fn clamp_total_pages(current_page: u32, total_pages: u32) -> u32 {
    if total_pages.checked_add(1) == Some(current_page) {
        current_page
    } else {
        total_pages
    }
}

fn parse_leading_number(text: &str) -> Option<u32> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|c| c[1].parse().ok())
}
