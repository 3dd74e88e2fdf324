//! Types produced by the listing extractor.

use serde::{Deserialize, Serialize};

/// One entry of a search-results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Entry title, never empty.
    pub title: String,
    /// Item identifier (item link with the path prefix stripped).
    pub url: String,
    /// Categories from the info block; empty tokens are kept.
    pub category: Vec<String>,
    /// Keywords from the info block; empty tokens are kept.
    pub keywords: Vec<String>,
    pub lang: String,
    /// Free-form "Posted:" text.
    pub posted: String,
    /// Cover image URL.
    pub cover: String,
    pub info: SummaryInfo,
}

/// Format and size details of a summary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInfo {
    pub format: String,
    pub size: String,
    /// Unit following the size in the centered detail line (e.g. "GBs").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_unit: Option<String>,
    pub unit: String,
}

/// Pager state of a listing page.
///
/// The zero state (`current_page == 0`, `total_pages == 0`) means the page
/// carried no pager at all: a single page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Number of records on this page.
    pub count: usize,
    /// 1-based current page.
    pub current_page: u32,
    pub total_pages: u32,
}

/// A parsed search-results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub records: Vec<SummaryRecord>,
    pub pagination: PaginationInfo,
}
