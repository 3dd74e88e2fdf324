//! Types produced by the detail extractor.

use serde::{Deserialize, Serialize};

/// Full metadata of one catalog item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub title: String,
    pub author: String,
    pub narrator: String,
    /// Free text, e.g. "Unabridged".
    pub abridged: String,
    pub language: String,
    pub category: Vec<String>,
    /// Newline-joined description paragraphs.
    pub description: String,
    pub specs: AudioSpecs,
    pub related: Vec<RelatedItem>,
    pub torrent: TorrentInfo,
}

/// Encoding details of the audio files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSpecs {
    pub bitrate: String,
    pub format: String,
}

/// Sidebar link to a related item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedItem {
    pub title: String,
    /// Item identifier.
    pub url: String,
}

/// Torrent metadata from the item's content table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentInfo {
    /// Info hash as printed on the page; empty when missing.
    pub hash: String,
    pub size: String,
    /// Tracker URLs in page order.
    pub trackers: Vec<String>,
}
