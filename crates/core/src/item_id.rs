//! Item identifiers.
//!
//! The site addresses every item as `/audio-books/<id>/`. The identifier is
//! the bare `<id>` segment; re-applying the prefix and slash gives back a
//! fetchable path.

/// Path prefix of every item page.
pub const ITEM_PATH_PREFIX: &str = "/audio-books/";

/// Extract the item identifier from a link href.
///
/// Drops everything up to and including the item prefix (so absolute links
/// work too), then the first remaining slash.
pub fn item_id_from_href(href: &str) -> String {
    let rest = match href.find(ITEM_PATH_PREFIX) {
        Some(pos) => &href[pos + ITEM_PATH_PREFIX.len()..],
        None => href,
    };
    rest.replacen('/', "", 1)
}

/// Fetchable path for an item identifier.
pub fn item_path(id: &str) -> String {
    format!("{}{}/", ITEM_PATH_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_from_relative_href() {
        assert_eq!(
            item_id_from_href("/audio-books/dune-frank-herbert/"),
            "dune-frank-herbert"
        );
    }

    #[test]
    fn test_item_id_from_absolute_href() {
        assert_eq!(
            item_id_from_href("http://audiobookbay.fi/audio-books/dune-messiah/"),
            "dune-messiah"
        );
    }

    #[test]
    fn test_item_id_without_trailing_slash() {
        assert_eq!(item_id_from_href("/audio-books/children-of-dune"), "children-of-dune");
    }

    #[test]
    fn test_item_path_round_trip() {
        for id in ["dune", "god-emperor-of-dune", "heretics_of_dune-2", "é-unicode", ""] {
            assert_eq!(item_id_from_href(&item_path(id)), id);
        }
    }

    #[test]
    fn test_item_path_shape() {
        assert_eq!(item_path("dune"), "/audio-books/dune/");
    }
}
