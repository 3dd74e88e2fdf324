//! Small text helpers over `scraper` element references.
//!
//! Every helper degrades to an empty string / `None` when the markup is not
//! there; missing elements are never an error for the extractors.

use scraper::{ElementRef, Node, Selector};

/// Non-breaking space, used by the site as a list delimiter.
pub const NBSP: char = '\u{a0}';

/// Concatenated text of an element and all its descendants.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenated text of every descendant matching `selector`.
pub fn select_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope.select(selector).map(text_of).collect()
}

/// Attribute value of the first descendant matching `selector`.
pub fn select_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(String::from)
}

/// Text of an element where every `<br>` becomes a newline.
pub fn text_with_line_breaks(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Split a delimiter-separated block on non-breaking spaces, trimming each token.
///
/// Empty tokens are kept so the output mirrors the block's shape.
pub fn split_nbsp_list(text: &str) -> Vec<String> {
    text.split(NBSP).map(|t| t.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn sel(css: &str) -> Selector {
        Selector::parse(css).unwrap()
    }

    #[test]
    fn test_select_text_concatenates_matches() {
        let doc = Html::parse_fragment("<div><span>a</span><span>b</span></div>");
        assert_eq!(select_text(doc.root_element(), &sel("span")), "ab");
    }

    #[test]
    fn test_select_attr_first_match() {
        let doc = Html::parse_fragment(r#"<a href="/one/">1</a><a href="/two/">2</a>"#);
        assert_eq!(
            select_attr(doc.root_element(), &sel("a"), "href").as_deref(),
            Some("/one/")
        );
        assert!(select_attr(doc.root_element(), &sel("img"), "src").is_none());
    }

    #[test]
    fn test_text_with_line_breaks() {
        let doc = Html::parse_fragment("<p>line one<br>line two<br/>line <b>three</b></p>");
        let p = doc.root_element().select(&sel("p")).next().unwrap();
        assert_eq!(text_with_line_breaks(p), "line one\nline two\nline three");
    }

    #[test]
    fn test_split_nbsp_list_keeps_empty_tokens() {
        assert_eq!(
            split_nbsp_list("Fantasy\u{a0} Sci-Fi \u{a0}\u{a0}Drama"),
            vec!["Fantasy", "Sci-Fi", "", "Drama"]
        );
        assert_eq!(split_nbsp_list(""), vec![""]);
    }
}
