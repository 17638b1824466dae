//! DOM operations adapter.
//!
//! Thin named wrappers over the `dom_query` crate, plus the handful of
//! traversal helpers the zone detectors need (element-sibling walks,
//! ancestor tests by `NodeId`, direct list-item collection). Keeping these
//! behind one module gives the detectors a consistent vocabulary and keeps
//! `dom_query` specifics out of the heuristics.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, Selection};

// Re-export StrTendril for external use
pub use tendril::StrTendril;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get element ID attribute.
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute.
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Individual class tokens of an element, lowercased.
#[must_use]
pub fn class_tokens(sel: &Selection) -> Vec<String> {
    class_name(sel)
        .map(|classes| {
            classes
                .split_whitespace()
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default()
}

// === Tag/Node Information ===

/// Get tag name (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

/// Identity of the first node in a selection, used for zone deduplication.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|node| node.id)
}

// === Text Content ===

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// owned storage is needed.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content.
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

// === Tree Navigation ===

/// Get next element sibling (skipping text nodes).
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

/// Walk forward over element siblings, at most `limit` steps.
///
/// Bounded lookahead keeps position heuristics from wandering across the
/// whole document.
#[must_use]
pub fn element_siblings_after<'a>(sel: &Selection<'a>, limit: usize) -> Vec<Selection<'a>> {
    let mut out = Vec::new();
    let mut current = next_element_sibling(sel);
    while let Some(sibling) = current {
        if out.len() >= limit {
            break;
        }
        current = next_element_sibling(&sibling);
        out.push(sibling);
    }
    out
}

/// Check whether `child` sits somewhere below `parent` in the tree.
///
/// Walks the parent chain comparing `NodeId`s, stopping at the document root.
#[must_use]
pub fn is_descendant(child: &Selection, parent_id: NodeId) -> bool {
    let mut current = child.parent();
    while current.length() > 0 {
        if let Some(node) = current.nodes().first() {
            if node.id == parent_id {
                return true;
            }
        }
        if let Some(tag) = tag_name(&current) {
            if tag == "html" {
                break;
            }
        }
        current = current.parent();
    }
    false
}

// === List Helpers ===

/// Text of the direct `<li>` children of a list element.
///
/// `select("li")` matches descendants, so nested list items are filtered out
/// by checking each item's parent identity.
#[must_use]
pub fn direct_list_items(list: &Selection) -> Vec<String> {
    let Some(list_id) = node_id(list) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for item in list.select("li").iter() {
        let parent = item.parent();
        if node_id(&parent) != Some(list_id) {
            continue;
        }
        let text = text_content(&item);
        let text = text.trim();
        if !text.is_empty() {
            items.push(collapse_whitespace(text));
        }
    }
    items
}

/// Collapse internal whitespace runs to single spaces.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_select() {
        let doc = parse(r#"<div id="main" class="Recipe-Info box">content</div>"#);
        let div = doc.select("div");

        assert_eq!(id(&div), Some("main".to_string()));
        assert_eq!(class_name(&div), Some("Recipe-Info box".to_string()));
        assert_eq!(class_tokens(&div), vec!["recipe-info", "box"]);
    }

    #[test]
    fn test_tag_name_lowercased() {
        let doc = parse("<UL><LI>one</LI></UL>");
        assert_eq!(tag_name(&doc.select("ul")), Some("ul".to_string()));
    }

    #[test]
    fn test_next_element_sibling_skips_text() {
        let doc = parse(r#"<div><h3 id="hdr">Ingredients</h3>  text  <ul><li>2 cups flour</li></ul></div>"#);
        let header = doc.select("#hdr");

        let next = next_element_sibling(&header);
        assert!(next.is_some());
        assert_eq!(tag_name(&next.unwrap()), Some("ul".to_string()));
    }

    #[test]
    fn test_element_siblings_after_is_bounded() {
        let doc = parse("<div><p id='a'>a</p><p>b</p><p>c</p><p>d</p></div>");
        let first = doc.select("#a");

        let siblings = element_siblings_after(&first, 2);
        assert_eq!(siblings.len(), 2);
        assert_eq!(text_content(&siblings[0]), "b".into());
    }

    #[test]
    fn test_is_descendant() {
        let doc = parse(r#"<div id="outer"><section><p id="inner">text</p></section></div>"#);
        let outer = doc.select("#outer");
        let inner = doc.select("#inner");
        let outer_id = node_id(&outer).unwrap();
        let inner_id = node_id(&inner).unwrap();

        assert!(is_descendant(&inner, outer_id));
        assert!(!is_descendant(&outer, inner_id));
    }

    #[test]
    fn test_direct_list_items_excludes_nested() {
        let doc = parse(
            "<ul id='top'><li>2 cups flour</li><li>spices<ul><li>1 tsp cumin</li></ul></li></ul>",
        );
        let top = doc.select("#top");

        let items = direct_list_items(&top);
        assert_eq!(items.len(), 2);
        assert!(items[1].starts_with("spices"));
    }

    #[test]
    fn test_direct_list_items_empty_selection() {
        let doc = parse("<div>no lists</div>");
        let missing = doc.select("ul");
        assert!(direct_list_items(&missing).is_empty());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("2  cups\n flour"), "2 cups flour");
    }
}
