//! Text normalization and section splitting.
//!
//! EPUB chapter HTML arrives with converter residue: `{...}` formatting
//! spans, markdown-style links in titles, and block elements packed without
//! whitespace. Everything downstream (detectors, validator, scorer) works on
//! the newline-separated plain text produced here, so line boundaries must
//! match block boundaries.

use crate::dom::{self, Document, Selection};
use crate::patterns;

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "table", "tr", "td", "th",
    "dl", "dt", "dd", "blockquote", "pre", "section", "article", "header", "footer", "figcaption",
];

const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template", "head"];

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Extract plain text with one line per block element.
///
/// `Selection::text()` concatenates text nodes without separators, which
/// glues `<p>a</p><p>b</p>` into "ab". This walks the subtree instead,
/// inserting newlines at block boundaries and `<br>`, and skipping
/// script/style subtrees.
#[must_use]
pub fn extract_text(sel: &Selection) -> String {
    let mut raw = String::new();
    for node in sel.nodes() {
        walk(node, &mut raw);
    }
    normalize_lines(&raw)
}

fn walk(node: &dom_query::NodeRef, out: &mut String) {
    if node.is_text() {
        out.push_str(&node.text());
        return;
    }
    if !node.is_element() {
        return;
    }
    let tag = node.node_name().map(|n| n.to_lowercase());
    if let Some(tag) = &tag {
        if SKIP_TAGS.contains(&tag.as_str()) {
            return;
        }
        if tag == "br" || is_block(tag) {
            out.push('\n');
        }
    }
    let mut child = node.first_child();
    while let Some(c) = child {
        walk(&c, out);
        child = c.next_sibling();
    }
    if let Some(tag) = &tag {
        if is_block(tag) {
            out.push('\n');
        }
    }
}

/// Trim every line, drop blank ones, join with single newlines.
#[must_use]
pub fn normalize_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip converter residue from a text value.
///
/// Removes `{...}` formatting spans and markdown-style links, then collapses
/// whitespace runs. Applied to titles and extracted component text before
/// storage.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let without_braces = patterns::BRACE_SPAN.replace_all(text, " ");
    let without_links = patterns::MARKDOWN_LINK.replace_all(&without_braces, " ");
    dom::collapse_whitespace(&without_links)
}

/// A header-delimited candidate section of a chapter document.
#[derive(Debug, Clone)]
pub struct Section {
    /// Cleaned header text.
    pub title: String,
    /// Outer HTML of the header and everything up to the next same-level
    /// header, reparsable as a standalone fragment.
    pub html: String,
}

impl Section {
    /// Reparse the section fragment for zone detection.
    #[must_use]
    pub fn document(&self) -> Document {
        dom::parse(&self.html)
    }
}

/// Header levels tried in preference order when picking the split level.
const LEVEL_PREFERENCE: &[usize] = &[2, 3, 4, 1, 5];

/// Pick the header level that delimits recipes in this document.
///
/// Cookbook chapters usually repeat one header level per recipe. The first
/// level (in preference order) with at least 3 occurrences wins; a document
/// with no such level falls back to h3.
fn dominant_header_level(doc: &Document) -> usize {
    for &level in LEVEL_PREFERENCE {
        let count = doc.select(&format!("h{level}")).length();
        if count >= 3 {
            return level;
        }
    }
    3
}

/// Split a chapter document into header-delimited candidate sections.
///
/// Each section spans one header and its following siblings up to the next
/// header at a split level. Headers with titles shorter than 3 characters
/// or consisting only of digits (page numbers) are skipped. A document with
/// no headers at the dominant level splits on every header it has, so a
/// two-recipe chapter still yields two sections; only a document with no
/// headers at all comes back as a single whole-body section.
#[must_use]
pub fn split_by_headers(doc: &Document) -> Vec<Section> {
    let level = dominant_header_level(doc);
    let mut boundary_tags: Vec<String> = vec![format!("h{level}")];
    let mut headers: Vec<Selection> = doc.select(&format!("h{level}")).iter().collect();

    if headers.is_empty() {
        boundary_tags = (1..=5).map(|l| format!("h{l}")).collect();
        headers = doc.select("h1, h2, h3, h4, h5").iter().collect();
    }
    if headers.is_empty() {
        return vec![whole_document_section(doc)];
    }

    let header_ids: Vec<_> = headers.iter().filter_map(dom::node_id).collect();

    let mut sections = Vec::new();
    for header in &headers {
        let title = clean_text(&dom::text_content(header));
        if title.chars().count() < 3 || title.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let mut html = dom::outer_html(header).to_string();
        let mut current = dom::next_element_sibling(header);
        while let Some(sibling) = current {
            let at_next_header = dom::node_id(&sibling)
                .is_some_and(|sid| header_ids.contains(&sid))
                || dom::tag_name(&sibling)
                    .is_some_and(|tag| boundary_tags.contains(&tag));
            if at_next_header {
                break;
            }
            html.push_str(&dom::outer_html(&sibling));
            current = dom::next_element_sibling(&sibling);
        }

        sections.push(Section { title, html });
    }

    if sections.is_empty() {
        vec![whole_document_section(doc)]
    } else {
        sections
    }
}

fn whole_document_section(doc: &Document) -> Section {
    let title_sel = doc.select("title");
    let mut title = clean_text(&dom::text_content(&title_sel));
    if title.is_empty() {
        let h1 = doc.select("h1");
        title = clean_text(&dom::text_content(&h1));
    }
    let body = doc.select("body");
    let html = if body.length() > 0 {
        dom::outer_html(&body).to_string()
    } else {
        doc.html().to_string()
    };
    Section { title, html }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_separates_blocks() {
        let doc = dom::parse("<div><p>2 cups flour</p><p>1 tsp salt</p></div>");
        let text = extract_text(&doc.select("div"));
        assert_eq!(text, "2 cups flour\n1 tsp salt");
    }

    #[test]
    fn extract_text_honors_br_and_skips_style() {
        let doc = dom::parse("<p>line one<br>line two</p><style>p { color: red }</style>");
        let text = extract_text(&doc.select("body"));
        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn clean_text_strips_residue() {
        assert_eq!(
            clean_text("Smoked {font-weight: bold} Brisket"),
            "Smoked Brisket"
        );
        assert_eq!(clean_text("[Pulled Pork](ch04.html) Recipe"), "Recipe");
    }

    #[test]
    fn split_prefers_h2_with_three_occurrences() {
        let html = r"
            <html><body>
            <h1>Chapter Four</h1>
            <h2>Smoked Brisket</h2><p>Brisket content here.</p>
            <h2>Pulled Pork</h2><p>Pork content here.</p>
            <h2>Beef Ribs</h2><p>Ribs content here.</p>
            </body></html>";
        let doc = dom::parse(html);
        let sections = split_by_headers(&doc);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Smoked Brisket");
        assert!(sections[0].html.contains("Brisket content"));
        assert!(!sections[0].html.contains("Pork content"));
    }

    #[test]
    fn split_skips_short_and_numeric_titles() {
        let html = r"
            <html><body>
            <h2>42</h2><p>page number artifact</p>
            <h2>ok</h2><p>too short</p>
            <h2>Smoked Brisket</h2><p>real</p>
            <h2>Pulled Pork</h2><p>real</p>
            </body></html>";
        let doc = dom::parse(html);
        let sections = split_by_headers(&doc);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Smoked Brisket");
    }

    #[test]
    fn split_falls_back_to_all_headers_below_three() {
        let html = r"
            <html><body>
            <h2>Smoked Brisket</h2><p>Brisket content here.</p>
            <h2>Pulled Pork</h2><p>Pork content here.</p>
            </body></html>";
        let doc = dom::parse(html);
        let sections = split_by_headers(&doc);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Smoked Brisket");
        assert_eq!(sections[1].title, "Pulled Pork");
        assert!(sections[0].html.contains("Brisket content"));
        assert!(!sections[0].html.contains("Pork content"));
    }

    #[test]
    fn split_without_headers_returns_whole_document() {
        let doc = dom::parse("<html><head><title>One Recipe</title></head><body><p>all of it</p></body></html>");
        let sections = split_by_headers(&doc);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "One Recipe");
        assert!(sections[0].html.contains("all of it"));
    }

    #[test]
    fn section_document_reparses() {
        let section = Section {
            title: "Test".to_string(),
            html: "<h2>Test</h2><ul><li>2 cups flour</li></ul>".to_string(),
        };
        let doc = section.document();
        assert_eq!(doc.select("li").length(), 1);
    }
}
