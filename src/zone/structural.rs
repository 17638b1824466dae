//! The structural detection strategy cascade.
//!
//! Strategies are ordered by reliability and all of them run; the union is
//! collapsed afterwards. Fixed priors per strategy:
//!
//! 1. microdata itemprop           0.95
//! 2. CSS class match              0.90 exact / 0.85 partial
//! 3. id attribute match           0.85
//! 4. header adjacency             0.85 list / 0.80 div / 0.75 other
//! 5. list shape                   0.70-0.80
//! 6. paragraph-class clustering   0.75
//! 7. position                     0.65-0.75

use tracing::trace;

use crate::dom::{self, Document, Selection};
use crate::patterns;
use crate::zone::profiles::{self, ComponentKind, ZoneProfile};
use crate::zone::{dedupe_and_sort, Zone};

/// Run the full cascade for one component family over a section fragment.
///
/// Returns deduplicated zones sorted by confidence descending. An empty
/// result means structural detection has nothing to say, not that the
/// component is absent.
#[must_use]
pub fn find_zones<'a>(doc: &'a Document, profile: &ZoneProfile) -> Vec<Zone<'a>> {
    let mut zones = Vec::new();

    find_microdata(doc, profile, &mut zones);
    find_by_class(doc, profile, &mut zones);
    find_by_id(doc, profile, &mut zones);
    find_by_header(doc, profile, &mut zones);

    match profile.kind {
        ComponentKind::Ingredients => {
            find_measurement_lists(doc, &mut zones);
            find_paragraph_runs(doc, profile, &mut zones);
            find_first_list(doc, &mut zones);
        }
        ComponentKind::Instructions => {
            find_ordered_lists(doc, &mut zones);
            find_post_ingredient_blocks(doc, &mut zones);
        }
        ComponentKind::Metadata => {
            find_definition_lists(doc, &mut zones);
            find_colon_lists(doc, &mut zones);
            find_early_blocks(doc, &mut zones);
        }
    }

    let zones = dedupe_and_sort(zones);
    trace!(
        component = profile.kind.as_str(),
        count = zones.len(),
        "structural zones detected"
    );
    zones
}

/// Strategy 1: explicit microdata markup, the strongest author signal.
fn find_microdata<'a>(doc: &'a Document, profile: &ZoneProfile, zones: &mut Vec<Zone<'a>>) {
    for prop in profile.itemprops {
        let sel = doc.select(&format!(r#"[itemprop="{prop}"]"#));
        for elem in sel.iter() {
            if profile.kind == ComponentKind::Metadata {
                let container = enclosing_block(&elem);
                let hints = profiles::itemprop_field(prop).map_or_else(Vec::new, |f| vec![f]);
                zones.push(Zone::with_hints(container, "schema_org", 0.95, hints));
            } else {
                zones.push(Zone::new(elem, "schema_org", 0.95));
            }
        }
    }
}

/// Nearest div/section/article ancestor, or the element itself.
fn enclosing_block<'a>(sel: &Selection<'a>) -> Selection<'a> {
    let mut current = sel.parent();
    while current.length() > 0 {
        match dom::tag_name(&current).as_deref() {
            Some("div" | "section" | "article") => return current,
            Some("html") | None => break,
            _ => {}
        }
        current = current.parent();
    }
    sel.clone()
}

/// Strategy 2: class-name vocabulary, token equality above containment.
fn find_by_class<'a>(doc: &'a Document, profile: &ZoneProfile, zones: &mut Vec<Zone<'a>>) {
    for elem in doc.select(profile.container_selector).iter() {
        let tokens = dom::class_tokens(&elem);
        if tokens.is_empty() {
            continue;
        }
        let exact = tokens
            .iter()
            .any(|t| profile.css_classes.contains(&t.as_str()));
        let partial = exact
            || tokens
                .iter()
                .any(|t| profile.css_classes.iter().any(|k| t.contains(k)));
        if exact {
            zones.push(Zone::new(elem, "css_class", 0.90));
        } else if partial {
            let hints = if profile.kind == ComponentKind::Metadata {
                profiles::infer_fields(&tokens.join(" "))
            } else {
                Vec::new()
            };
            zones.push(Zone::with_hints(elem, "css_class", 0.85, hints));
        }
    }
}

/// Strategy 3: id-attribute vocabulary.
fn find_by_id<'a>(doc: &'a Document, profile: &ZoneProfile, zones: &mut Vec<Zone<'a>>) {
    for elem in doc.select("[id]").iter() {
        let Some(id) = dom::id(&elem) else { continue };
        let id = id.to_lowercase();
        if profile.id_fragments.iter().any(|frag| id.contains(frag)) {
            zones.push(Zone::new(elem, "id_attribute", 0.85));
        }
    }
}

/// Strategy 4: content immediately after a matching header. Lists following
/// a header are trusted more than loose blocks.
fn find_by_header<'a>(doc: &'a Document, profile: &ZoneProfile, zones: &mut Vec<Zone<'a>>) {
    for header in doc.select("h1, h2, h3, h4, h5, h6").iter() {
        let header_text = dom::text_content(&header);
        if !profile.header_pattern.is_match(header_text.trim()) {
            continue;
        }
        let Some(following) = dom::next_element_sibling(&header) else {
            continue;
        };
        let confidence = match dom::tag_name(&following).as_deref() {
            Some("ul" | "ol" | "dl") => 0.85,
            Some("div" | "section") => 0.80,
            _ => 0.75,
        };
        zones.push(Zone::new(following, "header_based", confidence));
    }
}

/// Strategy 5 (ingredients): lists where enough items carry a measurement.
fn find_measurement_lists<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    for list in doc.select("ul, ol").iter() {
        let items = dom::direct_list_items(&list);
        if items.len() < 2 {
            continue;
        }
        let with_measurement = items
            .iter()
            .filter(|item| patterns::MEASUREMENT.is_match(item))
            .count();
        let ratio = with_measurement as f64 / items.len() as f64;

        let confidence = if ratio >= 0.5 {
            0.75
        } else if ratio >= 0.3 {
            0.70
        } else {
            continue;
        };
        zones.push(Zone::new(list, "list_based", confidence));
    }
}

/// Strategy 6 (ingredients): runs of >=3 consecutive paragraphs sharing an
/// ingredient-like class, common in EPUB conversions that never use lists.
fn find_paragraph_runs<'a>(doc: &'a Document, profile: &ZoneProfile, zones: &mut Vec<Zone<'a>>) {
    let mut run: Vec<Selection<'a>> = Vec::new();

    let mut close_run = |run: &mut Vec<Selection<'a>>, zones: &mut Vec<Zone<'a>>| {
        if run.len() >= 3 {
            if let Some(first) = run.first() {
                let parent = first.parent();
                if parent.length() > 0 {
                    zones.push(Zone::new(parent, "paragraph_class", 0.75));
                }
            }
        }
        run.clear();
    };

    for para in doc.select("p").iter() {
        let tokens = dom::class_tokens(&para);
        let matches = tokens
            .iter()
            .any(|t| profile.paragraph_classes.contains(&t.as_str()));
        if matches {
            run.push(para);
        } else {
            close_run(&mut run, zones);
        }
    }
    close_run(&mut run, zones);
}

/// Strategy 7 (ingredients): the first of several lists is usually the
/// ingredient list. Last resort.
fn find_first_list<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    let lists: Vec<Selection> = doc.select("ul, ol").iter().collect();
    if lists.len() >= 2 {
        if let Some(first) = lists.into_iter().next() {
            zones.push(Zone::new(first, "position_heuristic", 0.65));
        }
    }
}

/// Strategy 5 (instructions): an ordered list with at least two steps.
fn find_ordered_lists<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    for list in doc.select("ol").iter() {
        if dom::direct_list_items(&list).len() >= 2 {
            zones.push(Zone::new(list, "numbered_list", 0.80));
        }
    }
}

/// Markers that announce an ingredient section for positional lookahead.
const INGREDIENT_MARKERS: &[&str] = &["ingredient", "for the", "you will need", "you'll need"];

/// Strategy 7 (instructions): substantial blocks within 10 siblings after
/// an ingredient marker.
fn find_post_ingredient_blocks<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    for marker in doc.select("div, section, h1, h2, h3, h4, h5, h6, p").iter() {
        let text = dom::text_content(&marker);
        let text = text.trim().to_lowercase();
        if text.len() >= 50 || !INGREDIENT_MARKERS.iter().any(|m| text.contains(m)) {
            continue;
        }
        for sibling in dom::element_siblings_after(&marker, 10) {
            if !matches!(
                dom::tag_name(&sibling).as_deref(),
                Some("p" | "div" | "section")
            ) {
                continue;
            }
            let sibling_text = dom::text_content(&sibling);
            if sibling_text.trim().len() > 40 {
                zones.push(Zone::new(sibling, "post_ingredients", 0.75));
            }
        }
    }
}

/// Strategy 5 (metadata): definition lists with a plausible number of terms.
fn find_definition_lists<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    for dl in doc.select("dl").iter() {
        let terms: Vec<Selection> = dl.select("dt").iter().collect();
        if terms.is_empty() || terms.len() > 10 {
            continue;
        }
        let mut hints = Vec::new();
        for term in &terms {
            for hint in profiles::infer_fields(&dom::text_content(term)) {
                if !hints.contains(&hint) {
                    hints.push(hint);
                }
            }
        }
        zones.push(Zone::with_hints(dl, "definition_list", 0.80, hints));
    }
}

/// Strategy 5b (metadata): short lists where most items are "key: value".
fn find_colon_lists<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    for ul in doc.select("ul").iter() {
        let items = dom::direct_list_items(&ul);
        if items.is_empty() || items.len() > 10 {
            continue;
        }
        let with_colon = items.iter().filter(|item| item.contains(':')).count();
        if with_colon as f64 / items.len() as f64 > 0.5 {
            zones.push(Zone::new(ul, "list_structure", 0.75));
        }
    }
}

const METADATA_WORDS: &[&str] = &["serves", "prep", "cook", "time", "yield", "makes"];

/// Strategy 7 (metadata): short blocks near the top of the fragment.
/// Metadata lines almost always precede the ingredient list.
fn find_early_blocks<'a>(doc: &'a Document, zones: &mut Vec<Zone<'a>>) {
    let mut found = 0usize;
    for (index, elem) in doc.select("div, section, article, p").iter().enumerate() {
        if index >= 10 || found >= 3 {
            break;
        }
        let text = dom::text_content(&elem);
        let text = text.trim().to_lowercase();
        if text.len() > 200 {
            continue;
        }
        if METADATA_WORDS.iter().any(|w| text.contains(w)) {
            zones.push(Zone::new(elem, "early_position", 0.70));
            found += 1;
        }
    }
}
