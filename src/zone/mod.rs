//! Structural zone detection.
//!
//! A zone is a candidate sub-region of a section fragment that may hold one
//! recipe component. Zones borrow from the parsed document and live only for
//! one extraction call. Detection strategies are unioned, not
//! short-circuited; the union is deduplicated by node identity and
//! containment, then sorted by confidence.

pub mod profiles;
mod structural;

use std::cmp::Ordering;

pub use profiles::{ComponentKind, ZoneProfile, INGREDIENTS, INSTRUCTIONS, METADATA};
pub use structural::find_zones;

use crate::dom::{self, NodeId, Selection};
use crate::text;

/// A candidate component region with its detection provenance.
///
/// `confidence` is a fixed prior for the strategy that proposed the zone,
/// not a content judgment; the extractor blends it with pattern and
/// linguistic scores before accepting anything.
#[derive(Debug, Clone)]
pub struct Zone<'a> {
    pub selection: Selection<'a>,
    pub method: &'static str,
    pub confidence: f64,
    /// For metadata zones, the fields this zone may satisfy.
    pub field_hints: Vec<&'static str>,
}

impl<'a> Zone<'a> {
    #[must_use]
    pub fn new(selection: Selection<'a>, method: &'static str, confidence: f64) -> Self {
        Self {
            selection,
            method,
            confidence,
            field_hints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hints(
        selection: Selection<'a>,
        method: &'static str,
        confidence: f64,
        field_hints: Vec<&'static str>,
    ) -> Self {
        Self {
            selection,
            method,
            confidence,
            field_hints,
        }
    }

    /// Plain text of the zone, one line per block element.
    #[must_use]
    pub fn text(&self) -> String {
        text::extract_text(&self.selection)
    }

    /// Identity of the underlying node, for deduplication.
    #[must_use]
    pub fn node_id(&self) -> Option<NodeId> {
        dom::node_id(&self.selection)
    }
}

/// Deduplicate zones and sort them by confidence descending.
///
/// Two rules collapse the union of strategy outputs:
/// - the same node reported twice keeps the higher-confidence report;
/// - of two nested zones, the outer one wins only when its confidence is
///   not lower than the inner's; at equal confidence the outer (container)
///   zone is kept. One rule for all component families.
#[must_use]
pub fn dedupe_and_sort(mut zones: Vec<Zone>) -> Vec<Zone> {
    zones.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut accepted: Vec<Zone> = Vec::new();
    'candidates: for zone in zones {
        let Some(zone_id) = zone.node_id() else {
            continue;
        };

        // Indices of accepted zones nested inside this candidate.
        let mut contained: Vec<usize> = Vec::new();
        for (i, kept) in accepted.iter().enumerate() {
            let Some(kept_id) = kept.node_id() else {
                continue;
            };
            if kept_id == zone_id || dom::is_descendant(&zone.selection, kept_id) {
                continue 'candidates;
            }
            if dom::is_descendant(&kept.selection, zone_id) {
                contained.push(i);
            }
        }

        if contained
            .iter()
            .any(|&i| accepted[i].confidence > zone.confidence)
        {
            continue;
        }
        for &i in contained.iter().rev() {
            accepted.remove(i);
        }
        accepted.push(zone);
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_node_keeps_highest_confidence() {
        let doc = dom::parse(r#"<ul class="ingredients"><li>2 cups flour</li><li>1 tsp salt</li></ul>"#);
        let zones = vec![
            Zone::new(doc.select("ul"), "list_based", 0.70),
            Zone::new(doc.select("ul"), "css_class", 0.90),
        ];

        let deduped = dedupe_and_sort(zones);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].method, "css_class");
        assert_eq!(deduped[0].confidence, 0.90);
    }

    #[test]
    fn nested_zone_outer_wins_at_equal_confidence() {
        let doc = dom::parse(r#"<div id="outer"><ul id="inner"><li>2 cups flour</li></ul></div>"#);
        let zones = vec![
            Zone::new(doc.select("#inner"), "list_based", 0.75),
            Zone::new(doc.select("#outer"), "paragraph_class", 0.75),
        ];

        let deduped = dedupe_and_sort(zones);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].method, "paragraph_class");
    }

    #[test]
    fn nested_zone_inner_wins_when_more_confident() {
        let doc = dom::parse(r#"<div id="outer"><ul id="inner"><li>2 cups flour</li></ul></div>"#);
        let zones = vec![
            Zone::new(doc.select("#inner"), "css_class", 0.90),
            Zone::new(doc.select("#outer"), "position_heuristic", 0.65),
        ];

        let deduped = dedupe_and_sort(zones);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].method, "css_class");
    }

    #[test]
    fn result_sorted_descending() {
        let doc = dom::parse("<ul id='a'><li>x</li></ul><ol id='b'><li>y</li></ol><div id='c'>z</div>");
        let zones = vec![
            Zone::new(doc.select("#a"), "position_heuristic", 0.65),
            Zone::new(doc.select("#b"), "numbered_list", 0.80),
            Zone::new(doc.select("#c"), "css_class", 0.90),
        ];

        let deduped = dedupe_and_sort(zones);
        let confidences: Vec<f64> = deduped.iter().map(|z| z.confidence).collect();
        assert_eq!(confidences, vec![0.90, 0.80, 0.65]);
    }
}
