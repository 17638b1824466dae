//! Component extractors.
//!
//! Each extractor blends three independent judgments over a candidate zone:
//! the structural prior of the strategy that found it, the lexical pattern
//! score, and the linguistic score. A zone is accepted when the blend clears
//! the threshold; otherwise the legacy text-capture chain runs over the
//! section's plain text. Failure is `None`, never an error: a section with
//! no ingredient list is a fact about the section.

pub mod ingredients;
pub mod instructions;
pub mod metadata;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::band::clamp_unit;
use crate::dom::Document;
use crate::lexical;
use crate::linguistic;
use crate::text;
use crate::zone::{self, ZoneProfile};

pub use metadata::RecipeMetadata;

/// Which extraction arm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Structural zone detection first, legacy capture as fallback.
    ZoneFirst,
    /// Legacy text capture only.
    LegacyOnly,
}

const STRUCTURAL_WEIGHT: f64 = 0.30;
const PATTERN_WEIGHT: f64 = 0.50;
const LINGUISTIC_WEIGHT: f64 = 0.20;

/// Combined confidence an accepted structural zone must reach.
const ACCEPT_THRESHOLD: f64 = 0.5;
/// Zone text at or below this length is never accepted structurally.
const MIN_ZONE_TEXT_LEN: usize = 50;

/// One extracted component with its provenance.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub text: String,
    pub strategy: String,
    pub confidence: f64,
}

impl Extraction {
    /// Provenance entries for `Recipe::record_extraction`.
    #[must_use]
    pub fn provenance(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("strategy".to_string(), json!(self.strategy));
        map.insert("confidence".to_string(), json!(self.confidence));
        map
    }
}

/// Blend the three judgments into one acceptance score.
#[must_use]
pub fn combined_confidence(structural: f64, pattern: f64, linguistic: f64) -> f64 {
    clamp_unit(
        structural * STRUCTURAL_WEIGHT + pattern * PATTERN_WEIGHT + linguistic * LINGUISTIC_WEIGHT,
    )
}

/// Post-hoc confidence for legacy captures, which carry no structural prior.
fn fallback_confidence(pattern: f64, linguistic: f64) -> f64 {
    clamp_unit(
        (pattern * PATTERN_WEIGHT + linguistic * LINGUISTIC_WEIGHT)
            / (PATTERN_WEIGHT + LINGUISTIC_WEIGHT),
    )
}

/// Run zone detection for one profile, blend every candidate's scores, and
/// keep the highest-blended zone if it clears the threshold.
///
/// The structural prior alone does not settle the order: a zone found by a
/// weaker strategy can still win on content.
fn zone_first(doc: &Document, profile: &ZoneProfile) -> Option<Extraction> {
    let mut best: Option<Extraction> = None;
    for zone in zone::find_zones(doc, profile) {
        let text = zone.text();
        if text.len() <= MIN_ZONE_TEXT_LEN {
            continue;
        }
        let pattern = lexical::confidence(profile.kind, &text);
        let linguistic = linguistic::score(profile.kind, &text);
        let combined = combined_confidence(zone.confidence, pattern, linguistic);
        debug!(
            component = profile.kind.as_str(),
            method = zone.method,
            structural = zone.confidence,
            pattern,
            linguistic,
            combined,
            "zone candidate"
        );
        if best.as_ref().is_none_or(|found| combined > found.confidence) {
            best = Some(Extraction {
                text,
                strategy: format!("structural_{}", zone.method),
                confidence: combined,
            });
        }
    }
    best.filter(|found| found.confidence >= ACCEPT_THRESHOLD)
}

/// Wrap a legacy capture with its post-hoc pattern and linguistic scores.
fn finish_fallback(kind: zone::ComponentKind, text: String) -> Extraction {
    let pattern = lexical::confidence(kind, &text);
    let linguistic = linguistic::score(kind, &text);
    Extraction {
        confidence: fallback_confidence(pattern, linguistic),
        strategy: "original_with_patterns".to_string(),
        text,
    }
}

/// Plain text of the whole section fragment, for the legacy chains.
fn section_text(doc: &Document) -> String {
    text::extract_text(&doc.select("body"))
}
