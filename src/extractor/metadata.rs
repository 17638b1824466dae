//! Metadata extraction.
//!
//! Field-oriented rather than zone-oriented: each field (servings, times,
//! cooking method, protein, difficulty) is resolved independently over a
//! candidate list built from the section title, the detected metadata zones,
//! and the full section text. Zones hinted for a field (microdata itemprops,
//! definition-list terms, class tokens) are consulted for that field before
//! the rest. A candidate only counts for a field when that
//! field's own confidence clears the gate, so a long headnote that happens
//! to mention "serves" cannot set the serving count.

use crate::dom::Document;
use crate::lexical::{self, MetadataField};
use crate::patterns;
use crate::recipe::CookingMethod;
use crate::zone;

use super::section_text;

/// Per-field confidence gate.
const MIN_FIELD_CONFIDENCE: f64 = 0.3;
/// Times longer than a day are converter garbage.
const MAX_MINUTES: u32 = 1440;

/// The resolved metadata fields with their extraction provenance.
#[derive(Debug, Clone, Default)]
pub struct RecipeMetadata {
    pub serves: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub cooking_method: Option<CookingMethod>,
    pub protein_type: Option<String>,
    pub difficulty: Option<&'static str>,
    /// Highest field confidence among the resolved fields.
    pub confidence: f64,
    /// Whether any field came from a structurally detected zone.
    pub structural: bool,
}

impl RecipeMetadata {
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        if self.structural {
            "structural_metadata"
        } else {
            "original_with_patterns"
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.serves.is_none()
            && self.prep_time.is_none()
            && self.cook_time.is_none()
            && self.cooking_method.is_none()
            && self.protein_type.is_none()
            && self.difficulty.is_none()
    }
}

struct Candidate {
    text: String,
    structural: bool,
    /// Field hints carried over from the zone that produced this candidate.
    hints: Vec<&'static str>,
}

/// Resolve all metadata fields for a section.
#[must_use]
pub fn extract(doc: &Document, title: &str) -> RecipeMetadata {
    let mut candidates = vec![Candidate {
        text: title.to_string(),
        structural: false,
        hints: Vec::new(),
    }];
    for found in zone::find_zones(doc, &zone::METADATA) {
        candidates.push(Candidate {
            text: found.text(),
            structural: true,
            hints: found.field_hints,
        });
    }
    candidates.push(Candidate {
        text: section_text(doc),
        structural: false,
        hints: Vec::new(),
    });

    let mut out = RecipeMetadata::default();

    resolve(&candidates, MetadataField::Servings, &["servings"], parse_servings, &mut out, |m, v| {
        m.serves = Some(v);
    });
    resolve(&candidates, MetadataField::Time, &["prep_time", "time"], parse_prep_time, &mut out, |m, v| {
        m.prep_time = Some(v);
    });
    resolve(&candidates, MetadataField::Time, &["cook_time", "time"], parse_cook_time, &mut out, |m, v| {
        m.cook_time = Some(v);
    });
    resolve(&candidates, MetadataField::Method, &["cooking_method"], parse_method, &mut out, |m, v| {
        m.cooking_method = Some(v);
    });
    resolve(&candidates, MetadataField::Protein, &[], parse_protein, &mut out, |m, v| {
        m.protein_type = Some(v);
    });
    resolve(&candidates, MetadataField::Difficulty, &["difficulty"], parse_difficulty, &mut out, |m, v| {
        m.difficulty = Some(v);
    });

    out
}

fn has_hint(candidate: &Candidate, hint_keys: &[&str]) -> bool {
    candidate.hints.iter().any(|hint| hint_keys.contains(hint))
}

/// Try candidates hinted for this field first, then the rest in order; the
/// first that clears the field gate and parses wins.
fn resolve<T>(
    candidates: &[Candidate],
    field: MetadataField,
    hint_keys: &[&str],
    parse: fn(&str) -> Option<T>,
    out: &mut RecipeMetadata,
    store: fn(&mut RecipeMetadata, T),
) {
    let hinted = candidates.iter().filter(|c| has_hint(c, hint_keys));
    let unhinted = candidates.iter().filter(|c| !has_hint(c, hint_keys));
    for candidate in hinted.chain(unhinted) {
        let confidence = lexical::metadata_field_confidence(field, &candidate.text);
        if confidence <= MIN_FIELD_CONFIDENCE {
            continue;
        }
        if let Some(value) = parse(&candidate.text) {
            store(out, value);
            out.confidence = out.confidence.max(confidence);
            out.structural |= candidate.structural;
            return;
        }
    }
}

/// Normalize a serving count to `N` or `N-M`.
fn parse_servings(text: &str) -> Option<String> {
    let captured = patterns::SERVES.captures(text)?;
    let raw = captured.get(1)?.as_str();
    let numbers = patterns::SERVINGS_NUMBER.captures(raw)?;
    match (numbers.get(1), numbers.get(2), numbers.get(3)) {
        (Some(lo), Some(hi), _) => Some(format!("{}-{}", lo.as_str(), hi.as_str())),
        (_, _, Some(n)) => Some(n.as_str().to_string()),
        _ => None,
    }
}

fn parse_prep_time(text: &str) -> Option<u32> {
    let captured = patterns::PREP_TIME.captures(text)?;
    parse_minutes(captured.get(1)?.as_str())
}

fn parse_cook_time(text: &str) -> Option<u32> {
    let captured = patterns::COOK_TIME.captures(text)?;
    parse_minutes(captured.get(1)?.as_str())
}

/// Normalize a free-form duration to whole minutes.
///
/// "1 hour 30 minutes" -> 90, "45 min" -> 45, bare "45" -> 45. Negated
/// values and anything over 24 hours are dropped as converter garbage.
fn parse_minutes(value: &str) -> Option<u32> {
    let value = value.trim();
    if patterns::NEGATIVE_TIME.is_match(value) {
        return None;
    }

    let mut minutes = 0.0f64;
    let mut matched = false;
    if let Some(captured) = patterns::HOURS.captures(value) {
        minutes += captured.get(1)?.as_str().parse::<f64>().ok()? * 60.0;
        matched = true;
    }
    if let Some(captured) = patterns::MINUTES.captures(value) {
        minutes += captured.get(1)?.as_str().parse::<f64>().ok()?;
        matched = true;
    }
    if !matched {
        if !patterns::BARE_NUMBER.is_match(value) {
            return None;
        }
        minutes = value.parse::<f64>().ok()?;
    }

    let minutes = minutes.round();
    if minutes < 1.0 || minutes > f64::from(MAX_MINUTES) {
        return None;
    }
    Some(minutes as u32)
}

fn parse_method(text: &str) -> Option<CookingMethod> {
    let lower = text.to_lowercase();
    for (canonical, keywords) in patterns::COOKING_METHODS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return CookingMethod::from_keyword(canonical);
        }
    }
    None
}

fn parse_protein(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    patterns::PROTEIN_TYPES
        .iter()
        .find(|protein| lower.contains(*protein))
        .map(|protein| (*protein).to_string())
}

/// The strongest difficulty keyword present, as its canonical label.
fn parse_difficulty(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    lexical::DIFFICULTY_KEYWORDS
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, level)| *level)
        .max()
        .map(lexical::difficulty_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn minutes_normalization() {
        assert_eq!(parse_minutes("1 hour 30 minutes"), Some(90));
        assert_eq!(parse_minutes("45 min"), Some(45));
        assert_eq!(parse_minutes("1.5 hours"), Some(90));
        assert_eq!(parse_minutes("45"), Some(45));
        assert_eq!(parse_minutes("-5 minutes"), None);
        assert_eq!(parse_minutes("30 hours"), None);
        assert_eq!(parse_minutes("overnight"), None);
    }

    #[test]
    fn servings_normalization() {
        assert_eq!(parse_servings("Serves 4"), Some("4".to_string()));
        assert_eq!(parse_servings("Serves 4-6 people"), Some("4-6".to_string()));
        assert_eq!(parse_servings("Makes: 4 to 6"), Some("4-6".to_string()));
        assert_eq!(parse_servings("a crowd"), None);
    }

    #[test]
    fn fields_resolve_from_section() {
        let doc = dom::parse(
            r"<p>Serves 4-6 | Prep time: 20 minutes | Cook time: 1 hour 30 minutes</p>
              <p>2 pounds beef chuck, cut into cubes</p>",
        );
        let meta = extract(&doc, "Smoked Beef Chuck");

        assert_eq!(meta.serves.as_deref(), Some("4-6"));
        assert_eq!(meta.prep_time, Some(20));
        assert_eq!(meta.cook_time, Some(90));
        assert_eq!(meta.cooking_method, Some(CookingMethod::Smoke));
        assert_eq!(meta.protein_type.as_deref(), Some("beef"));
        assert!(meta.confidence > MIN_FIELD_CONFIDENCE);
    }

    #[test]
    fn method_comes_from_the_title() {
        let doc = dom::parse("<p>Serves 4</p>");
        let meta = extract(&doc, "Grilled Chicken Thighs");
        assert_eq!(meta.cooking_method, Some(CookingMethod::Grill));
        assert_eq!(meta.protein_type.as_deref(), Some("chicken"));
    }

    #[test]
    fn difficulty_takes_the_strongest_keyword() {
        assert_eq!(parse_difficulty("quick and easy"), Some("easy"));
        assert_eq!(
            parse_difficulty("easy start, challenging finish"),
            Some("advanced")
        );
        assert_eq!(parse_difficulty("no hints here"), None);
    }

    #[test]
    fn hinted_zone_outranks_a_stronger_zone_for_its_field() {
        // The class zone sorts first on confidence, but the definition list
        // carries a prep-time term hint and must be consulted first.
        let doc = dom::parse(
            r#"<div class="recipe-info">Prep time: 240 minutes for the full menu</div>
               <dl><dt>Prep time</dt><dd>20 minutes</dd></dl>"#,
        );
        let meta = extract(&doc, "Sunday Roast");
        assert_eq!(meta.prep_time, Some(20));
        assert!(meta.structural);
    }

    #[test]
    fn empty_section_yields_empty_metadata() {
        let doc = dom::parse("<p>A short story about nothing in particular.</p>");
        let meta = extract(&doc, "A Story");
        assert!(meta.is_empty());
        assert_eq!(meta.confidence, 0.0);
        assert_eq!(meta.strategy(), "original_with_patterns");
    }
}
