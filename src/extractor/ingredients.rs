//! Ingredient extraction.
//!
//! Zone-first, then the legacy capture chain over the section's plain text:
//! header capture, measurement-list capture, measurement-paragraph capture,
//! and finally a lenient consecutive-line run. The first capture that clears
//! the minimum length wins; later strategies never override an earlier one.

use crate::dom::Document;
use crate::patterns;
use crate::zone::{self, ComponentKind};

use super::{finish_fallback, section_text, zone_first, Extraction, ExtractionMode};

/// Minimum legacy capture length, in chars.
const MIN_CAPTURE_LEN: usize = 50;

/// Extract the ingredient list from a section fragment.
#[must_use]
pub fn extract(doc: &Document, mode: ExtractionMode) -> Option<Extraction> {
    if mode == ExtractionMode::ZoneFirst {
        if let Some(found) = zone_first(doc, &zone::INGREDIENTS) {
            return Some(found);
        }
    }
    let text = section_text(doc);
    legacy_capture(&text).map(|captured| finish_fallback(ComponentKind::Ingredients, captured))
}

/// The legacy chain, ordered most to least specific.
fn legacy_capture(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let captures = [
        header_capture(&lines),
        measurement_list_capture(&lines),
        measurement_paragraph_capture(&lines),
        line_run_capture(&lines),
    ];
    captures
        .into_iter()
        .flatten()
        .find(|captured| captured.len() >= MIN_CAPTURE_LEN)
}

/// Lines following an "Ingredients"-style header, up to the instruction
/// header or the first long prose line without a measurement.
fn header_capture(lines: &[&str]) -> Option<String> {
    let start = lines
        .iter()
        .position(|line| line.len() < 60 && patterns::INGREDIENT_HEADER.is_match(line))?;

    let mut captured = Vec::new();
    for line in &lines[start + 1..] {
        if patterns::INSTRUCTION_HEADER.is_match(line) && line.len() < 60 {
            break;
        }
        if line.len() > 120 && !patterns::MEASUREMENT.is_match(line) {
            break;
        }
        captured.push(*line);
    }
    join_nonempty(&captured)
}

/// The longest run of consecutive measurement-or-marker lines, three minimum.
fn measurement_list_capture(lines: &[&str]) -> Option<String> {
    let mut best: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for line in lines {
        let is_item = patterns::MEASUREMENT.is_match(line)
            || patterns::FRACTION.is_match(line)
            || patterns::LIST_MARKER.is_match(line);
        if is_item {
            run.push(line);
        } else {
            if run.len() > best.len() {
                best = std::mem::take(&mut run);
            }
            run.clear();
        }
    }
    if run.len() > best.len() {
        best = run;
    }
    if best.len() < 3 {
        return None;
    }
    join_nonempty(&best)
}

/// Paragraph-shaped lines that each pack two or more measurements, common
/// when a converter flattened the ingredient list into prose blocks.
fn measurement_paragraph_capture(lines: &[&str]) -> Option<String> {
    let captured: Vec<&str> = lines
        .iter()
        .filter(|line| patterns::MEASUREMENT.find_iter(line).count() >= 2)
        .copied()
        .collect();
    join_nonempty(&captured)
}

/// Last resort: the longest run of short consecutive lines, four minimum.
fn line_run_capture(lines: &[&str]) -> Option<String> {
    let mut best: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for line in lines {
        if line.len() < 80 {
            run.push(line);
        } else {
            if run.len() > best.len() {
                best = std::mem::take(&mut run);
            }
            run.clear();
        }
    }
    if run.len() > best.len() {
        best = run;
    }
    if best.len() < 4 {
        return None;
    }
    join_nonempty(&best)
}

fn join_nonempty(lines: &[&str]) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn structural_zone_is_preferred() {
        let doc = dom::parse(
            r#"<div class="ingredients">
                 <p>2 cups flour</p><p>1 tsp kosher salt</p>
                 <p>3 large eggs</p><p>1 cup whole milk</p>
               </div>"#,
        );
        let found = extract(&doc, ExtractionMode::ZoneFirst).unwrap();
        assert!(found.strategy.starts_with("structural_"));
        assert!(found.text.contains("2 cups flour"));
        assert!(found.confidence >= 0.5);
    }

    #[test]
    fn best_blended_zone_wins_over_a_stronger_prior() {
        // The microdata list carries the highest structural prior but weak
        // content; the class-detected list with real measurements must win.
        let doc = dom::parse(
            r#"<ul itemprop="recipeIngredient">
                 <li>flour for dusting the board</li>
                 <li>a little butter for the pan</li>
                 <li>whatever herbs look good</li>
               </ul>
               <ul class="ingredients">
                 <li>2 cups all-purpose flour</li>
                 <li>1 tsp kosher salt</li>
                 <li>3 large eggs</li>
                 <li>1 cup whole milk</li>
               </ul>"#,
        );
        let found = extract(&doc, ExtractionMode::ZoneFirst).unwrap();
        assert_eq!(found.strategy, "structural_css_class");
        assert!(found.text.contains("2 cups all-purpose flour"));
        assert!(!found.text.contains("dusting the board"));
    }

    #[test]
    fn legacy_only_mode_skips_zones() {
        let doc = dom::parse(
            r#"<div class="ingredients">
                 <p>Ingredients</p>
                 <p>2 cups flour</p><p>1 tsp kosher salt</p>
                 <p>3 large eggs</p><p>1 cup whole milk</p>
               </div>"#,
        );
        let found = extract(&doc, ExtractionMode::LegacyOnly).unwrap();
        assert_eq!(found.strategy, "original_with_patterns");
    }

    #[test]
    fn header_capture_stops_at_instruction_header() {
        let lines = vec![
            "Ingredients",
            "2 cups flour",
            "1 tsp salt",
            "3 eggs",
            "Method",
            "Mix everything together.",
        ];
        let captured = header_capture(&lines).unwrap();
        assert!(captured.contains("3 eggs"));
        assert!(!captured.contains("Mix everything"));
    }

    #[test]
    fn header_capture_wins_over_list_capture() {
        // Both strategies would fire; the header capture comes first.
        let text = "Ingredients\n2 cups flour\n1 tsp kosher salt\n3 large eggs\n1 cup whole milk";
        let captured = legacy_capture(text).unwrap();
        assert!(captured.starts_with("2 cups flour"));
    }

    #[test]
    fn measurement_list_requires_three_consecutive() {
        let lines = vec!["2 cups flour", "a story about flour", "1 tsp salt", "3 eggs"];
        assert!(measurement_list_capture(&lines).is_none());

        let lines = vec!["2 cups flour", "1 tsp salt", "3 eggs"];
        assert!(measurement_list_capture(&lines).is_some());
    }

    #[test]
    fn short_captures_are_rejected() {
        let text = "Ingredients\nsalt\npepper";
        assert!(legacy_capture(text).is_none());
    }

    #[test]
    fn empty_section_extracts_nothing() {
        let doc = dom::parse("<div><p>A short note.</p></div>");
        assert!(extract(&doc, ExtractionMode::ZoneFirst).is_none());
    }
}
