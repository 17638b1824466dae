//! Instruction extraction.
//!
//! Zone-first, then a legacy chain tuned for prose: header capture, numbered
//! step capture, verb-dense paragraph capture, and a lenient run of long
//! lines. The instruction minimum is higher than the ingredient minimum
//! because a usable method is never a one-liner.

use crate::dom::Document;
use crate::patterns;
use crate::zone::{self, ComponentKind};

use super::{finish_fallback, section_text, zone_first, Extraction, ExtractionMode};

/// Minimum legacy capture length, in chars.
const MIN_CAPTURE_LEN: usize = 100;

/// Extract the instruction body from a section fragment.
#[must_use]
pub fn extract(doc: &Document, mode: ExtractionMode) -> Option<Extraction> {
    if mode == ExtractionMode::ZoneFirst {
        if let Some(found) = zone_first(doc, &zone::INSTRUCTIONS) {
            return Some(found);
        }
    }
    let text = section_text(doc);
    legacy_capture(&text).map(|captured| finish_fallback(ComponentKind::Instructions, captured))
}

/// The legacy chain, ordered most to least specific.
fn legacy_capture(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let captures = [
        header_capture(&lines),
        numbered_step_capture(&lines),
        verb_paragraph_capture(&lines),
        line_run_capture(&lines),
    ];
    captures
        .into_iter()
        .flatten()
        .find(|captured| captured.len() >= MIN_CAPTURE_LEN)
}

/// Everything after a "Method"-style header, up to the next component
/// header.
fn header_capture(lines: &[&str]) -> Option<String> {
    let start = lines
        .iter()
        .position(|line| line.len() < 60 && patterns::INSTRUCTION_HEADER.is_match(line))?;

    let mut captured = Vec::new();
    for line in &lines[start + 1..] {
        if line.len() < 60 && patterns::INGREDIENT_HEADER.is_match(line) {
            break;
        }
        captured.push(*line);
    }
    join_nonempty(&captured)
}

/// Lines carrying a step number, two minimum.
fn numbered_step_capture(lines: &[&str]) -> Option<String> {
    let captured: Vec<&str> = lines
        .iter()
        .filter(|line| patterns::NUMBERED_STEP.is_match(line))
        .copied()
        .collect();
    if captured.len() < 2 {
        return None;
    }
    join_nonempty(&captured)
}

/// Paragraph-shaped lines dense in cooking verbs.
fn verb_paragraph_capture(lines: &[&str]) -> Option<String> {
    let captured: Vec<&str> = lines
        .iter()
        .filter(|line| line.len() > 60 && patterns::COOKING_VERBS.find_iter(line).count() >= 2)
        .copied()
        .collect();
    join_nonempty(&captured)
}

/// Last resort: the longest run of consecutive long lines.
fn line_run_capture(lines: &[&str]) -> Option<String> {
    let mut best: Vec<&str> = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for line in lines {
        if line.len() > 60 {
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

    const STEPS: &str = "<ol>\
        <li>Preheat the oven to 350 degrees and grease a large pan.</li>\
        <li>Mix the flour and salt, then beat in the eggs one at a time.</li>\
        <li>Pour into the pan and bake until golden, about 30 minutes.</li>\
        </ol>";

    #[test]
    fn ordered_list_zone_is_accepted() {
        let doc = dom::parse(STEPS);
        let found = extract(&doc, ExtractionMode::ZoneFirst).unwrap();
        assert!(found.strategy.starts_with("structural_"));
        assert!(found.text.contains("Preheat the oven"));
    }

    #[test]
    fn header_capture_takes_everything_after_method() {
        let lines = vec![
            "Method",
            "Preheat the oven to 350 degrees.",
            "Mix the flour and salt, then beat in the eggs.",
            "Bake until golden, about 30 minutes.",
        ];
        let captured = header_capture(&lines).unwrap();
        assert!(captured.contains("Bake until golden"));
        assert!(!captured.contains("Method"));
    }

    #[test]
    fn numbered_steps_require_two() {
        let lines = vec!["1. Preheat the oven to 350 degrees and grease the pan well."];
        assert!(numbered_step_capture(&lines).is_none());

        let lines = vec![
            "1. Preheat the oven to 350 degrees and grease the pan well.",
            "2. Mix the flour and salt together, then beat in the eggs.",
        ];
        assert!(numbered_step_capture(&lines).is_some());
    }

    #[test]
    fn minimum_length_gates_the_chain() {
        let text = "Method\nMix and bake.";
        assert!(legacy_capture(text).is_none());
    }

    #[test]
    fn verb_paragraphs_are_captured_without_headers() {
        let text = "A story about the dish and where it comes from, told at length.\n\
                    Heat the oil in a large pan and add the onion, then cook until soft.\n\
                    Stir in the garlic and season well, then transfer to the oven and bake.";
        let captured = legacy_capture(text).unwrap();
        assert!(captured.contains("Heat the oil"));
    }
}
