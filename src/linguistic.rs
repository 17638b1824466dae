//! Linguistic analyzers.
//!
//! A second opinion on zone text, deliberately built from different features
//! than the lexical detectors (sentence shape, narrative-word ratio, stop
//! phrases rather than measurements and verb vocabulary) so that the two
//! judgments do not fail together on the same odd formatting.

use crate::band::{clamp_unit, Band};
use crate::patterns;
use crate::zone::ComponentKind;

const MIN_TEXT_LEN: usize = 10;

/// Prefixes that mark a block as commentary rather than the instruction
/// body. Matching any of these at the start is a hard veto.
const INSTRUCTION_STOP_PREFIXES: &[&str] = &[
    "tip:",
    "tips:",
    "note:",
    "notes:",
    "variation:",
    "variations:",
    "chef's note",
    "cook's note",
    "make ahead",
    "serving suggestion",
];

/// First-person and storytelling words; recipe headnotes are full of them,
/// instruction bodies are not.
const NARRATIVE_WORDS: &[&str] = &[
    "i ", "my ", "we ", "our ", "me ", "i'm", "i've", "remember", "childhood", "grandmother",
    "grandma", "family", "favorite", "love", "story", "years ago", "growing up",
];

/// Descriptors typical of ingredient lines; a cheap part-of-speech stand-in.
const INGREDIENT_DESCRIPTORS: &[&str] = &[
    "fresh", "dried", "chopped", "diced", "sliced", "minced", "grated", "ground", "whole",
    "crushed", "raw", "cooked", "frozen", "canned", "large", "small", "medium", "finely",
    "coarsely", "thinly",
];

/// Verbs that flag a line as instruction-like when judging ingredient text.
const INSTRUCTION_VERBS: &[&str] = &[
    "add", "mix", "stir", "cook", "bake", "boil", "simmer", "fry", "sauté", "chop", "dice",
    "slice", "mince", "blend", "whisk", "beat", "fold", "season", "serve", "garnish", "preheat",
    "combine", "pour", "heat", "brown", "reduce", "drain", "rinse", "cover", "remove",
];

/// Average sentence length (chars) typical of instruction prose.
const SENTENCE_LENGTH_BAND: Band = Band::window(15.0, 40.0, 160.0, 300.0);

/// Average line length (chars) typical of ingredient lists.
const INGREDIENT_LINE_BAND: Band = Band::window(5.0, 20.0, 80.0, 150.0);

/// Linguistic score for a component kind.
#[must_use]
pub fn score(kind: ComponentKind, text: &str) -> f64 {
    match kind {
        ComponentKind::Ingredients => ingredient_score(text),
        ComponentKind::Instructions => instruction_score(text),
        ComponentKind::Metadata => metadata_score(text),
    }
}

/// How much this text reads like an ingredient list: short consistent
/// lines, descriptor words, list markers, and an absence of verb-led prose.
#[must_use]
pub fn ingredient_score(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.len() < MIN_TEXT_LEN {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();
    let lines: Vec<&str> = lower
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return 0.0;
    }
    let total = lines.len() as f64;

    let mut value = 0.0;

    let verb_lines = lines
        .iter()
        .filter(|line| INSTRUCTION_VERBS.iter().any(|v| line.contains(v)))
        .count() as f64;
    if verb_lines / total > 0.5 {
        value -= 0.3;
    }

    let descriptor_lines = lines
        .iter()
        .filter(|line| INGREDIENT_DESCRIPTORS.iter().any(|d| line.contains(d)))
        .count() as f64;
    value += descriptor_lines / total * 0.4;

    let avg_len = lines.iter().map(|l| l.len()).sum::<usize>() as f64 / total;
    value += INGREDIENT_LINE_BAND.score(avg_len) * 0.3 - if avg_len > 150.0 { 0.2 } else { 0.0 };

    let marker_lines = lines
        .iter()
        .filter(|line| patterns::LIST_MARKER.is_match(line))
        .count() as f64;
    value += marker_lines / total * 0.3;

    // Centered so that neutral text lands mid-scale rather than at zero.
    clamp_unit(value + 0.5)
}

/// How much this text reads like an instruction body. Returns 0.0 outright
/// for known commentary prefixes.
#[must_use]
pub fn instruction_score(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.len() < MIN_TEXT_LEN {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();

    if INSTRUCTION_STOP_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return 0.0;
    }

    let sentences: Vec<&str> = patterns::SENTENCE_SPLIT
        .split(&lower)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return 0.0;
    }

    let avg_sentence = sentences.iter().map(|s| s.len()).sum::<usize>() as f64
        / sentences.len() as f64;
    let sentence_component = SENTENCE_LENGTH_BAND.score(avg_sentence) * 0.4;

    let narrative_hits = NARRATIVE_WORDS
        .iter()
        .filter(|w| lower.contains(*w))
        .count();
    let narrative_component = clamp_unit(1.0 - narrative_hits as f64 / 3.0) * 0.3;

    // Real instruction bodies run several sentences; saturates at 4.
    let flow_component = (sentences.len() as f64 / 4.0).min(1.0) * 0.3;

    clamp_unit(sentence_component + narrative_component + flow_component)
}

/// How much this text reads like a metadata block: terse, separator-heavy,
/// numeric.
#[must_use]
pub fn metadata_score(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.len() < 3 {
        return 0.0;
    }
    let mut value = 0.0;

    // Metadata blocks are short.
    value += Band::window(0.0, 3.0, 80.0, 300.0).score(trimmed.len() as f64) * 0.4;

    if trimmed.contains(':') || trimmed.contains('|') {
        value += 0.3;
    }
    if patterns::ANY_DIGIT.is_match(trimmed) {
        value += 0.3;
    }
    clamp_unit(value)
}
