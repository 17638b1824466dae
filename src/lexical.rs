//! Lexical pattern detectors.
//!
//! `*_confidence` functions are pure over text content and ignore HTML
//! entirely, giving the extractor a judgment that cannot be fooled by
//! markup. Each component score is a weighted sum of feature ratios mapped
//! through trapezoidal bands ([`Band`]); the weights per component are fixed
//! in the tables below and sum to 1.0.

use crate::band::{clamp_unit, Band};
use crate::patterns;
use crate::zone::ComponentKind;

/// Minimum text length before ingredient/instruction scoring engages.
const MIN_TEXT_LEN: usize = 10;
/// Metadata values are legitimately tiny ("4-6"), so the floor is lower.
const MIN_METADATA_LEN: usize = 3;

// =============================================================================
// Component weight tables
// =============================================================================

struct IngredientWeights {
    measurement: f64,
    nouns: f64,
    descriptors: f64,
    list_structure: f64,
    line_length: f64,
    verb_absence: f64,
}

const INGREDIENT_WEIGHTS: IngredientWeights = IngredientWeights {
    measurement: 0.30,
    nouns: 0.25,
    descriptors: 0.15,
    list_structure: 0.15,
    line_length: 0.10,
    verb_absence: 0.05,
};

struct InstructionWeights {
    verb_density: f64,
    markers: f64,
    imperative: f64,
    paragraph_length: f64,
    measurement_scarcity: f64,
}

const INSTRUCTION_WEIGHTS: InstructionWeights = InstructionWeights {
    verb_density: 0.30,
    markers: 0.25,
    imperative: 0.20,
    paragraph_length: 0.15,
    measurement_scarcity: 0.10,
};

// =============================================================================
// Band boundaries
// =============================================================================

/// Fraction of lines carrying a measurement; saturates at 0.7.
const MEASUREMENT_RATIO_BAND: Band = Band::plateau(0.0, 0.7);
/// Distinct ingredient nouns per 100 chars; saturates at 3.
const NOUN_DENSITY_BAND: Band = Band::plateau(0.0, 3.0);
/// Distinct descriptors per 100 chars; saturates at 2.
const DESCRIPTOR_DENSITY_BAND: Band = Band::plateau(0.0, 2.0);
/// Average ingredient line length in chars.
const LINE_LENGTH_BAND: Band = Band::window(10.0, 40.0, 70.0, 120.0);
/// Cooking verbs per 100 words; instructions live between 3 and 10.
const VERB_DENSITY_BAND: Band = Band::window(0.0, 3.0, 10.0, 15.0);
/// Distinct temporal/sequential markers; saturates at 3.
const MARKER_COUNT_BAND: Band = Band::plateau(0.0, 3.0);
/// Instruction paragraph length in chars.
const PARAGRAPH_LENGTH_BAND: Band = Band::window(50.0, 100.0, 500.0, 1000.0);

// =============================================================================
// Keyword vocabulary
// =============================================================================

/// Ingredient nouns counted by presence anywhere in the text.
const INGREDIENT_NOUNS: &[&str] = &[
    // proteins
    "chicken", "beef", "pork", "fish", "shrimp", "salmon", "tuna", "turkey", "lamb", "bacon",
    "sausage", "ham", "steak", "ribs", "brisket", "tenderloin", "thighs", "breast", "wings",
    // dairy
    "milk", "cream", "butter", "cheese", "yogurt", "buttermilk", "parmesan", "cheddar",
    "mozzarella",
    // produce
    "onion", "garlic", "tomato", "potato", "carrot", "celery", "pepper", "jalapeño", "chili",
    "cucumber", "lettuce", "spinach", "kale", "broccoli", "cauliflower", "mushroom", "zucchini",
    "eggplant", "corn", "peas",
    // herbs and spices
    "salt", "paprika", "cumin", "oregano", "basil", "thyme", "rosemary", "parsley", "cilantro",
    "mint", "dill", "cinnamon", "nutmeg", "cloves", "ginger", "turmeric",
    // pantry
    "flour", "sugar", "oil", "vinegar", "soy sauce", "worcestershire", "ketchup", "mustard",
    "mayonnaise", "honey", "molasses", "stock", "broth", "wine", "beer", "water",
    // baking
    "egg", "eggs", "yeast", "baking powder", "baking soda", "vanilla", "chocolate", "cocoa",
    // grains
    "rice", "pasta", "noodles", "bread", "breadcrumbs", "cornstarch", "oats", "quinoa",
    "couscous",
    // fruit
    "lemon", "lime", "orange", "apple", "banana", "berries", "strawberry", "blueberry",
    "raspberry", "mango", "pineapple",
];

/// Preparation and state descriptors typical of ingredient lines.
const DESCRIPTORS: &[&str] = &[
    "large", "medium", "small", "jumbo", "extra-large", "fresh", "frozen", "dried", "canned",
    "room temperature", "cold", "warm", "chopped", "diced", "minced", "sliced", "grated",
    "shredded", "peeled", "crushed", "ground", "whole", "halved", "quartered", "cubed",
    "julienned", "thinly sliced", "finely chopped", "roughly chopped", "coarsely chopped",
    "ripe", "tender", "crisp", "firm", "organic", "kosher", "extra-virgin", "unsalted",
    "salted", "sweetened", "unsweetened",
];

/// Temporal and sequential connectives of instruction prose.
const TEMPORAL_MARKERS: &[&str] = &[
    "until", "after", "before", "while", "during", "when", "then", "once", "as soon as",
    "immediately", "gradually", "slowly", "first", "second", "third", "next", "finally",
    "lastly", "meanwhile", "at the same time",
];

/// Verbs that open an imperative instruction sentence.
const IMPERATIVE_STARTERS: &[&str] = &[
    "preheat", "heat", "place", "add", "mix", "stir", "combine", "whisk", "beat", "fold",
    "cook", "bake", "roast", "fry", "grill", "smoke", "bring", "remove", "transfer", "pour",
    "season", "cover", "simmer", "boil", "melt", "spread", "drain", "toss", "sauté", "chop",
    "slice", "rub", "wrap", "rest", "let",
];

/// A small verb set used only for the ingredient verb-absence bonus.
const INGREDIENT_VERB_SET: &[&str] = &[
    "preheat", "heat", "cook", "bake", "roast", "fry", "grill", "mix", "stir", "combine",
    "whisk", "beat", "fold", "bring", "remove", "transfer", "pour", "serve",
];

/// Difficulty keyword to level (1 easy, 2 intermediate, 3 advanced).
pub const DIFFICULTY_KEYWORDS: &[(&str, u8)] = &[
    ("easy", 1),
    ("simple", 1),
    ("beginner", 1),
    ("quick", 1),
    ("intermediate", 2),
    ("moderate", 2),
    ("advanced", 3),
    ("difficult", 3),
    ("expert", 3),
    ("challenging", 3),
];

/// Canonical label for a difficulty level.
#[must_use]
pub fn difficulty_label(level: u8) -> &'static str {
    match level {
        1 => "easy",
        2 => "intermediate",
        _ => "advanced",
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Confidence that `text` is a component of kind `kind`.
///
/// For [`ComponentKind::Metadata`] this is the maximum over all field
/// confidences, used when one number is needed for a metadata zone.
#[must_use]
pub fn confidence(kind: ComponentKind, text: &str) -> f64 {
    match kind {
        ComponentKind::Ingredients => ingredient_confidence(text),
        ComponentKind::Instructions => instruction_confidence(text),
        ComponentKind::Metadata => MetadataField::ALL
            .iter()
            .map(|field| metadata_field_confidence(*field, text))
            .fold(0.0, f64::max),
    }
}

/// Confidence that `text` is an ingredient list.
#[must_use]
pub fn ingredient_confidence(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.len() < MIN_TEXT_LEN {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();
    let lines: Vec<&str> = nonempty_lines(trimmed);
    if lines.is_empty() {
        return 0.0;
    }

    let w = &INGREDIENT_WEIGHTS;
    let score = measurement_line_score(&lines) * w.measurement
        + noun_density_score(&lower) * w.nouns
        + descriptor_score(&lower) * w.descriptors
        + list_structure_score(&lines) * w.list_structure
        + line_length_score(&lines) * w.line_length
        + verb_absence_score(&lower) * w.verb_absence;

    clamp_unit(score)
}

/// Confidence that `text` is an instruction body.
#[must_use]
pub fn instruction_confidence(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.len() < MIN_TEXT_LEN {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();

    let w = &INSTRUCTION_WEIGHTS;
    let score = verb_density_score(&lower) * w.verb_density
        + marker_score(&lower) * w.markers
        + imperative_score(&lower) * w.imperative
        + PARAGRAPH_LENGTH_BAND.score(trimmed.len() as f64) * w.paragraph_length
        + measurement_scarcity_score(trimmed) * w.measurement_scarcity;

    clamp_unit(score)
}

/// The metadata fields scored individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Servings,
    Time,
    Method,
    Protein,
    Difficulty,
}

impl MetadataField {
    pub const ALL: &'static [Self] = &[
        Self::Servings,
        Self::Time,
        Self::Method,
        Self::Protein,
        Self::Difficulty,
    ];
}

/// Confidence that `text` carries one specific metadata field.
#[must_use]
pub fn metadata_field_confidence(field: MetadataField, text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.len() < MIN_METADATA_LEN {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();
    match field {
        MetadataField::Servings => servings_confidence(&lower),
        MetadataField::Time => time_confidence(&lower),
        MetadataField::Method => method_confidence(&lower),
        MetadataField::Protein => protein_confidence(&lower),
        MetadataField::Difficulty => difficulty_confidence(&lower),
    }
}

// =============================================================================
// Shared feature helpers
// =============================================================================

fn nonempty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Count vocabulary words present anywhere in the text.
fn vocab_hits(text: &str, vocab: &[&str]) -> usize {
    vocab.iter().filter(|word| text.contains(*word)).count()
}

fn measurement_line_score(lines: &[&str]) -> f64 {
    let with_measurement = lines
        .iter()
        .filter(|line| patterns::MEASUREMENT.is_match(line) || patterns::FRACTION.is_match(line))
        .count();
    MEASUREMENT_RATIO_BAND.score(with_measurement as f64 / lines.len() as f64)
}

fn noun_density_score(lower: &str) -> f64 {
    let hits = vocab_hits(lower, INGREDIENT_NOUNS);
    NOUN_DENSITY_BAND.score(hits as f64 / lower.len() as f64 * 100.0)
}

fn descriptor_score(lower: &str) -> f64 {
    let hits = vocab_hits(lower, DESCRIPTORS);
    DESCRIPTOR_DENSITY_BAND.score(hits as f64 / lower.len() as f64 * 100.0)
}

/// Marker ratio blended with line-length consistency; three lines minimum
/// before any list shape can be claimed.
fn list_structure_score(lines: &[&str]) -> f64 {
    if lines.len() < 3 {
        return 0.0;
    }
    let marker_lines = lines
        .iter()
        .filter(|line| patterns::LIST_MARKER.is_match(line))
        .count();
    let marker_ratio = marker_lines as f64 / lines.len() as f64;

    let avg = lines.iter().map(|l| l.len()).sum::<usize>() as f64 / lines.len() as f64;
    let variance = lines
        .iter()
        .map(|l| (l.len() as f64 - avg).abs())
        .sum::<f64>()
        / lines.len() as f64;
    let consistency = 1.0 - (variance / 50.0).min(1.0);

    clamp_unit(marker_ratio * 0.6 + consistency * 0.4)
}

fn line_length_score(lines: &[&str]) -> f64 {
    let in_range = lines
        .iter()
        .filter(|line| (20..=100).contains(&line.len()))
        .count();
    let ratio = in_range as f64 / lines.len() as f64;

    let avg = lines.iter().map(|l| l.len()).sum::<usize>() as f64 / lines.len() as f64;
    ratio * 0.6 + LINE_LENGTH_BAND.score(avg) * 0.4
}

/// Fewer cooking verbs reads more like an ingredient list.
fn verb_absence_score(lower: &str) -> f64 {
    let count = lower
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| INGREDIENT_VERB_SET.contains(word))
        .count();
    clamp_unit(1.0 - count as f64 / 4.0)
}

fn verb_density_score(lower: &str) -> f64 {
    let word_count = lower.split_whitespace().count();
    if word_count == 0 {
        return 0.0;
    }
    let verbs = patterns::COOKING_VERBS.find_iter(lower).count();
    VERB_DENSITY_BAND.score(verbs as f64 / word_count as f64 * 100.0)
}

fn marker_score(lower: &str) -> f64 {
    MARKER_COUNT_BAND.score(vocab_hits(lower, TEMPORAL_MARKERS) as f64)
}

fn imperative_score(lower: &str) -> f64 {
    let sentences: Vec<&str> = patterns::SENTENCE_SPLIT
        .split(lower)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.is_empty() {
        return 0.0;
    }
    let imperative = sentences
        .iter()
        .filter(|sentence| {
            sentence
                .split_whitespace()
                .next()
                .map(|w| w.trim_matches(|c: char| ",.:;".contains(c)))
                .is_some_and(|first| IMPERATIVE_STARTERS.contains(&first))
        })
        .count();
    imperative as f64 / sentences.len() as f64
}

/// Measurement-heavy lines read like ingredients, not instructions.
fn measurement_scarcity_score(text: &str) -> f64 {
    let lines = nonempty_lines(text);
    if lines.is_empty() {
        return 1.0;
    }
    let with_measurement = lines
        .iter()
        .filter(|line| patterns::MEASUREMENT.is_match(line))
        .count();
    let ratio = with_measurement as f64 / lines.len() as f64;
    clamp_unit(1.0 - (ratio - 0.2) / 0.3)
}

// =============================================================================
// Metadata field scoring
// =============================================================================

const SERVINGS_KEYWORDS: &[&str] = &[
    "serves", "servings", "yield", "yields", "makes", "portions", "people",
];

const TIME_KEYWORDS: &[&str] = &[
    "prep", "preparation", "cook", "cooking", "bake", "baking", "total", "ready in", "time",
    "minutes", "hours",
];

const PROTEIN_CONTEXT: &[&str] = &["with", "breast", "thigh", "ground", "whole", "fillet", "steak"];

const DIFFICULTY_CONTEXT: &[&str] = &["level", "skill", "experience", "beginner", "rating"];

fn servings_confidence(lower: &str) -> f64 {
    let mut score = (vocab_hits(lower, SERVINGS_KEYWORDS) as f64 / 2.0).min(1.0) * 0.4;
    if patterns::SERVES.is_match(lower) {
        score += 0.3;
    }
    if patterns::ANY_DIGIT.is_match(lower) {
        score += 0.2;
    }
    if (5..=50).contains(&lower.len()) {
        score += 0.1;
    }
    clamp_unit(score)
}

fn time_confidence(lower: &str) -> f64 {
    let mut score = (vocab_hits(lower, TIME_KEYWORDS) as f64 / 2.0).min(1.0) * 0.4;
    if patterns::PREP_TIME.is_match(lower) || patterns::COOK_TIME.is_match(lower) {
        score += 0.3;
    } else if patterns::TIME_UNIT.is_match(lower) {
        score += 0.15;
    }
    if patterns::ANY_DIGIT.is_match(lower) && patterns::TIME_UNIT.is_match(lower) {
        score += 0.2;
    }
    if (5..=60).contains(&lower.len()) {
        score += 0.1;
    }
    clamp_unit(score)
}

fn method_confidence(lower: &str) -> f64 {
    let matches = patterns::COOKING_METHODS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .count();
    let mut score = if matches > 0 {
        (0.35 * matches as f64).min(0.7)
    } else {
        0.0
    };
    if lower.len() < 100 {
        score += 0.2;
    }
    let ingredient_like = ["cup", "tablespoon", "teaspoon", "ounce"]
        .iter()
        .any(|w| lower.contains(w));
    if lower.len() > 200 || ingredient_like {
        score -= 0.1;
    }
    clamp_unit(score)
}

fn protein_confidence(lower: &str) -> f64 {
    let matches = vocab_hits(lower, patterns::PROTEIN_TYPES);
    let mut score = match matches {
        0 => 0.0,
        1 => 0.7,
        _ => 0.4,
    };
    if lower.len() < 100 {
        score += 0.2;
    }
    if PROTEIN_CONTEXT.iter().any(|w| lower.contains(w)) {
        score += 0.1;
    }
    clamp_unit(score)
}

fn difficulty_confidence(lower: &str) -> f64 {
    let matches = DIFFICULTY_KEYWORDS
        .iter()
        .filter(|(kw, _)| lower.contains(kw))
        .count();
    let mut score = if matches > 0 {
        (0.3 * matches as f64).min(0.6)
    } else {
        0.0
    };
    if lower.len() < 80 {
        score += 0.3;
    }
    if DIFFICULTY_CONTEXT.iter().any(|w| lower.contains(w)) {
        score += 0.1;
    }
    clamp_unit(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INGREDIENT_TEXT: &str =
        "2 cups flour\n1 tsp kosher salt\n3 large eggs, beaten\n1 cup whole milk\n2 tbsp unsalted butter";

    const INSTRUCTION_TEXT: &str = "Preheat the oven to 350 degrees. Heat oil in a large pan, \
        then add the onion and cook until softened. Stir in the garlic and season well. \
        Transfer to the oven and bake until golden, about 30 minutes. Serve immediately.";

    #[test]
    fn ingredient_list_scores_high() {
        let score = ingredient_confidence(INGREDIENT_TEXT);
        assert!(score > 0.6, "expected high score, got {score}");
    }

    #[test]
    fn instruction_prose_scores_low_for_ingredients() {
        let score = ingredient_confidence(INSTRUCTION_TEXT);
        assert!(score < 0.45, "expected low score, got {score}");
    }

    #[test]
    fn instruction_prose_scores_high() {
        let score = instruction_confidence(INSTRUCTION_TEXT);
        assert!(score > 0.6, "expected high score, got {score}");
    }

    #[test]
    fn ingredient_list_scores_low_for_instructions() {
        let score = instruction_confidence(INGREDIENT_TEXT);
        assert!(score < 0.4, "expected low score, got {score}");
    }

    #[test]
    fn verb_absence_counts_line_initial_verbs() {
        assert!(verb_absence_score("preheat the oven to 350 degrees") < 1.0);
        assert!(verb_absence_score("stir, then serve warm") < 1.0);
        assert_eq!(verb_absence_score("2 cups flour\n1 tsp kosher salt"), 1.0);
    }

    #[test]
    fn short_text_scores_zero() {
        assert_eq!(ingredient_confidence("flour"), 0.0);
        assert_eq!(instruction_confidence("mix"), 0.0);
        assert_eq!(ingredient_confidence(""), 0.0);
        assert_eq!(instruction_confidence(""), 0.0);
    }

    #[test]
    fn metadata_field_floor_is_three_chars() {
        assert_eq!(metadata_field_confidence(MetadataField::Servings, "4"), 0.0);
        assert!(metadata_field_confidence(MetadataField::Servings, "Serves 4-6 people") > 0.5);
    }

    #[test]
    fn time_field_confidence() {
        let score = metadata_field_confidence(MetadataField::Time, "Prep time: 15 minutes");
        assert!(score > 0.5, "got {score}");
    }

    #[test]
    fn method_field_detects_smoke() {
        let score = metadata_field_confidence(MetadataField::Method, "slow smoked over hickory");
        assert!(score > 0.3, "got {score}");
    }

    #[test]
    fn scores_are_bounded_and_idempotent() {
        for text in [INGREDIENT_TEXT, INSTRUCTION_TEXT, "Serves 4", "x", ""] {
            for kind in [
                ComponentKind::Ingredients,
                ComponentKind::Instructions,
                ComponentKind::Metadata,
            ] {
                let a = confidence(kind, text);
                let b = confidence(kind, text);
                assert!((0.0..=1.0).contains(&a));
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn measurement_component_is_monotone_in_measurements() {
        let base = "pinch of something\nanother line of text here\nmore words without numbers";
        let more = format!("{base}\n2 cups flour\n1 tsp salt");
        let lines_base: Vec<&str> = base.lines().collect();
        let lines_more: Vec<&str> = more.lines().collect();
        assert!(measurement_line_score(&lines_more) >= measurement_line_score(&lines_base));
    }
}
