//! Compiled regex patterns and keyword tables for recipe extraction.
//!
//! All patterns are compiled once at startup using `LazyLock` for efficiency.
//! Patterns are organized by their purpose in the extraction pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Measurement Detection Patterns
// =============================================================================

/// Matches quantities with units, including unicode fractions (½, ¾, etc.),
/// plus bare "N <descriptor> <ingredient>" forms like "1 lemon" or
/// "10 basil leaves". Kept free of nested quantifiers to avoid pathological
/// backtracking on long sections.
pub static MEASUREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)(?:\b\d+(?:[.,]\d+)?|[¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞])[\s/-]?",
        r"(?:cup|tablespoon|teaspoon|pound|ounce|gram|kg|lb|oz|tsp|tbsp|clove|slice",
        r"|liter|litre|ml|milliliter|pint|quart|gallon|stick|head|bunch|sprig|stalk",
        r"|can|jar|package|box|bag|container)s?\b",
        r"|\b\d+(?:\s+-\s+\d+)?\s+(?:large|medium|small|whole|fresh|dried|frozen|good-sized)?\s*",
        r"(?:egg|garlic|onion|carrot|potato|tomato|pepper|clove|lemon|lime|orange",
        r"|basil|parsley|mint|leaf|leaves|zucchini|squash|chicken|apple|pear|banana)s?\b",
    ))
    .expect("MEASUREMENT regex")
});

/// Matches unicode fraction glyphs and plain fraction forms like "1/2".
pub static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[¼½¾⅓⅔⅕⅖⅗⅘⅙⅚⅐⅛⅜⅝⅞]|\b\d+/\d+\b").expect("FRACTION regex"));

// =============================================================================
// Cooking Verb Patterns
// =============================================================================

/// The cooking verb vocabulary shared by the validator, the instruction
/// pattern detector, and the quality scorer.
pub static COOKING_VERBS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(heat|cook|grill|place|add|mix|stir|combine|season|serve|roast|smoke|bake",
        r"|prepare|chop|slice|transfer|remove|cover|simmer|melt|boil|whisk|fold|pour",
        r"|spread|drain|toss|sauté|fry|bring|preheat|beat|knead|strain|swirl|watch",
        r"|continue|sprinkle|garnish|arrange|chill|freeze|refrigerate|dunk|toast|crush",
        r"|divide|roll|lay|brush|repeat|spray|drizzle|take|let|cool|seal|store|dissolve",
        r"|steep|adjust|dilute|caramelize|harden|slowly|reduce)\b",
    ))
    .expect("COOKING_VERBS regex")
});

// =============================================================================
// Metadata Extraction Patterns
// =============================================================================

/// Matches serving counts, including "4-6" and "4 to 6" ranges.
pub static SERVES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:serves?|servings?|yields?|makes?)[:\s]+(\d+(?:\s*(?:-|to)\s*\d+)?)")
        .expect("SERVES regex")
});

/// Matches a prep-time value up to the next line break or the cook marker.
pub static PREP_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:prep(?:aration)?|active|total)(?:\s*time)?[:\s]+([^.\n]+?)(?:\n|cook|$)")
        .expect("PREP_TIME regex")
});

/// Matches a cook-time value up to the next line break or the prep marker.
pub static COOK_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:cook(?:ing)?|passive|baking)(?:\s*time)?[:\s]+([^.\n]+?)(?:\n|prep|$)")
        .expect("COOK_TIME regex")
});

/// Captures "N-M" / "N to M" ranges, or a single number, for servings parsing.
pub static SERVINGS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:-|to)\s*(\d+)|(\d+)").expect("SERVINGS_NUMBER regex"));

/// Matches hour components in time strings ("1 hour", "1.5 hrs").
pub static HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:hour|hr)s?").expect("HOURS regex"));

/// Matches minute components in time strings ("30 minutes", "30 min").
pub static MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:minute|min)s?").expect("MINUTES regex"));

/// A time unit word with no number required ("mins", "hour").
pub static TIME_UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:minute|min|hour|hr)s?\b").expect("TIME_UNIT regex"));

/// A bare number with no unit, interpreted as minutes.
pub static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("BARE_NUMBER regex"));

/// Detects a negated quantity ("-5 minutes"), which is always rejected.
pub static NEGATIVE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)-\s*\d").expect("NEGATIVE_TIME regex"));

// =============================================================================
// Line Structure Patterns
// =============================================================================

/// Matches bullet or numbered list markers at the start of a line.
pub static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[•\-*·○●▪▫■□➤➢→⇒]|\d+[.)])\s*").expect("LIST_MARKER regex")
});

/// Matches a numbered step line ("1. ", "12) ").
pub static NUMBERED_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+").expect("NUMBERED_STEP regex"));

/// Splits prose into sentences at terminators.
pub static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("SENTENCE_SPLIT regex"));

// =============================================================================
// Validator Patterns
// =============================================================================

/// Title patterns marking a recipe sub-section rather than a complete recipe:
/// equipment lists, time/serving lines, component headers ("FOR THE X"),
/// bare single-ingredient names, and notes/tips sections.
pub static SUB_SECTION_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:",
        r"(?:special\s+)?equipment(?:\s+needed)?:?$",
        r"|(?:gear|tools?)(?:\s+needed)?:?$",
        r"|(?:what\s+you(?:'ll)?\s+need):?$",
        r"|(?:prep|cook|active|passive|total)\s+time:?",
        r"|(?:serves?|servings?|yields?|makes?):?\s*\d*$",
        r"|to\s+serve:?$",
        r"|for\s+serving:?$",
        r"|garnish:?$",
        r"|presentation:?$",
        r"|for\s+the\s+",
        r"|(?:coarse|sea|kosher)\s+salt$",
        r"|(?:black|white)\s+pepper$",
        r"|(?:olive|vegetable|canola)\s+oil$",
        r"|dressing$|sauce$|marinade$|glaze$|rub$|brine$",
        r"|(?:the\s+)?(?:filling|topping|coating|crust)$",
        r"|(?:note|tip|variation)s?:?$",
        r"|(?:indoor|outdoor)\s+alternative:?$",
        r"|(?:chef(?:'s)?|cook(?:'s)?)\s+(?:note|tip)s?:?$",
        r")",
    ))
    .expect("SUB_SECTION_TITLE regex")
});

/// Body-text signal that an ingredient section is present.
pub static INGREDIENT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:ingredient|what you need)\b").expect("INGREDIENT_WORD regex"));

/// Body-text signal that an instruction section is present.
pub static INSTRUCTION_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:instruction|direction|method|steps?)\b").expect("INSTRUCTION_WORD regex")
});

/// Contains a digit anywhere (quantity indicator in short titles).
pub static ANY_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("ANY_DIGIT regex"));

// =============================================================================
// Section Header Patterns
// =============================================================================

/// Header text announcing an ingredient list.
pub static INGREDIENT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\bingredients?\b|\bwhat you(?:'ll)? need\b|\byou(?:'ll| will) need\b",
        r"|\bshopping list\b|\bgrocery list\b|\bfor (?:the|this) (?:recipe|dish)\b|\bfor the \w+\b",
    ))
    .expect("INGREDIENT_HEADER regex")
});

/// Header text announcing the instruction body.
pub static INSTRUCTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\binstructions?\b|\bdirections?\b|\bmethod\b|\bpreparation\b|\bhow to\b",
        r"|\bsteps?\b|\bto make\b|\bto prepare\b|\bto cook\b|\blet's cook\b|\brecipe method\b",
    ))
    .expect("INSTRUCTION_HEADER regex")
});

/// Header text announcing a metadata block ("Recipe Info", "At a Glance").
pub static METADATA_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)recipe\s+info|details|stats|at\s+a\s+glance").expect("METADATA_HEADER regex")
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches inline formatting residue ({...} spans left by EPUB converters).
pub static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("BRACE_SPAN regex"));

/// Matches markdown-style links left in titles.
pub static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\(.*?\)").expect("MARKDOWN_LINK regex"));

// =============================================================================
// Keyword Tables
// =============================================================================

/// Section titles that are never recipes, regardless of content.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "contents",
    "introduction",
    "foreword",
    "preface",
    "acknowledgment",
    "index",
    "about the author",
    "copyright",
    "dedication",
    "cover",
    "equipment list",
    "tools needed",
    "conversion chart",
    "glossary",
    "chapter",
    "how to cut",
    "how to make",
    "techniques",
    "basics",
    "fundamentals",
    "tips",
    "mechanics",
    "history",
];

/// Cooking method enumeration keywords, canonical name first.
pub const COOKING_METHODS: &[(&str, &[&str])] = &[
    ("smoke", &["smoke", "smoked"]),
    ("grill", &["grill", "grilled"]),
    ("roast", &["roast", "roasted"]),
    ("bake", &["bake", "baked"]),
    ("fry", &["fry", "fried"]),
];

/// Recognized protein types, matched against title + body.
pub const PROTEIN_TYPES: &[&str] = &[
    "beef", "pork", "chicken", "lamb", "fish", "seafood", "turkey", "duck",
];

/// Bare single-ingredient titles that disqualify a section.
pub const SINGLE_INGREDIENT_TITLES: &[&str] = &[
    "coarse salt",
    "sea salt",
    "kosher salt",
    "black pepper",
    "white pepper",
    "olive oil",
    "vegetable oil",
    "butter",
    "flour",
    "sugar",
    "water",
    "salt",
    "pepper",
    "oil",
];
