//! Per-component zone detection profiles.
//!
//! The three structural detectors run the same strategy cascade over
//! different vocabulary. Each profile carries the keyword sets for one
//! component family; the component-specific list and position strategies
//! dispatch on `kind`.

use std::sync::LazyLock;

use regex::Regex;

use crate::patterns;

/// The recipe component a detector family targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Ingredients,
    Instructions,
    Metadata,
}

impl ComponentKind {
    /// Name used in strategy tags and log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingredients => "ingredients",
            Self::Instructions => "instructions",
            Self::Metadata => "metadata",
        }
    }
}

/// Keyword vocabulary for one component's structural detection.
pub struct ZoneProfile {
    pub kind: ComponentKind,
    /// Microdata `itemprop` values that explicitly declare this component.
    pub itemprops: &'static [&'static str],
    /// CSS selector for the container tags scanned by the class strategy.
    pub container_selector: &'static str,
    /// Class keywords; token equality scores above substring containment.
    pub css_classes: &'static [&'static str],
    /// Fragments matched against lowercased `id` attributes.
    pub id_fragments: &'static [&'static str],
    /// Pattern matched against preceding header text.
    pub header_pattern: &'static LazyLock<Regex>,
    /// Classes marking individual paragraphs of this component in EPUBs.
    pub paragraph_classes: &'static [&'static str],
}

pub static INGREDIENTS: ZoneProfile = ZoneProfile {
    kind: ComponentKind::Ingredients,
    itemprops: &["recipeIngredient", "ingredients"],
    container_selector: "div, section, article, ul, ol",
    css_classes: &[
        "ingredient",
        "ingredients",
        "ingred",
        "ings",
        "ing",
        "recipe-ingredient",
        "recipe-ingredients",
        "recipeingredient",
        "shopping-list",
        "shoppinglist",
        "grocery",
        "groceries",
    ],
    id_fragments: &[
        "ingredient",
        "ingred",
        "ings",
        "shopping",
        "grocery",
    ],
    header_pattern: &patterns::INGREDIENT_HEADER,
    paragraph_classes: &["ing", "ingt", "ings", "ingst", "ingd", "ingredient"],
};

pub static INSTRUCTIONS: ZoneProfile = ZoneProfile {
    kind: ComponentKind::Instructions,
    itemprops: &["recipeInstructions"],
    container_selector: "div, section, p",
    css_classes: &[
        "method",
        "step",
        "instruction",
        "direction",
        "preparation",
        "noindent",
        "noindentt",
        "noindentp",
        "methodp",
        "stepp",
        "procedure",
        "proc",
    ],
    id_fragments: &["instruction", "direction", "method", "steps", "preparation"],
    header_pattern: &patterns::INSTRUCTION_HEADER,
    paragraph_classes: &["noindent", "noindentt", "method", "methodp", "step", "stepp"],
};

pub static METADATA: ZoneProfile = ZoneProfile {
    kind: ComponentKind::Metadata,
    itemprops: &["recipeYield", "totalTime", "prepTime", "cookTime"],
    container_selector: "[class]",
    css_classes: &[
        "meta",
        "metadata",
        "recipe-meta",
        "recipe-info",
        "info",
        "details",
        "recipe-details",
        "stats",
        "recipe-stats",
        "servings",
        "yield",
        "time",
        "prep",
        "cook",
        "difficulty",
    ],
    id_fragments: &["recipe-meta", "recipe-info", "metadata"],
    header_pattern: &patterns::METADATA_HEADER,
    paragraph_classes: &[],
};

/// Map a microdata itemprop to the metadata field it announces.
#[must_use]
pub fn itemprop_field(itemprop: &str) -> Option<&'static str> {
    match itemprop {
        "recipeYield" => Some("servings"),
        "totalTime" => Some("total_time"),
        "prepTime" => Some("prep_time"),
        "cookTime" => Some("cook_time"),
        _ => None,
    }
}

/// Infer metadata field hints from class or term text.
#[must_use]
pub fn infer_fields(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let mut fields = Vec::new();
    // "serv" covers serve, serves, serving, servings.
    if ["serv", "yield", "portion"].iter().any(|w| lower.contains(w)) {
        fields.push("servings");
    }
    if lower.contains("prep") {
        fields.push("prep_time");
    }
    if lower.contains("cook") {
        fields.push("cook_time");
    }
    if lower.contains("time") {
        fields.push("time");
    }
    if lower.contains("difficulty") {
        fields.push("difficulty");
    }
    if lower.contains("method") {
        fields.push("cooking_method");
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn itemprop_mapping() {
        assert_eq!(itemprop_field("recipeYield"), Some("servings"));
        assert_eq!(itemprop_field("cookTime"), Some("cook_time"));
        assert_eq!(itemprop_field("recipeIngredient"), None);
    }

    #[test]
    fn field_inference_from_class_text() {
        assert_eq!(infer_fields("prep-time box"), vec!["prep_time", "time"]);
        assert_eq!(infer_fields("servings"), vec!["servings"]);
        assert_eq!(infer_fields("Serves"), vec!["servings"]);
        assert!(infer_fields("sidebar").is_empty());
    }
}
