//! Recipe validation.
//!
//! Decides whether a header-delimited section is a complete, standalone
//! recipe rather than a sub-component ("FOR THE VINAIGRETTE"), an equipment
//! list, or front matter. Title vetoes run before content scoring: they are
//! cheap and catch sections that could accidentally score well on content
//! alone.

use crate::band::clamp_unit;
use crate::patterns;

/// Whether a section looks like a complete recipe.
///
/// Stage 1 vetoes on the title; stage 2 scores the body and accepts at >=5
/// of a possible 10, so roughly two independent signals must corroborate.
#[must_use]
pub fn is_valid_recipe(text: &str, title: &str) -> bool {
    let title = title.trim();
    let title_lower = title.to_lowercase();

    if patterns::SUB_SECTION_TITLE.is_match(title) {
        return false;
    }
    if patterns::EXCLUDE_KEYWORDS
        .iter()
        .any(|kw| title_lower.contains(kw))
    {
        return false;
    }
    if is_ingredient_title(title) {
        return false;
    }

    content_score(text) >= 5
}

/// Content-based recipe evidence, 0 to 10.
fn content_score(text: &str) -> u32 {
    let lower = text.to_lowercase();
    let mut score = 0;

    if patterns::COOKING_VERBS.find_iter(&lower).count() >= 3 {
        score += 3;
    }
    if patterns::MEASUREMENT.find_iter(&lower).count() >= 2 {
        score += 2;
    }
    if patterns::INGREDIENT_WORD.is_match(&lower) {
        score += 2;
    }
    if patterns::INSTRUCTION_WORD.is_match(&lower) {
        score += 2;
    }
    if text.len() > 200 {
        score += 1;
    }
    score
}

/// Whether a title reads like a single ingredient line, not a recipe name.
fn is_ingredient_title(title: &str) -> bool {
    if title.len() > 30 {
        return false;
    }
    let lower = title.to_lowercase();

    if title.len() < 20 {
        if patterns::ANY_DIGIT.is_match(title) {
            return true;
        }
        for ingredient in patterns::SINGLE_INGREDIENT_TITLES {
            if lower == *ingredient || lower.starts_with(&format!("{ingredient} ")) {
                return true;
            }
        }
    }

    title.len() < 25 && patterns::MEASUREMENT.is_match(&lower)
}

/// Overall extraction confidence for a section, 0 to 1.
///
/// A coarse length-based blend used as a provenance annotation, not a gate:
/// longer extracted components and the presence of both core components
/// raise it.
#[must_use]
pub fn extraction_confidence(text: &str, ingredients: &str, instructions: &str) -> f64 {
    let mut confidence = 0.0;

    if text.len() > 500 {
        confidence += 0.2;
    } else if text.len() > 200 {
        confidence += 0.1;
    }

    if ingredients.len() > 200 {
        confidence += 0.3;
    } else if ingredients.len() > 100 {
        confidence += 0.2;
    } else if ingredients.len() > 50 {
        confidence += 0.1;
    }

    if instructions.len() > 300 {
        confidence += 0.3;
    } else if instructions.len() > 150 {
        confidence += 0.2;
    } else if instructions.len() > 100 {
        confidence += 0.1;
    }

    if !ingredients.is_empty() && !instructions.is_empty() {
        confidence += 0.2;
    }

    clamp_unit(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPE_TEXT: &str = "Ingredients\n2 cups flour\n1 tsp salt\n3 eggs\n\nInstructions\n\
        Preheat the oven to 350. Mix the flour and salt, then beat in the eggs. \
        Pour into a greased pan and bake for 30 minutes until golden.";

    #[test]
    fn complete_recipe_passes() {
        assert!(is_valid_recipe(RECIPE_TEXT, "Grandma's Cake"));
    }

    #[test]
    fn title_veto_overrides_recipe_like_content() {
        assert!(!is_valid_recipe(RECIPE_TEXT, "Equipment Needed"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "FOR THE VINAIGRETTE"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "for the vinaigrette"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "To Serve:"));
    }

    #[test]
    fn exclude_keywords_veto() {
        assert!(!is_valid_recipe(RECIPE_TEXT, "Introduction"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "About the Author"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "Conversion Chart"));
    }

    #[test]
    fn single_ingredient_titles_veto() {
        assert!(!is_valid_recipe(RECIPE_TEXT, "Kosher Salt"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "Butter"));
        assert!(!is_valid_recipe(RECIPE_TEXT, "2 cups flour"));
    }

    #[test]
    fn long_specific_titles_are_not_ingredient_titles() {
        assert!(is_valid_recipe(
            RECIPE_TEXT,
            "Salt and Pepper Crusted Prime Rib"
        ));
    }

    #[test]
    fn weak_content_is_rejected() {
        // One signal only: length.
        let text = "This chapter tells the story of how barbecue spread across the \
                    American South, from roadside stands to competition circuits, and the \
                    families who carried the tradition for generations.";
        assert!(!is_valid_recipe(text, "A Tale Worth Telling"));
    }

    #[test]
    fn two_signals_are_not_enough() {
        // Measurements + short length, no verbs, no keywords: score 2.
        let text = "2 cups flour and 1 tsp salt were left on the table.";
        assert!(!is_valid_recipe(text, "The Pantry Scene"));
    }

    #[test]
    fn extraction_confidence_blend() {
        let full = extraction_confidence(
            &"x".repeat(600),
            &"i".repeat(250),
            &"s".repeat(350),
        );
        assert_eq!(full, 1.0);

        let nothing = extraction_confidence("short", "", "");
        assert_eq!(nothing, 0.0);

        let partial = extraction_confidence(&"x".repeat(300), &"i".repeat(120), "");
        assert!((partial - 0.3).abs() < 1e-9);
    }
}
