//! Recipe quality scoring.
//!
//! Structure-aware scoring over the assembled [`Recipe`]: ingredients and
//! instructions each earn up to 45 points from length and structural shape,
//! metadata up to 10 from field presence. A recipe missing either core
//! component takes a 40-point completeness penalty, which keeps a richly
//! annotated but contentless extraction from ever looking good. Pure and
//! idempotent; callers always derive `quality_score` from here.

use crate::patterns;
use crate::recipe::Recipe;

/// Ingredients below this length count as missing.
const MIN_INGREDIENTS_LEN: usize = 10;
/// Instructions below this length count as missing.
const MIN_INSTRUCTIONS_LEN: usize = 20;
/// Deduction per missing core component.
const COMPLETENESS_PENALTY: f64 = 40.0;

/// Score an assembled recipe, 0-100.
#[must_use]
pub fn score_recipe(recipe: &Recipe) -> u32 {
    let mut score =
        score_ingredients(&recipe.ingredients) + score_instructions(&recipe.instructions);
    score += f64::from(score_metadata(recipe));

    if recipe.ingredients.trim().len() < MIN_INGREDIENTS_LEN {
        score -= COMPLETENESS_PENALTY;
    }
    if recipe.instructions.trim().len() < MIN_INSTRUCTIONS_LEN {
        score -= COMPLETENESS_PENALTY;
    }

    score.round().clamp(0.0, 100.0) as u32
}

/// Ingredient sub-score, 0-45.
///
/// Length saturates at 300 chars (0-15); structured-line ratio counts lines
/// that carry a bullet/number marker or a measurement (0-15); item count
/// saturates at 10 meaningful lines (0-10); any measurement at all earns the
/// binary bonus (0-5).
fn score_ingredients(ingredients: &str) -> f64 {
    let trimmed = ingredients.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|l| l.len() > 3)
        .collect();

    let length = (trimmed.len() as f64 / 300.0).min(1.0) * 15.0;

    let structure = if lines.is_empty() {
        0.0
    } else {
        let structured = lines
            .iter()
            .filter(|line| {
                patterns::LIST_MARKER.is_match(line) || patterns::MEASUREMENT.is_match(line)
            })
            .count();
        structured as f64 / lines.len() as f64 * 15.0
    };

    let items = (lines.len() as f64 / 10.0).min(1.0) * 10.0;

    let measurement = if patterns::MEASUREMENT.is_match(trimmed) {
        5.0
    } else {
        0.0
    };

    length + structure + items + measurement
}

/// Instruction sub-score, 0-45.
///
/// Length saturates at 500 chars (0-15); numbered steps saturate at 5
/// (0-15); distinct cooking verbs saturate at 8 (0-10); sentence
/// terminators saturate at 5 (0-5).
fn score_instructions(instructions: &str) -> f64 {
    let trimmed = instructions.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();

    let length = (trimmed.len() as f64 / 500.0).min(1.0) * 15.0;

    let steps = patterns::NUMBERED_STEP.find_iter(trimmed).count();
    let steps = (steps as f64 / 5.0).min(1.0) * 15.0;

    let mut distinct_verbs: Vec<&str> = patterns::COOKING_VERBS
        .find_iter(&lower)
        .map(|m| m.as_str())
        .collect();
    distinct_verbs.sort_unstable();
    distinct_verbs.dedup();
    let verbs = (distinct_verbs.len() as f64 / 8.0).min(1.0) * 10.0;

    let terminators = trimmed
        .chars()
        .filter(|c| matches!(c, '.' | '!' | '?'))
        .count();
    let terminators = (terminators as f64 / 5.0).min(1.0) * 5.0;

    length + steps + verbs + terminators
}

/// Metadata sub-score, 0-10, from field presence alone.
fn score_metadata(recipe: &Recipe) -> u32 {
    let mut score = 0;
    if recipe.serves.is_some() {
        score += 3;
    }
    if recipe.prep_time.is_some() {
        score += 2;
    }
    if recipe.cook_time.is_some() {
        score += 2;
    }
    if recipe.cooking_method.is_some() {
        score += 2;
    }
    if recipe.protein_type.is_some() {
        score += 1;
    }
    score
}
