//! The extraction pipeline.
//!
//! Chapter HTML goes through: section splitting, a length gate, the recipe
//! validator, the three component extractors, recipe assembly, quality
//! scoring, and the configured quality threshold. The validator, scorer, and
//! component extractors sit behind traits so tests can swap in doubles; the
//! defaults wire up the heuristic implementations in this crate.

use serde_json::json;
use tracing::debug;

use crate::config::ExtractorConfig;
use crate::dom::{self, Document};
use crate::encoding;
use crate::error::Result;
use crate::extractor::{self, Extraction, ExtractionMode, RecipeMetadata};
use crate::quality;
use crate::recipe::Recipe;
use crate::text::{self, Section};
use crate::validator;

/// Sections with less text than this never hold a complete recipe.
const MIN_SECTION_TEXT_LEN: usize = 100;

/// Decides whether a titled section is a standalone recipe.
///
/// The seam is text-only: implementations see the section's plain text and
/// cleaned title, not the parsed fragment.
pub trait ValidateSection {
    fn is_valid_recipe(&self, text: &str, title: &str) -> bool;
}

/// Scores an assembled recipe.
pub trait ScoreRecipe {
    fn score(&self, recipe: &Recipe) -> u32;
}

/// Extracts the three recipe components from a section fragment.
pub trait ExtractComponents {
    fn ingredients(&self, doc: &Document, mode: ExtractionMode) -> Option<Extraction>;
    fn instructions(&self, doc: &Document, mode: ExtractionMode) -> Option<Extraction>;
    fn metadata(&self, doc: &Document, title: &str) -> RecipeMetadata;
}

/// The default validator, backed by [`validator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicValidator;

impl ValidateSection for HeuristicValidator {
    fn is_valid_recipe(&self, text: &str, title: &str) -> bool {
        validator::is_valid_recipe(text, title)
    }
}

/// The default scorer, backed by [`quality`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureScorer;

impl ScoreRecipe for StructureScorer {
    fn score(&self, recipe: &Recipe) -> u32 {
        quality::score_recipe(recipe)
    }
}

/// The default component extractor, backed by [`extractor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneExtractor;

impl ExtractComponents for ZoneExtractor {
    fn ingredients(&self, doc: &Document, mode: ExtractionMode) -> Option<Extraction> {
        extractor::ingredients::extract(doc, mode)
    }

    fn instructions(&self, doc: &Document, mode: ExtractionMode) -> Option<Extraction> {
        extractor::instructions::extract(doc, mode)
    }

    fn metadata(&self, doc: &Document, title: &str) -> RecipeMetadata {
        extractor::metadata::extract(doc, title)
    }
}

/// The assembled pipeline.
pub struct RecipeExtractor {
    config: ExtractorConfig,
    validator: Box<dyn ValidateSection + Send + Sync>,
    scorer: Box<dyn ScoreRecipe + Send + Sync>,
    components: Box<dyn ExtractComponents + Send + Sync>,
}

impl RecipeExtractor {
    /// A pipeline with the default heuristic parts.
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(HeuristicValidator),
            Box::new(StructureScorer),
            Box::new(ZoneExtractor),
        )
    }

    /// A pipeline with caller-supplied parts.
    #[must_use]
    pub fn with_parts(
        config: ExtractorConfig,
        validator: Box<dyn ValidateSection + Send + Sync>,
        scorer: Box<dyn ScoreRecipe + Send + Sync>,
        components: Box<dyn ExtractComponents + Send + Sync>,
    ) -> Self {
        Self {
            config,
            validator,
            scorer,
            components,
        }
    }

    /// Extract all recipes from one chapter document, applying the
    /// configured quality threshold.
    #[must_use]
    pub fn extract(&self, html: &str) -> Vec<Recipe> {
        let doc = dom::parse(html);
        let sections = text::split_by_headers(&doc);
        debug!(sections = sections.len(), "chapter split");

        let mut recipes = Vec::new();
        for section in &sections {
            let Some(recipe) = self.extract_from_section(section) else {
                continue;
            };
            if recipe.quality_score < self.config.min_quality_score {
                debug!(
                    title = recipe.title,
                    score = recipe.quality_score,
                    threshold = self.config.min_quality_score,
                    "recipe below quality threshold"
                );
                continue;
            }
            recipes.push(recipe);
        }
        recipes
    }

    /// Extract a single titled section into a recipe.
    ///
    /// Returns `None` for sections that fail the length gate or the
    /// validator, and for sections where neither core component could be
    /// extracted. The quality threshold is not applied here; the A/B
    /// comparator boundary needs the unfiltered result.
    #[must_use]
    pub fn extract_from_section(&self, section: &Section) -> Option<Recipe> {
        let doc = section.document();
        let section_text = text::extract_text(&doc.select("body"));
        if section_text.len() < MIN_SECTION_TEXT_LEN {
            debug!(title = section.title, "section below length gate");
            return None;
        }
        if !self.validator.is_valid_recipe(&section_text, &section.title) {
            debug!(title = section.title, "section rejected by validator");
            return None;
        }

        let mode = self.config.extraction_mode();
        let ingredients = self.components.ingredients(&doc, mode);
        let instructions = self.components.instructions(&doc, mode);
        let meta = self.components.metadata(&doc, &section.title);

        if ingredients.is_none() && instructions.is_none() {
            debug!(title = section.title, "no core component extracted");
            return None;
        }

        let mut recipe = Recipe {
            title: section.title.clone(),
            serves: meta.serves.clone(),
            prep_time: meta.prep_time,
            cook_time: meta.cook_time,
            cooking_method: meta.cooking_method,
            protein_type: meta.protein_type.clone(),
            ..Recipe::default()
        };

        if let Some(found) = &ingredients {
            recipe.ingredients = found.text.clone();
            recipe.record_extraction("ingredients", found.provenance());
        }
        if let Some(found) = &instructions {
            recipe.instructions = found.text.clone();
            recipe.record_extraction("instructions", found.provenance());
        }
        if !meta.is_empty() {
            let mut entries = serde_json::Map::new();
            entries.insert("strategy".to_string(), json!(meta.strategy()));
            entries.insert("confidence".to_string(), json!(meta.confidence));
            recipe.record_extraction("metadata", entries);
        }
        if let Some(difficulty) = meta.difficulty {
            recipe
                .metadata
                .insert("difficulty".to_string(), json!(difficulty));
        }

        let overall = validator::extraction_confidence(
            &section_text,
            &recipe.ingredients,
            &recipe.instructions,
        );
        recipe
            .metadata
            .insert("extraction_confidence".to_string(), json!(overall));

        if self.config.include_raw_content {
            recipe.raw_content = Some(section_text);
        }

        recipe.quality_score = self.scorer.score(&recipe);
        debug!(
            title = recipe.title,
            score = recipe.quality_score,
            "recipe extracted"
        );
        Some(recipe)
    }
}

/// Extract recipes with the default configuration.
///
/// # Errors
///
/// Currently infallible for string input; the `Result` keeps the signature
/// stable for callers that also use the byte-level variants.
pub fn extract(html: &str) -> Result<Vec<Recipe>> {
    extract_with_config(html, &ExtractorConfig::default())
}

/// Extract recipes with an explicit configuration.
///
/// # Errors
///
/// Currently infallible for string input.
pub fn extract_with_config(html: &str, config: &ExtractorConfig) -> Result<Vec<Recipe>> {
    Ok(RecipeExtractor::new(config.clone()).extract(html))
}

/// Extract recipes from raw chapter bytes, sniffing the declared charset.
///
/// # Errors
///
/// Currently infallible; undecodable sequences are replaced rather than
/// rejected.
pub fn extract_bytes(bytes: &[u8]) -> Result<Vec<Recipe>> {
    extract_bytes_with_config(bytes, &ExtractorConfig::default())
}

/// Byte-level variant of [`extract_with_config`].
///
/// # Errors
///
/// Currently infallible; undecodable sequences are replaced rather than
/// rejected.
pub fn extract_bytes_with_config(bytes: &[u8], config: &ExtractorConfig) -> Result<Vec<Recipe>> {
    let html = encoding::transcode_to_utf8(bytes);
    extract_with_config(&html, config)
}
