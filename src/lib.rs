//! # cookbook-extract
//!
//! Heuristic recipe extraction from EPUB cookbook HTML.
//!
//! Cookbook chapters carry none of the schema.org scaffolding recipe
//! websites do; this library classifies loosely structured chapter HTML
//! into `Recipe` records by blending three independent judgments per
//! component: structural zone detection over the DOM, lexical pattern
//! scoring over the plain text, and a linguistic second opinion over prose
//! shape. Sections that survive the recipe validator are assembled, scored
//! for quality, and filtered against a configurable threshold.
//!
//! ## Quick Start
//!
//! ```rust
//! use cookbook_extract::extract;
//!
//! let html = r#"<html><head><title>Smoked Brisket</title></head><body>
//! <p>Serves 4-6 | Prep time: 30 minutes | Cook time: 1 hour</p>
//! <p>Ingredients</p>
//! <ul><li>2 pounds beef brisket</li><li>2 tbsp coarse salt</li>
//! <li>1 tbsp black pepper</li><li>1 cup beef stock</li></ul>
//! <p>Method</p>
//! <ol><li>Season the brisket all over with the salt and pepper.</li>
//! <li>Smoke at 225 degrees until tender, about six hours.</li>
//! <li>Rest for thirty minutes, then slice and serve.</li></ol>
//! </body></html>"#;
//!
//! let recipes = extract(html)?;
//! assert_eq!(recipes[0].title, "Smoked Brisket");
//! # Ok::<(), cookbook_extract::Error>(())
//! ```
//!
//! ## Input
//!
//! Chapter documents arrive as strings ([`extract`], [`extract_with_config`])
//! or as raw bytes with charset sniffing ([`extract_bytes`],
//! [`extract_bytes_with_config`]). EPUB container handling, persistence, and
//! export formats live outside this crate.

mod band;
mod config;
mod error;
mod recipe;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// The extraction pipeline and its trait seams.
pub mod extract;

/// Component extractors (ingredients, instructions, metadata).
pub mod extractor;

/// Lexical pattern detectors, pure over text.
pub mod lexical;

/// Linguistic analyzers, the second opinion on zone text.
pub mod linguistic;

/// Compiled regex patterns and keyword tables.
pub mod patterns;

/// Structure-aware recipe quality scoring.
pub mod quality;

/// Text normalization and section splitting.
pub mod text;

/// Recipe validation (section-level accept/reject).
pub mod validator;

/// Structural zone detection over section fragments.
pub mod zone;

// Public API - re-exports
pub use config::{AbTestConfig, ExtractorConfig};
pub use error::{Error, Result};
pub use extract::{
    extract, extract_bytes, extract_bytes_with_config, extract_with_config, RecipeExtractor,
};
pub use extractor::ExtractionMode;
pub use recipe::{CookingMethod, Recipe};
