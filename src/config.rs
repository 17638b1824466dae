//! Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::extractor::ExtractionMode;

/// Configuration for the extraction pipeline.
///
/// The defaults match production batch processing; callers tune the quality
/// threshold when triaging a new cookbook layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Minimum quality score (0-100) a recipe must reach to be returned.
    pub min_quality_score: u32,
    /// Keep the full section text on each recipe for debugging and re-runs.
    pub include_raw_content: bool,
    /// Two-arm extraction comparison settings.
    pub ab_testing: AbTestConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_quality_score: 20,
            include_raw_content: false,
            ab_testing: AbTestConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// The extraction arm this configuration selects for production output.
    #[must_use]
    pub fn extraction_mode(&self) -> ExtractionMode {
        if self.ab_testing.enabled && !self.ab_testing.use_new_method {
            ExtractionMode::LegacyOnly
        } else {
            ExtractionMode::ZoneFirst
        }
    }
}

/// Settings for comparing the zone-first and legacy extraction arms.
///
/// The comparison harness itself lives outside this crate; these fields
/// select which arm produces production output and what score counts as a
/// success when the two are compared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbTestConfig {
    /// When true, the comparison harness runs both arms.
    pub enabled: bool,
    /// When true (or when comparison is disabled), the zone-first arm is
    /// the production arm.
    pub use_new_method: bool,
    /// Quality score at or above which an extraction counts as a success.
    pub success_threshold: u32,
}

impl Default for AbTestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            use_new_method: true,
            success_threshold: 25,
        }
    }
}
