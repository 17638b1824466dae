//! Recipe output entities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cooking method classification, matched from title and body keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookingMethod {
    Smoke,
    Grill,
    Roast,
    Bake,
    Fry,
}

impl CookingMethod {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::Grill => "grill",
            Self::Roast => "roast",
            Self::Bake => "bake",
            Self::Fry => "fry",
        }
    }

    /// Map a canonical keyword back to a method.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "smoke" => Some(Self::Smoke),
            "grill" => Some(Self::Grill),
            "roast" => Some(Self::Roast),
            "bake" => Some(Self::Bake),
            "fry" => Some(Self::Fry),
            _ => None,
        }
    }
}

/// An extracted recipe.
///
/// `ingredients` and `instructions` hold newline-separated plain text.
/// `quality_score` is always derived by the scorer, never read from input.
/// Book-level fields (`book`, `author`, `chapter`, `epub_section`) are
/// filled by the EPUB loader boundary and pass through untouched here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epub_section: Option<String>,
    pub ingredients: String,
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serves: Option<String>,
    /// Preparation time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    /// Cooking time in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_method: Option<CookingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_type: Option<String>,
    /// Derived by the quality scorer after assembly, 0-100.
    pub quality_score: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    /// Free-form metadata, including per-component extraction provenance
    /// under the `extraction` key.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Recipe {
    /// Record a component's extraction provenance under
    /// `metadata.extraction.<component>`.
    pub fn record_extraction(&mut self, component: &str, entries: Map<String, Value>) {
        let extraction = self
            .metadata
            .entry("extraction")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = extraction {
            map.insert(component.to_string(), Value::Object(entries));
        }
    }

    fn extraction_value(&self, component: &str, key: &str) -> Option<&Value> {
        self.metadata
            .get("extraction")?
            .as_object()?
            .get(component)?
            .as_object()?
            .get(key)
    }

    /// The confidence recorded for a component, if any.
    #[must_use]
    pub fn extraction_confidence(&self, component: &str) -> Option<f64> {
        self.extraction_value(component, "confidence")?.as_f64()
    }

    /// The strategy name recorded for a component, if any.
    #[must_use]
    pub fn extraction_strategy(&self, component: &str) -> Option<&str> {
        self.extraction_value(component, "strategy")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(strategy: &str, confidence: f64) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("strategy".to_string(), json!(strategy));
        map.insert("confidence".to_string(), json!(confidence));
        map
    }

    #[test]
    fn extraction_provenance_round_trips() {
        let mut recipe = Recipe {
            title: "Smoked Brisket".to_string(),
            ..Recipe::default()
        };
        recipe.record_extraction("ingredients", entries("structural_class_exact", 0.82));
        recipe.record_extraction("instructions", entries("original_with_patterns", 0.44));

        assert_eq!(
            recipe.extraction_strategy("ingredients"),
            Some("structural_class_exact")
        );
        assert_eq!(recipe.extraction_confidence("instructions"), Some(0.44));
        assert_eq!(recipe.extraction_confidence("metadata"), None);
    }

    #[test]
    fn cooking_method_serializes_lowercase() {
        let value = serde_json::to_value(CookingMethod::Smoke).unwrap();
        assert_eq!(value, json!("smoke"));
        assert_eq!(CookingMethod::from_keyword("grill"), Some(CookingMethod::Grill));
        assert_eq!(CookingMethod::from_keyword("poach"), None);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let recipe = Recipe {
            title: "Test".to_string(),
            ingredients: "2 cups flour".to_string(),
            ..Recipe::default()
        };
        let json = serde_json::to_string(&recipe).unwrap();
        assert!(!json.contains("prep_time"));
        assert!(!json.contains("raw_content"));
    }
}
