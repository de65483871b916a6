//! Learning-material domain models.
//!
//! Field names serialize in camelCase to match the front-end contract
//! (`estimatedTime`, `type`).

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Kind of learning material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Article,
    Video,
    Tutorial,
    Course,
}

/// Target audience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Wire representation, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

// =============================================================================
// Items
// =============================================================================

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub url: String,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    pub tags: Vec<String>,
}

impl MaterialItem {
    /// Lower-cased `title description tags...` used for keyword matching.
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.tags.join(" ")).to_lowercase()
    }

    /// Whether any tag contains `category`, ignoring case.
    pub fn has_tag_like(&self, category: &str) -> bool {
        let needle = category.to_lowercase();
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// A catalog entry paired with its keyword score for one query.
///
/// Serializes as the flattened item plus a `score` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMaterial {
    #[serde(flatten)]
    pub item: MaterialItem,
    pub score: usize,
}
