//! Learning-material catalog.
//!
//! The catalog is built once at startup, either from the built-in entries or
//! from a JSON file, and shared read-only behind an `Arc` afterwards. There is
//! no write path.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::models::{Difficulty, MaterialItem, MaterialType};

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate material id: {0}")]
    DuplicateId(u32),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable, ordered set of learning materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MaterialItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids. Order is preserved.
    pub fn new(items: Vec<MaterialItem>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a JSON array of materials.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<MaterialItem> = serde_json::from_str(&raw)?;
        Self::new(items)
    }

    /// The default set of five AI learning materials.
    pub fn builtin() -> Self {
        Self {
            items: builtin_items(),
        }
    }

    pub fn items(&self) -> &[MaterialItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&MaterialItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items whose tags contain `category` (case-insensitive substring) and
    /// whose difficulty equals `difficulty` exactly. `None` disables a filter.
    ///
    /// An unknown difficulty string matches nothing.
    pub fn filter(&self, category: Option<&str>, difficulty: Option<&str>) -> Vec<&MaterialItem> {
        self.items
            .iter()
            .filter(|item| category.is_none_or(|c| item.has_tag_like(c)))
            .filter(|item| difficulty.is_none_or(|d| item.difficulty.as_str() == d))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn material(
    id: u32,
    title: &str,
    description: &str,
    material_type: MaterialType,
    url: &str,
    difficulty: Difficulty,
    estimated_time: &str,
    tags: &[&str],
) -> MaterialItem {
    MaterialItem {
        id,
        title: title.to_string(),
        description: description.to_string(),
        material_type,
        url: url.to_string(),
        difficulty,
        estimated_time: estimated_time.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn builtin_items() -> Vec<MaterialItem> {
    vec![
        material(
            1,
            "Introduction to AI and Machine Learning",
            "A comprehensive guide to understanding AI fundamentals",
            MaterialType::Article,
            "https://example.com/ai-intro",
            Difficulty::Beginner,
            "15 min read",
            &["AI", "Machine Learning", "Beginner"],
        ),
        material(
            2,
            "Natural Language Processing Basics",
            "Learn the fundamentals of NLP and text processing",
            MaterialType::Video,
            "https://example.com/nlp-basics",
            Difficulty::Intermediate,
            "30 min watch",
            &["NLP", "Text Processing", "AI"],
        ),
        material(
            3,
            "Building Chatbots with Modern APIs",
            "Step-by-step guide to creating intelligent chatbots",
            MaterialType::Tutorial,
            "https://example.com/chatbot-tutorial",
            Difficulty::Intermediate,
            "45 min read",
            &["Chatbots", "APIs", "Development"],
        ),
        material(
            4,
            "Advanced Prompt Engineering",
            "Master the art of crafting effective AI prompts",
            MaterialType::Course,
            "https://example.com/prompt-engineering",
            Difficulty::Advanced,
            "2 hours",
            &["Prompts", "AI", "Advanced"],
        ),
        material(
            5,
            "Ethics in AI Development",
            "Understanding responsible AI development practices",
            MaterialType::Article,
            "https://example.com/ai-ethics",
            Difficulty::Beginner,
            "20 min read",
            &["Ethics", "AI", "Responsibility"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&MaterialItem]) -> Vec<u32> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn builtin_has_five_unique_items() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(Catalog::new(catalog.items().to_vec()).is_ok());
        assert_eq!(
            catalog.get(5).map(|m| m.title.as_str()),
            Some("Ethics in AI Development")
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut items = builtin_items();
        items.push(items[0].clone());
        let err = Catalog::new(items).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(1)));
    }

    #[test]
    fn filter_without_criteria_returns_everything_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.filter(None, None)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn filter_by_category_is_case_insensitive_substring() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.filter(Some("ai"), None)), vec![1, 2, 4, 5]);
        assert_eq!(ids(&catalog.filter(Some("PROC"), None)), vec![2]);
        assert!(catalog.filter(Some("quantum"), None).is_empty());
    }

    #[test]
    fn filter_by_difficulty_is_exact() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.filter(None, Some("beginner"))), vec![1, 5]);
        assert!(catalog.filter(None, Some("Beginner")).is_empty());
        assert!(catalog.filter(None, Some("expert")).is_empty());
    }

    #[test]
    fn filters_combine() {
        let catalog = Catalog::builtin();
        assert_eq!(
            ids(&catalog.filter(Some("ai"), Some("intermediate"))),
            vec![2]
        );
    }

    #[test]
    fn catalog_parses_from_json() {
        let json = serde_json::to_string(Catalog::builtin().items()).expect("serialize");
        let items: Vec<MaterialItem> = serde_json::from_str(&json).expect("parse");
        assert_eq!(Catalog::new(items).expect("catalog"), Catalog::builtin());
    }
}
