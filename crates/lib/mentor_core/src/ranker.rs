//! Keyword-overlap ranking over the catalog.
//!
//! A query is lower-cased and split on whitespace. Each keyword that occurs as
//! a substring of an item's searchable text adds one to the item's score;
//! repeated keywords count once per repetition. Items scoring zero are
//! dropped and the rest are ordered by score, best first, with ties kept in
//! catalog order.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::models::{MaterialItem, ScoredMaterial};

/// Number of recommendations attached to a chat response.
pub const DEFAULT_LIMIT: usize = 3;

/// Number of items returned by the listing endpoint when no limit is given.
pub const LISTING_LIMIT: usize = 10;

/// Split a query into lower-cased keywords.
pub fn keywords(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Count keywords that occur anywhere in `searchable`.
pub fn keyword_score(keywords: &[String], searchable: &str) -> usize {
    keywords
        .iter()
        .filter(|kw| searchable.contains(kw.as_str()))
        .count()
}

/// Ranks catalog items against free-text queries.
///
/// Cheap to clone; the catalog and its precomputed search texts are shared.
#[derive(Debug, Clone)]
pub struct Ranker {
    catalog: Arc<Catalog>,
    search_texts: Arc<[String]>,
}

impl Ranker {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let search_texts = catalog
            .items()
            .iter()
            .map(MaterialItem::searchable_text)
            .collect();
        Self {
            catalog,
            search_texts,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Score every catalog item, keeping catalog order. Zero scores included.
    pub fn score_all(&self, query: &str) -> Vec<ScoredMaterial> {
        let keywords = keywords(query);
        self.catalog
            .items()
            .iter()
            .zip(self.search_texts.iter())
            .map(|(item, text)| ScoredMaterial {
                item: item.clone(),
                score: keyword_score(&keywords, text),
            })
            .collect()
    }

    /// Best-matching items with their scores, at most `limit` of them.
    pub fn rank_scored(&self, query: &str, limit: usize) -> Vec<ScoredMaterial> {
        let mut scored: Vec<ScoredMaterial> = self
            .score_all(query)
            .into_iter()
            .filter(|s| s.score > 0)
            .collect();
        // `sort_by` is stable, so equal scores keep catalog order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);
        scored
    }

    /// Best-matching items, at most `limit` of them.
    pub fn rank(&self, query: &str, limit: usize) -> Vec<MaterialItem> {
        self.rank_scored(query, limit)
            .into_iter()
            .map(|s| s.item)
            .collect()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::builtin()))
    }
}
