//! Relevance scoring and fuzzy matching for the Gudang catalogue.
//!
//! This crate provides:
//! - Multi-tier relevance scoring across name, specification, and category
//! - Grapheme-aware Levenshtein edit distance
//! - Case-insensitive substring containment for result filtering
//!
//! Everything here is pure and synchronous; the stateful suggestion
//! machinery lives in `gudang-suggest`.

mod fuzzy;
mod item;
mod relevance;

pub use fuzzy::levenshtein_distance;
pub use item::CatalogItem;
pub use relevance::{contains_query, score};
