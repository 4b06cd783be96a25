//! Reactive recomputation of suggestions and filtered results.
//!
//! [`SearchController`] is a synchronous state machine over the query
//! lifecycle: Idle (query too short) → LocalSearch (scores computed) →
//! RemoteAugment (local suggestions too sparse) → back to LocalSearch when
//! results merge or the query moves on. It never performs I/O itself; it
//! emits a [`LookupRequest`] and lets the session (or any other driver)
//! execute it.

use std::collections::HashSet;

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use gudang_search::{contains_query, score, CatalogItem};

use crate::config::SearchConfig;
use crate::lookup::LookupRequest;

/// Output of one scoring pass over the item set.
#[derive(Debug, Clone)]
pub struct Recomputed<T> {
    /// Top-ranked, score-gated suggestions (at most `suggestion_limit`).
    pub suggestions: Vec<T>,
    /// Broader result listing, in original item order.
    pub filtered: Vec<T>,
}

/// Score every item against `query` and derive both result lists.
///
/// Pure; the controller is a stateful shell around this. Suggestions are
/// the items scoring strictly above zero, ranked descending with ties kept
/// in original item order, truncated to the configured limit. The filtered
/// list keeps original item order and admits items by substring
/// containment, by score above the filter threshold, or by having made the
/// suggestion list (so suggestions are always a subset of filtered).
pub fn recompute<T: CatalogItem + Clone>(
    query: &str,
    items: &[T],
    config: &SearchConfig,
) -> Recomputed<T> {
    let scored: Vec<i32> = items.iter().map(|item| score(query, item)).collect();

    let mut ranked: Vec<(usize, i32)> = scored
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, s)| s > 0)
        .collect();
    // sort_by is stable: equal scores keep original relative order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(config.suggestion_limit);

    let suggested: HashSet<usize> = ranked.iter().map(|&(idx, _)| idx).collect();
    let suggestions: Vec<T> = ranked.iter().map(|&(idx, _)| items[idx].clone()).collect();

    let filtered: Vec<T> = items
        .iter()
        .enumerate()
        .filter(|&(idx, item)| {
            contains_query(query, item)
                || scored[idx] > config.filter_score_threshold
                || suggested.contains(&idx)
        })
        .map(|(_, item)| item.clone())
        .collect();

    Recomputed {
        suggestions,
        filtered,
    }
}

/// Stateful search controller for one search context.
///
/// Owns the query text and the derived result lists. Both external
/// triggers — query change and item-set change — recompute the lists
/// synchronously; only a query change can request a remote lookup.
#[derive(Debug)]
pub struct SearchController<T> {
    config: SearchConfig,
    items: Vec<T>,
    query: String,
    suggestions: Vec<T>,
    filtered: Vec<T>,
    generation: u64,
    pending: Option<u64>,
}

impl<T: CatalogItem + Clone> SearchController<T> {
    /// Create a controller with an empty item set.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            query: String::new(),
            suggestions: Vec::new(),
            filtered: Vec::new(),
            generation: 0,
            pending: None,
        }
    }

    /// Create a controller over an initial item set.
    #[must_use]
    pub fn with_items(config: SearchConfig, items: Vec<T>) -> Self {
        let mut controller = Self::new(config);
        controller.set_items(items);
        controller
    }

    /// Replace the backing item set and recompute under the current query.
    ///
    /// Called by the owner on its own refresh schedule and after merging
    /// remote results. Never requests a lookup: re-augmenting on every
    /// merge would loop with no new user signal in between.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refresh();
    }

    /// Update the query and recompute both result lists.
    ///
    /// Every accepted change bumps the in-flight generation, invalidating
    /// any outstanding lookup. Returns a [`LookupRequest`] when local
    /// suggestions are too sparse and remote augmentation should run.
    /// Setting the identical query text again is a no-op.
    pub fn set_query(&mut self, query: &str) -> Option<LookupRequest> {
        if self.query == query {
            return None;
        }
        self.query = query.to_string();
        self.generation += 1;
        self.pending = None;

        self.refresh();

        let trimmed = self.query.trim();
        if self.effective_query_len() < self.config.min_query_len {
            return None;
        }
        if self.suggestions.len() >= self.config.augment_threshold {
            return None;
        }

        self.pending = Some(self.generation);
        debug!(
            query = %trimmed,
            suggestions = self.suggestions.len(),
            generation = self.generation,
            "local suggestions sparse, requesting remote lookup"
        );
        Some(LookupRequest {
            query: trimmed.to_string(),
            limit: self.config.remote_limit,
            generation: self.generation,
        })
    }

    /// Report a resolved lookup. Returns `true` iff the generation is
    /// still current and unconsumed; stale responses return `false` and
    /// must be discarded.
    pub fn complete_lookup(&mut self, generation: u64) -> bool {
        if self.pending == Some(generation) && generation == self.generation {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Whether `generation` is the controller's current one.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Current query text, as set by the caller.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The backing item set.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Ranked suggestions for the current query.
    #[must_use]
    pub fn suggestions(&self) -> &[T] {
        &self.suggestions
    }

    /// Broader filtered listing for the current query.
    #[must_use]
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    /// Current in-flight generation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Generation of the outstanding lookup request, if one is pending.
    #[must_use]
    pub fn pending_lookup(&self) -> Option<u64> {
        self.pending
    }

    fn refresh(&mut self) {
        if self.effective_query_len() < self.config.min_query_len {
            self.suggestions.clear();
            self.filtered = self.items.clone();
            return;
        }
        let out = recompute(self.query.trim(), &self.items, &self.config);
        self.suggestions = out.suggestions;
        self.filtered = out.filtered;
    }

    fn effective_query_len(&self) -> usize {
        self.query.trim().graphemes(true).count()
    }
}
