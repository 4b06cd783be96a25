//! Configuration for the suggestion engine.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestError};

/// Tuning knobs for the suggestion controller.
///
/// The defaults are the values the catalogue UI ships with; `validate()`
/// guards against configurations the controller cannot operate under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum trimmed query length (in grapheme clusters) before any
    /// matching runs; shorter queries reset the filtered list to the full
    /// item set.
    pub min_query_len: usize,
    /// Maximum number of ranked suggestions.
    pub suggestion_limit: usize,
    /// When fewer suggestions than this survive local scoring, a remote
    /// lookup is requested.
    pub augment_threshold: usize,
    /// Page size passed to the remote lookup.
    pub remote_limit: usize,
    /// Items scoring strictly above this enter the filtered list even
    /// without substring containment.
    pub filter_score_threshold: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            suggestion_limit: 8,
            augment_threshold: 3,
            remote_limit: 20,
            filter_score_threshold: 65,
        }
    }
}

impl SearchConfig {
    /// Builder-style method to set the minimum query length
    #[must_use]
    pub fn with_min_query_len(mut self, len: usize) -> Self {
        self.min_query_len = len;
        self
    }

    /// Builder-style method to set the suggestion limit
    #[must_use]
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Builder-style method to set the augmentation threshold
    #[must_use]
    pub fn with_augment_threshold(mut self, threshold: usize) -> Self {
        self.augment_threshold = threshold;
        self
    }

    /// Builder-style method to set the remote page size
    #[must_use]
    pub fn with_remote_limit(mut self, limit: usize) -> Self {
        self.remote_limit = limit;
        self
    }

    /// Builder-style method to set the filter score threshold
    #[must_use]
    pub fn with_filter_score_threshold(mut self, threshold: i32) -> Self {
        self.filter_score_threshold = threshold;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_query_len == 0 {
            return Err(SuggestError::InvalidConfig(
                "min_query_len must be at least 1".to_string(),
            ));
        }
        if self.suggestion_limit == 0 {
            return Err(SuggestError::InvalidConfig(
                "suggestion_limit must be at least 1".to_string(),
            ));
        }
        if self.remote_limit == 0 {
            return Err(SuggestError::InvalidConfig(
                "remote_limit must be at least 1".to_string(),
            ));
        }
        if self.augment_threshold > self.suggestion_limit {
            return Err(SuggestError::InvalidConfig(
                "augment_threshold cannot exceed suggestion_limit".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.min_query_len, 2);
        assert_eq!(config.suggestion_limit, 8);
        assert_eq!(config.augment_threshold, 3);
        assert_eq!(config.filter_score_threshold, 65);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_suggestion_limit(5)
            .with_augment_threshold(2)
            .with_remote_limit(10);

        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.augment_threshold, 2);
        assert_eq!(config.remote_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_limits() {
        assert!(SearchConfig::default()
            .with_suggestion_limit(0)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_min_query_len(0)
            .validate()
            .is_err());
        assert!(SearchConfig::default()
            .with_remote_limit(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validation_rejects_threshold_above_limit() {
        let config = SearchConfig::default()
            .with_suggestion_limit(2)
            .with_augment_threshold(3);
        assert!(config.validate().is_err());
    }
}
