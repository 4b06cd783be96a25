//! The remote catalogue collaborator contract.
//!
//! The controller decides *when* a lookup should run; executing it is the
//! session's job, through whatever implements [`CatalogLookup`]. The HTTP
//! implementation lives in `gudang-api-client`; tests substitute mocks.

use std::future::Future;

use thiserror::Error;

use gudang_search::CatalogItem;

/// A single remote lookup decision emitted by the controller.
///
/// The generation is the staleness token: a response is only applied if
/// its generation is still the controller's current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Trimmed query text at the moment the lookup was requested.
    pub query: String,
    /// Maximum number of items the collaborator should return.
    pub limit: usize,
    /// In-flight generation this request belongs to.
    pub generation: u64,
}

/// Errors a lookup can resolve with.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The lookup was cancelled before completing. Expected during rapid
    /// typing; swallowed silently.
    #[error("lookup cancelled")]
    Cancelled,

    /// The lookup failed (transport, backend, decoding). Logged, never
    /// retried; the next query change re-triggers naturally.
    #[error("lookup failed: {0}")]
    Failed(String),
}

impl LookupError {
    /// Whether this is an expected cancellation rather than a failure.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for lookup operations.
pub type LookupResult<T> = std::result::Result<Vec<T>, LookupError>;

/// A paginated, substring-filterable catalogue lookup service.
///
/// Implementations must be cheap to clone (the session clones one per
/// spawned task) and their futures `Send` so the session can run them on a
/// tokio task. Cancellation happens by dropping the future mid-flight;
/// implementations that cancel internally resolve with
/// [`LookupError::Cancelled`] instead.
pub trait CatalogLookup: Send + Sync {
    /// Item type returned by the collaborator.
    type Item: CatalogItem + Clone + Send;

    /// Look up catalogue items matching `query`, at most `limit` of them.
    fn lookup(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = LookupResult<Self::Item>> + Send;
}
