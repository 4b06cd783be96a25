//! `CatalogLookup` implementation backed by the catalogue search endpoint.

use std::future::Future;

use crate::client::GudangClient;
use crate::endpoints::catalog::CatalogRecord;
use crate::endpoints::CatalogApi;
use gudang_suggest::{CatalogLookup, LookupError, LookupResult};

/// Remote catalogue collaborator for the suggestion engine.
///
/// Cancellation is by dropping the lookup future (the session aborts its
/// task), which drops the underlying HTTP request. Failures are reported
/// as [`LookupError::Failed`] for the engine to log; nothing is retried
/// here.
#[derive(Clone)]
pub struct RemoteCatalog {
    api: CatalogApi,
}

impl RemoteCatalog {
    /// Create a remote catalogue over an API client.
    #[must_use]
    pub fn new(client: GudangClient) -> Self {
        Self {
            api: client.catalog(),
        }
    }
}

impl CatalogLookup for RemoteCatalog {
    type Item = CatalogRecord;

    fn lookup(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = LookupResult<CatalogRecord>> + Send {
        let api = self.api.clone();
        let query = query.to_string();
        let limit = u32::try_from(limit).unwrap_or(u32::MAX);
        async move {
            let response = api
                .search(&query, limit)
                .await
                .map_err(|e| LookupError::Failed(e.to_string()))?;
            if !response.success {
                let message = response
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| "catalogue search rejected".to_string());
                return Err(LookupError::Failed(message));
            }
            Ok(response.data.unwrap_or_default())
        }
    }
}
