//! HTTP client for the Gudang catalogue backend
//!
//! This crate provides the remote half of the incremental search engine:
//! a `reqwest`-based client for the catalogue lookup service, plus the
//! [`CatalogLookup`](gudang_suggest::CatalogLookup) implementation the
//! suggestion session drives.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load URLs and keys from environment variables
//! - **Rate limiting**: Avoid hitting API throttling limits
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! Requests are deliberately single-attempt: the suggestion engine never
//! retries a failed lookup, it simply re-issues on the next query change.
//!
//! # Example
//!
//! ```rust,no_run
//! use gudang_api_client::{GudangClient, RemoteCatalog};
//! use gudang_suggest::{SearchConfig, SearchSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client with environment configuration
//!     let client = GudangClient::new()?;
//!
//!     // Load the initial item set
//!     let page = client.catalog().list(&Default::default()).await?;
//!
//!     // Drive the suggestion engine with remote augmentation
//!     let mut session = SearchSession::new(SearchConfig::default(), RemoteCatalog::new(client))?;
//!     session.set_items(page.data.unwrap_or_default());
//!     session.set_query("kompor");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod lookup;
pub mod middleware;

pub use client::GudangClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};
pub use lookup::RemoteCatalog;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::GudangClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::catalog::{CatalogRecord, ListCatalogParams};
    pub use crate::endpoints::CatalogApi;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::lookup::RemoteCatalog;
}
