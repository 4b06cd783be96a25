//! Incremental catalogue suggestions for Gudang.
//!
//! This crate owns the as-you-type search lifecycle:
//! - [`SearchController`]: a synchronous state machine that recomputes the
//!   ranked suggestion list and the broader filtered list on every query or
//!   item-set change, and decides when local results are too sparse and a
//!   remote lookup is warranted
//! - [`SearchSession`]: the tokio driver around the controller that spawns
//!   at most one lookup task at a time, aborting a superseded task before
//!   issuing the next
//! - [`CatalogLookup`]: the contract the remote catalogue collaborator
//!   implements (see `gudang-api-client` for the HTTP implementation)
//!
//! Scoring itself is pure and lives in `gudang-search`; state here is
//! per-session, constructed and torn down by the caller.

mod config;
mod controller;
mod error;
mod lookup;
mod session;

pub use config::SearchConfig;
pub use controller::{recompute, Recomputed, SearchController};
pub use error::{Result, SuggestError};
pub use lookup::{CatalogLookup, LookupError, LookupRequest, LookupResult};
pub use session::SearchSession;
