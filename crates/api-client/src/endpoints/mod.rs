//! API endpoint implementations

pub mod catalog;

pub use catalog::CatalogApi;
