//! Catalogue API endpoints
//!
//! Maps to the `/catalog` routes of the Gudang backend:
//! - Search catalogue items by free-text query (used by the suggestion
//!   engine for remote augmentation)
//! - List catalogue items with pagination (used by callers for their
//!   periodic item-set refresh)

use crate::client::GudangClient;
use crate::error::ApiResult;
use gudang_search::CatalogItem;
use serde::{Deserialize, Serialize};

/// Catalogue API interface
#[derive(Clone)]
pub struct CatalogApi {
    client: GudangClient,
}

impl CatalogApi {
    /// Create a new catalogue API interface
    pub(crate) fn new(client: GudangClient) -> Self {
        Self { client }
    }

    /// Search catalogue items by substring query
    ///
    /// GET /catalog/search?q=<query>&limit=<limit>
    pub async fn search(&self, query: &str, limit: u32) -> ApiResult<SearchCatalogResponse> {
        let limit = limit.to_string();
        self.client
            .get_with_query("catalog/search", &[("q", query), ("limit", &limit)])
            .await
    }

    /// List catalogue items with pagination
    ///
    /// GET /catalog/items
    pub async fn list(&self, params: &ListCatalogParams) -> ApiResult<ListCatalogResponse> {
        let limit = params.limit.map(|l| l.to_string());
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(ref category) = params.category {
            query.push(("category", category));
        }
        if let Some(ref cursor) = params.cursor {
            query.push(("cursor", cursor));
        }
        if let Some(ref limit) = limit {
            query.push(("limit", limit));
        }
        self.client.get_with_query("catalog/items", &query).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Parameters for listing catalogue items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCatalogParams {
    /// Filter by category label
    pub category: Option<String>,
    /// Cursor for pagination
    pub cursor: Option<String>,
    /// Page size limit (max 50)
    pub limit: Option<u32>,
}

impl ListCatalogParams {
    /// Create new params with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set pagination cursor
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCatalogResponse {
    pub success: bool,
    pub data: Option<Vec<CatalogRecord>>,
    pub error: Option<ErrorInfo>,
}

/// List response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCatalogResponse {
    pub success: bool,
    pub data: Option<Vec<CatalogRecord>>,
    pub pagination: Option<PaginationInfo>,
    pub error: Option<ErrorInfo>,
}

/// Catalogue item as the backend returns it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    pub specification: Option<String>,
    pub category: Option<String>,
    /// Unit of measure ("pcs", "kg", "set")
    pub unit: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

impl CatalogItem for CatalogRecord {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn specification(&self) -> Option<&str> {
        self.specification.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Pagination info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub cursor: Option<String>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub total: Option<i64>,
}

/// Error info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}
