//! Program search endpoints.

use crate::client::YokAtlasClient;
use crate::error::YokAtlasResult;
use serde::{Deserialize, Serialize};
use yokatlas_core::{DegreeLevel, FilterMapping, ProgramRecord};

/// Search API covering both provider surfaces.
pub struct SearchApi<'a> {
    client: &'a YokAtlasClient,
}

impl<'a> SearchApi<'a> {
    pub(crate) fn new(client: &'a YokAtlasClient) -> Self {
        Self { client }
    }

    /// Smart search with optional fuzzy matching.
    pub async fn smart(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
        smart_search: bool,
    ) -> YokAtlasResult<Vec<ProgramRecord>> {
        let request = SmartSearchRequest {
            filters: filters.clone(),
            smart_search,
        };
        self.client
            .http
            .post(&["v1", "search", level.path_segment(), "smart"], &request)
            .await
    }

    /// Legacy exact-match search. Returns the provider's full page.
    pub async fn legacy(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
    ) -> YokAtlasResult<Vec<ProgramRecord>> {
        let request = LegacySearchRequest {
            filters: filters.clone(),
        };
        self.client
            .http
            .post(&["v1", "search", level.path_segment(), "legacy"], &request)
            .await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartSearchRequest {
    pub filters: FilterMapping,
    pub smart_search: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacySearchRequest {
    pub filters: FilterMapping,
}
