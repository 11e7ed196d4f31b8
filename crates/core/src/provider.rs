//! Seams to the external data provider.
//!
//! The provider owns all network I/O, parsing and fuzzy matching. This crate
//! only decides what to ask for and how to wrap the answer.

use crate::error::ProviderError;
use crate::types::{DegreeLevel, DetailRecord, FilterMapping, ProgramRecord, Year, YopCode};
use serde::{Deserialize, Serialize};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Atlas facet: full detail data for one program and year
#[async_trait::async_trait]
pub trait AtlasProvider: Send + Sync {
    async fn fetch_all_details(
        &self,
        level: DegreeLevel,
        program_id: &YopCode,
        year: Year,
    ) -> ProviderResult<DetailRecord>;
}

/// Smart search facet with fuzzy matching over free-text fields
#[async_trait::async_trait]
pub trait SmartSearchProvider: Send + Sync {
    async fn smart_search(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
        smart_search: bool,
    ) -> ProviderResult<Vec<ProgramRecord>>;
}

/// Legacy exact-match search facet (Tercih Sihirbazı). Not limit-aware.
#[async_trait::async_trait]
pub trait LegacySearchProvider: Send + Sync {
    async fn legacy_search(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
    ) -> ProviderResult<Vec<ProgramRecord>>;
}

/// Which API surfaces a provider exposes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    #[serde(default)]
    pub smart_search: bool,
    #[serde(default)]
    pub legacy_search: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Asks the provider which surfaces it supports
#[async_trait::async_trait]
pub trait CapabilitySource: Send + Sync {
    async fn fetch_capabilities(&self) -> ProviderResult<ProviderCapabilities>;
}
