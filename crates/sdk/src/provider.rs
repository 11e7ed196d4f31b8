//! Provider trait implementations backed by the HTTP client.

use crate::client::YokAtlasClient;
use yokatlas_core::{
    AtlasProvider, CapabilitySource, DegreeLevel, DetailRecord, FilterMapping,
    LegacySearchProvider, ProgramRecord, ProviderCapabilities, ProviderResult,
    SmartSearchProvider, Year, YopCode,
};

#[async_trait::async_trait]
impl AtlasProvider for YokAtlasClient {
    async fn fetch_all_details(
        &self,
        level: DegreeLevel,
        program_id: &YopCode,
        year: Year,
    ) -> ProviderResult<DetailRecord> {
        Ok(self.atlas().details(level, program_id, year).await?)
    }
}

#[async_trait::async_trait]
impl SmartSearchProvider for YokAtlasClient {
    async fn smart_search(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
        smart_search: bool,
    ) -> ProviderResult<Vec<ProgramRecord>> {
        Ok(self.search().smart(level, filters, smart_search).await?)
    }
}

#[async_trait::async_trait]
impl LegacySearchProvider for YokAtlasClient {
    async fn legacy_search(
        &self,
        level: DegreeLevel,
        filters: &FilterMapping,
    ) -> ProviderResult<Vec<ProgramRecord>> {
        Ok(self.search().legacy(level, filters).await?)
    }
}

#[async_trait::async_trait]
impl CapabilitySource for YokAtlasClient {
    async fn fetch_capabilities(&self) -> ProviderResult<ProviderCapabilities> {
        Ok(self.capabilities().get().await?)
    }
}
