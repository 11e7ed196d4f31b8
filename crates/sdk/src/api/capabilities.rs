//! Capability discovery endpoint.

use crate::client::YokAtlasClient;
use crate::error::YokAtlasResult;
use yokatlas_core::ProviderCapabilities;

/// Reports which search surfaces the provider exposes.
pub struct CapabilitiesApi<'a> {
    client: &'a YokAtlasClient,
}

impl<'a> CapabilitiesApi<'a> {
    pub(crate) fn new(client: &'a YokAtlasClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> YokAtlasResult<ProviderCapabilities> {
        self.client.http.get(&["v1", "capabilities"]).await
    }
}
