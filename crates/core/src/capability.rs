//! One-time selection of the search API surface.
//!
//! The surface is chosen once at process start and injected into every tool
//! handler as an immutable [`SearchBackend`]. Capabilities are never re-queried per call.

use crate::envelope::SearchMethod;
use crate::error::{CoreError, CoreResult};
use crate::provider::{CapabilitySource, LegacySearchProvider, ProviderCapabilities, SmartSearchProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Operator preference for the search surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfacePreference {
    /// Smart if the provider has it, legacy otherwise
    #[default]
    Auto,
    Smart,
    Legacy,
}

impl std::str::FromStr for SurfacePreference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "smart" => Ok(Self::Smart),
            "legacy" => Ok(Self::Legacy),
            other => Err(CoreError::invalid_parameter(format!(
                "unknown search surface '{}', expected auto, smart or legacy",
                other
            ))),
        }
    }
}

/// Resolved search surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiSurface {
    Smart,
    Legacy,
}

impl ApiSurface {
    pub fn search_method(&self) -> SearchMethod {
        match self {
            ApiSurface::Smart => SearchMethod::SmartSearch,
            ApiSurface::Legacy => SearchMethod::LegacyApi,
        }
    }
}

impl std::fmt::Display for ApiSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiSurface::Smart => write!(f, "smart"),
            ApiSurface::Legacy => write!(f, "legacy"),
        }
    }
}

pub fn select_surface(
    capabilities: &ProviderCapabilities,
    preference: SurfacePreference,
) -> CoreResult<ApiSurface> {
    match preference {
        SurfacePreference::Auto if capabilities.smart_search => Ok(ApiSurface::Smart),
        SurfacePreference::Auto if capabilities.legacy_search => Ok(ApiSurface::Legacy),
        SurfacePreference::Auto => Err(CoreError::NoSearchSurface(
            "provider exposes neither smart nor legacy search".to_string(),
        )),
        SurfacePreference::Smart if capabilities.smart_search => Ok(ApiSurface::Smart),
        SurfacePreference::Smart => Err(CoreError::NoSearchSurface(
            "smart search was requested but the provider does not expose it".to_string(),
        )),
        SurfacePreference::Legacy if capabilities.legacy_search => Ok(ApiSurface::Legacy),
        SurfacePreference::Legacy => Err(CoreError::NoSearchSurface(
            "legacy search was requested but the provider does not expose it".to_string(),
        )),
    }
}

/// Search surface bound to a provider implementation
#[derive(Clone)]
pub enum SearchBackend {
    Smart(Arc<dyn SmartSearchProvider>),
    Legacy(Arc<dyn LegacySearchProvider>),
}

impl SearchBackend {
    pub fn surface(&self) -> ApiSurface {
        match self {
            SearchBackend::Smart(_) => ApiSurface::Smart,
            SearchBackend::Legacy(_) => ApiSurface::Legacy,
        }
    }

    pub fn search_method(&self) -> SearchMethod {
        self.surface().search_method()
    }
}

impl std::fmt::Debug for SearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SearchBackend").field(&self.surface()).finish()
    }
}

/// Resolve the search backend once.
///
/// An explicit preference is trusted without a network round trip. `Auto`
/// asks the provider once, and a failed lookup is fatal because there is no way
/// to pick a surface.
pub async fn detect_backend<P>(
    provider: Arc<P>,
    preference: SurfacePreference,
) -> CoreResult<SearchBackend>
where
    P: CapabilitySource + SmartSearchProvider + LegacySearchProvider + 'static,
{
    let surface = match preference {
        SurfacePreference::Smart => ApiSurface::Smart,
        SurfacePreference::Legacy => ApiSurface::Legacy,
        SurfacePreference::Auto => {
            let capabilities = provider.fetch_capabilities().await.map_err(|e| {
                CoreError::NoSearchSurface(format!("capability lookup failed: {}", e))
            })?;
            tracing::info!(
                smart = capabilities.smart_search,
                legacy = capabilities.legacy_search,
                version = capabilities.version.as_deref().unwrap_or("unknown"),
                "Provider capabilities detected"
            );
            select_surface(&capabilities, preference)?
        }
    };

    Ok(match surface {
        ApiSurface::Smart => SearchBackend::Smart(provider),
        ApiSurface::Legacy => SearchBackend::Legacy(provider),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::provider::ProviderResult;
    use crate::types::{DegreeLevel, FilterMapping, ProgramRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CapabilitiesOnly {
        capabilities: ProviderResult<ProviderCapabilities>,
        lookups: AtomicUsize,
    }

    impl CapabilitiesOnly {
        fn new(capabilities: ProviderResult<ProviderCapabilities>) -> Arc<Self> {
            Arc::new(Self {
                capabilities,
                lookups: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl CapabilitySource for CapabilitiesOnly {
        async fn fetch_capabilities(&self) -> ProviderResult<ProviderCapabilities> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.capabilities.clone()
        }
    }

    #[async_trait::async_trait]
    impl SmartSearchProvider for CapabilitiesOnly {
        async fn smart_search(
            &self,
            _level: DegreeLevel,
            _filters: &FilterMapping,
            _smart_search: bool,
        ) -> ProviderResult<Vec<ProgramRecord>> {
            Ok(vec![])
        }
    }

    #[async_trait::async_trait]
    impl LegacySearchProvider for CapabilitiesOnly {
        async fn legacy_search(
            &self,
            _level: DegreeLevel,
            _filters: &FilterMapping,
        ) -> ProviderResult<Vec<ProgramRecord>> {
            Ok(vec![])
        }
    }

    fn caps(smart: bool, legacy: bool) -> ProviderCapabilities {
        ProviderCapabilities {
            smart_search: smart,
            legacy_search: legacy,
            version: None,
        }
    }

    #[test]
    fn test_auto_prefers_smart() {
        assert_eq!(
            select_surface(&caps(true, true), SurfacePreference::Auto).unwrap(),
            ApiSurface::Smart
        );
        assert_eq!(
            select_surface(&caps(false, true), SurfacePreference::Auto).unwrap(),
            ApiSurface::Legacy
        );
    }

    #[test]
    fn test_no_surface_is_fatal() {
        assert!(matches!(
            select_surface(&caps(false, false), SurfacePreference::Auto),
            Err(CoreError::NoSearchSurface(_))
        ));
        assert!(select_surface(&caps(false, true), SurfacePreference::Smart).is_err());
        assert!(select_surface(&caps(true, false), SurfacePreference::Legacy).is_err());
    }

    #[test]
    fn test_preference_from_str() {
        assert_eq!("AUTO".parse::<SurfacePreference>().unwrap(), SurfacePreference::Auto);
        assert_eq!("legacy".parse::<SurfacePreference>().unwrap(), SurfacePreference::Legacy);
        assert!("fuzzy".parse::<SurfacePreference>().is_err());
    }

    #[tokio::test]
    async fn test_explicit_preference_skips_lookup() {
        let provider = CapabilitiesOnly::new(Err(ProviderError::Network("down".to_string())));
        let backend = detect_backend(provider.clone(), SurfacePreference::Legacy)
            .await
            .unwrap();
        assert_eq!(backend.surface(), ApiSurface::Legacy);
        assert_eq!(provider.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_auto_asks_provider_once() {
        let provider = CapabilitiesOnly::new(Ok(caps(true, true)));
        let backend = detect_backend(provider.clone(), SurfacePreference::Auto)
            .await
            .unwrap();
        assert_eq!(backend.search_method(), SearchMethod::SmartSearch);
        assert_eq!(provider.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_fatal() {
        let provider = CapabilitiesOnly::new(Err(ProviderError::Network("refused".to_string())));
        let result = detect_backend(provider, SurfacePreference::Auto).await;
        assert!(matches!(result, Err(CoreError::NoSearchSurface(_))));
    }
}
