// Core of the YÖK Atlas MCP adapter: parameter normalization, result
// shaping and the seams to the external data provider.

pub mod capability;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod params;
pub mod provider;
pub mod schema;
pub mod service;
pub mod types;

pub use capability::{detect_backend, select_surface, ApiSurface, SearchBackend, SurfacePreference};
pub use envelope::{ProgramType, SearchEnvelope, SearchMethod, ToolOutcome};
pub use error::{CoreError, CoreResult, ProviderError};
pub use params::{AssociateSearchParams, BachelorSearchParams, ParametersUsed};
pub use provider::{
    AtlasProvider, CapabilitySource, LegacySearchProvider, ProviderCapabilities, ProviderResult,
    SmartSearchProvider,
};
pub use service::{DetailOutcome, ProgramService, SearchOutcome};
pub use types::*;
