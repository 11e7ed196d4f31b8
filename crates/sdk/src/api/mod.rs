//! Provider API endpoints.

mod atlas;
mod capabilities;
mod search;

pub use atlas::AtlasApi;
pub use capabilities::CapabilitiesApi;
pub use search::{LegacySearchRequest, SearchApi, SmartSearchRequest};
