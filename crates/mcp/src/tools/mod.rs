pub mod atlas;
pub mod search;
mod registry;

pub use atlas::AtlasDetailsTool;
pub use search::{AssociateSearchTool, BachelorSearchTool};
pub use registry::{
    json_schema_enum, json_schema_integer, json_schema_number, json_schema_object,
    json_schema_string, Tool, ToolRegistry,
};

use std::sync::Arc;
use yokatlas_core::ProgramService;

/// Registry holding the four YÖK Atlas tools over one service
pub fn default_registry(service: ProgramService) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(AtlasDetailsTool::associate(service.clone())));
    registry.register(Arc::new(AtlasDetailsTool::bachelor(service.clone())));
    registry.register(Arc::new(BachelorSearchTool::new(service.clone())));
    registry.register(Arc::new(AssociateSearchTool::new(service)));
    registry
}
