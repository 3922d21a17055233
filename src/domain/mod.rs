//! Domain-level primitives: resource types and the registry they are looked up in.

pub mod naming;
pub mod registry;
pub mod resource;

pub use registry::ResourceRegistry;
pub use resource::ResourceType;
