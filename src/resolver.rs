//!
//! Resolves which resource type a controller's authorization checks apply to.
//!
//! An explicit override always wins. Without one, the type is inferred from
//! the controller name on first use and cached for the lifetime of the
//! registration.

use std::sync::{Arc, OnceLock};

use crate::domain::{naming, ResourceRegistry, ResourceType};
use crate::error::BoltError;

/// Value accepted by the resource-type override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRef {
    /// A resolved type handle.
    Type(ResourceType),
    /// A name, looked up in the registry when assigned.
    Name(String),
    /// Remove the override and drop any cached inference.
    Clear,
}

impl From<ResourceType> for ModelRef {
    fn from(resource: ResourceType) -> Self {
        ModelRef::Type(resource)
    }
}

impl From<&ResourceType> for ModelRef {
    fn from(resource: &ResourceType) -> Self {
        ModelRef::Type(resource.clone())
    }
}

impl From<&str> for ModelRef {
    fn from(name: &str) -> Self {
        ModelRef::Name(name.to_string())
    }
}

impl From<String> for ModelRef {
    fn from(name: String) -> Self {
        ModelRef::Name(name)
    }
}

impl<T: Into<ModelRef>> From<Option<T>> for ModelRef {
    fn from(value: Option<T>) -> Self {
        value.map_or(ModelRef::Clear, Into::into)
    }
}

#[derive(Debug, Clone)]
pub struct ResourceResolver {
    controller: String,
    registry: Arc<ResourceRegistry>,
    explicit: Option<ResourceType>,
    inferred: OnceLock<ResourceType>,
}

impl ResourceResolver {
    pub fn new(controller: impl Into<String>, registry: Arc<ResourceRegistry>) -> Self {
        ResourceResolver {
            controller: controller.into(),
            registry,
            explicit: None,
            inferred: OnceLock::new(),
        }
    }

    /// Sets or clears the override.
    ///
    /// A name that does not resolve fails here with `ModelNotFound`, leaving
    /// the previous state untouched. Clearing (including an empty name) also
    /// drops the cached inference so the next resolution re-infers.
    pub fn set_override(&mut self, model: impl Into<ModelRef>) -> Result<(), BoltError> {
        match model.into() {
            ModelRef::Type(resource) => {
                self.explicit = Some(resource);
            }
            ModelRef::Name(name) if name.is_empty() => self.clear(),
            ModelRef::Name(name) => {
                let resource = self
                    .registry
                    .lookup(&name)
                    .ok_or(BoltError::ModelNotFound(name))?;
                self.explicit = Some(resource);
            }
            ModelRef::Clear => self.clear(),
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.explicit = None;
        self.inferred = OnceLock::new();
    }

    /// The override, if one is set.
    pub fn explicit(&self) -> Option<&ResourceType> {
        self.explicit.as_ref()
    }

    /// Resolves the resource type, inferring and caching it when no override is set.
    pub fn resolve(&self) -> Result<ResourceType, BoltError> {
        if let Some(resource) = &self.explicit {
            return Ok(resource.clone());
        }
        if let Some(resource) = self.inferred.get() {
            return Ok(resource.clone());
        }

        let name = naming::infer_resource_name(&self.controller)
            .ok_or_else(|| BoltError::ModelNotFound(self.controller.clone()))?;
        let resource = self
            .registry
            .lookup(&name)
            .ok_or(BoltError::ModelNotFound(name))?;
        tracing::debug!(controller = %self.controller, resource = %resource, "inferred resource type");
        // A concurrent resolver may have won the race; both computed the same value.
        Ok(self.inferred.get_or_init(|| resource).clone())
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> Arc<ResourceRegistry> {
        let mut registry = ResourceRegistry::new();
        for name in names {
            registry.define(name);
        }
        Arc::new(registry)
    }

    #[test]
    fn test_infers_from_controller_name() {
        let resolver = ResourceResolver::new("PostsController", registry(&["Post"]));
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Post")));
        // Served from the cache on the second call.
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Post")));
    }

    #[test]
    fn test_inference_failure_is_lazy() {
        let resolver = ResourceResolver::new("PostsController", registry(&[]));
        assert_eq!(resolver.resolve(), Err(BoltError::ModelNotFound("Post".into())));
    }

    #[test]
    fn test_override_by_name_fails_fast() {
        let mut resolver = ResourceResolver::new("PostsController", registry(&["Post", "Custom"]));
        assert_eq!(
            resolver.set_override("FEge"),
            Err(BoltError::ModelNotFound("FEge".into()))
        );
        assert_eq!(resolver.explicit(), None);

        resolver.set_override("Custom").unwrap();
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Custom")));
    }

    #[test]
    fn test_override_by_type_handle() {
        let mut resolver = ResourceResolver::new("PostsController", registry(&["Post"]));
        resolver.set_override(ResourceType::new("Custom")).unwrap();
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Custom")));
    }

    #[test]
    fn test_clearing_override_forces_reinference() {
        let mut resolver = ResourceResolver::new("PostsController", registry(&["Post", "Custom"]));
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Post")));

        resolver.set_override("Custom").unwrap();
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Custom")));

        resolver.set_override(None::<&str>).unwrap();
        assert_eq!(resolver.explicit(), None);
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Post")));

        resolver.set_override("").unwrap();
        assert_eq!(resolver.resolve(), Ok(ResourceType::new("Post")));
    }

    #[test]
    fn test_clearing_drops_stale_inference() {
        let mut resolver = ResourceResolver::new("PostsController", registry(&["Post"]));
        assert!(resolver.resolve().is_ok());

        // Swap the registry behind the resolver as an administrative reload would.
        resolver.registry = registry(&[]);
        assert!(resolver.resolve().is_ok(), "cached value survives until cleared");

        resolver.set_override(ModelRef::Clear).unwrap();
        assert_eq!(resolver.resolve(), Err(BoltError::ModelNotFound("Post".into())));
    }
}
