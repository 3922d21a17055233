use std::collections::BTreeMap;

use crate::domain::naming;
use crate::domain::resource::ResourceType;

/// Name → resource type lookup, populated when the application loads.
///
/// Controllers share a registry behind an `Arc`; it is read-only while
/// requests are served.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    types: BTreeMap<String, ResourceType>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`define`](Self::define).
    pub fn with(mut self, name: &str) -> Self {
        self.define(name);
        self
    }

    /// Registers (or returns the existing) type called `name`.
    pub fn define(&mut self, name: &str) -> ResourceType {
        self.types
            .entry(name.to_string())
            .or_insert_with(|| ResourceType::new(name))
            .clone()
    }

    pub fn undefine(&mut self, name: &str) -> Option<ResourceType> {
        self.types.remove(name)
    }

    /// Exact match first, then the singularized form of `name`.
    pub fn lookup(&self, name: &str) -> Option<ResourceType> {
        if let Some(found) = self.types.get(name) {
            return Some(found.clone());
        }
        let singular = naming::singularize(name);
        self.types.get(&singular).cloned()
    }

    pub fn contains(&self, resource: &ResourceType) -> bool {
        self.types.contains_key(resource.name())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_and_singularized() {
        let registry = ResourceRegistry::new().with("Post").with("Category");
        assert_eq!(registry.lookup("Post"), Some(ResourceType::new("Post")));
        assert_eq!(registry.lookup("Posts"), Some(ResourceType::new("Post")));
        assert_eq!(registry.lookup("Categories"), Some(ResourceType::new("Category")));
        assert_eq!(registry.lookup("Comment"), None);
    }

    #[test]
    fn test_define_is_idempotent_and_undefine_removes() {
        let mut registry = ResourceRegistry::new();
        let first = registry.define("Post");
        let second = registry.define("Post");
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);

        assert_eq!(registry.undefine("Post"), Some(first));
        assert!(registry.is_empty());
        assert_eq!(registry.lookup("Post"), None);
    }
}
