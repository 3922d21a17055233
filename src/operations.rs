//!
//! Action → operation mapping.
//! Conventional action names map to a CRUD operation by default; controllers
//! register additional names through [`ActionMap::authorize_as`].

use std::collections::BTreeMap;

use crate::types::Operation;

/// Returns the conventional operation for `action`, if it has one.
///
/// `index`/`show` → find, `new`/`create` → create, `edit`/`update` → update,
/// `destroy` → destroy. Anything else has no default.
#[inline]
pub fn default_operation(action: &str) -> Option<Operation> {
    match action {
        "index" | "show" => Some(Operation::Find),
        "new" | "create" => Some(Operation::Create),
        "edit" | "update" => Some(Operation::Update),
        "destroy" => Some(Operation::Destroy),
        _ => None,
    }
}

/// Per-controller custom action mappings, layered over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMap {
    custom: BTreeMap<String, Operation>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds each of `actions` to `operation`.
    ///
    /// Registrations are additive: earlier custom entries for other actions are
    /// kept, and the conventional defaults still apply to names never
    /// registered. Re-registering a name rebinds it.
    pub fn authorize_as<I, S>(&mut self, operation: Operation, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for action in actions {
            let action = action.into();
            tracing::debug!(%action, %operation, "registered custom action mapping");
            self.custom.insert(action, operation);
        }
    }

    /// Resolves `action`: custom registrations win over the defaults.
    pub fn resolve(&self, action: &str) -> Option<Operation> {
        self.custom.get(action).copied().or_else(|| default_operation(action))
    }

    /// Whether any custom action has been registered for `operation`.
    pub fn has_mapper(&self, operation: Operation) -> bool {
        self.custom.values().any(|op| *op == operation)
    }

    /// Custom action names bound to `operation`, sorted.
    pub fn actions_mapped_to(&self, operation: Operation) -> Vec<&str> {
        self.custom
            .iter()
            .filter(|(_, op)| **op == operation)
            .map(|(action, _)| action.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RESTFUL_ACTIONS;

    #[test]
    fn test_default_mapping_for_conventional_actions() {
        let expected = [
            Operation::Find,
            Operation::Find,
            Operation::Create,
            Operation::Create,
            Operation::Update,
            Operation::Update,
            Operation::Destroy,
        ];
        for (action, op) in RESTFUL_ACTIONS.iter().zip(expected) {
            assert_eq!(default_operation(action), Some(op), "action {}", action);
        }
    }

    #[test]
    fn test_custom_actions_have_no_default() {
        assert_eq!(default_operation("custom"), None);
        assert_eq!(default_operation("Index"), None);
        assert_eq!(default_operation(""), None);
        assert_eq!(ActionMap::new().resolve("publish"), None);
    }

    #[test]
    fn test_authorize_as_is_additive() {
        let mut map = ActionMap::new();
        map.authorize_as(Operation::Update, ["publish"]);
        map.authorize_as(Operation::Find, ["custom", "other"]);

        assert_eq!(map.resolve("publish"), Some(Operation::Update));
        assert_eq!(map.resolve("custom"), Some(Operation::Find));
        assert_eq!(map.resolve("other"), Some(Operation::Find));
        // Defaults survive custom registrations.
        assert_eq!(map.resolve("destroy"), Some(Operation::Destroy));
    }

    #[test]
    fn test_custom_registration_overrides_default() {
        let mut map = ActionMap::new();
        map.authorize_as(Operation::Destroy, ["update"]);
        assert_eq!(map.resolve("update"), Some(Operation::Destroy));
        assert_eq!(map.resolve("edit"), Some(Operation::Update));
    }

    #[test]
    fn test_mapper_introspection() {
        let mut map = ActionMap::new();
        assert!(map.is_empty());
        assert!(!map.has_mapper(Operation::Create));

        map.authorize_as(Operation::Create, vec!["import".to_string(), "clone".to_string()]);
        assert!(map.has_mapper(Operation::Create));
        assert!(!map.has_mapper(Operation::Destroy));
        assert_eq!(map.actions_mapped_to(Operation::Create), vec!["clone", "import"]);
    }
}
