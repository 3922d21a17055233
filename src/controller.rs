//!
//! Per-controller authorization configuration.
//!
//! A [`ControllerRegistration`] is built once when the application loads and
//! read by the dispatcher on every request. The `&mut self` setters exist for
//! tests and administrative overrides.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{ResourceRegistry, ResourceType};
use crate::error::BoltError;
use crate::operations::ActionMap;
use crate::resolver::{ModelRef, ResourceResolver};
use crate::types::{Operation, RESTFUL_ACTIONS};

/// One or more action names. A single name is a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionList(BTreeSet<String>);

impl ActionList {
    pub fn contains(&self, action: &str) -> bool {
        self.0.contains(action)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for ActionList {
    fn from(action: &str) -> Self {
        ActionList(BTreeSet::from([action.to_string()]))
    }
}

impl From<String> for ActionList {
    fn from(action: String) -> Self {
        ActionList(BTreeSet::from([action]))
    }
}

impl<const N: usize> From<[&str; N]> for ActionList {
    fn from(actions: [&str; N]) -> Self {
        actions.iter().copied().collect()
    }
}

impl From<&[&str]> for ActionList {
    fn from(actions: &[&str]) -> Self {
        actions.iter().copied().collect()
    }
}

impl From<Vec<&str>> for ActionList {
    fn from(actions: Vec<&str>) -> Self {
        actions.into_iter().collect()
    }
}

impl From<Vec<String>> for ActionList {
    fn from(actions: Vec<String>) -> Self {
        ActionList(actions.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ActionList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        ActionList(iter.into_iter().map(str::to_string).collect())
    }
}

/// Which actions a skip registration applies to. `only` and `except` are
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionFilter {
    /// Every action of the controller.
    #[default]
    All,
    Only(ActionList),
    /// Every action of the controller except these.
    Except(ActionList),
}

impl ActionFilter {
    pub fn only(actions: impl Into<ActionList>) -> Self {
        ActionFilter::Only(actions.into())
    }

    pub fn except(actions: impl Into<ActionList>) -> Self {
        ActionFilter::Except(actions.into())
    }

    /// Does this filter select `action` out of the controller's `actions`?
    pub fn matches(&self, action: &str, actions: &BTreeSet<String>) -> bool {
        match self {
            ActionFilter::All => true,
            ActionFilter::Only(list) => list.contains(action),
            ActionFilter::Except(list) => actions.contains(action) && !list.contains(action),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ControllerRegistration {
    name: String,
    actions: BTreeSet<String>,
    resolver: ResourceResolver,
    action_map: ActionMap,
    skip_gate: Vec<ActionFilter>,
    skip_all: Vec<ActionFilter>,
}

impl ControllerRegistration {
    pub fn builder(name: impl Into<String>, registry: Arc<ResourceRegistry>) -> ControllerBuilder {
        ControllerBuilder {
            name: name.into(),
            registry,
            actions: BTreeSet::new(),
            model: None,
            action_map: ActionMap::new(),
            skip_gate: Vec::new(),
            skip_all: Vec::new(),
        }
    }

    /// Registration exposing the seven conventional actions and nothing else configured.
    pub fn restful(name: impl Into<String>, registry: Arc<ResourceRegistry>) -> Self {
        let name = name.into();
        ControllerRegistration {
            actions: RESTFUL_ACTIONS.iter().map(|a| a.to_string()).collect(),
            resolver: ResourceResolver::new(name.clone(), registry),
            name,
            action_map: ActionMap::new(),
            skip_gate: Vec::new(),
            skip_all: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    pub fn add_action(&mut self, action: impl Into<String>) {
        self.actions.insert(action.into());
    }

    // --- Resource type -------------------------------------------------------

    /// The resource type checks apply to; inferred and cached on first call.
    pub fn model_for_authorization(&self) -> Result<ResourceType, BoltError> {
        self.resolver.resolve()
    }

    /// Overrides (or with `None`/`""`, clears) the resource type. Names are
    /// resolved immediately.
    pub fn set_model_for_authorization(&mut self, model: impl Into<ModelRef>) -> Result<(), BoltError> {
        self.resolver.set_override(model)
    }

    // --- Operation mapping ---------------------------------------------------

    /// Maps `actions` to `operation` and registers them as actions of the controller.
    pub fn authorize_as<I, S>(&mut self, operation: Operation, actions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actions: Vec<String> = actions.into_iter().map(Into::into).collect();
        for action in &actions {
            self.add_action(action.as_str());
        }
        self.action_map.authorize_as(operation, actions);
    }

    pub fn authorize_as_find<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, actions: I) {
        self.authorize_as(Operation::Find, actions);
    }

    pub fn authorize_as_update<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, actions: I) {
        self.authorize_as(Operation::Update, actions);
    }

    pub fn authorize_as_create<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, actions: I) {
        self.authorize_as(Operation::Create, actions);
    }

    pub fn authorize_as_destroy<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, actions: I) {
        self.authorize_as(Operation::Destroy, actions);
    }

    /// Operation `action` is checked as, or `ActionNotConfigured`.
    pub fn operation_for(&self, action: &str) -> Result<Operation, BoltError> {
        self.action_map
            .resolve(action)
            .ok_or_else(|| BoltError::ActionNotConfigured {
                controller: self.name.clone(),
                action: action.to_string(),
            })
    }

    pub fn has_mapper(&self, operation: Operation) -> bool {
        self.action_map.has_mapper(operation)
    }

    pub fn actions_mapped_to(&self, operation: Operation) -> Vec<&str> {
        self.action_map.actions_mapped_to(operation)
    }

    // --- Skip registrations --------------------------------------------------

    /// Bypass only the authorization gate for the selected actions.
    pub fn skip_controller_authorization(&mut self, filter: ActionFilter) {
        tracing::debug!(controller = %self.name, ?filter, "skipping controller authorization");
        self.skip_gate.push(filter);
    }

    /// Bypass the whole interception layer, and data-level enforcement, for the selected actions.
    pub fn skip_all_authorization(&mut self, filter: ActionFilter) {
        tracing::debug!(controller = %self.name, ?filter, "skipping all authorization");
        self.skip_all.push(filter);
    }

    /// Drops every `skip_controller_authorization` registration.
    pub fn restore_controller_authorization(&mut self) {
        self.skip_gate.clear();
    }

    /// Drops every `skip_all_authorization` registration.
    pub fn restore_all_authorization(&mut self) {
        self.skip_all.clear();
    }

    pub fn skips_gate(&self, action: &str) -> bool {
        self.skip_gate.iter().any(|f| f.matches(action, &self.actions))
    }

    pub fn skips_all(&self, action: &str) -> bool {
        self.skip_all.iter().any(|f| f.matches(action, &self.actions))
    }
}

/// Load-time builder for [`ControllerRegistration`].
#[derive(Debug)]
pub struct ControllerBuilder {
    name: String,
    registry: Arc<ResourceRegistry>,
    actions: BTreeSet<String>,
    model: Option<ModelRef>,
    action_map: ActionMap,
    skip_gate: Vec<ActionFilter>,
    skip_all: Vec<ActionFilter>,
}

impl ControllerBuilder {
    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.actions.insert(action.into());
        self
    }

    pub fn model(mut self, model: impl Into<ModelRef>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Also registers the mapped names as actions of the controller.
    pub fn authorize_as<I, S>(mut self, operation: Operation, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let actions: Vec<String> = actions.into_iter().map(Into::into).collect();
        self.actions.extend(actions.iter().cloned());
        self.action_map.authorize_as(operation, actions);
        self
    }

    pub fn skip_controller_authorization(mut self, filter: ActionFilter) -> Self {
        self.skip_gate.push(filter);
        self
    }

    pub fn skip_all_authorization(mut self, filter: ActionFilter) -> Self {
        self.skip_all.push(filter);
        self
    }

    /// Fails with `ModelNotFound` if an explicit model name does not resolve.
    pub fn build(self) -> Result<ControllerRegistration, BoltError> {
        let mut resolver = ResourceResolver::new(self.name.clone(), self.registry);
        if let Some(model) = self.model {
            resolver.set_override(model)?;
        }
        Ok(ControllerRegistration {
            name: self.name,
            actions: self.actions,
            resolver,
            action_map: self.action_map,
            skip_gate: self.skip_gate,
            skip_all: self.skip_all,
        })
    }
}
