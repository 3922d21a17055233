//!
//! Defines error types for the authorization layer.

use crate::types::Operation;

/// Errors surfaced by the authorization layer to the surrounding framework.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoltError {
    /// An action reached the authorization gate with no operation mapping.
    #[error("Action '{action}' of {controller} is not mapped to an operation")]
    ActionNotConfigured { controller: String, action: String },
    /// An explicit or inferred resource-type reference does not resolve.
    #[error("No resource type found for '{0}'")]
    ModelNotFound(String),
    /// The ability check refused the request, or the data-access layer raised a denial.
    #[error("Unauthorized to {} {action} on {controller}: {reason}", .operation.as_ref().map_or("perform", |op| op.as_str()))]
    Unauthorized {
        controller: String,
        action: String,
        operation: Option<Operation>,
        reason: String,
    },
    /// A data-layer denial from an action that bypasses interception entirely.
    #[error(transparent)]
    Denied(DenialSignal),
    /// The action body failed for a reason unrelated to authorization.
    #[error("Action failed: {0}")]
    Action(String),
    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoltError {
    /// Configuration errors indicate a misconfigured application, not a policy outcome.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            BoltError::ActionNotConfigured { .. } | BoltError::ModelNotFound(_) | BoltError::Config(_)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BoltError::Unauthorized { .. })
    }
}

/// Low-level denial raised by the data-access layer when an operation is
/// attempted without permission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Access denied: cannot {operation} {resource}: {reason}")]
pub struct DenialSignal {
    pub operation: Operation,
    pub resource: String,
    pub reason: String,
}

impl DenialSignal {
    pub fn new(operation: Operation, resource: impl Into<String>, reason: impl Into<String>) -> Self {
        DenialSignal { operation, resource: resource.into(), reason: reason.into() }
    }
}

/// Error returned by an action body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// A denial bubbled up from the data-access layer.
    #[error(transparent)]
    Denied(#[from] DenialSignal),
    /// Any other failure; passed through to the caller as [`BoltError::Action`].
    #[error("{0}")]
    Failed(String),
}

impl From<BoltError> for ActionError {
    fn from(err: BoltError) -> Self {
        ActionError::Failed(err.to_string())
    }
}
