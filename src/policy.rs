//!
//! The authorization decision: delegate to the actor's ability check and
//! normalize the answer into allow or `Unauthorized`.

use std::sync::Arc;

use crate::access::actor::Actor;
use crate::access::context::RequestInfo;
use crate::config::Config;
use crate::domain::ResourceType;
use crate::error::BoltError;
use crate::types::Operation;

/// Audit record emitted when the ability check refuses a request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AccessDeniedEvent {
    pub request: RequestInfo,
    pub actor: String,
    pub operation: Operation,
    pub resource: ResourceType,
}

/// Side-effecting notification invoked once per denial, before `Unauthorized` propagates.
pub trait AccessDeniedHook: Send + Sync {
    fn access_denied(&self, event: &AccessDeniedEvent);
}

/// Default hook: one structured `warn!` record per denial.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAccessDenied;

impl AccessDeniedHook for LogAccessDenied {
    fn access_denied(&self, event: &AccessDeniedEvent) {
        match serde_json::to_string(event) {
            Ok(record) => tracing::warn!(
                request_id = %event.request.id,
                actor = %event.actor,
                operation = %event.operation,
                resource = %event.resource,
                %record,
                "access denied"
            ),
            Err(err) => tracing::warn!(
                request_id = %event.request.id,
                actor = %event.actor,
                operation = %event.operation,
                resource = %event.resource,
                error = %err,
                "access denied; audit record not serializable"
            ),
        }
    }
}

/// What the gate found for the controller's resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Resource(ResourceType),
    /// No resource type resolves; the controller manages its own access control.
    NotApplicable,
}

#[derive(Clone)]
pub struct AuthorizationPolicy {
    config: Config,
    hook: Arc<dyn AccessDeniedHook>,
}

impl std::fmt::Debug for AuthorizationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationPolicy").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AuthorizationPolicy {
    /// Policy with the logging audit hook (silent when `audit_denials` is off).
    pub fn new(config: Config) -> Self {
        let hook: Arc<dyn AccessDeniedHook> = if config.audit_denials {
            Arc::new(LogAccessDenied)
        } else {
            Arc::new(NoAudit)
        };
        AuthorizationPolicy { config, hook }
    }

    pub fn with_hook(mut self, hook: Arc<dyn AccessDeniedHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Outcome for a request with no current actor: one diagnostic and allow,
    /// or `Unauthorized` when anonymous requests are turned off.
    pub fn check_anonymous(&self, request: &RequestInfo, operation: Option<Operation>) -> Result<(), BoltError> {
        if self.config.allow_anonymous {
            tracing::warn!(
                request_id = %request.id,
                controller = %request.controller,
                action = %request.action,
                "no current actor; authorization not checked"
            );
            return Ok(());
        }
        Err(self.unauthorized(request, operation, "no current actor"))
    }

    /// Decides whether `actor` may perform `operation` on `target`.
    ///
    /// An absent actor or a target that is not applicable is allowed, unless
    /// the configuration turns that off.
    pub fn check_authorized(
        &self,
        request: &RequestInfo,
        actor: Option<&dyn Actor>,
        operation: Operation,
        target: &Target,
    ) -> Result<(), BoltError> {
        let resource = match target {
            Target::Resource(resource) => resource,
            Target::NotApplicable if self.config.allow_missing_model => return Ok(()),
            Target::NotApplicable => {
                return Err(self.unauthorized(request, Some(operation), "no resource type for controller"))
            }
        };

        let Some(actor) = actor else {
            return self.check_anonymous(request, Some(operation));
        };

        if actor.can(operation, resource) {
            tracing::debug!(actor = %actor.id(), %operation, %resource, "authorized");
            return Ok(());
        }

        self.hook.access_denied(&AccessDeniedEvent {
            request: request.clone(),
            actor: actor.id(),
            operation,
            resource: resource.clone(),
        });
        Err(self.unauthorized(
            request,
            Some(operation),
            &format!("{} cannot {} {}", actor.id(), operation, resource),
        ))
    }

    pub(crate) fn unauthorized(&self, request: &RequestInfo, operation: Option<Operation>, reason: &str) -> BoltError {
        BoltError::Unauthorized {
            controller: request.controller.clone(),
            action: request.action.clone(),
            operation,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct NoAudit;

impl AccessDeniedHook for NoAudit {
    fn access_denied(&self, _event: &AccessDeniedEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingHook, StubActor};

    fn request() -> RequestInfo {
        RequestInfo::new("PostsController", "index")
    }

    fn post() -> Target {
        Target::Resource(ResourceType::new("Post"))
    }

    #[test]
    fn test_allowed_when_actor_can() {
        let hook = Arc::new(RecordingHook::default());
        let policy = AuthorizationPolicy::default().with_hook(hook.clone());
        let actor = StubActor::allow_all("alice");

        assert!(policy.check_authorized(&request(), Some(&actor), Operation::Find, &post()).is_ok());
        assert_eq!(actor.calls(), vec![(Operation::Find, ResourceType::new("Post"))]);
        assert!(hook.events().is_empty());
    }

    #[test]
    fn test_denied_invokes_hook_once_and_raises_unauthorized() {
        let hook = Arc::new(RecordingHook::default());
        let policy = AuthorizationPolicy::default().with_hook(hook.clone());
        let actor = StubActor::deny_all("bob");

        let err = policy
            .check_authorized(&request(), Some(&actor), Operation::Update, &post())
            .unwrap_err();
        assert!(err.is_unauthorized());
        let events = hook.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].actor, "bob");
        assert_eq!(events[0].operation, Operation::Update);
    }

    #[test]
    fn test_absent_actor_is_allowed_by_default() {
        let policy = AuthorizationPolicy::default();
        assert!(policy.check_authorized(&request(), None, Operation::Destroy, &post()).is_ok());
    }

    #[test]
    fn test_absent_actor_rejected_when_anonymous_disallowed() {
        let policy = AuthorizationPolicy::new(Config { allow_anonymous: false, ..Config::default() });
        let err = policy.check_authorized(&request(), None, Operation::Find, &post()).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_anonymous_check_without_operation() {
        let err = AuthorizationPolicy::new(Config { allow_anonymous: false, ..Config::default() })
            .check_anonymous(&request(), None)
            .unwrap_err();
        assert!(matches!(err, BoltError::Unauthorized { operation: None, .. }));
        assert!(AuthorizationPolicy::default().check_anonymous(&request(), None).is_ok());
    }

    #[cfg(feature = "tracing-subscriber")]
    #[test]
    fn test_log_hook_writes_serialized_record() {
        let logs = crate::testing::LogCapture::default();
        let event = AccessDeniedEvent {
            request: request(),
            actor: "bob".to_string(),
            operation: Operation::Destroy,
            resource: ResourceType::new("Post"),
        };
        tracing::subscriber::with_default(logs.subscriber(), || LogAccessDenied.access_denied(&event));
        assert_eq!(logs.count("access denied"), 1, "logs: {}", logs.contents());
        assert_eq!(logs.count(r#""operation":"destroy""#), 1, "logs: {}", logs.contents());
    }

    #[test]
    fn test_not_applicable_target_bypasses_ability_check() {
        let policy = AuthorizationPolicy::default();
        let actor = StubActor::deny_all("bob");
        assert!(policy
            .check_authorized(&request(), Some(&actor), Operation::Find, &Target::NotApplicable)
            .is_ok());
        assert!(actor.calls().is_empty());

        let strict = AuthorizationPolicy::new(Config { allow_missing_model: false, ..Config::default() });
        assert!(strict
            .check_authorized(&request(), Some(&actor), Operation::Find, &Target::NotApplicable)
            .unwrap_err()
            .is_unauthorized());
    }
}
