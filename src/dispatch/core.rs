//!
//! The interception layer: hooks around an action's execution.
//!
//! For every dispatched action, unless it is registered with
//! `skip_all_authorization`:
//!
//! 1. *before dispatch*: ask the authentication provider for the current
//!    actor and install it in the request context;
//! 2. *authorization gate*: resolve the resource type, check for an actor,
//!    map the operation and ask the [`AuthorizationPolicy`] (skipped for
//!    `skip_controller_authorization` actions);
//! 3. *denial interception*: run the body and turn a data-layer
//!    [`DenialSignal`](crate::error::DenialSignal) into `Unauthorized`;
//! 4. *after dispatch*: clear the context. This is the drop of the
//!    [`ContextGuard`], so it happens on every exit path.

use std::fmt;
use std::sync::Arc;

use crate::access::actor::AuthenticationProvider;
use crate::access::context::{self, ContextGuard, RequestContext, RequestInfo};
use crate::access::grant;
use crate::controller::ControllerRegistration;
use crate::dispatch::body::{ActionBody, Controller};
use crate::error::{ActionError, BoltError};
use crate::policy::{AuthorizationPolicy, Target};

/// Lifecycle of one dispatched request.
///
/// `Idle → ActorSet → Authorizing → {Authorized → Executing → Completed | Denied → Failed} → ActorCleared`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ActorSet,
    Authorizing,
    Authorized,
    Executing,
    Completed,
    Denied,
    Failed,
    ActorCleared,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn enter(phase: Phase) {
    tracing::trace!(%phase, "request phase");
}

/// Context guard that also records the final phase transition.
struct Cleanup(Option<ContextGuard>);

impl Drop for Cleanup {
    fn drop(&mut self) {
        drop(self.0.take());
        enter(Phase::ActorCleared);
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    authentication: Arc<dyn AuthenticationProvider>,
    policy: AuthorizationPolicy,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").field("policy", &self.policy).finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(authentication: Arc<dyn AuthenticationProvider>, policy: AuthorizationPolicy) -> Self {
        Dispatcher { authentication, policy }
    }

    pub fn policy(&self) -> &AuthorizationPolicy {
        &self.policy
    }

    /// Dispatches `action` of a [`Controller`] through all hooks.
    pub fn process<C: Controller>(&self, controller: &C, action: &str) -> Result<C::Response, BoltError> {
        self.dispatch(controller.registration(), action, || controller.perform(action))
    }

    /// Runs `body` as `action` of `controller`, wrapped in the interception hooks.
    pub fn dispatch<B: ActionBody>(
        &self,
        controller: &ControllerRegistration,
        action: &str,
        body: B,
    ) -> Result<B::Output, BoltError> {
        let request = RequestInfo::new(controller.name(), action);
        let span = tracing::info_span!(
            "dispatch",
            request_id = %request.id,
            controller = %request.controller,
            action = %request.action
        );
        let _entered = span.enter();
        enter(Phase::Idle);

        if controller.skips_all(action) {
            tracing::debug!("all authorization skipped");
            return grant::without_grant(|| body.perform()).map_err(|err| match err {
                ActionError::Denied(signal) => BoltError::Denied(signal),
                ActionError::Failed(message) => BoltError::Action(message),
            });
        }

        let _cleanup = Cleanup(Some(self.before_dispatch(&request)));
        enter(Phase::ActorSet);

        if controller.skips_gate(action) {
            tracing::debug!("controller authorization skipped");
        } else {
            enter(Phase::Authorizing);
            if let Err(err) = self.check_authorization(controller, &request) {
                enter(if err.is_unauthorized() { Phase::Denied } else { Phase::Failed });
                return Err(err);
            }
            enter(Phase::Authorized);
        }

        enter(Phase::Executing);
        let result = self.intercept_denial(&request, body.perform());
        enter(if result.is_ok() { Phase::Completed } else { Phase::Failed });
        result
    }

    /// Looks up the current actor and installs it for the lifetime of the returned guard.
    pub fn before_dispatch(&self, request: &RequestInfo) -> ContextGuard {
        let actor = self.authentication.current_actor(request);
        ContextGuard::enter(RequestContext { request: request.clone(), actor })
    }

    /// The authorization gate for `request`, using the actor in the current context.
    ///
    /// Order: resource type, then actor, then operation. A controller without
    /// a resource type or a request without an actor is let through (unless
    /// configured otherwise) before the action is mapped. Configuration errors
    /// (`ActionNotConfigured`, or a resolver error other than an unresolvable
    /// model) propagate untouched.
    pub fn check_authorization(
        &self,
        controller: &ControllerRegistration,
        request: &RequestInfo,
    ) -> Result<(), BoltError> {
        let target = match controller.model_for_authorization() {
            Ok(resource) => Target::Resource(resource),
            Err(BoltError::ModelNotFound(name)) => {
                tracing::debug!(controller = %controller.name(), model = %name, "no resource type for controller");
                Target::NotApplicable
            }
            Err(err) => return Err(err),
        };
        if target == Target::NotApplicable && self.policy.config().allow_missing_model {
            return Ok(());
        }

        let actor = context::current_actor();
        if actor.is_none() && self.policy.config().allow_anonymous {
            return self.policy.check_anonymous(request, None);
        }

        let operation = controller.operation_for(&request.action)?;
        self.policy.check_authorized(request, actor.as_deref(), operation, &target)
    }

    /// Converts a denial raised by an action body into `Unauthorized`.
    pub fn intercept_denial<T>(
        &self,
        request: &RequestInfo,
        result: Result<T, ActionError>,
    ) -> Result<T, BoltError> {
        result.map_err(|err| match err {
            ActionError::Denied(signal) => {
                tracing::warn!(%signal, "data-access denial converted to unauthorized");
                self.policy.unauthorized(request, Some(signal.operation), &signal.to_string())
            }
            ActionError::Failed(message) => BoltError::Action(message),
        })
    }
}
