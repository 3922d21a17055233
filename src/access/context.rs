//! Request-scoped context: the current actor and request metadata.
//!
//! Storage is per thread, so concurrent requests served on different threads
//! never see each other's actor. [`ContextGuard`] restores whatever was there
//! before when it drops, on every exit path including unwinding.

use std::cell::RefCell;

use uuid::Uuid;

use crate::access::actor::ActorRef;

/// Metadata about the request being dispatched.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RequestInfo {
    pub id: Uuid,
    pub controller: String,
    pub action: String,
}

impl RequestInfo {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        RequestInfo {
            id: Uuid::new_v4(),
            controller: controller.into(),
            action: action.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request: RequestInfo,
    pub actor: Option<ActorRef>,
}

thread_local! {
    static CURRENT: RefCell<Option<RequestContext>> = const { RefCell::new(None) };
}

/// The actor of the request currently being dispatched on this thread.
pub fn current_actor() -> Option<ActorRef> {
    CURRENT.with(|c| c.borrow().as_ref().and_then(|ctx| ctx.actor.clone()))
}

/// The request currently being dispatched on this thread.
pub fn current_request() -> Option<RequestInfo> {
    CURRENT.with(|c| c.borrow().as_ref().map(|ctx| ctx.request.clone()))
}

/// Whether a request context is active on this thread.
pub fn has_context() -> bool {
    CURRENT.with(|c| c.borrow().is_some())
}

fn replace(context: Option<RequestContext>) -> Option<RequestContext> {
    CURRENT.with(|c| c.replace(context))
}

/// Installs a request context for as long as the guard lives.
#[must_use = "the context is cleared as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ContextGuard {
    previous: Option<RequestContext>,
}

impl ContextGuard {
    pub fn enter(context: RequestContext) -> Self {
        let actor = context.actor.as_ref().map_or_else(|| "<none>".to_string(), |a| a.id());
        tracing::debug!(request_id = %context.request.id, %actor, "current actor set");
        ContextGuard { previous: replace(Some(context)) }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        replace(self.previous.take());
        tracing::debug!("current actor cleared");
    }
}
