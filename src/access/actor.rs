use std::fmt::Debug;
use std::sync::Arc;

use crate::access::context::RequestInfo;
use crate::domain::ResourceType;
use crate::types::Operation;

/// The authenticated principal of a request.
///
/// How abilities are granted and stored is up to the implementor; the
/// authorization layer only ever asks the boolean question.
pub trait Actor: Send + Sync + Debug {
    /// Stable identifier, used in logs and audit records.
    fn id(&self) -> String;

    /// Can this actor perform `operation` on `resource`?
    fn can(&self, operation: Operation, resource: &ResourceType) -> bool;
}

/// Shared handle to an actor, as stored in the request context.
pub type ActorRef = Arc<dyn Actor>;

/// Supplies the current actor for an incoming request.
pub trait AuthenticationProvider: Send + Sync {
    /// Called once per dispatch, before the authorization gate. `None` means anonymous.
    fn current_actor(&self, request: &RequestInfo) -> Option<ActorRef>;
}

impl<F> AuthenticationProvider for F
where
    F: Fn(&RequestInfo) -> Option<ActorRef> + Send + Sync,
{
    fn current_actor(&self, request: &RequestInfo) -> Option<ActorRef> {
        self(request)
    }
}
