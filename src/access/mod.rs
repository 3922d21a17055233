//! Access-related modules: the actor abstraction, request-scoped context and
//! the data-level enforcement switch.

pub mod actor;
pub mod context;
pub mod grant;

pub use actor::{Actor, ActorRef, AuthenticationProvider};
pub use context::{current_actor, current_request, ContextGuard, RequestContext, RequestInfo};
pub use grant::{check_grant, grant_enabled, without_grant, GrantSuspension};
