//! Switch telling the data-access layer whether to enforce its own checks.
//!
//! Enforcement is on by default. Actions registered with
//! `skip_all_authorization` run with it suspended.

use std::cell::Cell;

use crate::access::context;
use crate::domain::ResourceType;
use crate::error::DenialSignal;
use crate::types::Operation;

thread_local! {
    static GRANT_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether data-level enforcement is active on this thread.
pub fn grant_enabled() -> bool {
    GRANT_ENABLED.with(Cell::get)
}

/// Suspends data-level enforcement until dropped.
#[must_use = "enforcement resumes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct GrantSuspension {
    previous: bool,
}

impl GrantSuspension {
    pub fn enter() -> Self {
        GrantSuspension { previous: GRANT_ENABLED.with(|g| g.replace(false)) }
    }
}

impl Drop for GrantSuspension {
    fn drop(&mut self) {
        GRANT_ENABLED.with(|g| g.set(self.previous));
    }
}

/// Runs `f` with data-level enforcement suspended.
pub fn without_grant<R>(f: impl FnOnce() -> R) -> R {
    let _suspended = GrantSuspension::enter();
    f()
}

/// Check a data-access layer performs before touching `resource`.
///
/// Passes when enforcement is suspended. Otherwise the current actor must
/// exist and be able to perform `operation`.
pub fn check_grant(operation: Operation, resource: &ResourceType) -> Result<(), DenialSignal> {
    if !grant_enabled() {
        return Ok(());
    }
    match context::current_actor() {
        Some(actor) if actor.can(operation, resource) => Ok(()),
        Some(actor) => Err(DenialSignal::new(
            operation,
            resource.name(),
            format!("actor {} lacks permission", actor.id()),
        )),
        None => Err(DenialSignal::new(operation, resource.name(), "no current actor")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::context::{ContextGuard, RequestContext, RequestInfo};
    use crate::testing::StubActor;
    use std::sync::Arc;

    #[test]
    fn test_enabled_by_default_and_restored_after_suspension() {
        assert!(grant_enabled());
        let seen = without_grant(|| {
            let inner = without_grant(grant_enabled);
            (grant_enabled(), inner)
        });
        assert_eq!(seen, (false, false));
        assert!(grant_enabled());
    }

    #[test]
    fn test_check_grant_without_actor_denies() {
        let post = ResourceType::new("Post");
        let err = check_grant(Operation::Find, &post).unwrap_err();
        assert_eq!(err.reason, "no current actor");
        assert!(without_grant(|| check_grant(Operation::Find, &post)).is_ok());
    }

    #[test]
    fn test_check_grant_consults_current_actor() {
        let post = ResourceType::new("Post");
        let actor = StubActor::deny_all("bob").allowing(Operation::Find, "Post");
        let _guard = ContextGuard::enter(RequestContext {
            request: RequestInfo::new("PostsController", "update"),
            actor: Some(Arc::new(actor)),
        });
        assert!(check_grant(Operation::Find, &post).is_ok());
        let err = check_grant(Operation::Update, &post).unwrap_err();
        assert_eq!(err.operation, Operation::Update);
        assert_eq!(err.resource, "Post");
    }
}
