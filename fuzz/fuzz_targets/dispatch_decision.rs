#![no_main]

// Harness: dispatch_decision
// Focus: gate outcome versus ability answer, and context cleanup on every path.

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use bolt_core::access;
use bolt_core::controller::ControllerRegistration;
use bolt_core::dispatch::Dispatcher;
use bolt_core::domain::ResourceRegistry;
use bolt_core::error::{ActionError, BoltError, DenialSignal};
use bolt_core::operations::default_operation;
use bolt_core::policy::AuthorizationPolicy;
use bolt_core::testing::{StaticAuthentication, StubActor};
use bolt_core::types::Operation;

#[derive(Arbitrary, Debug, Clone)]
struct DispatchFrame {
    action: String,
    has_model: bool,
    has_actor: bool,
    allow: bool,
    body_denies: bool,
}

fuzz_target!(|frame: DispatchFrame| {
    let mut registry = ResourceRegistry::new();
    if frame.has_model {
        registry.define("Post");
    }
    let controller = ControllerRegistration::restful("PostsController", Arc::new(registry));
    let actor = frame.has_actor.then(|| {
        let actor = if frame.allow { StubActor::allow_all("u") } else { StubActor::deny_all("u") };
        Arc::new(actor) as access::ActorRef
    });
    let dispatcher = Dispatcher::new(
        Arc::new(StaticAuthentication::new(actor)),
        AuthorizationPolicy::default(),
    );

    let result = dispatcher.dispatch(&controller, &frame.action, || {
        if frame.body_denies {
            Err(ActionError::from(DenialSignal::new(Operation::Find, "Post", "fuzz")))
        } else {
            Ok(())
        }
    });

    assert!(!access::context::has_context());
    match result {
        Ok(()) => assert!(!frame.body_denies),
        Err(BoltError::ActionNotConfigured { .. }) => {
            assert!(frame.has_model && frame.has_actor && default_operation(&frame.action).is_none())
        }
        Err(BoltError::Unauthorized { .. }) => {
            assert!(frame.body_denies || (frame.has_model && frame.has_actor && !frame.allow))
        }
        Err(other) => panic!("unexpected error: {:?}", other),
    }
});
