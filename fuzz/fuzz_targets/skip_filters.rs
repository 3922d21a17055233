#![no_main]

// Harness: skip_filters
// Focus: `only` and `except` over the same names select complementary
// subsets of the controller's actions.

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use bolt_core::controller::{ActionFilter, ControllerRegistration};
use bolt_core::domain::ResourceRegistry;

#[derive(Arbitrary, Debug, Clone)]
struct FilterFrame {
    actions: Vec<String>,
    listed: Vec<String>,
}

fuzz_target!(|frame: FilterFrame| {
    let registry = Arc::new(ResourceRegistry::new());
    let build = || {
        ControllerRegistration::builder("PostsController", registry.clone())
            .actions(frame.actions.iter().cloned())
            .build()
            .expect("no explicit model")
    };

    let mut only = build();
    only.skip_controller_authorization(ActionFilter::only(frame.listed.clone()));
    let mut except = build();
    except.skip_controller_authorization(ActionFilter::except(frame.listed.clone()));

    for action in &frame.actions {
        assert_ne!(only.skips_gate(action), except.skips_gate(action));
    }
});
