use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use bolt_core::controller::{ActionFilter, ControllerRegistration};
use bolt_core::domain::ResourceRegistry;
use bolt_core::types::RESTFUL_ACTIONS;

fn subset() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(RESTFUL_ACTIONS.to_vec(), 0..=RESTFUL_ACTIONS.len())
}

fn controller() -> ControllerRegistration {
    ControllerRegistration::restful("PostsController", Arc::new(ResourceRegistry::new()))
}

proptest! {
    /// `only: X` and `except: X` partition the controller's actions.
    #[test]
    fn prop_only_and_except_are_inverse(listed in subset()) {
        let mut only = controller();
        only.skip_controller_authorization(ActionFilter::only(listed.clone()));
        let mut except = controller();
        except.skip_controller_authorization(ActionFilter::except(listed.clone()));

        for action in RESTFUL_ACTIONS {
            prop_assert_eq!(only.skips_gate(action), listed.contains(&action));
            prop_assert_eq!(except.skips_gate(action), !only.skips_gate(action));
        }
    }

    /// Gate skips and full skips are registered independently.
    #[test]
    fn prop_skip_registries_are_independent(gate in subset(), all in subset()) {
        let mut registration = controller();
        registration.skip_controller_authorization(ActionFilter::only(gate.clone()));
        registration.skip_all_authorization(ActionFilter::only(all.clone()));

        for action in RESTFUL_ACTIONS {
            prop_assert_eq!(registration.skips_gate(action), gate.contains(&action));
            prop_assert_eq!(registration.skips_all(action), all.contains(&action));
        }
    }

    /// Accumulated registrations skip the union of their selections.
    #[test]
    fn prop_registrations_accumulate(first in subset(), second in subset()) {
        let mut registration = controller();
        registration.skip_controller_authorization(ActionFilter::only(first.clone()));
        registration.skip_controller_authorization(ActionFilter::only(second.clone()));
        let union: BTreeSet<&str> = first.iter().chain(second.iter()).copied().collect();

        for action in RESTFUL_ACTIONS {
            prop_assert_eq!(registration.skips_gate(action), union.contains(action));
        }
    }
}
