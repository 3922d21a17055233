#![no_main]

// Harness: action_mapping
// Focus: custom registrations never disturb the conventional defaults, and
// every registered name resolves to the last operation it was bound to.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use bolt_core::operations::{default_operation, ActionMap};
use bolt_core::types::{Operation, RESTFUL_ACTIONS};

#[derive(Arbitrary, Debug, Clone)]
struct Registration {
    op: u8,
    actions: Vec<String>,
}

fuzz_target!(|registrations: Vec<Registration>| {
    let mut map = ActionMap::new();
    let mut last = std::collections::HashMap::new();

    for reg in &registrations {
        let op = Operation::ALL[reg.op as usize % Operation::ALL.len()];
        map.authorize_as(op, reg.actions.iter().cloned());
        for action in &reg.actions {
            last.insert(action.clone(), op);
        }
    }

    for (action, op) in &last {
        assert_eq!(map.resolve(action), Some(*op));
    }
    for action in RESTFUL_ACTIONS {
        if !last.contains_key(action) {
            assert_eq!(map.resolve(action), default_operation(action));
        }
    }
});
