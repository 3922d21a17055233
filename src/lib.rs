#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Bolt-Core is an authorization-enforcement layer for controller actions.
//!
//! Each dispatched action is mapped to a CRUD operation, the resource type the
//! controller manages is resolved, and the current actor's ability check
//! decides whether the action runs. Denials raised by the data-access layer
//! while the action runs are turned into the same `Unauthorized` error.

// Module for shared types (Operation, conventional action names).
pub mod types;

// Module for error types.
pub mod error;

// Module for configuration.
pub mod config;

// Action → operation mapping.
pub mod operations;

// Resource types, naming conventions and the type registry.
pub mod domain;

// Resource type resolution per controller.
pub mod resolver;

// Actor abstraction, request context and data-level enforcement switch.
pub mod access;

// The authorization decision.
pub mod policy;

// Per-controller registration: mappings, model override, skip filters.
pub mod controller;

// The interception layer.
pub mod dispatch;

#[cfg(feature = "tracing-subscriber")]
pub mod logging;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use access::{Actor, ActorRef, AuthenticationProvider};
pub use config::Config;
pub use controller::{ActionFilter, ActionList, ControllerRegistration};
pub use dispatch::{ActionBody, Controller, Dispatcher};
pub use domain::{ResourceRegistry, ResourceType};
pub use error::{ActionError, BoltError, DenialSignal};
pub use policy::{AccessDeniedEvent, AccessDeniedHook, AuthorizationPolicy};
pub use resolver::ModelRef;
pub use types::Operation;
