//! Test doubles for the collaborators the authorization layer consumes.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::access::actor::{Actor, ActorRef, AuthenticationProvider};
use crate::access::context::RequestInfo;
use crate::domain::ResourceType;
use crate::policy::{AccessDeniedEvent, AccessDeniedHook};
use crate::types::Operation;

/// Actor with a scripted ability table that records every `can` call.
#[derive(Debug)]
pub struct StubActor {
    id: String,
    default: bool,
    allowed: BTreeSet<(Operation, String)>,
    calls: Mutex<Vec<(Operation, ResourceType)>>,
}

impl StubActor {
    pub fn allow_all(id: &str) -> Self {
        Self::with_default(id, true)
    }

    pub fn deny_all(id: &str) -> Self {
        Self::with_default(id, false)
    }

    fn with_default(id: &str, default: bool) -> Self {
        StubActor {
            id: id.to_string(),
            default,
            allowed: BTreeSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Grants `operation` on the resource named `resource`, whatever the default.
    pub fn allowing(mut self, operation: Operation, resource: &str) -> Self {
        self.allowed.insert((operation, resource.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(Operation, ResourceType)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Actor for StubActor {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn can(&self, operation: Operation, resource: &ResourceType) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((operation, resource.clone()));
        self.default || self.allowed.contains(&(operation, resource.name().to_string()))
    }
}

/// Authentication provider that always returns the same actor (or none).
#[derive(Debug, Default)]
pub struct StaticAuthentication {
    actor: Option<ActorRef>,
    lookups: AtomicUsize,
}

impl StaticAuthentication {
    pub fn new(actor: Option<ActorRef>) -> Self {
        StaticAuthentication { actor, lookups: AtomicUsize::new(0) }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    /// Number of times `current_actor` was called.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl AuthenticationProvider for StaticAuthentication {
    fn current_actor(&self, _request: &RequestInfo) -> Option<ActorRef> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.actor.clone()
    }
}

/// Hook that keeps every denial it is told about.
#[derive(Debug, Default)]
pub struct RecordingHook {
    events: Mutex<Vec<AccessDeniedEvent>>,
}

impl RecordingHook {
    pub fn events(&self) -> Vec<AccessDeniedEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl AccessDeniedHook for RecordingHook {
    fn access_denied(&self, event: &AccessDeniedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// In-memory sink for formatted log lines.
#[cfg(feature = "tracing-subscriber")]
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: std::sync::Arc<Mutex<Vec<u8>>>,
}

#[cfg(feature = "tracing-subscriber")]
impl LogCapture {
    /// Subscriber writing every event at `DEBUG` and above into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
    }

    /// Number of captured lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().lines().filter(|line| line.contains(needle)).count()
    }
}

#[cfg(feature = "tracing-subscriber")]
impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(feature = "tracing-subscriber")]
impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
