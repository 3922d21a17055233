//! Action bodies: the code the interception layer wraps.
//!
//! An [`ActionBody`] is anything that can be performed once and may fail with
//! an [`ActionError`]; closures qualify. A [`Controller`] ties a registration
//! to the actions it can perform by name.

use crate::controller::ControllerRegistration;
use crate::error::ActionError;

pub trait ActionBody {
    type Output;

    fn perform(self) -> Result<Self::Output, ActionError>;
}

impl<F, T> ActionBody for F
where
    F: FnOnce() -> Result<T, ActionError>,
{
    type Output = T;

    fn perform(self) -> Result<T, ActionError> {
        self()
    }
}

/// A controller type as the framework's dispatch pipeline sees it.
pub trait Controller {
    type Response;

    fn registration(&self) -> &ControllerRegistration;

    /// Runs the body of `action`.
    fn perform(&self, action: &str) -> Result<Self::Response, ActionError>;
}
