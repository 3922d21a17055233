pub mod body;
pub mod core;


// Re-export the primary types so `crate::dispatch::*` is enough for callers.
pub use body::{ActionBody, Controller};
pub use self::core::{Dispatcher, Phase};
