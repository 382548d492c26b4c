//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`uploads`] — Upload intake, clearing, listings
//! - [`recovery`] — Recovery runs and archive download
//! - [`system`] — Health, progress websocket, OpenAPI, action stub

mod recovery;
mod system;
mod uploads;

// Re-export all handlers so `routes::function_name` continues to work
pub use recovery::*;
pub use system::*;
pub use uploads::*;
