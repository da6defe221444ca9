//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window management and side effects
//! - `input` - keyboard event to message mapping

pub mod app;
pub mod input;

pub use app::App;
