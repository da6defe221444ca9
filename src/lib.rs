//! Quill - a minimal text editor
//!
//! This crate holds the model, messages and update logic of the editor,
//! following the Elm Architecture. The binary adds the window, rendering
//! and the effects runtime on top.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod fonts;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::{Cmd, CommandId};
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
