//! Keyboard mapping
//!
//! ```text
//! winit::KeyEvent → Keystroke → Keymap::lookup() → KeyCommand → Msg
//! ```
//!
//! While a popup is open, [`modal_msg`] takes over so arrows, Enter and
//! Escape drive the popup instead of the document.

mod binding;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;
mod winit_adapter;

pub use binding::{KeyCommand, Keybinding};
pub use defaults::default_bindings;
pub use keymap::{modal_msg, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
pub use winit_adapter::{keystroke_from_winit, modifiers_from_winit};
