//! Text editing primitives shared by the document and single-line inputs
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: buffer abstraction
//! - [`RopeBuffer`]: the document text
//! - [`StringBuffer`]: small inputs such as the font picker filter
//! - [`EditableState`]: cursor, selection and undo history over a buffer
//!
//! Every mutating call on [`EditableState`] returns a [`TextChange`] so
//! callers can keep formatting runs aligned with the text.

mod buffer;
mod cursor;
mod history;
mod state;

pub use buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
pub use cursor::{Cursor, Position, Selection};
pub use history::{EditHistory, EditOperation};
pub use state::{EditableState, TextChange};
