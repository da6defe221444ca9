//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod document;
mod editor;
mod format;
mod ui;

use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg};
use crate::model::sync_status_bar;
use crate::model::AppModel;

#[cfg(debug_assertions)]
use crate::tracing::CursorSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::{update_app, SAVED_MESSAGE};
pub use document::update_document;
pub use editor::update_editor;
pub use format::update_format;
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Editor(m) => editor::update_editor(model, m),
        Msg::Document(m) => document::update_document(model, m),
        Msg::Format(m) => format::update_format(model, m),
        Msg::Ui(m) => ui::update_ui(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    sync_status_bar(model);
    result
}

/// Traced update wrapper (debug builds only)
///
/// Logs each message and the cursor/length change it caused. The periodic
/// tick and pointer motion are too noisy to log.
#[cfg(debug_assertions)]
fn update_traced(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::UiMsg;

    let is_noisy = matches!(
        &msg,
        Msg::Ui(UiMsg::Tick) | Msg::Ui(UiMsg::PointerMoved { .. })
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = CursorSnapshot::from_document(&model.document);
    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = CursorSnapshot::from_document(&model.document);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "state changed");
    }
    model.document.formats.debug_assert_tiles(model.document.char_count());

    result
}

/// Display name for a message, without file contents
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Editor(m) => format!("Editor::{:?}", m),
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Format(m) => format!("Format::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
        Msg::App(AppMsg::FileLoaded { path, result }) => format!(
            "App::FileLoaded({}, {})",
            path.display(),
            match result {
                Ok(text) => format!("{} bytes", text.len()),
                Err(e) => format!("{:?}", e),
            }
        ),
        Msg::App(AppMsg::SaveFileDialogResult { path }) => {
            format!("App::SaveFileDialogResult({:?})", path)
        }
        Msg::App(m) => format!("App::{:?}", m),
    }
}
