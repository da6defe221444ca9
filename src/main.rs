//! Quill - a minimal text editor
//!
//! The binary wires the library's model and update logic to a winit window.

mod runtime;
mod view;

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use quill::cli::CliArgs;
use quill::clipboard::SystemClipboard;
use quill::config::EditorConfig;
use quill::fonts::FontCatalog;
use quill::model::AppModel;

use runtime::App;

fn main() -> Result<()> {
    quill::tracing::init();

    let args = CliArgs::parse();

    let mut config = EditorConfig::load();
    if let Some(size) = args.font_size {
        config.font_size = size.points();
    }

    let fonts = FontCatalog::discover();
    if let Some(family) = config.font_family.as_deref() {
        if fonts.find(family).is_none() {
            tracing::warn!("Configured font family {} is not installed", family);
        }
    }

    // Size and scale are corrected once the window exists
    let window_size = (config.window_width, config.window_height);
    let model = AppModel::new(
        config,
        fonts,
        Box::new(SystemClipboard),
        window_size,
        1.0,
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(model, args.path);

    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
