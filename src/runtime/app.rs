use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window, WindowId};

use quill::commands::Cmd;
use quill::editable::Position;
use quill::keymap::Keymap;
use quill::messages::{AppMsg, EditorMsg, ModalMsg, Msg, UiMsg};
use quill::model::{AppModel, ChromeTarget};
use quill::update::update;
use quill::util::{read_text_file, write_text_file};

use super::input::handle_key;
use crate::view::Renderer;

/// Two clicks closer together than this make a double click
const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(400);

/// Lines scrolled per wheel notch
const WHEEL_LINES: f32 = 3.0;

pub struct App {
    model: AppModel,
    keymap: Keymap,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    // Must outlive the renderer's surface
    _context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    mouse_position: Option<(f32, f32)>,
    last_click_time: Instant,
    last_click_position: Option<Position>,
    /// Left button is held after a click in the text area
    left_mouse_down: bool,
    /// File named on the command line, opened once the window exists
    initial_file: Option<PathBuf>,
    should_exit: bool,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(model: AppModel, initial_file: Option<PathBuf>) -> Self {
        Self {
            model,
            keymap: Keymap::default(),
            renderer: None,
            window: None,
            _context: None,
            modifiers: ModifiersState::empty(),
            mouse_position: None,
            last_click_time: Instant::now(),
            last_click_position: None,
            left_mouse_down: false,
            initial_file,
            should_exit: false,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let config = &self.model.config;
        let window_attributes = Window::default_attributes()
            .with_title("Quill")
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));

        let window = Rc::new(
            event_loop
                .create_window(window_attributes)
                .map_err(|e| anyhow!("Failed to create window: {}", e))?,
        );
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow!("Failed to create graphics context: {}", e))?;

        let renderer = Renderer::new(
            Rc::clone(&window),
            &context,
            &self.model.fonts,
            self.model.config.font_family.as_deref(),
        )?;
        tracing::info!("Rendering with {}", renderer.default_family());

        let size = window.inner_size();
        let metrics = renderer.text_metrics();
        self.renderer = Some(renderer);
        self.window = Some(window);
        self._context = Some(context);

        self.dispatch(event_loop, Msg::App(AppMsg::MetricsChanged(metrics)));
        self.dispatch(
            event_loop,
            Msg::App(AppMsg::Resize(size.width, size.height)),
        );

        if let Some(path) = self.initial_file.take() {
            self.process_cmd(event_loop, Cmd::LoadFile { path });
        }
        Ok(())
    }

    /// Run a message through update and carry out what it asks for
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(event_loop, cmd);
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Perform a side effect; results are fed back through update
    fn process_cmd(&mut self, event_loop: &ActiveEventLoop, cmd: Cmd) {
        let follow_up = match cmd {
            Cmd::Redraw => {
                self.request_redraw();
                None
            }
            Cmd::ConfirmDiscard => {
                let answer = MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("New")
                    .set_description("Discard unsaved changes?")
                    .set_buttons(MessageButtons::YesNo)
                    .show();
                Some(AppMsg::DiscardConfirmed(matches!(
                    answer,
                    MessageDialogResult::Yes
                )))
            }
            Cmd::ShowOpenFileDialog => {
                let path = FileDialog::new()
                    .add_filter("Text files", &["txt"])
                    .pick_file();
                Some(AppMsg::OpenFileDialogResult { path })
            }
            Cmd::ShowSaveFileDialog => {
                let path = FileDialog::new()
                    .add_filter("Text files", &["txt"])
                    .save_file();
                Some(AppMsg::SaveFileDialogResult { path })
            }
            Cmd::LoadFile { path } => {
                let result = read_text_file(&path);
                Some(AppMsg::FileLoaded { path, result })
            }
            Cmd::SaveFile { path, content } => {
                let result = write_text_file(&path, &content);
                Some(AppMsg::SaveCompleted { path, result })
            }
            Cmd::ShowError { title, message } => {
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title(&title)
                    .set_description(&message)
                    .set_buttons(MessageButtons::Ok)
                    .show();
                None
            }
            Cmd::Quit => {
                self.should_exit = true;
                event_loop.exit();
                None
            }
        };

        if let Some(msg) = follow_up {
            self.dispatch(event_loop, Msg::App(msg));
        }
    }

    fn update_cursor_icon(&self, x: f32, y: f32) {
        let Some(window) = &self.window else { return };
        let over_text = !self.model.ui.has_modal()
            && self.model.chrome_layout().hit_test(x, y) == Some(ChromeTarget::TextArea);
        window.set_cursor(if over_text {
            CursorIcon::Text
        } else {
            CursorIcon::Default
        });
    }

    fn handle_click(&mut self, x: f32, y: f32) -> Option<Cmd> {
        if self.model.ui.has_modal() {
            let popup = self.model.popup_layout()?;
            if popup.frame.contains(x, y) {
                let target = popup.hit_test(x, y)?;
                return update(
                    &mut self.model,
                    Msg::Ui(UiMsg::Modal(ModalMsg::Activate(target))),
                );
            }
            // A click outside dismisses the popup and goes no further
            return update(&mut self.model, Msg::Ui(UiMsg::Modal(ModalMsg::Close)));
        }

        match self.model.chrome_layout().hit_test(x, y)? {
            ChromeTarget::FileMenu => update(
                &mut self.model,
                Msg::Ui(UiMsg::Modal(ModalMsg::OpenFileMenu)),
            ),
            ChromeTarget::SizeDropdown => update(
                &mut self.model,
                Msg::Ui(UiMsg::Modal(ModalMsg::OpenSizeDropdown)),
            ),
            ChromeTarget::ToolbarButton(command) => update(&mut self.model, command.to_msg()),
            ChromeTarget::TextArea => self.handle_text_click(x, y),
        }
    }

    fn handle_text_click(&mut self, x: f32, y: f32) -> Option<Cmd> {
        let renderer = self.renderer.as_mut()?;
        let position = renderer.pixel_to_position(x, y, &self.model);
        let Position { line, column } = position;

        let now = Instant::now();
        let is_double = now.duration_since(self.last_click_time) < DOUBLE_CLICK_TIME
            && self.last_click_position == Some(position);
        self.last_click_time = now;
        self.last_click_position = Some(position);

        if is_double {
            // A third click starts over
            self.last_click_position = None;
            return update(
                &mut self.model,
                Msg::Editor(EditorMsg::SelectWordAt { line, column }),
            );
        }

        self.left_mouse_down = true;
        let msg = if self.modifiers.shift_key() {
            EditorMsg::ExtendSelectionToPosition { line, column }
        } else {
            EditorMsg::SetCursorPosition { line, column }
        };
        update(&mut self.model, Msg::Editor(msg))
    }

    fn handle_drag(&mut self, x: f32, y: f32) -> Option<Cmd> {
        if !self.left_mouse_down || !self.model.ui.mouse_selecting {
            return None;
        }
        let renderer = self.renderer.as_mut()?;
        let Position { line, column } = renderer.pixel_to_position(x, y, &self.model);
        let cursor = self.model.document.cursor();
        if (cursor.line, cursor.column) == (line, column) {
            return None;
        }
        update(
            &mut self.model,
            Msg::Editor(EditorMsg::ExtendSelectionToPosition { line, column }),
        )
    }

    fn handle_event(&mut self, event_loop: &ActiveEventLoop, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => update(
                &mut self.model,
                Msg::App(AppMsg::Resize(size.width, size.height)),
            ),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                update(
                    &mut self.model,
                    Msg::App(AppMsg::ScaleFactorChanged(*scale_factor)),
                );
                let renderer = self.renderer.as_mut()?;
                renderer.set_scale_factor(*scale_factor);
                let metrics = renderer.text_metrics();
                update(&mut self.model, Msg::App(AppMsg::MetricsChanged(metrics)))
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                handle_key(&mut self.model, &self.keymap, event, self.modifiers)
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    let caret_x = renderer.caret_offset(&self.model);
                    self.model.reveal_caret_x(caret_x);
                    if let Err(e) = renderer.render(&self.model, &self.keymap) {
                        tracing::error!("Render error: {:#}", e);
                    }
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.mouse_position = Some((x, y));
                self.update_cursor_icon(x, y);
                let hover = update(&mut self.model, Msg::Ui(UiMsg::PointerMoved { x, y }));
                self.handle_drag(x, y).or(hover)
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                update(&mut self.model, Msg::Ui(UiMsg::PointerLeft))
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position?;
                self.handle_click(x, y)
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                if !std::mem::take(&mut self.left_mouse_down) {
                    return None;
                }
                update(&mut self.model, Msg::Editor(EditorMsg::EndMouseSelection))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if self.model.ui.has_modal() {
                    return None;
                }
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => (-y * WHEEL_LINES).round() as i32,
                    MouseScrollDelta::PixelDelta(pos) => {
                        let line_height = self.model.metrics.ui_line_height.max(1.0) as f64;
                        (-pos.y / line_height).round() as i32
                    }
                };
                if lines == 0 {
                    return None;
                }
                update(&mut self.model, Msg::Editor(EditorMsg::Scroll(lines)))
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
                None
            }
            _ => None,
        }
    }

    /// Cursor blink and status message expiry
    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch(event_loop, Msg::Ui(UiMsg::Tick));
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.model.ui.next_deadline()));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            tracing::error!("{:#}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let is_ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        if !is_ours {
            return;
        }
        if let Some(cmd) = self.handle_event(event_loop, &event) {
            self.process_cmd(event_loop, cmd);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            return;
        }
        self.tick(event_loop);
    }
}
