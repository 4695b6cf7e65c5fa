// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the editor to the window: menus, toolbar, keyboard
//! shortcuts, the canvas view, the shape list and the status bar. Menu
//! enablement is recomputed from the editor every frame.

use crate::config::Settings;
use crate::editor::Editor;
use crate::models::Document;
use crate::ui::canvas::{self, CanvasAction};
use crate::ui::dialogs::{NativeDialogs, SizePrompt, SizePromptResult};
use crate::ui::{shape_list::ShapeList, toolbar};
use std::path::PathBuf;
use std::rc::Rc;

/// A user command coming from the menu bar or a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    New,
    Open,
    Close,
    Save,
    SaveAs,
    Quit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    Delete,
    BringToFront,
    SendToBack,
    ToggleShapeList,
}

fn shortcuts() -> [(egui::Modifiers, egui::Key, Command); 6] {
    use egui::{Key, Modifiers};
    [
        // Ctrl+Shift+Z must be checked before Ctrl+Z.
        (Modifiers::COMMAND | Modifiers::SHIFT, Key::Z, Command::Redo),
        (Modifiers::COMMAND, Key::Z, Command::Undo),
        (Modifiers::COMMAND, Key::Y, Command::Redo),
        (Modifiers::COMMAND, Key::N, Command::New),
        (Modifiers::COMMAND, Key::O, Command::Open),
        (Modifiers::COMMAND, Key::S, Command::Save),
    ]
}

/// Map the clipboard events egui emits for Ctrl+X/C/V.
///
/// The window backend reports these combinations as `Cut`/`Copy`/`Paste`
/// events instead of key presses.
fn clipboard_command(events: &[egui::Event]) -> Option<Command> {
    events.iter().find_map(|event| match event {
        egui::Event::Cut => Some(Command::Cut),
        egui::Event::Copy => Some(Command::Copy),
        egui::Event::Paste(_) => Some(Command::Paste),
        _ => None,
    })
}

/// Main application state.
pub struct DrawingApp {
    editor: Editor,

    dialogs: NativeDialogs,

    /// Open while asking for the size of a new document
    size_prompt: Option<SizePrompt>,

    shape_list: ShapeList,

    /// Title last sent to the window
    title: String,
}

impl DrawingApp {
    /// Create the application, optionally opening a drawing at startup.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, file: Option<PathBuf>) -> Self {
        let mut editor = Editor::new(&settings);
        let shape_list = ShapeList::default();

        editor.subscribe(shape_list.observer());
        let ctx = cc.egui_ctx.clone();
        editor.subscribe(Rc::new(move |_: &Document| ctx.request_repaint()));

        let mut app = Self {
            editor,
            dialogs: NativeDialogs,
            size_prompt: None,
            shape_list,
            title: String::new(),
        };

        if let Some(path) = file {
            app.editor.open_path(&path, &mut app.dialogs);
        }

        app
    }

    fn run(&mut self, command: Command, ctx: &egui::Context) {
        let available = self.editor.availability();
        match command {
            Command::New => {
                let settings = self.editor.settings();
                self.size_prompt = Some(SizePrompt::new(settings.canvas_width, settings.canvas_height));
            }
            Command::Open => {
                self.editor.open_document(&mut self.dialogs);
            }
            Command::Close => {
                self.editor.close(&mut self.dialogs);
            }
            Command::Save if available.save => {
                self.editor.save(&mut self.dialogs);
            }
            Command::SaveAs if available.save_as => {
                self.editor.save_as(&mut self.dialogs);
            }
            Command::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Command::Undo => {
                self.editor.undo();
            }
            Command::Redo => {
                self.editor.redo();
            }
            Command::Cut => {
                if self.editor.cut() {
                    self.export_clipboard(ctx);
                }
            }
            Command::Copy => {
                if self.editor.copy() {
                    self.export_clipboard(ctx);
                }
            }
            Command::Paste => {
                self.editor.paste();
            }
            Command::Delete => {
                self.editor.delete_selected();
            }
            Command::BringToFront => {
                self.editor.bring_to_front();
            }
            Command::SendToBack => {
                self.editor.send_to_back();
            }
            Command::ToggleShapeList if available.shape_list => {
                self.shape_list.open = !self.shape_list.open;
            }
            Command::Save | Command::SaveAs | Command::ToggleShapeList => {}
        }
    }

    /// Put the clipboard shape's description on the system clipboard, so
    /// the next Ctrl+V reaches the app as a paste event.
    fn export_clipboard(&self, ctx: &egui::Context) {
        if let Some(shape) = self.editor.clipboard() {
            let text = shape.to_string();
            ctx.output_mut(|o| o.copied_text = text);
        }
    }

    fn menu_bar(&self, ui: &mut egui::Ui) -> Option<Command> {
        let available = self.editor.availability();
        let history = self.editor.history();
        let mut command = None;

        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                menu_item(ui, true, "New...", "Ctrl+N", Command::New, &mut command);
                menu_item(ui, true, "Open...", "Ctrl+O", Command::Open, &mut command);
                menu_item(ui, available.close, "Close", "", Command::Close, &mut command);
                ui.separator();
                menu_item(ui, available.save, "Save", "Ctrl+S", Command::Save, &mut command);
                menu_item(ui, available.save_as, "Save As...", "", Command::SaveAs, &mut command);
                ui.separator();
                menu_item(ui, true, "Quit", "", Command::Quit, &mut command);
            });

            ui.menu_button("Edit", |ui| {
                menu_item(ui, available.undo, &history.undo_label(), "Ctrl+Z", Command::Undo, &mut command);
                menu_item(ui, available.redo, &history.redo_label(), "Ctrl+Y", Command::Redo, &mut command);
                ui.separator();
                menu_item(ui, available.cut, "Cut", "Ctrl+X", Command::Cut, &mut command);
                menu_item(ui, available.copy, "Copy", "Ctrl+C", Command::Copy, &mut command);
                menu_item(ui, available.paste, "Paste", "Ctrl+V", Command::Paste, &mut command);
                menu_item(ui, available.delete, "Delete", "Del", Command::Delete, &mut command);
                ui.separator();
                menu_item(ui, available.bring_to_front, "Bring to Front", "", Command::BringToFront, &mut command);
                menu_item(ui, available.send_to_back, "Send to Back", "", Command::SendToBack, &mut command);
            });

            ui.menu_button("View", |ui| {
                let label = if self.shape_list.open { "✔ Shape List" } else { "Shape List" };
                menu_item(ui, available.shape_list, label, "", Command::ToggleShapeList, &mut command);
            });
        });

        command
    }

    fn shortcut(&self, ctx: &egui::Context) -> Option<Command> {
        if ctx.wants_keyboard_input() || self.size_prompt.is_some() {
            return None;
        }
        let command = ctx.input_mut(|i| {
            shortcuts()
                .iter()
                .find(|(modifiers, key, _)| i.consume_key(*modifiers, *key))
                .map(|(_, _, command)| *command)
                .or_else(|| clipboard_command(&i.events))
        });
        if command.is_some() {
            return command;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            return Some(Command::Delete);
        }
        None
    }

    fn show_size_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.size_prompt.as_mut() else {
            return;
        };
        match prompt.show(ctx) {
            SizePromptResult::Pending => {}
            SizePromptResult::Cancelled => self.size_prompt = None,
            SizePromptResult::Confirmed { width, height } => {
                self.size_prompt = None;
                self.editor.new_document(width, height, &mut self.dialogs);
            }
        }
    }

    fn persist_settings(&self) {
        let Some(path) = Settings::default_path() else {
            return;
        };
        match self.editor.session_settings().save(&path) {
            Ok(()) => log::info!("Saved settings to {}", path.display()),
            Err(e) => log::warn!("Failed to save settings: {:#}", e),
        }
    }

    fn canvas_action(&mut self, action: CanvasAction) {
        match action {
            CanvasAction::Click(x, y) => self.editor.click(x, y),
            CanvasAction::Press(x, y) => self.editor.press(x, y),
            CanvasAction::Drag(x, y) => self.editor.drag(x, y),
            CanvasAction::Release(x, y) => self.editor.release(x, y),
        }
    }
}

fn menu_item(
    ui: &mut egui::Ui,
    enabled: bool,
    label: &str,
    shortcut: &str,
    command: Command,
    out: &mut Option<Command>,
) {
    if ui
        .add_enabled(enabled, egui::Button::new(label).shortcut_text(shortcut))
        .clicked()
    {
        *out = Some(command);
        ui.close_menu();
    }
}

impl eframe::App for DrawingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Closing the window goes through the unsaved-changes flow
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.editor.close(&mut self.dialogs) {
                self.persist_settings();
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
        }

        let title = self.editor.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        // Top menu bar
        let menu_command = egui::TopBottomPanel::top("menu_bar")
            .show(ctx, |ui| self.menu_bar(ui))
            .inner;

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let mut tool = self.editor.tool();
            let mut color = self.editor.fill_color();
            toolbar::show(ui, &mut tool, &mut color);
            if tool != self.editor.tool() {
                self.editor.set_tool(tool);
            }
            self.editor.set_fill_color(color);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.editor.status());
                if self.editor.is_dirty() {
                    ui.separator();
                    ui.label(egui::RichText::new("Modified").weak());
                }
            });
        });

        if let Some(command) = menu_command.or_else(|| self.shortcut(ctx)) {
            self.run(command, ctx);
        }

        self.show_size_prompt(ctx);

        // Main canvas (center)
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, self.editor.document(), self.editor.selected()))
            .inner;
        for action in actions {
            self.canvas_action(action);
        }

        self.shape_list.show(ctx, self.editor.document().is_some());
    }
}
