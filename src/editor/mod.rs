// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor controller.
//!
//! The editor owns the live document, the selection, the clipboard and
//! the undo/redo history, and turns user actions (pointer events and
//! menu commands) into document mutations. Every mutating command
//! records exactly one history entry before touching the document.
//!
//! Views never mutate the document: they render it and forward pointer
//! events here. Dialogs are reached through the [`Dialogs`] trait so the
//! editor can be driven headlessly.

pub mod history;

use crate::config::Settings;
use crate::io::serialization;
use crate::models::document::Observers;
use crate::models::{Document, Observer, ObserverId, Rgba, Shape, ShapeKind};
use history::{History, Operation};
use std::path::{Path, PathBuf};

/// Current drawing tool selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Delete,
    Square,
    Circle,
    Triangle,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Select,
        Tool::Delete,
        Tool::Square,
        Tool::Circle,
        Tool::Triangle,
    ];

    /// Shape inserted by this tool, if it is an insertion tool.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Square => Some(ShapeKind::Square),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Triangle => Some(ShapeKind::Triangle),
            Tool::Select | Tool::Delete => None,
        }
    }
}

/// Answer to "save changes before closing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Save,
    Discard,
    Cancel,
}

/// Dialogs the editor needs from the user interface.
pub trait Dialogs {
    /// Ask what to do with unsaved changes before closing.
    fn confirm_close(&mut self) -> CloseDecision;

    /// Pick a drawing to open; `None` when cancelled.
    fn choose_open_path(&mut self) -> Option<PathBuf>;

    /// Pick where to save the drawing; `None` when cancelled.
    fn choose_save_path(&mut self) -> Option<PathBuf>;
}

/// Which commands are currently available.
///
/// Derived from the editor state on demand; menus and toolbars read this
/// rather than keeping their own enabled flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandAvailability {
    pub close: bool,
    pub save: bool,
    pub save_as: bool,
    pub undo: bool,
    pub redo: bool,
    pub cut: bool,
    pub copy: bool,
    pub paste: bool,
    pub delete: bool,
    pub bring_to_front: bool,
    pub send_to_back: bool,
    pub shape_list: bool,
}

/// In-progress drag of the selected shape.
struct DragState {
    /// Document as it was when the pointer was pressed
    snapshot: Document,
    moved: bool,
}

/// Main editor state.
pub struct Editor {
    settings: Settings,

    /// Currently selected tool
    tool: Tool,

    /// Fill colour of newly inserted shapes
    fill_color: Rgba,

    /// Live document, if one is open
    document: Option<Document>,

    /// Observers kept while no document is open
    parked_observers: Observers,

    /// Index of the selected shape
    selected: Option<usize>,

    /// Shape held for cut/copy/paste
    clipboard: Option<Shape>,

    history: History,

    /// Unsaved changes exist
    dirty: bool,

    /// File the document was opened from or last saved to
    file: Option<PathBuf>,

    drag: Option<DragState>,

    /// Single-line status message
    status: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Editor {
    /// Create an editor with no open document.
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            tool: Tool::Select,
            fill_color: settings.fill_color,
            document: None,
            parked_observers: Observers::default(),
            selected: None,
            clipboard: None,
            history: History::new(settings.history_depth),
            dirty: false,
            file: None,
            drag: None,
            status: String::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings to persist at the end of a session: the startup settings
    /// with the fill colour last chosen in the toolbar.
    pub fn session_settings(&self) -> Settings {
        Settings {
            fill_color: self.fill_color,
            ..self.settings.clone()
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.drag = None;
    }

    pub fn fill_color(&self) -> Rgba {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.document.as_ref()?.shape_at(self.selected?)
    }

    pub fn clipboard(&self) -> Option<&Shape> {
        self.clipboard.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_some() && self.dirty
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Window title: "Drawing", plus the file name when there is one.
    pub fn title(&self) -> String {
        match self.file_name() {
            Some(name) => format!("Drawing - {}", name),
            None => "Drawing".to_string(),
        }
    }

    pub fn availability(&self) -> CommandAvailability {
        let has_document = self.document.is_some();
        let has_selection = self.selected_shape().is_some();
        CommandAvailability {
            close: has_document,
            save: has_document,
            save_as: has_document,
            undo: has_document && self.history.can_undo(),
            redo: has_document && self.history.can_redo(),
            cut: has_selection,
            copy: has_selection,
            paste: has_document && self.clipboard.is_some(),
            delete: has_selection,
            bring_to_front: has_selection,
            send_to_back: has_selection,
            shape_list: has_document,
        }
    }

    // --- Observers ---

    /// Register an observer of the live document. The subscription
    /// follows the live document across undo/redo, new and open.
    pub fn subscribe(&mut self, observer: Observer) -> ObserverId {
        match self.document.as_mut() {
            Some(document) => document.subscribe(observer),
            None => self.parked_observers.subscribe(observer),
        }
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        match self.document.as_mut() {
            Some(document) => document.unsubscribe(id),
            None => self.parked_observers.unsubscribe(id),
        }
    }

    // --- Pointer events ---

    /// Dispatch a click at canvas coordinates according to the active tool.
    pub fn click(&mut self, x: i32, y: i32) {
        match self.tool {
            Tool::Select => {
                self.select_at(x, y);
            }
            Tool::Delete => {
                self.delete_at(x, y);
            }
            Tool::Square | Tool::Circle | Tool::Triangle => {
                if let Some(kind) = self.tool.shape_kind() {
                    self.insert_at(kind, x, y);
                }
            }
        }
    }

    /// Pointer pressed: remember the document in case a drag follows.
    pub fn press(&mut self, _x: i32, _y: i32) {
        if self.tool != Tool::Select || self.selected_shape().is_none() {
            return;
        }
        if let Some(document) = &self.document {
            self.drag = Some(DragState {
                snapshot: document.deep_copy(),
                moved: false,
            });
        }
    }

    /// Pointer dragged: move the selected shape's corner to the pointer.
    pub fn drag(&mut self, x: i32, y: i32) {
        if self.tool != Tool::Select {
            return;
        }
        let (Some(index), Some(document)) = (self.selected, self.document.as_mut()) else {
            return;
        };
        if index >= document.shape_count() {
            return;
        }
        let drag = self.drag.get_or_insert_with(|| DragState {
            snapshot: document.deep_copy(),
            moved: false,
        });
        if document.move_shape_to(index, x, y) {
            drag.moved = true;
            self.dirty = true;
            self.status = format!("Moved shape {}", index);
        }
    }

    /// Pointer released: a drag that moved anything becomes one undo step.
    pub fn release(&mut self, _x: i32, _y: i32) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.moved && self.selected.is_some() && self.document.is_some() {
            self.history.push_undo(Operation::Move, drag.snapshot);
            log::info!("Moved shape {:?}", self.selected);
        }
    }

    // --- Shape commands ---

    /// Select the topmost shape containing the point, or clear the selection.
    pub fn select_at(&mut self, x: i32, y: i32) -> Option<usize> {
        let document = self.document.as_ref()?;
        self.selected = document.hit_test(x, y);
        self.status = match self.selected {
            Some(index) => format!("Selected shape {}", index),
            None => "No shape selected".to_string(),
        };
        self.selected
    }

    /// Delete the topmost shape containing the point.
    pub fn delete_at(&mut self, x: i32, y: i32) -> bool {
        if self.select_at(x, y).is_none() {
            return false;
        }
        self.delete_selected()
    }

    /// Delete the selected shape.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.record(Operation::Delete);
        self.remove_selected(index);
        self.status = "Deleted shape".to_string();
        log::info!("Deleted shape {}", index);
        true
    }

    /// Insert a new shape with its top-left corner at the point.
    pub fn insert_at(&mut self, kind: ShapeKind, x: i32, y: i32) -> bool {
        if self.document.is_none() {
            return false;
        }
        self.record(Operation::Insert);
        let size = self.settings.shape_size;
        let shape = Shape::new(kind, x, y, size, size, self.fill_color);
        if let Some(document) = self.document.as_mut() {
            document.add_shape(shape);
            log::info!("Inserted {} at ({}, {}), total: {}", kind, x, y, document.shape_count());
        }
        self.dirty = true;
        self.status = format!("Inserted {}", kind);
        true
    }

    /// Copy the selected shape to the clipboard and delete it.
    pub fn cut(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.record(Operation::Cut);
        self.clipboard = self.remove_selected(index);
        self.status = format!("Cut shape {}", index);
        log::info!("Cut shape {}", index);
        true
    }

    /// Copy the selected shape to the clipboard.
    pub fn copy(&mut self) -> bool {
        let Some(shape) = self.selected_shape().cloned() else {
            return false;
        };
        self.status = format!("Copied {}", shape.kind);
        self.clipboard = Some(shape);
        true
    }

    /// Paste the clipboard shape on top, offset diagonally.
    ///
    /// The clipboard itself moves with every paste, so repeated pastes
    /// stack down and to the right.
    pub fn paste(&mut self) -> bool {
        if self.document.is_none() || self.clipboard.is_none() {
            return false;
        }
        self.record(Operation::Paste);
        let offset = self.settings.paste_offset;
        let (Some(clipboard), Some(document)) = (self.clipboard.as_mut(), self.document.as_mut())
        else {
            return false;
        };
        clipboard.translate(offset, offset);
        let pasted = clipboard.clone();
        self.status = format!("Pasted {}", pasted.kind);
        log::info!("Pasted {} at ({}, {})", pasted.kind, pasted.x, pasted.y);
        document.add_shape(pasted);
        self.dirty = true;
        true
    }

    /// Move the selected shape to the top of the z-order.
    pub fn bring_to_front(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.record(Operation::BringToFront);
        let Some(document) = self.document.as_mut() else {
            return false;
        };
        if let Some(shape) = document.remove_shape_at(index) {
            document.add_shape(shape);
        }
        self.selected = document.shape_count().checked_sub(1);
        self.dirty = true;
        self.status = format!("Brought shape {} to front", index);
        log::info!("Brought shape {} to front", index);
        true
    }

    /// Move the selected shape to the bottom of the z-order.
    pub fn send_to_back(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.record(Operation::SendToBack);
        let Some(document) = self.document.as_mut() else {
            return false;
        };
        if let Some(shape) = document.remove_shape_at(index) {
            document.insert_shape_at(0, shape);
        }
        self.selected = Some(0);
        self.dirty = true;
        self.status = format!("Sent shape {} to back", index);
        log::info!("Sent shape {} to back", index);
        true
    }

    // --- Undo / redo ---

    pub fn undo(&mut self) -> bool {
        let Some(document) = self.document.as_mut() else {
            return false;
        };
        let Some(operation) = self.history.undo(document) else {
            return false;
        };
        self.drag = None;
        self.dirty = true;
        if operation == Operation::Insert && self.selected.is_some() {
            self.selected = None;
            self.status = "No shape selected".to_string();
        } else {
            self.status = format!("Undid {}", operation);
        }
        self.drop_stale_selection();
        log::info!("Undo {}", operation);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(document) = self.document.as_mut() else {
            return false;
        };
        let Some(operation) = self.history.redo(document) else {
            return false;
        };
        self.drag = None;
        self.dirty = true;
        self.status = format!("Redid {}", operation);
        self.drop_stale_selection();
        log::info!("Redo {}", operation);
        true
    }

    // --- Document lifecycle ---

    /// Close the current document (asking about unsaved changes) and
    /// start an empty one of the given size.
    pub fn new_document(&mut self, width: u32, height: u32, dialogs: &mut dyn Dialogs) -> bool {
        if !self.close(dialogs) {
            return false;
        }
        self.install(Document::new(width, height));
        self.file = None;
        self.dirty = true;
        self.status = format!("New document {}x{} pixels", width, height);
        log::info!("Created {}x{} document", width, height);
        true
    }

    /// Close the current document, then open one chosen by the user.
    pub fn open_document(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !self.close(dialogs) {
            return false;
        }
        match dialogs.choose_open_path() {
            Some(path) => self.load(path),
            None => false,
        }
    }

    /// Close the current document, then open `path`.
    pub fn open_path(&mut self, path: &Path, dialogs: &mut dyn Dialogs) -> bool {
        if !self.close(dialogs) {
            return false;
        }
        self.load(path.to_path_buf())
    }

    /// Close the current document. Returns `false` when the user aborts,
    /// or when saving was requested but did not succeed.
    pub fn close(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if self.document.is_none() {
            return true;
        }
        if self.dirty {
            match dialogs.confirm_close() {
                CloseDecision::Cancel => {
                    self.status = "Close cancelled".to_string();
                    return false;
                }
                CloseDecision::Save => {
                    self.save(dialogs);
                    if self.dirty {
                        return false;
                    }
                }
                CloseDecision::Discard => {}
            }
        }

        if let Some(mut document) = self.document.take() {
            self.parked_observers = document.take_observers();
        }
        self.history.clear();
        self.selected = None;
        self.drag = None;
        self.file = None;
        self.dirty = false;
        self.status = "Closed document".to_string();
        log::info!("Closed document");
        true
    }

    /// Save to the associated file, asking for one if there is none.
    /// A clean document is left alone.
    pub fn save(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if self.document.is_none() {
            return false;
        }
        if !self.dirty {
            return true;
        }
        match self.file.clone() {
            Some(path) => self.write(path),
            None => self.save_as(dialogs),
        }
    }

    /// Ask for a file and save the document there.
    pub fn save_as(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if self.document.is_none() {
            return false;
        }
        match dialogs.choose_save_path() {
            Some(path) => self.save_to(path),
            None => false,
        }
    }

    /// Save the document to `path` (adding the `.drw` extension if
    /// missing) and associate it with that file.
    pub fn save_to(&mut self, path: PathBuf) -> bool {
        if self.document.is_none() {
            return false;
        }
        self.write(serialization::with_drawing_extension(path))
    }

    // --- Internals ---

    fn write(&mut self, path: PathBuf) -> bool {
        let Some(document) = &self.document else {
            return false;
        };
        match serialization::save_drawing(document, &path) {
            Ok(()) => {
                log::info!("Saved drawing to {}", path.display());
                self.status = format!("Saved to {}", file_name_of(&path));
                self.file = Some(path);
                self.dirty = false;
                true
            }
            Err(e) => {
                log::error!("Failed to save drawing: {:#}", e);
                self.status = "Error while saving".to_string();
                self.file = None;
                false
            }
        }
    }

    fn load(&mut self, path: PathBuf) -> bool {
        match serialization::load_drawing(&path) {
            Ok(document) => {
                log::info!(
                    "Opened {} ({} shapes)",
                    path.display(),
                    document.shape_count()
                );
                self.install(document);
                self.file = Some(path);
                self.dirty = false;
                self.status = format!("Opened {}", self.file_name().unwrap_or_default());
                true
            }
            Err(e) => {
                log::error!("Failed to open drawing: {:#}", e);
                self.status = format!("Error opening {}", file_name_of(&path));
                self.file = None;
                false
            }
        }
    }

    /// Make `document` the live document with a fresh history, carrying
    /// the current observers over to it.
    fn install(&mut self, mut document: Document) {
        let observers = match self.document.take() {
            Some(mut previous) => previous.take_observers(),
            None => std::mem::take(&mut self.parked_observers),
        };
        document.attach_observers(observers);
        self.document = Some(document);
        self.history = History::new(self.settings.history_depth);
        self.selected = None;
        self.drag = None;
    }

    /// Push the live document onto the undo stack.
    fn record(&mut self, operation: Operation) {
        if let Some(document) = &self.document {
            self.history.push_undo(operation, document.deep_copy());
        }
    }

    /// Selected index, if it names a shape of the live document.
    fn selected_index(&self) -> Option<usize> {
        self.selected_shape().and(self.selected)
    }

    fn remove_selected(&mut self, index: usize) -> Option<Shape> {
        let removed = self.document.as_mut()?.remove_shape_at(index);
        self.selected = None;
        self.dirty = true;
        removed
    }

    fn drop_stale_selection(&mut self) {
        if self.selected.is_some() && self.selected_shape().is_none() {
            self.selected = None;
        }
    }

    fn file_name(&self) -> Option<String> {
        self.file.as_deref().map(file_name_of)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Dialogs that answer from fixed values.
    #[derive(Default)]
    struct Scripted {
        decision: Option<CloseDecision>,
        save_path: Option<PathBuf>,
        asked_close: usize,
    }

    impl Dialogs for Scripted {
        fn confirm_close(&mut self) -> CloseDecision {
            self.asked_close += 1;
            self.decision.unwrap_or(CloseDecision::Discard)
        }

        fn choose_open_path(&mut self) -> Option<PathBuf> {
            None
        }

        fn choose_save_path(&mut self) -> Option<PathBuf> {
            self.save_path.clone()
        }
    }

    fn editor_with_document() -> Editor {
        let mut editor = Editor::default();
        editor.new_document(400, 300, &mut Scripted::default());
        editor
    }

    fn positions(editor: &Editor) -> Vec<(i32, i32)> {
        editor
            .document()
            .map(|d| d.shapes().iter().map(|s| (s.x, s.y)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_commands_without_document_are_noops() {
        let mut editor = Editor::default();
        editor.set_tool(Tool::Square);
        editor.click(10, 10);
        assert!(!editor.insert_at(ShapeKind::Circle, 0, 0));
        assert!(!editor.paste());
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert!(!editor.cut());
        assert!(editor.document().is_none());
        assert_eq!(editor.availability(), CommandAvailability::default());
    }

    #[test]
    fn test_insert_tool_uses_fill_color_and_size() {
        let mut editor = editor_with_document();
        editor.set_fill_color(Rgba::opaque(255, 0, 0));
        editor.set_tool(Tool::Triangle);
        editor.click(30, 40);

        let shape = editor.document().unwrap().shape_at(0).unwrap().clone();
        assert_eq!(
            shape,
            Shape::new(ShapeKind::Triangle, 30, 40, 50, 50, Rgba::opaque(255, 0, 0))
        );
        assert_eq!(editor.history().next_undo(), Some(Operation::Insert));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_select_clears_on_miss() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        assert_eq!(editor.select_at(10, 10), Some(0));
        assert!(editor.availability().cut);
        assert_eq!(editor.select_at(300, 300), None);
        assert!(!editor.availability().cut);
        assert_eq!(editor.status(), "No shape selected");
    }

    #[test]
    fn test_delete_tool_removes_hit_shape() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.insert_at(ShapeKind::Circle, 100, 100);
        editor.set_tool(Tool::Delete);

        editor.click(300, 300);
        assert_eq!(editor.document().unwrap().shape_count(), 2);
        assert_eq!(editor.history().undo_len(), 2);

        editor.click(10, 10);
        assert_eq!(positions(&editor), vec![(100, 100)]);
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.history().next_undo(), Some(Operation::Delete));

        editor.undo();
        assert_eq!(positions(&editor), vec![(0, 0), (100, 100)]);
    }

    #[test]
    fn test_drag_records_single_move() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.select_at(5, 5);

        editor.press(5, 5);
        for step in 1..=20 {
            editor.drag(step * 3, step * 2);
        }
        editor.release(60, 40);

        assert_eq!(positions(&editor), vec![(60, 40)]);
        assert_eq!(editor.history().undo_len(), 2);
        assert_eq!(editor.history().next_undo(), Some(Operation::Move));

        editor.undo();
        assert_eq!(positions(&editor), vec![(0, 0)]);
        editor.redo();
        assert_eq!(positions(&editor), vec![(60, 40)]);
    }

    #[test]
    fn test_press_and_release_without_move_records_nothing() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.select_at(5, 5);
        editor.press(5, 5);
        editor.release(5, 5);
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_drag_without_selection_does_nothing() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.press(5, 5);
        editor.drag(80, 80);
        editor.release(80, 80);
        assert_eq!(positions(&editor), vec![(0, 0)]);
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_copy_does_not_record_history() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Circle, 10, 10);
        editor.select_at(35, 35);
        assert!(editor.copy());
        assert_eq!(editor.history().undo_len(), 1);
        assert_eq!(editor.clipboard().map(|s| (s.x, s.y)), Some((10, 10)));
    }

    #[test]
    fn test_paste_offsets_accumulate() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 10, 10);
        editor.select_at(15, 15);
        editor.copy();

        editor.paste();
        editor.paste();
        assert_eq!(positions(&editor), vec![(10, 10), (15, 15), (20, 20)]);
        assert_eq!(editor.clipboard().map(|s| (s.x, s.y)), Some((20, 20)));
    }

    #[test]
    fn test_reorder() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.insert_at(ShapeKind::Square, 1, 0);
        editor.insert_at(ShapeKind::Square, 2, 0);

        editor.select_at(5, 5);
        assert_eq!(editor.selected(), Some(2));
        editor.send_to_back();
        assert_eq!(editor.selected(), Some(0));
        assert_eq!(positions(&editor), vec![(2, 0), (0, 0), (1, 0)]);
        assert_eq!(editor.history().next_undo(), Some(Operation::SendToBack));
        assert_eq!(editor.history().undo_label(), "Undo bring forward");

        editor.bring_to_front();
        assert_eq!(editor.selected(), Some(2));
        assert_eq!(positions(&editor), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_undo_insert_clears_selection() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Circle, 0, 0);
        editor.select_at(25, 25);
        assert_eq!(editor.selected(), Some(0));

        editor.undo();
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.document().unwrap().shape_count(), 0);
    }

    #[test]
    fn test_undo_move_keeps_selection() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.select_at(1, 1);
        editor.press(1, 1);
        editor.drag(100, 100);
        editor.release(100, 100);

        editor.undo();
        assert_eq!(editor.selected(), Some(0));
    }

    #[test]
    fn test_redo_drops_stale_selection() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.select_at(1, 1);
        editor.delete_selected();
        editor.undo();
        editor.select_at(1, 1);
        assert_eq!(editor.selected(), Some(0));

        editor.redo();
        assert_eq!(editor.document().unwrap().shape_count(), 0);
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_close_cancel_keeps_document() {
        let mut editor = editor_with_document();
        let mut dialogs = Scripted {
            decision: Some(CloseDecision::Cancel),
            ..Scripted::default()
        };
        assert!(!editor.close(&mut dialogs));
        assert!(editor.document().is_some());
        assert_eq!(dialogs.asked_close, 1);
    }

    #[test]
    fn test_close_discard_resets_state() {
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        editor.select_at(1, 1);
        editor.copy();

        assert!(editor.close(&mut Scripted::default()));
        assert!(editor.document().is_none());
        assert_eq!(editor.selected(), None);
        assert!(!editor.history().can_undo());
        assert!(!editor.is_dirty());
        // The clipboard survives closing.
        assert!(editor.clipboard().is_some());
    }

    #[test]
    fn test_close_save_cancelled_aborts_close() {
        let mut editor = editor_with_document();
        let mut dialogs = Scripted {
            decision: Some(CloseDecision::Save),
            save_path: None,
            ..Scripted::default()
        };
        assert!(!editor.close(&mut dialogs));
        assert!(editor.document().is_some());
    }

    #[test]
    fn test_close_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Square, 0, 0);
        let mut dialogs = Scripted {
            decision: Some(CloseDecision::Save),
            save_path: Some(dir.path().join("closing")),
            ..Scripted::default()
        };

        assert!(editor.close(&mut dialogs));
        let saved = serialization::load_drawing(&dir.path().join("closing.drw")).unwrap();
        assert_eq!(saved.shape_count(), 1);
    }

    #[test]
    fn test_save_failure_drops_file_association() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_document();
        let missing = dir.path().join("no-such-dir").join("picture.drw");

        assert!(!editor.save_to(missing));
        assert!(editor.file().is_none());
        assert!(editor.is_dirty());
        assert!(editor.document().is_some());
        assert_eq!(editor.status(), "Error while saving");
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_document();
        editor.insert_at(ShapeKind::Triangle, 12, 34);
        assert!(editor.save_to(dir.path().join("shapes")));
        assert!(!editor.is_dirty());
        assert_eq!(editor.title(), "Drawing - shapes.drw");

        let path = editor.file().unwrap().to_path_buf();
        let expected = editor.document().unwrap().deep_copy();
        assert!(editor.open_path(&path, &mut Scripted::default()));
        assert_eq!(editor.document(), Some(&expected));
        assert!(!editor.is_dirty());
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_open_failure_leaves_no_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_document();
        assert!(!editor.open_path(&dir.path().join("nope.drw"), &mut Scripted::default()));
        assert!(editor.document().is_none());
        assert!(editor.file().is_none());
        assert_eq!(editor.status(), "Error opening nope.drw");
    }

    #[test]
    fn test_clean_document_does_not_ask_on_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_document();
        editor.save_to(dir.path().join("clean.drw"));
        let mut dialogs = Scripted {
            decision: Some(CloseDecision::Cancel),
            ..Scripted::default()
        };
        assert!(editor.close(&mut dialogs));
        assert_eq!(dialogs.asked_close, 0);
    }

    #[test]
    fn test_observers_survive_undo_and_new_document() {
        let mut editor = Editor::default();
        let count = Rc::new(Cell::new(usize::MAX));
        let count_in = Rc::clone(&count);
        editor.subscribe(Rc::new(move |d: &Document| count_in.set(d.shape_count())));

        editor.new_document(100, 100, &mut Scripted::default());
        assert_eq!(count.get(), 0);
        editor.insert_at(ShapeKind::Square, 0, 0);
        assert_eq!(count.get(), 1);
        editor.undo();
        assert_eq!(count.get(), 0);
        editor.redo();
        assert_eq!(count.get(), 1);

        editor.new_document(100, 100, &mut Scripted::default());
        assert_eq!(count.get(), 0);
        assert_eq!(editor.document().unwrap().observer_count(), 1);
    }

    #[test]
    fn test_session_settings_keep_chosen_fill_color() {
        let settings = Settings {
            shape_size: 20,
            ..Settings::default()
        };
        let mut editor = Editor::new(&settings);
        editor.set_fill_color(Rgba::opaque(0, 128, 0));

        let session = editor.session_settings();
        assert_eq!(session.fill_color, Rgba::opaque(0, 128, 0));
        assert_eq!(session.shape_size, 20);
        assert_eq!(editor.settings().fill_color, Rgba::BLUE);
    }

    #[test]
    fn test_history_depth_comes_from_settings() {
        let settings = Settings {
            history_depth: 2,
            ..Settings::default()
        };
        let mut editor = Editor::new(&settings);
        editor.new_document(100, 100, &mut Scripted::default());
        for i in 0..5 {
            editor.insert_at(ShapeKind::Square, i, i);
        }
        assert_eq!(editor.history().undo_len(), 2);
    }
}
