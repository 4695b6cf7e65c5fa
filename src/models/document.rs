// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing document.
//!
//! A document is a fixed-size canvas plus an ordered list of shapes. The
//! list order is the z-order: later shapes are drawn on top and are
//! hit-tested first. Mutations notify every registered observer after
//! they have been applied.

use super::shape::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Callback invoked with the post-mutation document.
pub type Observer = Rc<dyn Fn(&Document)>;

/// Handle returned by [`Document::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Registry of document observers.
///
/// The registry is not part of the document's value: it is never
/// serialized, compared or copied into snapshots. The editor moves it
/// from one live document to the next when undo/redo replaces the
/// document.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Observer)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn notify(&self, document: &Document) {
        for (_, observer) in &self.entries {
            observer(document);
        }
    }
}

/// Default canvas size of a document created without explicit dimensions.
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (200, 200);

/// A drawing: canvas size and z-ordered shapes.
#[derive(Serialize, Deserialize)]
pub struct Document {
    canvas_width: u32,
    canvas_height: u32,
    shapes: Vec<Shape>,
    #[serde(skip)]
    observers: Observers,
}

impl Document {
    /// Create an empty document with the given canvas size.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            shapes: Vec::new(),
            observers: Observers::default(),
        }
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Shapes in z-order, bottom first.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shape at `index`, or `None` when the index is out of range.
    pub fn shape_at(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    /// Index of the topmost shape containing the point.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.shapes.iter().rposition(|shape| shape.contains(x, y))
    }

    /// Append a shape on top of the z-order.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.notify();
    }

    /// Insert a shape at `index`, shifting the following shapes up.
    ///
    /// An index past the end appends.
    pub fn insert_shape_at(&mut self, index: usize, shape: Shape) {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
        self.notify();
    }

    /// Remove and return the shape at `index`. Out-of-range indices are a
    /// no-op.
    pub fn remove_shape_at(&mut self, index: usize) -> Option<Shape> {
        if index >= self.shapes.len() {
            return None;
        }
        let removed = self.shapes.remove(index);
        self.notify();
        Some(removed)
    }

    /// Move the shape at `index` so its top-left corner is at `(x, y)`.
    /// Out-of-range indices are a no-op.
    pub fn move_shape_to(&mut self, index: usize, x: i32, y: i32) -> bool {
        let Some(shape) = self.shapes.get_mut(index) else {
            return false;
        };
        shape.move_to(x, y);
        self.notify();
        true
    }

    /// Independent copy of the canvas and every shape. Observers are not
    /// copied.
    pub fn deep_copy(&self) -> Document {
        Document {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            shapes: self.shapes.clone(),
            observers: Observers::default(),
        }
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: Observer) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Detach the observer registry, leaving this document unobserved.
    pub(crate) fn take_observers(&mut self) -> Observers {
        std::mem::take(&mut self.observers)
    }

    /// Attach an observer registry and notify it of the current state.
    pub(crate) fn attach_observers(&mut self, observers: Observers) {
        self.observers = observers;
        self.notify();
    }

    fn notify(&self) {
        self.observers.notify(self);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE.0, DEFAULT_CANVAS_SIZE.1)
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.canvas_width == other.canvas_width
            && self.canvas_height == other.canvas_height
            && self.shapes == other.shapes
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("canvas_width", &self.canvas_width)
            .field("canvas_height", &self.canvas_height)
            .field("shapes", &self.shapes)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// One line per shape: `index: description`.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, shape) in self.shapes.iter().enumerate() {
            writeln!(f, "{}: {}", index, shape)?;
        }
        Ok(())
    }
}
