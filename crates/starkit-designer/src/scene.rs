//! Scene controller: the entry point a UI drives.
//!
//! Owns the canvas and the history and wires them together. Canvas events
//! are turned into history commands here:
//!
//! | event | undo | redo |
//! |---|---|---|
//! | object added | remove it | put it back |
//! | object modified (move/scale) | old transform + refresh | new transform + refresh |
//! | handle drag (debounced) | old parameters | new parameters |
//!
//! Deleting the selection and clearing the scene record their commands
//! directly since the removed objects are needed to undo them.

use starkit_core::{shared, EventFilter, Result, SceneError, Shared, SubscriptionId};
use starkit_settings::Config;

use crate::canvas::{Canvas, CanvasEvent, EventCategory, ObjectId, StarObject};
use crate::debounce::{Clock, SystemClock};
use crate::geometry::Point;
use crate::handles::{self, HandleDrag, HandleKey};
use crate::history::{Command, HistoryManager, HistoryTarget};
use crate::model::{StarParameters, StarSnapshot};
use crate::transform::ObjectTransform;

/// A removed object and the index it was removed from.
type Stash = Shared<Option<(usize, StarObject)>>;

impl HistoryTarget for Canvas {
    fn settle(&mut self, history: &mut HistoryManager<Self>) {
        for event in self.drain_events() {
            record_event(history, event);
        }
    }
}

fn record_event(history: &mut HistoryManager<Canvas>, event: CanvasEvent) {
    let command = match event {
        CanvasEvent::ObjectAdded { id } => added_command(id, shared(None)),
        CanvasEvent::ObjectModified { id, before, after } => modified_command(id, before, after),
        _ => return,
    };
    if let Err(e) = history.record(command) {
        tracing::error!("Failed to record canvas event: {}", e);
    }
}

fn added_command(id: ObjectId, stash: Stash) -> Command<Canvas> {
    let undo_stash = stash.clone();
    Command::new(
        format!("Add star {}", id),
        move |canvas: &mut Canvas| match canvas.remove(id) {
            Ok(removed) => *undo_stash.borrow_mut() = Some(removed),
            Err(e) => tracing::error!("Undo add: {}", e),
        },
        move |canvas: &mut Canvas| {
            if let Some((index, object)) = stash.borrow_mut().take() {
                canvas.insert(index, object);
                canvas.request_render();
            }
        },
    )
}

fn removed_command(id: ObjectId, stash: Stash) -> Command<Canvas> {
    let redo_stash = stash.clone();
    Command::new(
        format!("Delete star {}", id),
        move |canvas: &mut Canvas| {
            if let Some((index, object)) = stash.borrow_mut().take() {
                canvas.insert(index, object);
                canvas.request_render();
            }
        },
        move |canvas: &mut Canvas| match canvas.remove(id) {
            Ok(removed) => *redo_stash.borrow_mut() = Some(removed),
            Err(e) => tracing::error!("Redo delete: {}", e),
        },
    )
}

fn modified_command(id: ObjectId, before: ObjectTransform, after: ObjectTransform) -> Command<Canvas> {
    let restore = move |transform: ObjectTransform| {
        move |canvas: &mut Canvas| {
            if let Err(e) = canvas.restore_transform(id, transform) {
                tracing::error!("Restore transform: {}", e);
            }
        }
    };
    Command::new(format!("Transform star {}", id), restore(before), restore(after))
}

fn reshape_command(id: ObjectId, before: StarSnapshot, after: StarSnapshot) -> Command<Canvas> {
    let restore = move |snapshot: StarSnapshot| {
        move |canvas: &mut Canvas| match canvas.get_mut(id) {
            Some(object) => {
                object.restore(&snapshot);
                canvas.notify(CanvasEvent::Refresh { id });
                canvas.request_render();
            }
            None => tracing::error!("Restore parameters: {}", SceneError::UnknownObject { id }),
        }
    };
    Command::new(format!("Edit star {}", id), restore(before), restore(after))
}

fn clear_command(snapshot: String) -> Command<Canvas> {
    Command::new(
        "Clear canvas",
        move |canvas: &mut Canvas| {
            if let Err(e) = canvas.load_from_json(&snapshot) {
                tracing::error!("Undo clear: {}", e);
            }
        },
        |canvas: &mut Canvas| canvas.clear(),
    )
}

pub struct SceneController {
    config: Config,
    canvas: Canvas,
    history: HistoryManager<Canvas>,
    clock: Box<dyn Clock>,
}

impl SceneController {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: Config, clock: impl Clock + 'static) -> Self {
        let canvas = Canvas::new(&config.canvas, config.history.debounce());
        let history = HistoryManager::with_capacity(config.history.capacity);
        tracing::info!(
            "Scene ready: {}x{} canvas, history capacity {}",
            canvas.width(),
            canvas.height(),
            history.capacity()
        );
        Self {
            config,
            canvas,
            history,
            clock: Box::new(clock),
        }
    }

    /// True once the canvas exists, which is always the case after construction.
    pub fn is_ready(&self) -> bool {
        true
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &HistoryManager<Canvas> {
        &self.history
    }

    /// Record whatever the canvas raised since the last call.
    fn pump(&mut self) {
        self.canvas.settle(&mut self.history);
    }

    /// Add a star with the configured defaults at the centre and select it.
    pub fn add_shape(&mut self) -> ObjectId {
        let defaults = &self.config.star;
        let params = StarParameters::new(
            self.canvas.center(),
            defaults.spoke_count,
            defaults.outer_radius,
            defaults.inner_radius,
            defaults.roundness,
        );
        let id = self.canvas.add_star(params, self.config.style.clone());
        if let Err(e) = self.canvas.select(Some(id)) {
            tracing::error!("Failed to select new star {}: {}", id, e);
        }
        self.canvas.request_render();
        self.pump();

        tracing::info!("Added star {}", id);
        id
    }

    /// Remove everything. Undo loads the scene back from a JSON snapshot.
    pub fn clear(&mut self) -> Result<()> {
        self.flush_pending();
        let snapshot = self.canvas.to_json()?;

        self.canvas.clear();
        self.canvas.request_render();
        self.pump();
        self.history.record(clear_command(snapshot))?;

        tracing::info!("Cleared canvas");
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        self.flush_pending();
        match self.history.undo(&mut self.canvas) {
            Ok(()) => {
                self.canvas.request_render();
                Ok(())
            }
            Err(e) => {
                self.canvas.notify(CanvasEvent::Notice {
                    message: e.to_string(),
                });
                Err(SceneError::History(e).into())
            }
        }
    }

    pub fn redo(&mut self) -> Result<()> {
        self.flush_pending();
        match self.history.redo(&mut self.canvas) {
            Ok(()) => {
                self.canvas.request_render();
                Ok(())
            }
            Err(e) => {
                self.canvas.notify(CanvasEvent::Notice {
                    message: e.to_string(),
                });
                Err(SceneError::History(e).into())
            }
        }
    }

    /// Delete the selected star. Returns its id, or `None` when nothing
    /// was selected.
    pub fn delete_selected(&mut self) -> Result<Option<ObjectId>> {
        let Some(id) = self.canvas.selected() else {
            return Ok(None);
        };

        self.flush_pending();
        let removed = self.canvas.remove(id)?;
        self.canvas.request_render();
        self.pump();
        self.history.record(removed_command(id, shared(Some(removed))))?;

        tracing::info!("Deleted star {}", id);
        Ok(Some(id))
    }

    pub fn select(&mut self, id: Option<ObjectId>) -> Result<()> {
        self.canvas.select(id)?;
        self.canvas.request_render();
        self.pump();
        Ok(())
    }

    /// Native move gesture.
    pub fn move_object(&mut self, id: ObjectId, left: f64, top: f64) -> Result<()> {
        self.flush_pending();
        self.canvas.move_object(id, left, top)?;
        self.pump();
        Ok(())
    }

    /// Native scale gesture.
    pub fn scale_object(&mut self, id: ObjectId, scale_x: f64, scale_y: f64) -> Result<()> {
        self.flush_pending();
        self.canvas.scale_object(id, scale_x, scale_y)?;
        self.pump();
        Ok(())
    }

    /// Drag a handle of `id` by `delta` canvas units.
    ///
    /// Custom handles reshape the star immediately and (re)arm its commit
    /// timer; the history entry is written by [`poll`](Self::poll) once the
    /// drag has been idle for the debounce window. Native handles scale
    /// the object; the whole drag becomes one transform entry once it has
    /// been idle for the same window.
    pub fn drag_handle(&mut self, id: ObjectId, key: HandleKey, delta: Point) -> Result<()> {
        let now = self.clock.now();
        let object = self.canvas.object_mut(id)?;

        match key.drag(object, delta) {
            HandleDrag::Reshape => {
                object.arm_commit(now);
                self.canvas.request_render();
            }
            HandleDrag::Scale { scale_x, scale_y } => {
                self.canvas.resize_object(id, scale_x, scale_y, now)?;
            }
        }
        Ok(())
    }

    /// Like [`drag_handle`](Self::drag_handle) with the handle given by name.
    pub fn drag_handle_named(&mut self, id: ObjectId, name: &str, delta: Point) -> Result<()> {
        let key = HandleKey::from_name(name).ok_or_else(|| SceneError::UnknownHandle {
            id,
            key: name.to_string(),
        })?;
        self.drag_handle(id, key, delta)
    }

    pub fn handle_positions(&self, id: ObjectId) -> Result<Vec<(HandleKey, Point)>> {
        Ok(handles::handle_positions(self.canvas.object(id)?))
    }

    /// The handle of the selected star under `point`, if any.
    pub fn handle_at(&self, point: Point) -> Option<(ObjectId, HandleKey)> {
        let object = self.canvas.selected_object()?;
        handles::handle_at(object, point).map(|key| (object.id(), key))
    }

    /// Commit every handle drag whose debounce window has passed.
    /// Returns the number of history entries written.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let resized = self.canvas.finish_gestures(Some(now));
        self.pump();
        let due: Vec<_> = self
            .canvas
            .objects_mut()
            .iter_mut()
            .filter_map(|object| {
                object
                    .take_due_commit(now)
                    .map(|(before, after)| (object.id(), before, after))
            })
            .collect();
        resized + self.commit(due)
    }

    /// Commit every pending handle drag now.
    pub fn flush_pending(&mut self) -> usize {
        let resized = self.canvas.finish_gestures(None);
        self.pump();
        let pending: Vec<_> = self
            .canvas
            .objects_mut()
            .iter_mut()
            .filter_map(|object| {
                object
                    .take_pending_commit()
                    .map(|(before, after)| (object.id(), before, after))
            })
            .collect();
        resized + self.commit(pending)
    }

    fn commit(&mut self, edits: Vec<(ObjectId, StarSnapshot, StarSnapshot)>) -> usize {
        let mut recorded = 0;
        for (id, before, after) in edits {
            if before == after {
                tracing::debug!("Star {} drag ended where it started", id);
                continue;
            }
            if self.history.record(reshape_command(id, before, after)).is_ok() {
                recorded += 1;
            }
        }
        recorded
    }

    /// True while a handle drag waits to be committed.
    pub fn has_pending(&self) -> bool {
        self.canvas
            .objects()
            .iter()
            .any(|o| o.commit_pending() || o.gesture_pending())
    }

    pub fn render_svg(&self) -> String {
        self.canvas.to_svg()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(self.canvas.to_json()?)
    }

    pub fn subscribe<F>(&mut self, filter: EventFilter<EventCategory>, listener: F) -> SubscriptionId
    where
        F: FnMut(&CanvasEvent) + 'static,
    {
        self.canvas.subscribe(filter, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.canvas.unsubscribe(id)
    }
}

impl std::fmt::Debug for SceneController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneController")
            .field("canvas", &self.canvas)
            .field("history", &self.history)
            .finish()
    }
}
