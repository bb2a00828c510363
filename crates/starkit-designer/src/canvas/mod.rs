//! The scene: ordered star objects, selection and scene events.
//!
//! Every change raises a [`CanvasEvent`]. Events are delivered to observers
//! subscribed on the canvas right away and also queued; the scene controller
//! drains the queue to turn them into history entries.

mod serialization;
mod svg;
mod types;

pub use serialization::{ObjectDocument, SceneDocument, SCENE_VERSION};
pub use types::{CanvasEvent, EventCategory, ObjectId, StarObject, MIN_SCALE};

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use starkit_core::{EventBus, EventFilter, SceneError, SubscriptionId};
use starkit_settings::{CanvasSettings, ObjectStyle};

use crate::geometry::Point;
use crate::model::StarParameters;
use crate::transform::{ObjectEvent, ObjectTransform};

pub struct Canvas {
    width: f64,
    height: f64,
    objects: Vec<StarObject>,
    next_id: ObjectId,
    selected: Option<ObjectId>,
    render_requests: u64,
    pending: VecDeque<CanvasEvent>,
    bus: EventBus<CanvasEvent>,
    debounce: Duration,
}

impl Canvas {
    /// `debounce` is the commit delay given to every star on this canvas.
    pub fn new(settings: &CanvasSettings, debounce: Duration) -> Self {
        Self {
            width: settings.width,
            height: settings.height(),
            objects: Vec::new(),
            next_id: 1,
            selected: None,
            render_requests: 0,
            pending: VecDeque::new(),
            bus: EventBus::new(),
            debounce,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn add_star(&mut self, params: StarParameters, style: ObjectStyle) -> ObjectId {
        let id = self.next_id;
        self.next_id += 1;
        self.objects
            .push(StarObject::new(id, params, style, self.debounce));
        self.emit(CanvasEvent::ObjectAdded { id });
        id
    }

    /// Put a previously removed object back at `index` (or last).
    pub fn insert(&mut self, index: usize, object: StarObject) {
        let id = object.id();
        self.next_id = self.next_id.max(id + 1);
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
        self.emit(CanvasEvent::ObjectAdded { id });
    }

    /// Remove an object, returning its index and the object itself.
    pub fn remove(&mut self, id: ObjectId) -> Result<(usize, StarObject), SceneError> {
        let index = self.index_of(id)?;
        let object = self.objects.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
            self.emit(CanvasEvent::SelectionChanged { id: None });
        }
        self.emit(CanvasEvent::ObjectRemoved { id });
        Ok((index, object))
    }

    /// Remove every object at once. Raises a single `Cleared` event.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.selected = None;
        self.emit(CanvasEvent::Cleared);
    }

    pub fn get(&self, id: ObjectId) -> Option<&StarObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut StarObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn object(&self, id: ObjectId) -> Result<&StarObject, SceneError> {
        self.get(id).ok_or(SceneError::UnknownObject { id })
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut StarObject, SceneError> {
        self.get_mut(id).ok_or(SceneError::UnknownObject { id })
    }

    fn index_of(&self, id: ObjectId) -> Result<usize, SceneError> {
        self.objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(SceneError::UnknownObject { id })
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Objects in paint order.
    pub fn objects(&self) -> &[StarObject] {
        &self.objects
    }

    pub(crate) fn objects_mut(&mut self) -> &mut [StarObject] {
        &mut self.objects
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn select(&mut self, id: Option<ObjectId>) -> Result<(), SceneError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        if self.selected != id {
            self.selected = id;
            self.emit(CanvasEvent::SelectionChanged { id });
        }
        Ok(())
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn selected_object(&self) -> Option<&StarObject> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Native move gesture: place the shape origin at `(left, top)`.
    pub fn move_object(&mut self, id: ObjectId, left: f64, top: f64) -> Result<(), SceneError> {
        let object = self.object_mut(id)?;
        let before = object.transform();
        object.set_transform(ObjectTransform {
            left,
            top,
            ..before
        });
        object.fire(ObjectEvent::Moving);
        let after = object.transform();

        self.notify(CanvasEvent::Moving { id });
        self.emit(CanvasEvent::ObjectModified { id, before, after });
        self.request_render();
        Ok(())
    }

    /// Native scale gesture around the shape origin.
    pub fn scale_object(&mut self, id: ObjectId, scale_x: f64, scale_y: f64) -> Result<(), SceneError> {
        let (before, after) = self.apply_scale(id, scale_x, scale_y)?;
        self.emit(CanvasEvent::ObjectModified { id, before, after });
        Ok(())
    }

    /// One tick of a resize handle drag. Only `Scaling` is raised; the
    /// gesture is reported by [`finish_gestures`](Self::finish_gestures).
    pub fn resize_object(
        &mut self,
        id: ObjectId,
        scale_x: f64,
        scale_y: f64,
        now: Instant,
    ) -> Result<(), SceneError> {
        self.object_mut(id)?.begin_gesture(now);
        self.apply_scale(id, scale_x, scale_y)?;
        Ok(())
    }

    fn apply_scale(
        &mut self,
        id: ObjectId,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<(ObjectTransform, ObjectTransform), SceneError> {
        let object = self.object_mut(id)?;
        let before = object.transform();
        object.set_transform(ObjectTransform {
            scale_x,
            scale_y,
            ..before
        });
        object.fire(ObjectEvent::Scaling);
        let after = object.transform();

        self.notify(CanvasEvent::Scaling { id });
        self.request_render();
        Ok((before, after))
    }

    /// End resize gestures and raise `ObjectModified` for each one that
    /// changed its object. With `Some(now)` only gestures idle for the
    /// debounce window end; with `None` every running gesture does.
    /// Returns the number of events raised.
    pub fn finish_gestures(&mut self, now: Option<Instant>) -> usize {
        let finished: Vec<_> = self
            .objects
            .iter_mut()
            .filter_map(|object| {
                let gesture = match now {
                    Some(now) => object.take_due_gesture(now),
                    None => object.take_pending_gesture(),
                };
                gesture.map(|(before, after)| (object.id(), before, after))
            })
            .collect();

        let mut raised = 0;
        for (id, before, after) in finished {
            if before == after {
                tracing::debug!("Star {} resize ended where it started", id);
                continue;
            }
            self.emit(CanvasEvent::ObjectModified { id, before, after });
            raised += 1;
        }
        raised
    }

    /// Put back a transform (undo/redo of a gesture) and fire `Refresh`.
    /// A running resize gesture on the object is dropped.
    pub fn restore_transform(&mut self, id: ObjectId, transform: ObjectTransform) -> Result<(), SceneError> {
        let object = self.object_mut(id)?;
        object.cancel_gesture();
        object.set_transform(transform);
        object.fire(ObjectEvent::Refresh);
        self.notify(CanvasEvent::Refresh { id });
        self.request_render();
        Ok(())
    }

    pub fn request_render(&mut self) {
        self.render_requests += 1;
        self.notify(CanvasEvent::RenderRequested);
    }

    /// Number of renders requested since the canvas was created.
    pub fn render_requests(&self) -> u64 {
        self.render_requests
    }

    /// Deliver to observers and queue for the controller.
    pub fn emit(&mut self, event: CanvasEvent) {
        tracing::debug!("Canvas event {:?}", event);
        self.bus.publish(event.clone());
        self.pending.push_back(event);
    }

    /// Deliver to observers only.
    pub fn notify(&mut self, event: CanvasEvent) {
        self.bus.publish(event);
    }

    pub fn drain_events(&mut self) -> Vec<CanvasEvent> {
        self.pending.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn subscribe<F>(&mut self, filter: EventFilter<EventCategory>, listener: F) -> SubscriptionId
    where
        F: FnMut(&CanvasEvent) + 'static,
    {
        self.bus.subscribe(filter, listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("objects", &self.objects.len())
            .field("selected", &self.selected)
            .field("pending", &self.pending.len())
            .finish()
    }
}
