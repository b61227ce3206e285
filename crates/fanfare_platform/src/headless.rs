//! Headless host implementation
//!
//! An in-memory display and element locator. Surfaces record what they were
//! asked to draw instead of rasterizing, which makes the headless host the
//! backend for tests and for running effects without a window.

use crate::error::{PlatformError, Result};
use crate::surface::{Surface, SurfaceConfig, SurfaceProvider};
use crate::target::{ElementId, TargetLocator};
use fanfare_core::{DrawCommand, Rect, Size};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Identifier of a surface created by a [`HeadlessDisplay`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// What the display knows about one surface
#[derive(Clone, Debug)]
pub struct SurfaceRecord {
    pub config: SurfaceConfig,
    pub attached: bool,
    /// Number of frames presented
    pub frames: usize,
    /// Commands of the most recent frame
    pub last_frame: Vec<DrawCommand>,
}

struct DisplayState {
    viewport: Size,
    available: bool,
    next_id: u64,
    surfaces: FxHashMap<SurfaceId, SurfaceRecord>,
}

/// In-memory [`SurfaceProvider`]
///
/// Clones share the same display.
#[derive(Clone)]
pub struct HeadlessDisplay {
    state: Rc<RefCell<DisplayState>>,
}

impl HeadlessDisplay {
    pub fn new(viewport: Size) -> Self {
        Self {
            state: Rc::new(RefCell::new(DisplayState {
                viewport,
                available: true,
                next_id: 0,
                surfaces: FxHashMap::default(),
            })),
        }
    }

    /// Simulate a host without 2D drawing support
    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().available = available;
    }

    /// Number of surfaces currently attached
    pub fn attached_count(&self) -> usize {
        self.state
            .borrow()
            .surfaces
            .values()
            .filter(|s| s.attached)
            .count()
    }

    /// Number of surfaces ever created
    pub fn created_count(&self) -> usize {
        self.state.borrow().surfaces.len()
    }

    /// Ids of every surface ever created, oldest first
    pub fn surface_ids(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<_> = self.state.borrow().surfaces.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Snapshot of a surface's record
    pub fn surface(&self, id: SurfaceId) -> Option<SurfaceRecord> {
        self.state.borrow().surfaces.get(&id).cloned()
    }
}

impl SurfaceProvider for HeadlessDisplay {
    fn viewport(&self) -> Size {
        self.state.borrow().viewport
    }

    fn create_surface(&self, config: SurfaceConfig) -> Result<Box<dyn Surface>> {
        let mut state = self.state.borrow_mut();
        if !state.available {
            return Err(PlatformError::SurfaceUnavailable(
                "headless display has 2D drawing disabled".to_string(),
            ));
        }

        let id = SurfaceId(state.next_id);
        state.next_id += 1;
        state.surfaces.insert(
            id,
            SurfaceRecord {
                config: config.clone(),
                attached: true,
                frames: 0,
                last_frame: Vec::new(),
            },
        );
        tracing::trace!("Headless surface {:?} created at {:?}", id, config.size);

        Ok(Box::new(HeadlessSurface {
            id,
            size: config.size,
            state: Rc::clone(&self.state),
        }))
    }
}

/// Surface handed out by [`HeadlessDisplay`]
pub struct HeadlessSurface {
    id: SurfaceId,
    size: Size,
    state: Rc<RefCell<DisplayState>>,
}

impl HeadlessSurface {
    pub fn id(&self) -> SurfaceId {
        self.id
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn present(&mut self, commands: Vec<DrawCommand>) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(&self.id) {
            if record.attached {
                record.frames += 1;
                record.last_frame = commands;
            }
        }
    }

    fn remove(&mut self) {
        if let Some(record) = self.state.borrow_mut().surfaces.get_mut(&self.id) {
            record.attached = false;
        }
    }

    fn is_attached(&self) -> bool {
        self.state
            .borrow()
            .surfaces
            .get(&self.id)
            .map(|s| s.attached)
            .unwrap_or(false)
    }
}

/// In-memory [`TargetLocator`] backed by a table of element rects
#[derive(Default)]
pub struct HeadlessLocator {
    elements: RefCell<FxHashMap<ElementId, Rect>>,
}

impl HeadlessLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an element at `rect`
    pub fn insert(&self, element: ElementId, rect: Rect) {
        self.elements.borrow_mut().insert(element, rect);
    }

    /// Remove an element from the document
    pub fn detach(&self, element: ElementId) {
        self.elements.borrow_mut().remove(&element);
    }
}

impl TargetLocator for HeadlessLocator {
    fn bounding_rect(&self, element: ElementId) -> Result<Rect> {
        self.elements
            .borrow()
            .get(&element)
            .copied()
            .ok_or(PlatformError::TargetDetached(element))
    }
}
