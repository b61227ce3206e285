//! Host collaborator bundle

use crate::schedule::{FrameScheduler, TimerService};
use crate::surface::SurfaceProvider;
use crate::target::TargetLocator;
use std::rc::Rc;

/// Everything an effect needs from its host environment
///
/// Build this once the host's display, frame clock and timers exist and hand
/// it to the effects that use them.
#[derive(Clone)]
pub struct Host {
    pub surfaces: Rc<dyn SurfaceProvider>,
    pub frames: Rc<dyn FrameScheduler>,
    pub timers: Rc<dyn TimerService>,
    /// Element geometry; without one, element targets fall back to the default origin
    pub locator: Option<Rc<dyn TargetLocator>>,
}

impl Host {
    pub fn new(
        surfaces: Rc<dyn SurfaceProvider>,
        frames: Rc<dyn FrameScheduler>,
        timers: Rc<dyn TimerService>,
    ) -> Self {
        Self {
            surfaces,
            frames,
            timers,
            locator: None,
        }
    }

    /// Set the element locator
    pub fn with_locator(mut self, locator: Rc<dyn TargetLocator>) -> Self {
        self.locator = Some(locator);
        self
    }
}
