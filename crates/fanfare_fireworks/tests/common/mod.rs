//! Shared headless host for the integration tests

#![allow(dead_code)]

use fanfare_animation::HostScheduler;
use fanfare_core::Size;
use fanfare_fireworks::{FrameObserver, FrameStats, SessionId};
use fanfare_platform::headless::{HeadlessDisplay, HeadlessLocator};
use fanfare_platform::Host;
use std::cell::RefCell;
use std::rc::Rc;

pub struct TestHost {
    pub scheduler: HostScheduler,
    pub display: HeadlessDisplay,
    pub locator: Rc<HeadlessLocator>,
    pub host: Host,
}

impl TestHost {
    pub fn new(width: f32, height: f32) -> Self {
        let scheduler = HostScheduler::new();
        let display = HeadlessDisplay::new(Size::new(width, height));
        let locator = Rc::new(HeadlessLocator::new());
        let host = Host::new(
            Rc::new(display.clone()),
            Rc::new(scheduler.handle()),
            Rc::new(scheduler.handle()),
        )
        .with_locator(locator.clone());

        Self {
            scheduler,
            display,
            locator,
            host,
        }
    }
}

/// Records everything it is told
#[derive(Default)]
pub struct RecordingObserver {
    pub frames: RefCell<Vec<FrameStats>>,
    pub terminated: RefCell<Vec<(SessionId, u64)>>,
}

impl FrameObserver for RecordingObserver {
    fn on_frame(&self, stats: &FrameStats) {
        self.frames.borrow_mut().push(*stats);
    }

    fn on_terminated(&self, session: SessionId, frames: u64) {
        self.terminated.borrow_mut().push((session, frames));
    }
}
