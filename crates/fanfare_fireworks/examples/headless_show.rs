//! Headless Fireworks Demo
//!
//! Plays the celebration, the finale and a spark group against the headless
//! host in real time, logging session activity:
//! - A standard show aimed at a "completed task" element
//! - The finale half a second later, from the default origin
//! - A spark group on the shared overlay
//!
//! Run with:
//! RUST_LOG=fanfare_fireworks=trace cargo run -p fanfare_fireworks --example headless_show

use fanfare_animation::HostScheduler;
use fanfare_core::{Rect, Size};
use fanfare_fireworks::{Fireworks, FireworksConfig, SparkOverlay, Target, TracingObserver};
use fanfare_platform::headless::{HeadlessDisplay, HeadlessLocator};
use fanfare_platform::{ElementId, Host, TimerService};
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const TASK_CARD: ElementId = ElementId(42);

fn main() -> fanfare_fireworks::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let scheduler = HostScheduler::new();
    let display = HeadlessDisplay::new(Size::new(1280.0, 720.0));
    let locator = Rc::new(HeadlessLocator::new());
    locator.insert(TASK_CARD, Rect::new(860.0, 180.0, 320.0, 96.0));

    let host = Host::new(
        Rc::new(display.clone()),
        Rc::new(scheduler.handle()),
        Rc::new(scheduler.handle()),
    )
    .with_locator(locator);

    let fireworks = Fireworks::new(host.clone(), FireworksConfig::celebration())?
        .with_observer(Rc::new(TracingObserver));
    fireworks.launch(Some(Target::Element(TASK_CARD)))?;

    let finale = fireworks.clone();
    scheduler.handle().set_timeout(
        Duration::from_millis(500),
        Box::new(move || finale.trigger_finale(None)),
    );

    let sparks = SparkOverlay::new(host);
    sparks.show(Some(Target::Element(TASK_CARD)))?;

    let frames = scheduler.run_paced(Duration::from_secs(10));
    let created = display.created_count();
    let attached = display.attached_count();
    tracing::info!(
        "Demo finished after {} frames: {} surfaces created, {} still attached",
        frames,
        created,
        attached
    );

    Ok(())
}
