//! The fireworks entry point

use crate::config::FireworksConfig;
use crate::error::Result;
use crate::observer::FrameObserver;
use crate::origin::{resolve_origin, Target};
use crate::session::{Session, SessionHandle, SessionSetup};
use crate::show::Show;
use fanfare_platform::{Host, SurfaceConfig};
use std::cell::RefCell;
use std::rc::Rc;

/// Launches fireworks sessions on a host
///
/// Every call starts an independent session with its own surface; sessions
/// never share state with each other or with the `Fireworks` that started
/// them.
///
/// # Example
///
/// ```
/// use fanfare_animation::HostScheduler;
/// use fanfare_core::Size;
/// use fanfare_fireworks::{Fireworks, FireworksConfig};
/// use fanfare_platform::headless::HeadlessDisplay;
/// use fanfare_platform::Host;
/// use std::rc::Rc;
///
/// let scheduler = HostScheduler::new();
/// let display = HeadlessDisplay::new(Size::new(1024.0, 768.0));
/// let host = Host::new(
///     Rc::new(display.clone()),
///     Rc::new(scheduler.handle()),
///     Rc::new(scheduler.handle()),
/// );
///
/// let fireworks = Fireworks::new(host, FireworksConfig::celebration()).unwrap();
/// fireworks.trigger(None);
/// assert_eq!(display.attached_count(), 1);
///
/// scheduler.run_until_idle(1000);
/// assert_eq!(display.attached_count(), 0);
/// ```
#[derive(Clone)]
pub struct Fireworks {
    host: Host,
    config: Rc<FireworksConfig>,
    observer: Option<Rc<dyn FrameObserver>>,
    seeds: Option<Rc<RefCell<fastrand::Rng>>>,
}

impl Fireworks {
    /// Create a launcher, rejecting unusable configurations
    pub fn new(host: Host, config: FireworksConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            host,
            config: Rc::new(config),
            observer: None,
            seeds: None,
        })
    }

    /// Launcher with the reference celebration
    pub fn with_defaults(host: Host) -> Self {
        Self {
            host,
            config: Rc::new(FireworksConfig::celebration()),
            observer: None,
            seeds: None,
        }
    }

    /// Report every frame of every session to `observer`
    pub fn with_observer(mut self, observer: Rc<dyn FrameObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Seed the random source, making sessions reproducible
    ///
    /// Each session forks its own generator from one seeded here, so
    /// consecutive sessions still differ.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seeds = Some(Rc::new(RefCell::new(fastrand::Rng::with_seed(seed))));
        self
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Fire and forget
    ///
    /// Failures are logged and otherwise ignored.
    pub fn trigger(&self, target: Option<Target>) {
        if let Err(e) = self.launch(target) {
            tracing::warn!("Fireworks skipped: {}", e);
        }
    }

    /// Start the standard show
    pub fn launch(&self, target: Option<Target>) -> Result<SessionHandle> {
        self.launch_show(target, Show::standard(&self.config))
    }

    /// Fire-and-forget finale
    pub fn trigger_finale(&self, target: Option<Target>) {
        if let Err(e) = self.launch_finale(target) {
            tracing::warn!("Fireworks finale skipped: {}", e);
        }
    }

    pub fn launch_finale(&self, target: Option<Target>) -> Result<SessionHandle> {
        self.launch_show(target, Show::finale(&self.config))
    }

    /// Start a session playing `show`
    pub fn launch_show(&self, target: Option<Target>, show: Show) -> Result<SessionHandle> {
        let viewport = self.host.surfaces.viewport();
        let surface_config = SurfaceConfig::try_overlay(viewport)?;

        let origin = resolve_origin(target, self.host.locator.as_deref(), viewport);
        let surface = self.host.surfaces.create_surface(surface_config)?;

        let setup = SessionSetup {
            config: Rc::clone(&self.config),
            observer: self.observer.clone(),
            origin,
            viewport,
            surface,
            rng: self.session_rng(),
        };
        Ok(Session::start(&self.host, setup, show))
    }

    fn session_rng(&self) -> fastrand::Rng {
        match &self.seeds {
            Some(seeds) => seeds.borrow_mut().fork(),
            None => fastrand::Rng::new(),
        }
    }
}

/// Fire the reference celebration at `target`
///
/// Never fails: a host that cannot show it is logged and left alone.
pub fn show_fireworks(host: &Host, target: Option<Target>) {
    Fireworks::with_defaults(host.clone()).trigger(target);
}
