//! Tokio driver for the navigation controller
//!
//! The [`NavigationController`] never reads a clock. This driver owns the
//! clock: it stamps commands and touches with the time elapsed since the
//! driver started, and keeps a single pump task sleeping until the next
//! deferred step is due.
//!
//! Commands must be issued from within a tokio runtime.

use app_ui::{
    GestureUpdate, NavigationConfig, NavigationController, NavigationEvent, ScreenId,
    SwipeRelease, Theme, TouchPoint, TransitionFrame, TransitionState, Viewport,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Capacity of the event channel
const EVENT_CAPACITY: usize = 64;

struct Inner {
    controller: Mutex<NavigationController>,
    epoch: Instant,
    events_tx: broadcast::Sender<NavigationEvent>,
    pump: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn publish(&self, events: Vec<NavigationEvent>) {
        for event in events {
            tracing::debug!(?event, "navigation event");
            // No subscribers is fine
            let _ = self.events_tx.send(event);
        }
    }
}

/// Runs a [`NavigationController`] on tokio timers
///
/// Cloning is cheap; clones share the same controller.
///
/// # Example
///
/// ```no_run
/// use myjsi::{NavigationConfig, NavigationDriver, Viewport};
///
/// #[tokio::main]
/// async fn main() {
///     let viewport = Viewport::new(390.0, 844.0);
///     let driver = NavigationDriver::new(NavigationConfig::default(), viewport);
///     let mut events = driver.subscribe();
///
///     driver.navigate_to("products");
///     let started = events.recv().await.unwrap();
///     let pushed = events.recv().await.unwrap();
///     println!("{started:?} then {pushed:?}");
/// }
/// ```
#[derive(Clone)]
pub struct NavigationDriver {
    inner: Arc<Inner>,
}

impl NavigationDriver {
    /// Create a driver; its timeline starts now
    pub fn new(config: NavigationConfig, viewport: Viewport) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                controller: Mutex::new(NavigationController::new(config, viewport)),
                epoch: Instant::now(),
                events_tx,
                pump: Mutex::new(None),
            }),
        }
    }

    /// Subscribe to navigation events
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.inner.events_tx.subscribe()
    }

    /// Read the controller
    pub fn with_controller<R>(&self, f: impl FnOnce(&NavigationController) -> R) -> R {
        f(&self.inner.controller.lock())
    }

    /// Identifiers bottom to top
    pub fn stack(&self) -> Vec<String> {
        self.with_controller(|c| c.stack().ids().into_iter().map(String::from).collect())
    }

    /// Top of stack
    pub fn current(&self) -> ScreenId {
        self.with_controller(|c| c.current().clone())
    }

    /// Current transition state
    pub fn transition(&self) -> TransitionState {
        self.with_controller(|c| *c.transition())
    }

    /// Lay out the current frame
    pub fn render(&self, theme: &Theme) -> TransitionFrame {
        self.with_controller(|c| c.render(theme))
    }

    /// Push `id` after the forward transition
    pub fn navigate_to(&self, id: impl Into<ScreenId>) -> bool {
        let id = id.into();
        self.command(|c, now| c.navigate_to(id, now))
    }

    /// Pop after the back transition
    pub fn go_back(&self) -> bool {
        self.command(|c, now| c.go_back(now))
    }

    /// Reset to home immediately
    pub fn go_home(&self) -> bool {
        self.command(|c, _| c.go_home())
    }

    /// Update viewport metrics
    pub fn resize(&self, viewport: Viewport) {
        self.command(|c, _| c.resize(viewport));
    }

    /// Remember the current screen's scroll offset
    pub fn set_scroll_position(&self, position: f32) {
        self.command(|c, _| c.set_scroll_position(position));
    }

    /// Touch start at viewport coordinates
    pub fn touch_start(&self, x: f32, y: f32) -> bool {
        self.command(|c, now| c.touch_start(TouchPoint::new(x, y, now)))
    }

    /// Touch move at viewport coordinates
    pub fn touch_move(&self, x: f32, y: f32) -> GestureUpdate {
        self.command(|c, now| c.touch_move(TouchPoint::new(x, y, now)))
    }

    /// Touch end
    pub fn touch_end(&self) -> Option<SwipeRelease> {
        self.command(|c, now| c.touch_end(now))
    }

    /// Run `f` against the controller, then publish events and re-arm the pump
    ///
    /// Events are published and the pump re-armed while the controller lock
    /// is held.
    fn command<R>(&self, f: impl FnOnce(&mut NavigationController, Duration) -> R) -> R {
        let mut controller = self.inner.controller.lock();
        let result = f(&mut controller, self.inner.now());

        self.inner.publish(controller.take_events());
        match controller.next_deadline() {
            Some(_) => self.rearm_pump(),
            None => self.stop_pump(),
        }
        result
    }

    fn stop_pump(&self) {
        if let Some(pump) = self.inner.pump.lock().take() {
            pump.abort();
        }
    }

    fn rearm_pump(&self) {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            loop {
                let deadline = inner.controller.lock().next_deadline();
                let Some(deadline) = deadline else {
                    break;
                };

                tokio::time::sleep_until(inner.epoch + deadline).await;

                {
                    let mut controller = inner.controller.lock();
                    controller.advance(inner.now());
                    inner.publish(controller.take_events());
                }
            }
        });

        if let Some(previous) = self.inner.pump.lock().replace(handle) {
            previous.abort();
        }
    }
}

impl std::fmt::Debug for NavigationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationDriver")
            .field("stack", &self.stack())
            .finish_non_exhaustive()
    }
}
