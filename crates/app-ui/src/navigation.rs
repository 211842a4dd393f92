//! Navigation system for MyJSI
//!
//! This module provides:
//! - The back-stack of screen identifiers
//! - The navigation controller that owns the stack, the edge-swipe
//!   interpreter and the transition state
//! - Navigation events for observers
//!
//! The controller is a deterministic state machine. Time is passed in by
//! the caller as a [`Duration`] on a monotonic timeline; deferred stack
//! mutations sit in a [`TimerQueue`] until [`NavigationController::advance`]
//! is called at or after their due time.
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::NavigationController;
//! use app_ui::config::NavigationConfig;
//! use app_ui::transition::Viewport;
//! use std::time::Duration;
//!
//! let viewport = Viewport::new(1000.0, 800.0);
//! let mut nav = NavigationController::new(NavigationConfig::default(), viewport);
//! assert!(nav.navigate_to("products", Duration::ZERO));
//! assert_eq!(nav.transition().offset, -1000.0);
//! assert_eq!(nav.stack().depth(), 1);
//!
//! nav.advance(Duration::from_millis(100));
//! assert_eq!(nav.current().as_str(), "products");
//! ```

use app_state::schedule::TimerQueue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::NavigationConfig;
use crate::gesture::{
    GestureContext, GestureInterpreter, GestureUpdate, ReleaseDecision, SwipeRelease, TouchPoint,
};
use crate::screens::ScreenId;
use crate::theme::Theme;
use crate::transition::{TransitionFrame, TransitionRenderer, TransitionState, Viewport};

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The screen identifier
    pub id: ScreenId,
    /// Unique key for this entry
    pub key: String,
    /// Scroll position to restore
    #[serde(default)]
    pub scroll_position: f32,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(id: ScreenId) -> Self {
        Self {
            id,
            key: uuid::Uuid::new_v4().to_string(),
            scroll_position: 0.0,
        }
    }
}

/// Back-stack of visited screens (bottom to top)
///
/// Never empty: the root entry can't be popped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StackSnapshot")]
pub struct NavigationStack {
    /// Stack entries (bottom to top)
    entries: Vec<StackEntry>,
    /// Root screen
    root: ScreenId,
}

#[derive(Deserialize)]
struct StackSnapshot {
    entries: Vec<StackEntry>,
    root: ScreenId,
}

impl TryFrom<StackSnapshot> for NavigationStack {
    type Error = String;

    fn try_from(snapshot: StackSnapshot) -> Result<Self, Self::Error> {
        if snapshot.entries.is_empty() {
            return Err("navigation stack must not be empty".to_string());
        }
        Ok(Self {
            entries: snapshot.entries,
            root: snapshot.root,
        })
    }
}

impl NavigationStack {
    /// Create a new navigation stack with a root screen
    pub fn new(root: ScreenId) -> Self {
        Self {
            entries: vec![StackEntry::new(root.clone())],
            root,
        }
    }

    /// Push a screen onto the stack
    pub fn push(&mut self, id: ScreenId) {
        self.entries.push(StackEntry::new(id));
    }

    /// Pop the top screen (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Truncate to a fresh root entry
    pub fn reset(&mut self) {
        self.entries = vec![StackEntry::new(self.root.clone())];
    }

    /// Get the current (top) screen
    pub fn current(&self) -> &ScreenId {
        &self.current_entry().id
    }

    /// Get the screen underneath the top one
    pub fn previous(&self) -> Option<&ScreenId> {
        self.previous_entry().map(|e| &e.id)
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        // `entries` always holds the root entry
        &self.entries[self.entries.len() - 1]
    }

    /// Get mutable reference to current entry
    pub fn current_entry_mut(&mut self) -> &mut StackEntry {
        let top = self.entries.len() - 1;
        &mut self.entries[top]
    }

    /// Get the entry underneath the top one
    pub fn previous_entry(&self) -> Option<&StackEntry> {
        self.entries.len().checked_sub(2).map(|i| &self.entries[i])
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Get all entries
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Root screen
    pub fn root(&self) -> &ScreenId {
        &self.root
    }

    /// Identifiers bottom to top
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }
}

// =============================================================================
// Events
// =============================================================================

/// Kind of animated transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Forward navigation
    Push,
    /// Back button
    Back,
    /// Committed edge swipe
    SwipeBack,
    /// Cancelled edge swipe snapping back
    SwipeCancel,
}

/// Observable navigation changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// An eased transition began
    TransitionStarted {
        /// What kind
        kind: TransitionKind,
    },
    /// A screen was pushed after its transition
    Pushed {
        /// New top of stack
        screen: ScreenId,
    },
    /// The top screen was popped after its transition
    Popped {
        /// New top of stack
        screen: ScreenId,
    },
    /// A cancelled swipe finished snapping back
    SwipeCancelled,
    /// The stack was reset to home
    WentHome,
}

/// Deferred work waiting on a transition
#[derive(Debug, Clone, PartialEq)]
enum PendingTransition {
    Push(ScreenId),
    Pop,
    Settle,
}

// =============================================================================
// Navigation Controller
// =============================================================================

/// Owner of the back-stack and everything that mutates it
#[derive(Debug, Clone)]
pub struct NavigationController {
    config: NavigationConfig,
    stack: NavigationStack,
    transition: TransitionState,
    gestures: GestureInterpreter,
    renderer: TransitionRenderer,
    viewport: Viewport,
    timers: TimerQueue<PendingTransition>,
    events: Vec<NavigationEvent>,
}

impl NavigationController {
    /// Create a controller rooted at the configured home screen
    pub fn new(config: NavigationConfig, viewport: Viewport) -> Self {
        let home = ScreenId::new(config.home_screen.clone());
        Self {
            stack: NavigationStack::new(home.clone()),
            transition: TransitionState::rest(),
            gestures: GestureInterpreter::new(config.gesture.clone()),
            renderer: TransitionRenderer::new(home, config.timing.easing.clone()),
            viewport,
            timers: TimerQueue::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// The back-stack
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Current transition state
    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    /// Current viewport metrics
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Top of stack
    pub fn current(&self) -> &ScreenId {
        self.stack.current()
    }

    /// Screen underneath the top one
    pub fn previous(&self) -> Option<&ScreenId> {
        self.stack.previous()
    }

    /// Whether an eased transition is in flight
    pub fn is_animating(&self) -> bool {
        self.transition.animating
    }

    /// Whether a confirmed edge swipe is being tracked
    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Due time of the next deferred step
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Take the events emitted since the last call
    pub fn take_events(&mut self) -> Vec<NavigationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remember how far the current screen is scrolled
    pub fn set_scroll_position(&mut self, position: f32) {
        self.stack.current_entry_mut().scroll_position = position.max(0.0);
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Slide the current screen away and push `id` once it is off screen
    ///
    /// Ignored while another transition is running.
    pub fn navigate_to(&mut self, id: impl Into<ScreenId>, now: Duration) -> bool {
        let id = id.into();
        if self.transition.animating {
            tracing::debug!(screen = %id, "navigation ignored during transition");
            return false;
        }

        tracing::debug!(from = %self.stack.current(), to = %id, "navigating");
        self.gestures.reset();
        self.start_transition(
            TransitionKind::Push,
            -self.viewport.width,
            self.config.timing.push_ms,
            now,
            self.config.timing.push(),
            PendingTransition::Push(id),
        );
        true
    }

    /// Slide the current screen out to the right and pop it
    ///
    /// A no-op at the root or while another transition is running.
    pub fn go_back(&mut self, now: Duration) -> bool {
        if !self.stack.can_go_back() || self.transition.animating {
            return false;
        }

        tracing::debug!(from = %self.stack.current(), "going back");
        self.gestures.reset();
        self.start_transition(
            TransitionKind::Back,
            self.viewport.width,
            self.config.timing.back_ms,
            now,
            self.config.timing.back(),
            PendingTransition::Pop,
        );
        true
    }

    /// Reset to the home screen immediately
    ///
    /// Pending transitions are cancelled. Returns whether anything changed.
    pub fn go_home(&mut self) -> bool {
        let cancelled = self.timers.cancel_all();
        let was_moving = !self.transition.is_at_rest() || self.gestures.session().is_some();
        let had_history = self.stack.can_go_back();

        self.gestures.reset();
        self.transition = TransitionState::rest();
        if had_history {
            self.stack.reset();
        }

        let changed = had_history || was_moving || cancelled > 0;
        if changed {
            tracing::debug!(cancelled, "reset to home");
            self.events.push(NavigationEvent::WentHome);
        }
        changed
    }

    /// Update viewport metrics; offsets in flight are rescaled
    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport.width > 0.0 && self.transition.offset != 0.0 {
            self.transition.offset *= viewport.width / self.viewport.width;
        }
        self.viewport = viewport;
    }

    // -------------------------------------------------------------------------
    // Touch input
    // -------------------------------------------------------------------------

    /// Touch start; returns whether an edge-swipe session began
    ///
    /// A touch that lands while an earlier drag still holds the layer off
    /// its resting position snaps that drag back instead of starting over.
    pub fn touch_start(&mut self, point: TouchPoint) -> bool {
        if !self.transition.animating && self.transition.offset != 0.0 {
            tracing::debug!(offset = self.transition.offset, "abandoned drag, snapping back");
            self.gestures.reset();
            self.start_transition(
                TransitionKind::SwipeCancel,
                0.0,
                self.config.timing.cancel_ms,
                point.at,
                self.config.timing.cancel(),
                PendingTransition::Settle,
            );
            return false;
        }

        let ctx = GestureContext {
            depth: self.stack.depth(),
            animating: self.transition.animating,
        };
        self.gestures.touch_start(point, ctx)
    }

    /// Touch move; a drag update moves the current layer with the finger
    pub fn touch_move(&mut self, point: TouchPoint) -> GestureUpdate {
        let update = self.gestures.touch_move(point, self.viewport.width);
        if let GestureUpdate::Drag { offset } = update {
            self.transition = TransitionState::tracking(offset);
        }
        update
    }

    /// Touch end; commits or cancels a confirmed swipe
    pub fn touch_end(&mut self, at: Duration) -> Option<SwipeRelease> {
        let release = self.gestures.touch_end(at, self.viewport.width)?;

        match release.decision {
            ReleaseDecision::Commit => self.start_transition(
                TransitionKind::SwipeBack,
                self.viewport.width,
                self.config.timing.back_ms,
                at,
                self.config.timing.back(),
                PendingTransition::Pop,
            ),
            ReleaseDecision::Cancel => self.start_transition(
                TransitionKind::SwipeCancel,
                0.0,
                self.config.timing.cancel_ms,
                at,
                self.config.timing.cancel(),
                PendingTransition::Settle,
            ),
        }

        Some(release)
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Run every deferred step due at `now`; returns how many ran
    pub fn advance(&mut self, now: Duration) -> usize {
        let due = self.timers.drain_due(now);
        let count = due.len();

        for pending in due {
            match pending {
                PendingTransition::Push(id) => {
                    self.stack.push(id.clone());
                    self.events.push(NavigationEvent::Pushed { screen: id });
                }
                PendingTransition::Pop => {
                    if self.stack.pop() {
                        self.events.push(NavigationEvent::Popped {
                            screen: self.stack.current().clone(),
                        });
                    }
                }
                PendingTransition::Settle => {
                    self.events.push(NavigationEvent::SwipeCancelled);
                }
            }
            self.transition = TransitionState::rest();
            tracing::debug!(stack = ?self.stack.ids(), "transition finished");
        }

        count
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Lay out the current and previous screen layers
    pub fn render(&self, theme: &Theme) -> TransitionFrame {
        self.renderer
            .render(&self.stack, &self.transition, self.viewport, theme)
    }

    fn start_transition(
        &mut self,
        kind: TransitionKind,
        offset: f32,
        duration_ms: u32,
        now: Duration,
        delay: Duration,
        pending: PendingTransition,
    ) {
        self.transition = TransitionState::eased(offset, duration_ms);
        self.timers.schedule(now, delay, pending);
        self.events.push(NavigationEvent::TransitionStarted { kind });
    }
}
