//! Edge-swipe back gesture
//!
//! Turns a single pointer stream into either a live, resisted drag offset
//! or a commit/cancel decision on release.
//!
//! A session only starts when the touch lands inside the activation strip
//! at the left edge, there is a screen to go back to, and no transition is
//! running. The first few pixels of movement decide the direction:
//!
//! ```text
//! Idle --start--> Pending --dx > 15 && dx > 1.5|dy|--> Horizontal --end--> Commit | Cancel
//!                    |
//!                    +--|dy| > 15--> Idle (native scroll keeps the touch)
//! ```
//!
//! Only the first touch point is tracked.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GestureConfig;

// =============================================================================
// Pure helpers
// =============================================================================

/// Diminishing-returns drag curve
///
/// `raw` is clamped to `[0, ceiling]` and mapped to
/// `raw * (1 - raw / (2 * ceiling))`. The output is monotonically
/// non-decreasing and tops out at `ceiling / 2`.
pub fn resist(raw: f32, ceiling: f32) -> f32 {
    if ceiling <= 0.0 {
        return 0.0;
    }
    let raw = raw.clamp(0.0, ceiling);
    (raw * (1.0 - raw / (2.0 * ceiling))).max(0.0)
}

/// Rendered offset for a horizontal displacement on a viewport
pub fn drag_offset(dx: f32, viewport_width: f32, ceiling_ratio: f32) -> f32 {
    resist(dx, viewport_width * ceiling_ratio)
}

/// Release velocity in px/ms
pub fn release_velocity(distance: f32, elapsed: Duration) -> f32 {
    // Sub-millisecond gestures count as one millisecond
    let elapsed_ms = (elapsed.as_micros() as f32 / 1000.0).max(1.0);
    distance / elapsed_ms
}

/// Decide whether a released swipe goes back
pub fn decide_release(
    distance: f32,
    velocity: f32,
    viewport_width: f32,
    config: &GestureConfig,
) -> ReleaseDecision {
    if viewport_width <= 0.0 {
        return ReleaseDecision::Cancel;
    }

    let progress = distance / viewport_width;
    let far_enough = progress >= config.commit_distance;
    let flung = progress >= config.fling_distance && velocity > config.fling_velocity;

    if far_enough || flung {
        ReleaseDecision::Commit
    } else {
        ReleaseDecision::Cancel
    }
}

// =============================================================================
// Session
// =============================================================================

/// A single pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Viewport X (px)
    pub x: f32,
    /// Viewport Y (px)
    pub y: f32,
    /// Timestamp on the controller's timeline
    pub at: Duration,
}

impl TouchPoint {
    /// Create a touch sample
    pub fn new(x: f32, y: f32, at: Duration) -> Self {
        Self { x, y, at }
    }
}

/// Direction classification of a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    /// Touch is in the edge strip but direction is not decided yet
    Pending,
    /// Confirmed horizontal back-swipe
    Horizontal,
}

/// Scratch state for one touch interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureSession {
    /// Where the touch landed
    pub start_x: f32,
    /// Where the touch landed
    pub start_y: f32,
    /// Most recent X
    pub last_x: f32,
    /// When the touch landed
    pub started_at: Duration,
    /// Direction classification
    pub phase: GesturePhase,
}

impl GestureSession {
    fn begin(point: TouchPoint) -> Self {
        Self {
            start_x: point.x,
            start_y: point.y,
            last_x: point.x,
            started_at: point.at,
            phase: GesturePhase::Pending,
        }
    }

    /// Net horizontal displacement so far
    pub fn distance(&self) -> f32 {
        self.last_x - self.start_x
    }

    /// Check if the session has been confirmed as a back-swipe
    pub fn is_horizontal(&self) -> bool {
        self.phase == GesturePhase::Horizontal
    }
}

/// Facts the interpreter needs from its owner at touch start
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Current back-stack depth
    pub depth: usize,
    /// Whether a transition is running
    pub animating: bool,
}

/// Result of feeding a move event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    /// No session is active
    Ignored,
    /// Direction still undecided
    Pending,
    /// Classified as vertical scroll; the session is gone
    Cancelled,
    /// Live back-swipe with the resisted offset to render
    Drag {
        /// Offset for the current screen layer
        offset: f32,
    },
}

impl GestureUpdate {
    /// Whether native scrolling must be suppressed for this event
    pub fn prevents_default(&self) -> bool {
        matches!(self, GestureUpdate::Drag { .. })
    }
}

/// Outcome of a released back-swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseDecision {
    /// Go back
    Commit,
    /// Snap back to rest
    Cancel,
}

/// Measurements taken when a confirmed swipe ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeRelease {
    /// Commit or cancel
    pub decision: ReleaseDecision,
    /// Net horizontal displacement (px)
    pub distance: f32,
    /// Release velocity (px/ms)
    pub velocity: f32,
}

// =============================================================================
// Interpreter
// =============================================================================

/// Edge-swipe gesture interpreter
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    config: GestureConfig,
    session: Option<GestureSession>,
}

impl GestureInterpreter {
    /// Create an interpreter with the given thresholds
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Thresholds in use
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The live session, if any
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Whether a confirmed back-swipe is in progress
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(GestureSession::is_horizontal)
    }

    /// Handle touch start; returns whether a session began
    pub fn touch_start(&mut self, point: TouchPoint, ctx: GestureContext) -> bool {
        if ctx.animating || ctx.depth <= 1 || point.x >= self.config.activation_zone {
            self.session = None;
            return false;
        }

        tracing::debug!(x = point.x, y = point.y, depth = ctx.depth, "edge swipe armed");
        self.session = Some(GestureSession::begin(point));
        true
    }

    /// Handle touch move
    pub fn touch_move(&mut self, point: TouchPoint, viewport_width: f32) -> GestureUpdate {
        let Some(session) = self.session.as_mut() else {
            return GestureUpdate::Ignored;
        };

        let dx = point.x - session.start_x;
        let dy = (point.y - session.start_y).abs();
        session.last_x = point.x;

        if session.phase == GesturePhase::Pending {
            if dx > self.config.direction_lock && dx > self.config.direction_ratio * dy {
                tracing::debug!(dx, dy, "edge swipe confirmed horizontal");
                session.phase = GesturePhase::Horizontal;
            } else if dy > self.config.direction_lock {
                tracing::debug!(dx, dy, "edge swipe yielded to vertical scroll");
                self.session = None;
                return GestureUpdate::Cancelled;
            } else {
                return GestureUpdate::Pending;
            }
        }

        let offset = drag_offset(dx, viewport_width, self.config.resistance_ceiling);
        tracing::trace!(dx, offset, "edge swipe drag");
        GestureUpdate::Drag { offset }
    }

    /// Handle touch end; the session is always discarded
    ///
    /// Returns a release only when the session had been confirmed as a
    /// horizontal swipe.
    pub fn touch_end(&mut self, at: Duration, viewport_width: f32) -> Option<SwipeRelease> {
        let session = self.session.take()?;
        if !session.is_horizontal() {
            return None;
        }

        let distance = session.distance();
        let velocity = release_velocity(distance, at.saturating_sub(session.started_at));
        let decision = decide_release(distance, velocity, viewport_width, &self.config);

        tracing::debug!(distance, velocity, ?decision, "edge swipe released");
        Some(SwipeRelease {
            decision,
            distance,
            velocity,
        })
    }

    /// Drop any live session without a decision
    pub fn reset(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn armed(depth: usize) -> GestureContext {
        GestureContext {
            depth,
            animating: false,
        }
    }

    fn interpreter() -> GestureInterpreter {
        GestureInterpreter::new(GestureConfig::default())
    }

    // ==========================================================================
    // Resistance Curve
    // ==========================================================================

    #[test]
    fn test_resist_worked_example() {
        // 0.8 * 1000 ceiling, 400px drag
        assert_eq!(resist(400.0, 800.0), 300.0);
        assert_eq!(drag_offset(400.0, 1000.0, 0.8), 300.0);
    }

    #[test]
    fn test_resist_bounds() {
        assert_eq!(resist(-50.0, 800.0), 0.0);
        assert_eq!(resist(0.0, 800.0), 0.0);
        assert_eq!(resist(800.0, 800.0), 400.0);
        assert_eq!(resist(5000.0, 800.0), 400.0);
        assert_eq!(resist(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_resist_is_monotonic() {
        let ceiling = 800.0;
        let mut previous = 0.0;
        for step in 0..=1000 {
            let value = resist(step as f32, ceiling);
            assert!(value >= previous, "not monotonic at {}", step);
            assert!(value <= ceiling);
            previous = value;
        }
    }

    proptest! {
        #[test]
        fn resist_stays_within_half_ceiling(raw in -2000.0f32..4000.0, ceiling in 1.0f32..2000.0) {
            let value = resist(raw, ceiling);
            prop_assert!(value >= 0.0);
            prop_assert!(value <= ceiling / 2.0 + 1e-3);
        }

        #[test]
        fn resist_never_decreases(
            a in 0.0f32..2000.0,
            b in 0.0f32..2000.0,
            ceiling in 1.0f32..2000.0
        ) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resist(low, ceiling) <= resist(high, ceiling) + 1e-3);
        }
    }

    // ==========================================================================
    // Release Decision
    // ==========================================================================

    #[test]
    fn test_commit_at_quarter_width_regardless_of_velocity() {
        let config = GestureConfig::default();
        assert_eq!(decide_release(375.0, 0.0, 1500.0, &config), ReleaseDecision::Commit);
    }

    #[test]
    fn test_slow_release_below_quarter_cancels() {
        let config = GestureConfig::default();
        assert_eq!(decide_release(374.0, 0.29, 1500.0, &config), ReleaseDecision::Cancel);
    }

    #[test]
    fn test_fast_release_past_fling_distance_commits() {
        let config = GestureConfig::default();
        assert_eq!(decide_release(225.0, 0.31, 1500.0, &config), ReleaseDecision::Commit);
        assert_eq!(decide_release(224.0, 5.0, 1500.0, &config), ReleaseDecision::Cancel);
    }

    #[test]
    fn test_zero_width_never_commits() {
        let config = GestureConfig::default();
        assert_eq!(decide_release(500.0, 9.0, 0.0, &config), ReleaseDecision::Cancel);
    }

    #[test]
    fn test_release_velocity() {
        assert_eq!(release_velocity(280.0, ms(400)), 0.7);
        assert_eq!(release_velocity(30.0, Duration::ZERO), 30.0);
    }

    // ==========================================================================
    // Activation
    // ==========================================================================

    #[test]
    fn test_activation_zone_boundary() {
        let mut gestures = interpreter();
        assert!(gestures.touch_start(TouchPoint::new(49.0, 300.0, ms(0)), armed(2)));
        assert!(gestures.session().is_some());

        assert!(!gestures.touch_start(TouchPoint::new(51.0, 300.0, ms(0)), armed(2)));
        assert!(gestures.session().is_none());
    }

    #[test]
    fn test_no_session_at_root() {
        let mut gestures = interpreter();
        assert!(!gestures.touch_start(TouchPoint::new(10.0, 300.0, ms(0)), armed(1)));
    }

    #[test]
    fn test_no_session_while_animating() {
        let mut gestures = interpreter();
        let ctx = GestureContext {
            depth: 3,
            animating: true,
        };
        assert!(!gestures.touch_start(TouchPoint::new(10.0, 300.0, ms(0)), ctx));
        assert_eq!(
            gestures.touch_move(TouchPoint::new(300.0, 300.0, ms(10)), 1000.0),
            GestureUpdate::Ignored
        );
    }

    // ==========================================================================
    // Direction Classification
    // ==========================================================================

    #[test]
    fn test_small_moves_stay_pending() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));

        let update = gestures.touch_move(TouchPoint::new(30.0, 310.0, ms(16)), 1000.0);
        assert_eq!(update, GestureUpdate::Pending);
        assert!(!update.prevents_default());
        assert!(!gestures.is_dragging());
    }

    #[test]
    fn test_horizontal_confirmation() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));

        let update = gestures.touch_move(TouchPoint::new(300.0, 310.0, ms(100)), 1000.0);
        match update {
            GestureUpdate::Drag { offset } => {
                assert_eq!(offset, drag_offset(280.0, 1000.0, 0.8));
            }
            other => panic!("expected drag, got {:?}", other),
        }
        assert!(update.prevents_default());
        assert!(gestures.is_dragging());
    }

    #[test]
    fn test_diagonal_move_needs_ratio() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));

        // dx 20 > 15 but not > 1.5 * 14
        assert_eq!(
            gestures.touch_move(TouchPoint::new(40.0, 314.0, ms(16)), 1000.0),
            GestureUpdate::Pending
        );
    }

    #[test]
    fn test_vertical_move_cancels_session() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));

        assert_eq!(
            gestures.touch_move(TouchPoint::new(20.0, 500.0, ms(50)), 1000.0),
            GestureUpdate::Cancelled
        );
        assert!(gestures.session().is_none());

        // later horizontal motion in the same touch is ignored
        assert_eq!(
            gestures.touch_move(TouchPoint::new(400.0, 500.0, ms(80)), 1000.0),
            GestureUpdate::Ignored
        );
        assert_eq!(gestures.touch_end(ms(100), 1000.0), None);
    }

    #[test]
    fn test_leftward_drag_never_confirms() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(40.0, 300.0, ms(0)), armed(2));
        assert_eq!(
            gestures.touch_move(TouchPoint::new(0.0, 300.0, ms(16)), 1000.0),
            GestureUpdate::Pending
        );
    }

    #[test]
    fn test_drag_back_past_origin_floors_at_zero() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));
        gestures.touch_move(TouchPoint::new(200.0, 300.0, ms(50)), 1000.0);

        assert_eq!(
            gestures.touch_move(TouchPoint::new(5.0, 300.0, ms(100)), 1000.0),
            GestureUpdate::Drag { offset: 0.0 }
        );
    }

    // ==========================================================================
    // Release
    // ==========================================================================

    #[test]
    fn test_release_commits_past_quarter() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));
        gestures.touch_move(TouchPoint::new(300.0, 310.0, ms(200)), 1000.0);

        let release = gestures.touch_end(ms(400), 1000.0).unwrap();
        assert_eq!(release.decision, ReleaseDecision::Commit);
        assert_eq!(release.distance, 280.0);
        assert_eq!(release.velocity, 0.7);
        assert!(gestures.session().is_none());
    }

    #[test]
    fn test_release_short_slow_swipe_cancels() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));
        gestures.touch_move(TouchPoint::new(120.0, 300.0, ms(500)), 1000.0);

        let release = gestures.touch_end(ms(1000), 1000.0).unwrap();
        assert_eq!(release.decision, ReleaseDecision::Cancel);
        assert!(gestures.session().is_none());
    }

    #[test]
    fn test_release_quick_flick_commits() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(10.0, 300.0, ms(0)), armed(2));
        gestures.touch_move(TouchPoint::new(180.0, 305.0, ms(100)), 1000.0);

        // 170px in 100ms: 17% of width at 1.7 px/ms
        let release = gestures.touch_end(ms(100), 1000.0).unwrap();
        assert_eq!(release.decision, ReleaseDecision::Commit);
    }

    #[test]
    fn test_release_without_confirmation_is_silent() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));
        gestures.touch_move(TouchPoint::new(25.0, 302.0, ms(16)), 1000.0);

        assert_eq!(gestures.touch_end(ms(50), 1000.0), None);
        assert!(gestures.session().is_none());
    }

    #[test]
    fn test_reset_drops_session() {
        let mut gestures = interpreter();
        gestures.touch_start(TouchPoint::new(20.0, 300.0, ms(0)), armed(2));
        gestures.reset();
        assert!(gestures.session().is_none());
    }
}
