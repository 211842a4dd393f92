//! Design tokens for MyJSI
//!
//! Animation durations, easing curves, gesture thresholds and layer
//! ordering. The navigation controller and the transition renderer both
//! read their timing from here so that deferred stack mutations and the
//! eased transforms never drift apart.

// =============================================================================
// Animation Tokens
// =============================================================================

/// Animation duration tokens (in milliseconds)
pub mod duration {
    /// Instant (0ms)
    pub const INSTANT: u32 = 0;
    /// Fast (100ms)
    pub const FAST: u32 = 100;
    /// Normal (150ms)
    pub const NORMAL: u32 = 150;
    /// Moderate (200ms)
    pub const MODERATE: u32 = 200;

    /// Forward push: current screen slides off before the stack swaps
    pub const PUSH: u32 = FAST;
    /// Cancelled swipe snapping back to rest
    pub const SWIPE_CANCEL: u32 = NORMAL;
    /// Back button (and committed swipe) sliding the current screen away
    pub const BACK: u32 = MODERATE;
}

/// Easing functions
pub mod easing {
    /// Linear
    pub const LINEAR: &str = "linear";
    /// Ease out
    pub const EASE_OUT: &str = "cubic-bezier(0, 0, 0.2, 1)";
    /// Ease in out
    pub const EASE_IN_OUT: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

    /// Curve applied to screen transitions
    pub const SCREEN_TRANSITION: &str = EASE_OUT;
}

// =============================================================================
// Gesture Tokens
// =============================================================================

/// Edge-swipe thresholds (logical pixels unless stated otherwise)
pub mod gesture {
    /// Width of the strip at the left edge where a back-swipe may begin
    pub const ACTIVATION_ZONE: f32 = 50.0;
    /// Displacement that decides between horizontal swipe and vertical scroll
    pub const DIRECTION_LOCK: f32 = 15.0;
    /// Horizontal displacement must exceed vertical by this factor
    pub const DIRECTION_RATIO: f32 = 1.5;
    /// Drag ceiling as a fraction of viewport width
    pub const RESISTANCE_CEILING: f32 = 0.8;
    /// Distance (fraction of width) that commits regardless of speed
    pub const COMMIT_DISTANCE: f32 = 0.25;
    /// Distance (fraction of width) that commits when released fast enough
    pub const FLING_DISTANCE: f32 = 0.15;
    /// Release velocity (px/ms) needed together with [`FLING_DISTANCE`]
    pub const FLING_VELOCITY: f32 = 0.3;
}

// =============================================================================
// Z-Index Tokens
// =============================================================================

/// Z-index layers
pub mod z_index {
    /// Screen parked underneath during a transition
    pub const PREVIOUS_SCREEN: i32 = 0;
    /// Screen on top of the stack
    pub const CURRENT_SCREEN: i32 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_durations_are_asymmetric() {
        assert_eq!(duration::PUSH, 100);
        assert_eq!(duration::SWIPE_CANCEL, 150);
        assert_eq!(duration::BACK, 200);
    }

    #[test]
    fn test_fling_is_shorter_than_commit() {
        assert!(gesture::FLING_DISTANCE < gesture::COMMIT_DISTANCE);
        assert!(gesture::COMMIT_DISTANCE < gesture::RESISTANCE_CEILING);
    }

    #[test]
    fn test_current_screen_above_previous() {
        assert!(z_index::CURRENT_SCREEN > z_index::PREVIOUS_SCREEN);
    }
}
