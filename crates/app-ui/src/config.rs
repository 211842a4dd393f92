//! Navigation configuration
//!
//! Gesture thresholds and transition timings. Every field has a default
//! taken from [`crate::tokens`], so a partial JSON document only needs the
//! values it overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::tokens::{duration, easing, gesture};

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A numeric field is outside its allowed range
    #[error("Invalid value for {field}: {value} (expected {expected})")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Rejected value
        value: f32,
        /// Human readable constraint
        expected: &'static str,
    },

    /// A transition duration is zero
    #[error("Duration {0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The home screen identifier is empty
    #[error("Home screen identifier must not be empty")]
    EmptyHome,
}

/// Edge-swipe gesture thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GestureConfig {
    /// Width of the left-edge activation strip (px)
    pub activation_zone: f32,
    /// Displacement deciding horizontal vs vertical (px)
    pub direction_lock: f32,
    /// Required horizontal-to-vertical ratio
    pub direction_ratio: f32,
    /// Drag ceiling as a fraction of viewport width
    pub resistance_ceiling: f32,
    /// Distance fraction that always commits
    pub commit_distance: f32,
    /// Distance fraction that commits with enough velocity
    pub fling_distance: f32,
    /// Velocity (px/ms) required for a fling
    pub fling_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            activation_zone: gesture::ACTIVATION_ZONE,
            direction_lock: gesture::DIRECTION_LOCK,
            direction_ratio: gesture::DIRECTION_RATIO,
            resistance_ceiling: gesture::RESISTANCE_CEILING,
            commit_distance: gesture::COMMIT_DISTANCE,
            fling_distance: gesture::FLING_DISTANCE,
            fling_velocity: gesture::FLING_VELOCITY,
        }
    }
}

impl GestureConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("activationZone", self.activation_zone)?;
        positive("directionLock", self.direction_lock)?;
        at_least_one("directionRatio", self.direction_ratio)?;
        unit_fraction("resistanceCeiling", self.resistance_ceiling)?;
        unit_fraction("commitDistance", self.commit_distance)?;
        unit_fraction("flingDistance", self.fling_distance)?;
        positive("flingVelocity", self.fling_velocity)?;
        Ok(())
    }
}

/// Transition timings in milliseconds
///
/// These are both the delay before the deferred stack mutation and the
/// eased animation duration the renderer applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimingConfig {
    /// Forward push
    pub push_ms: u32,
    /// Back button and committed swipe
    pub back_ms: u32,
    /// Cancelled swipe snap-back
    pub cancel_ms: u32,
    /// CSS easing curve
    pub easing: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            push_ms: duration::PUSH,
            back_ms: duration::BACK,
            cancel_ms: duration::SWIPE_CANCEL,
            easing: easing::SCREEN_TRANSITION.to_string(),
        }
    }
}

impl TimingConfig {
    /// Push delay
    pub fn push(&self) -> Duration {
        Duration::from_millis(self.push_ms.into())
    }

    /// Back delay
    pub fn back(&self) -> Duration {
        Duration::from_millis(self.back_ms.into())
    }

    /// Snap-back delay
    pub fn cancel(&self) -> Duration {
        Duration::from_millis(self.cancel_ms.into())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.push_ms == 0 {
            return Err(ConfigError::ZeroDuration("pushMs"));
        }
        if self.back_ms == 0 {
            return Err(ConfigError::ZeroDuration("backMs"));
        }
        if self.cancel_ms == 0 {
            return Err(ConfigError::ZeroDuration("cancelMs"));
        }
        Ok(())
    }
}

/// Complete navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    /// Root screen identifier
    pub home_screen: String,
    /// Gesture thresholds
    pub gesture: GestureConfig,
    /// Transition timings
    pub timing: TimingConfig,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home_screen: "home".to_string(),
            gesture: GestureConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl NavigationConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NavigationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is within range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_screen.trim().is_empty() {
            return Err(ConfigError::EmptyHome);
        }
        self.gesture.validate()?;
        self.timing.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "> 0",
        })
    }
}

fn at_least_one(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: ">= 1",
        })
    }
}

fn unit_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "in (0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tokens() {
        let config = NavigationConfig::default();
        assert_eq!(config.home_screen, "home");
        assert_eq!(config.gesture.activation_zone, 50.0);
        assert_eq!(config.timing.push(), Duration::from_millis(100));
        assert_eq!(config.timing.cancel(), Duration::from_millis(150));
        assert_eq!(config.timing.back(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"gesture": {"activationZone": 30}, "timing": {"backMs": 250}}"#;
        let config = NavigationConfig::from_json(json).unwrap();
        assert_eq!(config.gesture.activation_zone, 30.0);
        assert_eq!(config.gesture.direction_lock, 15.0);
        assert_eq!(config.timing.back_ms, 250);
        assert_eq!(config.timing.push_ms, 100);
        assert_eq!(config.home_screen, "home");
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = NavigationConfig::from_json("{}").unwrap();
        assert_eq!(config, NavigationConfig::default());
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = NavigationConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        let err =
            NavigationConfig::from_json(r#"{"gesture": {"commitDistance": 1.5}}"#).unwrap_err();
        match err {
            ConfigError::OutOfRange { field, .. } => assert_eq!(field, "commitDistance"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = NavigationConfig::from_json(r#"{"timing": {"cancelMs": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration("cancelMs")));
    }

    #[test]
    fn test_rejects_empty_home() {
        let err = NavigationConfig::from_json(r#"{"homeScreen": "  "}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyHome));
        assert_eq!(err.to_string(), "Home screen identifier must not be empty");
    }

    #[test]
    fn test_round_trip_uses_camel_case() {
        let json = serde_json::to_string(&NavigationConfig::default()).unwrap();
        assert!(json.contains("\"homeScreen\":\"home\""));
        assert!(json.contains("\"flingVelocity\""));
    }
}
