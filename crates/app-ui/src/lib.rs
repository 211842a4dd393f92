//! User interface core for MyJSI
//!
//! This crate provides the stack-based navigation layer of the app:
//! screen registry, back-stack, edge-swipe gesture interpretation and the
//! layout of the two screen layers during a transition, plus the theme and
//! timing tokens they share.
//!
//! # Modules
//!
//! - [`theme`] - Light/dark color tokens
//! - [`tokens`] - Durations, easing and gesture thresholds
//! - [`config`] - Serializable navigation configuration
//! - [`screens`] - Screen identifiers and the screen registry
//! - [`navigation`] - Back-stack and navigation controller
//! - [`gesture`] - Edge-swipe interpreter
//! - [`transition`] - Transition renderer
//!
//! # Example
//!
//! ```rust
//! use app_ui::{NavigationConfig, NavigationController, ScreenRegistry, Route, Viewport};
//! use std::time::Duration;
//!
//! let registry = ScreenRegistry::new();
//! let viewport = Viewport::new(390.0, 844.0);
//! let mut nav = NavigationController::new(NavigationConfig::default(), viewport);
//!
//! nav.navigate_to("products/category/lounge", Duration::ZERO);
//! nav.advance(Duration::from_millis(100));
//!
//! let screen = registry.resolve(nav.current());
//! assert_eq!(screen.route, Route::ProductCategory { category: "lounge".to_string() });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod gesture;
pub mod navigation;
pub mod screens;
pub mod theme;
pub mod tokens;
pub mod transition;

// Re-export commonly used types
pub use config::{ConfigError, GestureConfig, NavigationConfig, TimingConfig};

pub use gesture::{
    decide_release, drag_offset, resist, GestureInterpreter, GestureSession, GestureUpdate,
    ReleaseDecision, SwipeRelease, TouchPoint,
};

pub use navigation::{
    NavigationController, NavigationEvent, NavigationStack, StackEntry, TransitionKind,
};

pub use screens::{RegistryError, Route, RouteParams, ScreenDescriptor, ScreenId, ScreenRegistry};

pub use theme::{get_theme, Theme, ThemeName, ThemeState};

pub use transition::{
    LayerStyle, ScrollPolicy, TransitionFrame, TransitionRenderer, TransitionState, Viewport,
};
