//! MyJSI navigation runtime
//!
//! Ties the navigation core from [`app_ui`] to a tokio runtime: deferred
//! transition steps run on timers, navigation events are broadcast to
//! subscribers, and the current screen is resolved through the screen
//! registry.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod driver;
pub mod logging;
pub mod settings;

pub use app::App;
pub use driver::NavigationDriver;
pub use logging::init_tracing;
pub use settings::load_config;

pub use app_state::{TimerId, TimerQueue};
pub use app_ui::*;
