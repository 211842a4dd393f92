//! Application state primitives for MyJSI
//!
//! This crate provides the state building blocks that the UI layer drives,
//! most notably the cancellable timer queue used to choreograph screen
//! transitions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod schedule;

pub use schedule::{TimerId, TimerQueue};
