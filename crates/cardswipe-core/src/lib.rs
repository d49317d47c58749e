//! Core runtime for the card-swipe gesture engine.
//!
//! Animations in this workspace never own a thread or a timer. They register
//! frame callbacks on a [`Runtime`], and the host drains those callbacks once
//! per display refresh. Everything here is single-threaded.

pub mod collections;
mod frame_clock;
mod owned;
pub mod platform;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use owned::Owned;
pub use platform::{Clock, ManualClock, RuntimeScheduler, SystemClock};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

/// Nanoseconds in one millisecond, for frame-time conversions.
pub const NANOS_PER_MILLI: u64 = 1_000_000;
