//! Testing utilities and harness for the card-swipe gesture engine

pub mod recorder;
pub mod testing;

pub use recorder::{CallbackEvent, CallbackRecorder};
pub use testing::{GestureTestRule, FRAME_INTERVAL_MS};

pub mod prelude {
    pub use crate::recorder::{CallbackEvent, CallbackRecorder};
    pub use crate::testing::{GestureTestRule, FRAME_INTERVAL_MS};
}
