//! Gesture input for the card-swipe engine
//!
//! Pointer event types, the thresholds every gesture consumer shares, the
//! gesture predictor that turns samples into a velocity and an intent, and
//! the interaction lock that holds application updates back while a card is
//! in motion.

pub mod gesture_constants;
pub mod interaction_lock;
pub mod pointer;
pub mod predictor;
pub mod velocity;

pub use interaction_lock::{global_interaction_lock, InteractionLock, LockSubscription, TaskError};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use predictor::{
    GestureIntent, GesturePredictor, GestureSample, GestureState, PredictorThresholds,
};

pub mod prelude {
    pub use crate::interaction_lock::{global_interaction_lock, InteractionLock};
    pub use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
    pub use crate::predictor::{GestureIntent, GesturePredictor, GestureState};
}
