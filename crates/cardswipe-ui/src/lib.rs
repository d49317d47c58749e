//! Gesture controller for swipeable cards
//!
//! Binds pointer input to a [`LayerNode`], classifies each release and drives
//! the card through an exit or a snap-back, holding the interaction lock until
//! the motion settles.

pub mod controller;
pub mod layer_node;
pub mod options;

pub use cardswipe_animation::SwipeDirection;
pub use controller::{rubber_band, GestureController, OVERDRAG_RESISTANCE};
pub use layer_node::LayerNode;
pub use options::{SwipeAxis, SwipeCallbacks, SwipeOptions};

pub mod prelude {
    pub use crate::controller::GestureController;
    pub use crate::layer_node::LayerNode;
    pub use crate::options::{SwipeAxis, SwipeCallbacks, SwipeOptions};
    pub use cardswipe_animation::SwipeDirection;
}
