//! Pure math/data for the card-swipe engine
//!
//! Geometry primitives and the graphics layer that the gesture controller
//! writes onto its visual node.

mod geometry;
mod layer;

pub use geometry::*;
pub use layer::*;

pub mod prelude {
    pub use crate::geometry::{AxisBounds, DragBounds, Point, Velocity};
    pub use crate::layer::{Affine, GraphicsLayer};
}
