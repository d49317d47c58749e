//! The visual node a controller drives.

use cardswipe_ui_graphics::{GraphicsLayer, Point};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct LayerNodeInner {
    layer: Cell<GraphicsLayer>,
    externally_driven: Cell<bool>,
    writes: Cell<u64>,
}

/// Shared handle to a card's graphics layer.
///
/// While a gesture or animation owns the node it is marked externally
/// driven, and writes coming from application state are refused so a stale
/// re-render cannot yank the card out from under the finger.
#[derive(Clone, Default)]
pub struct LayerNode {
    inner: Rc<LayerNodeInner>,
}

impl LayerNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self) -> GraphicsLayer {
        self.inner.layer.get()
    }

    pub fn translation(&self) -> Point {
        let layer = self.layer();
        Point::new(layer.translation_x, layer.translation_y)
    }

    /// Write from the gesture driver. Always applied.
    pub fn set_layer(&self, layer: GraphicsLayer) {
        self.inner.layer.set(layer);
        self.inner.writes.set(self.inner.writes.get() + 1);
    }

    /// Write from application state. Refused while externally driven.
    pub fn set_from_app(&self, layer: GraphicsLayer) -> bool {
        if self.is_externally_driven() {
            log::trace!("layer write from app refused while driven");
            return false;
        }
        self.set_layer(layer);
        true
    }

    pub fn is_externally_driven(&self) -> bool {
        self.inner.externally_driven.get()
    }

    pub fn set_externally_driven(&self, driven: bool) {
        self.inner.externally_driven.set(driven);
    }

    /// Number of layer writes so far.
    pub fn write_count(&self) -> u64 {
        self.inner.writes.get()
    }

    pub fn ptr_eq(&self, other: &LayerNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for LayerNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerNode")
            .field("layer", &self.layer())
            .field("externally_driven", &self.is_externally_driven())
            .finish()
    }
}
