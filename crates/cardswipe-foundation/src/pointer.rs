use cardswipe_ui_graphics::Point;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One raw pointer observation. Timestamps come from the consumer's clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point) -> Self {
        Self { id, kind, position }
    }

    pub fn down(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerEventKind::Down, Point::new(x, y))
    }

    pub fn moved(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerEventKind::Move, Point::new(x, y))
    }

    pub fn up(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerEventKind::Up, Point::new(x, y))
    }

    pub fn cancel(id: PointerId, x: f32, y: f32) -> Self {
        Self::new(id, PointerEventKind::Cancel, Point::new(x, y))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}
