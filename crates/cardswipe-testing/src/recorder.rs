use cardswipe_animation::{AnimationState, SwipeDirection};
use cardswipe_foundation::{GestureIntent, InteractionLock};
use cardswipe_ui::{LayerNode, SwipeCallbacks};
use std::cell::RefCell;
use std::rc::Rc;

/// One observed controller callback, with the context a test needs to check
/// ordering guarantees.
#[derive(Clone, Debug, PartialEq)]
pub enum CallbackEvent {
    DragStart,
    DragEnd(GestureIntent),
    Tap { locked: bool },
    SwipeLeft { card_x: f32, locked: bool },
    SwipeRight { card_x: f32, locked: bool },
    AnimationFrame(AnimationState),
    AnimationComplete { locked: bool },
    SwipeCommitted(SwipeDirection),
}

impl CallbackEvent {
    pub fn is_frame(&self) -> bool {
        matches!(self, CallbackEvent::AnimationFrame(_))
    }
}

/// Records every controller callback in order. Clones share the log.
#[derive(Clone, Default)]
pub struct CallbackRecorder {
    events: Rc<RefCell<Vec<CallbackEvent>>>,
}

impl CallbackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback set that records into this recorder, sampling `node` and
    /// `lock` at the moment each callback fires.
    pub fn callbacks(&self, node: &LayerNode, lock: &InteractionLock) -> SwipeCallbacks {
        let on_drag_start = self.sink();
        let on_drag_end = self.sink();
        let on_tap = self.sink();
        let on_left = self.sink();
        let on_right = self.sink();
        let on_frame = self.sink();
        let on_complete = self.sink();
        let on_committed = self.sink();
        let (tap_lock, left_lock, right_lock, complete_lock) =
            (lock.clone(), lock.clone(), lock.clone(), lock.clone());
        let (left_node, right_node) = (node.clone(), node.clone());

        SwipeCallbacks::new()
            .on_drag_start(move || on_drag_start(CallbackEvent::DragStart))
            .on_drag_end(move |intent| on_drag_end(CallbackEvent::DragEnd(intent)))
            .on_tap(move || {
                on_tap(CallbackEvent::Tap {
                    locked: tap_lock.is_locked(),
                })
            })
            .on_swipe_left(move || {
                on_left(CallbackEvent::SwipeLeft {
                    card_x: left_node.translation().x,
                    locked: left_lock.is_locked(),
                })
            })
            .on_swipe_right(move || {
                on_right(CallbackEvent::SwipeRight {
                    card_x: right_node.translation().x,
                    locked: right_lock.is_locked(),
                })
            })
            .on_animation_frame(move |state| on_frame(CallbackEvent::AnimationFrame(*state)))
            .on_animation_complete(move || {
                on_complete(CallbackEvent::AnimationComplete {
                    locked: complete_lock.is_locked(),
                })
            })
            .on_swipe_committed(move |direction| {
                on_committed(CallbackEvent::SwipeCommitted(direction))
            })
    }

    pub fn record(&self, event: CallbackEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<CallbackEvent> {
        self.events.borrow().clone()
    }

    /// Every event except animation frames.
    pub fn milestones(&self) -> Vec<CallbackEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|event| !event.is_frame())
            .cloned()
            .collect()
    }

    pub fn frames(&self) -> Vec<AnimationState> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                CallbackEvent::AnimationFrame(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&CallbackEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn sink(&self) -> impl Fn(CallbackEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event)
    }
}
