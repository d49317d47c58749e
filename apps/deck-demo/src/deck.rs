//! A headless stack of cards. Only the top card takes gestures; a card is
//! removed once its exit animation has finished and the interaction lock is
//! released.

use crate::cli::Gesture;
use anyhow::{bail, Result};
use cardswipe_core::{Clock, DefaultScheduler, ManualClock, Runtime, NANOS_PER_MILLI};
use cardswipe_foundation::{InteractionLock, PointerEvent, PointerId};
use cardswipe_ui::{GestureController, LayerNode, SwipeCallbacks, SwipeDirection, SwipeOptions};
use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

const POINTER: PointerId = 1;
const MAX_SETTLE_FRAMES: usize = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardResult {
    SwipedLeft,
    SwipedRight,
    Tapped,
    Restored,
    Untouched,
}

impl fmt::Display for CardResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CardResult::SwipedLeft => "swiped left",
            CardResult::SwipedRight => "swiped right",
            CardResult::Tapped => "tapped",
            CardResult::Restored => "back at rest",
            CardResult::Untouched => "untouched",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    pub card: usize,
    pub gesture: Gesture,
    pub result: CardResult,
    pub frames: usize,
    /// Card translation when the gesture settled.
    pub final_x: f32,
    pub remaining: usize,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "card {} {:?}: {} after {} frames at x = {:.1} ({} left)",
            self.card, self.gesture, self.result, self.frames, self.final_x, self.remaining
        )
    }
}

struct Card {
    id: usize,
    controller: GestureController,
}

pub struct Deck {
    cards: VecDeque<Card>,
    runtime: Runtime,
    clock: ManualClock,
    lock: InteractionLock,
    frame_ms: u64,
    result: Rc<Cell<Option<CardResult>>>,
    removals: Rc<Cell<usize>>,
}

impl Deck {
    pub fn new(
        count: usize,
        options: SwipeOptions,
        frame_ms: u64,
        print_frames: bool,
    ) -> Result<Self> {
        if count == 0 {
            bail!("a deck needs at least one card");
        }
        if frame_ms == 0 {
            bail!("frame interval must be positive");
        }

        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let clock = ManualClock::new();
        let lock = InteractionLock::new();
        let result = Rc::new(Cell::new(None));
        let removals = Rc::new(Cell::new(0));

        let cards = (1..=count)
            .map(|id| {
                let controller = GestureController::new(
                    LayerNode::new(),
                    runtime.frame_clock(),
                    lock.clone(),
                    Rc::new(clock.clone()),
                );
                controller.update_options(options);
                controller.set_callbacks(card_callbacks(
                    id,
                    &lock,
                    &result,
                    &removals,
                    print_frames,
                ));
                Card { id, controller }
            })
            .collect();

        Ok(Self {
            cards,
            runtime,
            clock,
            lock,
            frame_ms,
            result,
            removals,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Replay `gesture` on the top card and run its animation to the end.
    pub fn play(&mut self, gesture: Gesture) -> Result<Outcome> {
        let Some(card) = self.cards.front() else {
            bail!("no cards left");
        };
        let (id, controller) = (card.id, card.controller.clone());
        self.result.set(None);

        match gesture {
            Gesture::SwipeLeft => self.drag(&controller, id, -180.0, 6, 16, true)?,
            Gesture::SwipeRight => self.drag(&controller, id, 180.0, 6, 16, true)?,
            Gesture::SnapBack => self.drag(&controller, id, 60.0, 10, 30, true)?,
            Gesture::Cancel => {
                self.drag(&controller, id, 120.0, 4, 16, false)?;
                controller.handle_event(&PointerEvent::cancel(POINTER, 120.0, 0.0));
            }
            Gesture::Tap => {
                self.press(&controller, id)?;
                self.advance(80);
                controller.handle_event(&PointerEvent::up(POINTER, 0.0, 0.0));
            }
            Gesture::DismissLeft | Gesture::DismissRight => {
                let direction = if gesture == Gesture::DismissLeft {
                    SwipeDirection::Left
                } else {
                    SwipeDirection::Right
                };
                if !controller.trigger_swipe(direction) {
                    bail!("card {id} refused a programmatic swipe");
                }
            }
        }

        let frames = self.settle()?;
        let final_x = controller.node().translation().x;
        for _ in 0..self.removals.replace(0) {
            if let Some(card) = self.cards.pop_front() {
                log::debug!("card {} removed", card.id);
            }
        }

        Ok(Outcome {
            card: id,
            gesture,
            result: self.result.get().unwrap_or(CardResult::Untouched),
            frames,
            final_x,
            remaining: self.cards.len(),
        })
    }

    fn press(&self, controller: &GestureController, id: usize) -> Result<()> {
        if !controller.handle_event(&PointerEvent::down(POINTER, 0.0, 0.0)) {
            bail!("card {id} rejected the press");
        }
        Ok(())
    }

    /// Press at the origin and move to `(to_x, 0)` in `steps` moves.
    fn drag(
        &self,
        controller: &GestureController,
        id: usize,
        to_x: f32,
        steps: u32,
        step_ms: u64,
        release: bool,
    ) -> Result<()> {
        self.press(controller, id)?;
        for step in 1..=steps {
            self.advance(step_ms);
            let x = to_x * step as f32 / steps as f32;
            controller.handle_event(&PointerEvent::moved(POINTER, x, 0.0));
        }
        if release {
            controller.handle_event(&PointerEvent::up(POINTER, to_x, 0.0));
        }
        Ok(())
    }

    fn advance(&self, millis: u64) {
        self.clock.advance(millis as f64);
        let now_nanos = self.clock.now_millis() as u64 * NANOS_PER_MILLI;
        self.runtime.drain_frame_callbacks(now_nanos);
    }

    fn settle(&self) -> Result<usize> {
        let mut frames = 0;
        while self.runtime.handle().has_frame_callbacks() {
            frames += 1;
            if frames > MAX_SETTLE_FRAMES {
                bail!("animation still running after {MAX_SETTLE_FRAMES} frames");
            }
            self.advance(self.frame_ms);
        }
        Ok(frames)
    }
}

fn card_callbacks(
    id: usize,
    lock: &InteractionLock,
    result: &Rc<Cell<Option<CardResult>>>,
    removals: &Rc<Cell<usize>>,
    print_frames: bool,
) -> SwipeCallbacks {
    let (tap, left, right, complete) = (
        Rc::clone(result),
        Rc::clone(result),
        Rc::clone(result),
        Rc::clone(result),
    );
    let removals = Rc::clone(removals);
    let lock = lock.clone();

    SwipeCallbacks::new()
        .on_drag_start(move || log::debug!("card {id} picked up"))
        .on_drag_end(move |intent| log::info!("card {id} released as {intent}"))
        .on_tap(move || tap.set(Some(CardResult::Tapped)))
        .on_swipe_left(move || left.set(Some(CardResult::SwipedLeft)))
        .on_swipe_right(move || right.set(Some(CardResult::SwipedRight)))
        .on_animation_complete(move || {
            if complete.get().is_none() {
                complete.set(Some(CardResult::Restored));
            }
        })
        .on_swipe_committed(move |direction| {
            log::info!("card {id} committed {direction:?}");
            // Removal waits for the exit to finish and release the lock.
            let removals = Rc::clone(&removals);
            lock.defer(move || removals.set(removals.get() + 1));
        })
        .on_animation_frame(move |state| {
            if print_frames {
                println!(
                    "  card {id}: x = {:7.1} rotation = {:5.1} opacity = {:.2}",
                    state.x, state.rotation, state.opacity
                );
            }
        })
}
