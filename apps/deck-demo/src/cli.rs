use cardswipe_ui::SwipeOptions;
use clap::{Parser, ValueEnum};

/// Scripted gestures the demo can replay against the top card.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// Fast drag to the left and release
    SwipeLeft,
    /// Fast drag to the right and release
    SwipeRight,
    /// Short press without travel
    Tap,
    /// Slow short drag that falls back to rest
    SnapBack,
    /// Drag interrupted by a pointer cancel
    Cancel,
    /// Programmatic exit to the left
    DismissLeft,
    /// Programmatic exit to the right
    DismissRight,
}

#[derive(Parser, Debug)]
#[command(name = "deck-demo")]
#[command(about = "Replay swipe gestures against a headless card deck")]
#[command(version)]
pub struct Cli {
    /// Gestures to replay, in order (a mixed script when omitted)
    #[arg(value_enum)]
    pub gestures: Vec<Gesture>,

    /// Number of cards in the deck
    #[arg(long, short = 'n', default_value_t = 5)]
    pub cards: usize,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    pub frame_ms: u64,

    /// Share of the pointer travel applied to the card
    #[arg(long)]
    pub elasticity: Option<f32>,

    /// Distance at which an exiting card is gone
    #[arg(long)]
    pub exit_distance: Option<f32>,

    /// Displacement past which a release counts as a swipe
    #[arg(long)]
    pub swipe_distance: Option<f32>,

    /// Print every animation frame
    #[arg(long)]
    pub frames: bool,
}

impl Cli {
    pub fn script(&self) -> Vec<Gesture> {
        if !self.gestures.is_empty() {
            return self.gestures.clone();
        }
        vec![
            Gesture::Tap,
            Gesture::SnapBack,
            Gesture::SwipeRight,
            Gesture::Cancel,
            Gesture::SwipeLeft,
            Gesture::DismissRight,
        ]
    }

    pub fn options(&self) -> SwipeOptions {
        let mut options = SwipeOptions::default();
        if let Some(elasticity) = self.elasticity {
            options = options.with_drag_elasticity(elasticity);
        }
        if let Some(distance) = self.exit_distance {
            options = options.with_exit_distance(distance);
        }
        if let Some(distance) = self.swipe_distance {
            options = options.with_swipe_distance_threshold(distance);
        }
        options
    }
}
