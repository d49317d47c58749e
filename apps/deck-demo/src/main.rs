//! Headless card deck: replays scripted gestures through the gesture
//! controller on a manual clock and prints what each card did.

mod cli;
mod deck;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use deck::Deck;

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let mut deck = Deck::new(cli.cards, cli.options(), cli.frame_ms, cli.frames)
        .context("building the deck")?;

    println!("=== Card deck: {} cards ===", deck.len());
    for gesture in cli.script() {
        if deck.is_empty() {
            log::warn!("deck exhausted, skipping the rest of the script");
            break;
        }
        let outcome = deck
            .play(gesture)
            .with_context(|| format!("replaying {gesture:?}"))?;
        println!("{outcome}");
    }
    println!("{} cards left", deck.len());
    Ok(())
}
