//! Two-player console battle between combatants picked from a fixed roster.
//!
//! [`run`] plays one match over stdin/stdout; [`run_with`] does the
//! same over any reader and writer.

pub mod battle;
pub mod battle_logger;
pub mod config;
pub mod error;
pub mod game;
pub mod model;
pub mod roster;
pub mod types;
pub mod ui;

pub use crate::config::GameOptions;
pub use crate::error::{BattleError, GameError};
use crate::game::run_session;
use crate::ui::Console;
use std::io::{self, BufRead, IsTerminal, Write};

pub fn run(options: GameOptions) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let echo = !stdin.is_terminal();
    let mut console = Console::new(stdin.lock(), io::stdout()).with_echo(echo);
    run_with(&mut console, &options)
}

/// Plays one match over `console` with the exit policy of the binary: a
/// duplicate pick prints its message and ends normally.
pub fn run_with<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    options: &GameOptions,
) -> anyhow::Result<()> {
    match run_session(console, options) {
        Ok(_) => Ok(()),
        // Duplicate picks end the program normally after the message.
        Err(err @ GameError::DuplicateSelection { .. }) => {
            console.write_block(&err.to_string())?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
