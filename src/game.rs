use crate::battle::Battle;
use crate::config::GameOptions;
use crate::error::GameError;
use crate::model::MOVES_PER_COMBATANT;
use crate::roster;
use crate::ui::{self, Console};
use std::io::{BufRead, Write};
use std::thread;
use tracing::{debug, info};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionOutcome {
    pub winner: String,
    pub loser: String,
    pub turns: usize,
}

/// Plays one full match over `console`: two roster picks, then alternating
/// move prompts until a side is knocked out.
pub fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    options: &GameOptions,
) -> Result<SessionOutcome, GameError> {
    let battle = select_combatants(console)?;
    play_match(console, battle, options)
}

fn select_combatants<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Battle, GameError> {
    let roster = roster::roster();
    let upper = roster.len();
    console.write_block(&ui::render_roster(roster))?;
    let last = upper.saturating_sub(1);
    let pick = |player: u8| format!("Player {player}, choose your Pokemon (0-{last}): ");
    let first = console.prompt_index(&pick(1), upper)?;
    let second = console.prompt_index(&pick(2), upper)?;
    if first == second {
        info!(index = first, "both players picked the same roster entry");
        return Err(GameError::DuplicateSelection { index: first });
    }
    let battle = Battle::new(roster::instantiate(first)?, roster::instantiate(second)?);
    info!(
        side_one = %roster[first].name,
        side_two = %roster[second].name,
        "match started"
    );
    Ok(battle)
}

fn play_match<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    mut battle: Battle,
    options: &GameOptions,
) -> Result<SessionOutcome, GameError> {
    while !battle.is_over() {
        if options.clear_screen {
            console.clear_screen()?;
        }
        console.write_block(&ui::render_status(&battle))?;
        let side = battle.active_side();
        let prompt = format!(
            "{}, choose a move (0-{}): ",
            battle.combatant(side).name,
            MOVES_PER_COMBATANT - 1
        );
        let move_index = console.prompt_index(&prompt, MOVES_PER_COMBATANT)?;
        let outcome = battle.play_turn(move_index)?;
        for line in ui::narrate_turn(battle.combatant(side), &outcome) {
            console.write_block(&line)?;
        }
        if !options.turn_delay.is_zero() {
            thread::sleep(options.turn_delay);
        }
    }

    if options.clear_screen {
        console.clear_screen()?;
    }
    console.write_block(&ui::render_status(&battle))?;
    let (winner, loser) = match (battle.winner(), battle.loser()) {
        (Some(winner), Some(loser)) => (winner, loser),
        _ => return Err(anyhow::anyhow!("match ended without a winner").into()),
    };
    console.write_block(&ui::format_result(winner, loser))?;
    debug!(transcript = %battle.logger().to_json(), "match transcript");

    Ok(SessionOutcome {
        winner: winner.name.clone(),
        loser: loser.name.clone(),
        turns: battle.turn(),
    })
}
