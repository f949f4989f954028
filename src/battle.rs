use crate::battle_logger::BattleLogger;
use crate::error::BattleError;
use crate::model::{Combatant, MOVES_PER_COMBATANT};
use crate::types::{effectiveness, Effectiveness};
use tracing::{debug, trace};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MatchState {
    InProgress,
    SideOneWon,
    SideTwoWon,
}

impl MatchState {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchState::InProgress => None,
            MatchState::SideOneWon => Some(Side::One),
            MatchState::SideTwoWon => Some(Side::Two),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TurnOutcome {
    Hit {
        move_name: String,
        damage: u32,
        modifier: i32,
        effectiveness: Effectiveness,
    },
    /// The chosen move had no uses left; nothing changed.
    Failed { move_name: String },
}

impl TurnOutcome {
    pub fn move_name(&self) -> &str {
        match self {
            TurnOutcome::Hit { move_name, .. } | TurnOutcome::Failed { move_name } => move_name,
        }
    }
}

/// Latest move and message shown under a side's column on the status page.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TurnRecord {
    pub move_name: Option<String>,
    pub message: Option<String>,
}

pub fn failure_message(attacker: &str, move_name: &str) -> String {
    format!("{attacker} failed to perform {move_name}.")
}

/// Applies `attacker`'s move at `move_index` to `defender`.
///
/// Damage is the move's base damage plus the type modifier, clamped so a hit
/// never heals. An exhausted move fails without touching either side.
pub fn resolve_turn(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    move_index: usize,
) -> Result<TurnOutcome, BattleError> {
    let mv = attacker
        .move_at_mut(move_index)
        .ok_or(BattleError::InvalidMove(move_index))?;
    let move_name = mv.name.clone();
    if !mv.attempt_use() {
        return Ok(TurnOutcome::Failed { move_name });
    }
    let modifier = effectiveness(mv.element_type, defender.element_type);
    let damage = (mv.base_damage as i32 + modifier).max(0);
    defender.apply_damage(damage);
    trace!(
        attacker = %attacker.name,
        defender = %defender.name,
        damage,
        modifier,
        "move landed"
    );
    Ok(TurnOutcome::Hit {
        move_name,
        damage: damage as u32,
        modifier,
        effectiveness: Effectiveness::from_modifier(modifier),
    })
}

pub struct Battle {
    combatants: [Combatant; 2],
    records: [TurnRecord; 2],
    active: Side,
    turn: usize,
    state: MatchState,
    logger: BattleLogger,
}

impl Battle {
    pub fn new(side_one: Combatant, side_two: Combatant) -> Self {
        let mut logger = BattleLogger::new();
        logger.log_start(&side_one.name, &side_two.name);
        let mut battle = Battle {
            combatants: [side_one, side_two],
            records: [TurnRecord::default(), TurnRecord::default()],
            active: Side::One,
            turn: 0,
            state: MatchState::InProgress,
            logger,
        };
        battle.evaluate_state();
        battle
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn record(&self, side: Side) -> &TurnRecord {
        &self.records[side.index()]
    }

    /// Side about to choose a move.
    pub fn active_side(&self) -> Side {
        self.active
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state != MatchState::InProgress
    }

    pub fn winner(&self) -> Option<&Combatant> {
        self.state.winner().map(|side| self.combatant(side))
    }

    pub fn loser(&self) -> Option<&Combatant> {
        self.state
            .winner()
            .map(|side| self.combatant(side.opponent()))
    }

    pub fn logger(&self) -> &BattleLogger {
        &self.logger
    }

    fn pair_mut(&mut self, attacker: Side) -> (&mut Combatant, &mut Combatant) {
        let [one, two] = &mut self.combatants;
        match attacker {
            Side::One => (one, two),
            Side::Two => (two, one),
        }
    }

    /// Resolves one turn for the active side and hands the turn over,
    /// whether or not the move could be used.
    pub fn play_turn(&mut self, move_index: usize) -> Result<TurnOutcome, BattleError> {
        if self.is_over() {
            return Err(BattleError::MatchOver);
        }
        if move_index >= MOVES_PER_COMBATANT {
            return Err(BattleError::InvalidMove(move_index));
        }
        let side = self.active;
        self.turn += 1;
        self.logger.log_turn(self.turn);

        let (attacker, defender) = self.pair_mut(side);
        let outcome = resolve_turn(attacker, defender, move_index)?;
        let attacker_name = attacker.name.clone();
        let defender_name = defender.name.clone();
        let (defender_hp, defender_max) = (defender.current_health, defender.max_health);

        let message = match &outcome {
            TurnOutcome::Hit {
                move_name,
                modifier,
                effectiveness,
                ..
            } => {
                self.logger.log_move(&attacker_name, move_name, &defender_name);
                self.logger.log_effectiveness(&defender_name, *modifier);
                self.logger.log_damage(&defender_name, defender_hp, defender_max);
                effectiveness.message().to_string()
            }
            TurnOutcome::Failed { move_name } => {
                self.logger.log_fail(&attacker_name, move_name);
                failure_message(&attacker_name, move_name)
            }
        };
        self.records[side.index()] = TurnRecord {
            move_name: Some(outcome.move_name().to_string()),
            message: Some(message),
        };
        debug!(turn = self.turn, ?side, ?outcome, "turn resolved");

        self.active = side.opponent();
        self.evaluate_state();
        Ok(outcome)
    }

    fn evaluate_state(&mut self) {
        if self.state != MatchState::InProgress {
            return;
        }
        let [one, two] = &self.combatants;
        self.state = if !one.is_alive() {
            MatchState::SideTwoWon
        } else if !two.is_alive() {
            MatchState::SideOneWon
        } else {
            MatchState::InProgress
        };
        if let (Some(winner), Some(loser)) = (self.winner(), self.loser()) {
            let (winner, loser) = (winner.name.clone(), loser.name.clone());
            self.logger.log_faint(&loser);
            self.logger.log_win(&winner);
            debug!(%winner, %loser, turns = self.turn, "match finished");
        }
    }
}
