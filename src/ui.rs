use crate::battle::{failure_message, Battle, Side, TurnOutcome};
use crate::error::GameError;
use crate::model::{Combatant, CombatantTemplate, Move};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

const BANNER: &str = "Pokemon Duel";
const CELL_WIDTH: usize = 30;
const PLACEHOLDER: &str = "-";
const TURN_MARKER: &str = " (*)";

/// Line-oriented console that hands out whitespace-separated tokens.
pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    echo_input: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
            echo_input: false,
        }
    }

    /// Writes each consumed token back after its prompt. Piped input is not
    /// echoed by a terminal, so without this the next line runs onto the
    /// prompt.
    pub fn with_echo(mut self, echo_input: bool) -> Self {
        self.echo_input = echo_input;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn write_block(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.output.write_all(b"\n")?;
        }
        self.output.flush()
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.output, "\x1b[2J\x1b[H")?;
        self.output.flush()
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut buf = String::new();
            if self.input.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(buf.split_whitespace().map(str::to_string));
        }
    }

    /// Asks until a number in `0..upper` arrives. Anything else is reported
    /// and asked again.
    pub fn prompt_index(&mut self, prompt: &str, upper: usize) -> Result<usize, GameError> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            let token = match self.next_token()? {
                Some(token) => token,
                None => {
                    if self.echo_input {
                        writeln!(self.output)?;
                    }
                    return Err(GameError::InputClosed);
                }
            };
            if self.echo_input {
                writeln!(self.output, "{token}")?;
            }
            match token.parse::<usize>() {
                Ok(idx) if idx < upper => return Ok(idx),
                Ok(_) => writeln!(
                    self.output,
                    "Please enter a number between 0 and {}.",
                    upper.saturating_sub(1)
                )?,
                Err(_) => writeln!(self.output, "'{token}' is not a number. Try again.")?,
            }
        }
    }
}

pub fn render_roster(roster: &[CombatantTemplate]) -> String {
    let mut out = String::new();
    out.push_str("Available Pokemon:\n");
    for (idx, template) in roster.iter().enumerate() {
        out.push_str(&format!(
            " {:>2}: {:<12} Type: {:<9} HP: {}\n",
            idx, template.name, template.element_type, template.max_health
        ));
    }
    out
}

/// Status page for the current state of `battle`. The side about to act is
/// marked next to its name.
pub fn render_status(battle: &Battle) -> String {
    let one = battle.combatant(Side::One);
    let two = battle.combatant(Side::Two);
    let marker = |side: Side| {
        if !battle.is_over() && battle.active_side() == side {
            TURN_MARKER
        } else {
            ""
        }
    };

    let mut lines = Vec::new();
    lines.push(full_border());
    lines.push(format!("| {:<width$}|", BANNER, width = CELL_WIDTH * 2));
    lines.push(split_border());
    lines.push(row(
        &format!("{}{}", one.name, marker(Side::One)),
        &format!("{}{}", two.name, marker(Side::Two)),
    ));
    lines.push(row(
        &format!("Type: {}", one.element_type),
        &format!("Type: {}", two.element_type),
    ));
    lines.push(row(
        &format!("HP: {}", one.current_health),
        &format!("HP: {}", two.current_health),
    ));
    lines.push(split_border());

    let rec_one = battle.record(Side::One);
    let rec_two = battle.record(Side::Two);
    lines.push(row(
        &format!("Latest Skill: {}", rec_one.move_name.as_deref().unwrap_or(PLACEHOLDER)),
        &format!("Latest Skill: {}", rec_two.move_name.as_deref().unwrap_or(PLACEHOLDER)),
    ));
    let left = wrap(rec_one.message.as_deref().unwrap_or(PLACEHOLDER), CELL_WIDTH - 1);
    let right = wrap(rec_two.message.as_deref().unwrap_or(PLACEHOLDER), CELL_WIDTH - 1);
    for i in 0..left.len().max(right.len()) {
        lines.push(row(
            left.get(i).map(String::as_str).unwrap_or(""),
            right.get(i).map(String::as_str).unwrap_or(""),
        ));
    }
    lines.push(split_border());

    for (idx, (mv_one, mv_two)) in one.moves.iter().zip(two.moves.iter()).enumerate() {
        for (l, r) in move_block(idx, mv_one).into_iter().zip(move_block(idx, mv_two)) {
            lines.push(row(&l, &r));
        }
    }
    lines.push(split_border());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn move_block(idx: usize, mv: &Move) -> [String; 4] {
    [
        format!("({}) {}", idx, mv.name),
        format!("    - Type: {}", mv.element_type),
        format!("    - Damage: {}", mv.base_damage),
        format!("    - Count: {}({})", mv.remaining_uses, mv.max_uses),
    ]
}

/// Narration printed after a turn resolves.
pub fn narrate_turn(attacker: &Combatant, outcome: &TurnOutcome) -> Vec<String> {
    match outcome {
        TurnOutcome::Hit {
            move_name,
            effectiveness,
            ..
        } => vec![
            format!("{} used {}.", attacker.name, move_name),
            effectiveness.message().to_string(),
        ],
        TurnOutcome::Failed { move_name } => {
            vec![failure_message(&attacker.name, move_name)]
        }
    }
}

pub fn format_result(winner: &Combatant, loser: &Combatant) -> String {
    format!("Match Result: {} defeats {}", winner.name, loser.name)
}

fn full_border() -> String {
    format!("+{}+", "-".repeat(CELL_WIDTH * 2 + 1))
}

fn split_border() -> String {
    format!("+{}+{}+", "-".repeat(CELL_WIDTH), "-".repeat(CELL_WIDTH))
}

fn row(left: &str, right: &str) -> String {
    let width = CELL_WIDTH - 1;
    format!("| {:<width$}| {:<width$}|", left, right)
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster;
    use std::io::Cursor;

    fn battle() -> Battle {
        Battle::new(
            roster::instantiate(0).expect("Pikachu"),
            roster::instantiate(3).expect("Charmander"),
        )
    }

    #[test]
    fn status_page_has_fixed_width_rows() {
        let page = render_status(&battle());
        for line in page.lines() {
            assert_eq!(line.chars().count(), CELL_WIDTH * 2 + 3, "bad width: {line:?}");
        }
    }

    #[test]
    fn status_page_marks_the_side_about_to_act() {
        let mut battle = battle();
        let page = render_status(&battle);
        assert!(page.contains("| Pikachu (*)"));
        assert!(!page.contains("Charmander (*)"));
        assert!(page.contains("Latest Skill: -"));

        battle.play_turn(2).expect("turn");
        let page = render_status(&battle);
        assert!(page.contains("| Charmander (*)"));
        assert!(page.contains("HP: 29"));
        assert!(page.contains("Latest Skill: Thunderbolt"));
        assert!(page.contains("It was effective."));
        assert!(page.contains("- Count: 4(5)"));
    }

    #[test]
    fn long_messages_wrap_inside_the_cell() {
        let lines = wrap("Charmander failed to perform Flamethrower.", CELL_WIDTH - 1);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() < CELL_WIDTH));
        assert_eq!(lines.join(" "), "Charmander failed to perform Flamethrower.");
    }

    #[test]
    fn prompt_skips_invalid_tokens() {
        let input = Cursor::new("abc 9\n\n  2\n");
        let mut console = Console::new(input, Vec::new());
        let idx = console.prompt_index("Move: ", 4).expect("valid token");
        assert_eq!(idx, 2);
        let out = String::from_utf8(console.into_output()).expect("utf8");
        assert!(out.contains("'abc' is not a number"));
        assert!(out.contains("between 0 and 3"));
        assert_eq!(out.matches("Move: ").count(), 3);
    }

    #[test]
    fn prompt_reports_closed_input() {
        let mut console = Console::new(Cursor::new("7\n"), Vec::new());
        assert!(matches!(
            console.prompt_index("Move: ", 4),
            Err(GameError::InputClosed)
        ));
    }

    #[test]
    fn tokens_on_one_line_feed_several_prompts() {
        let mut console = Console::new(Cursor::new("1 3\n"), Vec::new());
        assert_eq!(console.prompt_index("a", 5).expect("first"), 1);
        assert_eq!(console.prompt_index("b", 5).expect("second"), 3);
    }

    #[test]
    fn echo_puts_each_answer_on_the_prompt_line() {
        let input = Cursor::new("x\n2\n");
        let mut console = Console::new(input, Vec::new()).with_echo(true);
        assert_eq!(console.prompt_index("prompt: ", 4).expect("valid token"), 2);
        let out = String::from_utf8(console.into_output()).expect("utf8");
        assert_eq!(out, "prompt: x\n'x' is not a number. Try again.\nprompt: 2\n");
    }

    #[test]
    fn roster_listing_names_every_entry() {
        let listing = render_roster(roster::roster());
        assert!(listing.contains(" 0: Pikachu"));
        assert!(listing.contains(" 4: Sandshrew"));
    }
}
