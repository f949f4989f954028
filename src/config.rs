use anyhow::Context;
use std::time::Duration;

pub const CLEAR_SCREEN_VAR: &str = "POKEMON_DUEL_CLEAR_SCREEN";
pub const TURN_DELAY_VAR: &str = "POKEMON_DUEL_TURN_DELAY_MS";

/// Presentation knobs. The game itself takes no command-line flags.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GameOptions {
    /// Clear the terminal before each status page.
    pub clear_screen: bool,
    /// Pause after each turn's narration.
    pub turn_delay: Duration,
}

impl GameOptions {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = GameOptions::default();
        if let Some(val) = lookup(CLEAR_SCREEN_VAR) {
            opts.clear_screen = parse_flag(&val).ok_or_else(|| {
                anyhow::anyhow!("{CLEAR_SCREEN_VAR} must be true or false, got {val}")
            })?;
        }
        if let Some(val) = lookup(TURN_DELAY_VAR) {
            let millis: u64 = val.trim().parse().with_context(|| {
                format!("{TURN_DELAY_VAR} must be a number of milliseconds, got {val}")
            })?;
            opts.turn_delay = Duration::from_millis(millis);
        }
        Ok(opts)
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
