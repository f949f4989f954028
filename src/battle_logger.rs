use serde_json::json;

/// Pipe-delimited transcript of a match, one entry per event.
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self { log: Vec::new() }
    }

    pub fn log_start(&mut self, side_one: &str, side_two: &str) {
        self.log.push(format!("|start|{side_one}|{side_two}"));
    }

    pub fn log_turn(&mut self, turn: usize) {
        self.log.push(format!("|turn|{turn}"));
    }

    pub fn log_move(&mut self, source: &str, move_name: &str, target: &str) {
        self.log.push(format!("|move|{source}|{move_name}|{target}"));
    }

    pub fn log_fail(&mut self, source: &str, move_name: &str) {
        self.log.push(format!("|-fail|{source}|{move_name}"));
    }

    pub fn log_damage(&mut self, target: &str, hp: u32, max_hp: u32) {
        self.log.push(format!("|-damage|{target}|{hp}/{max_hp}"));
    }

    pub fn log_effectiveness(&mut self, target: &str, modifier: i32) {
        self.log.push(format!("|-effectiveness|{target}|{modifier:+}"));
    }

    pub fn log_faint(&mut self, target: &str) {
        self.log.push(format!("|faint|{target}"));
    }

    pub fn log_win(&mut self, winner: &str) {
        self.log.push(format!("|win|{winner}"));
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "log": self.log })
    }
}
