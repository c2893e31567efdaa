use serde_json::json;

/// Append-only battle transcript. Lines are never edited or reordered.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    lines: Vec<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn log_start(&mut self) {
        self.lines.push("Battle started!".to_string());
    }

    pub fn log_move(&mut self, actor: &str, move_name: &str) {
        self.lines.push(format!("{actor} used {move_name}!"));
    }

    pub fn log_damage(&mut self, damage: u32) {
        self.lines.push(format!("It dealt {damage} damage!"));
    }

    pub fn log_no_effect(&mut self) {
        self.lines.push("It had no effect!".to_string());
    }

    pub fn log_no_pp(&mut self, actor: &str) {
        self.lines.push(format!("{actor} has no moves left!"));
    }

    pub fn log_recoil(&mut self, actor: &str, damage: u32) {
        self.lines
            .push(format!("{actor} is damaged by recoil! ({damage} HP)"));
    }

    pub fn log_faint(&mut self, name: &str) {
        self.lines.push(format!("{name} fainted!"));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines appended at or after `offset`.
    pub fn since(&self, offset: usize) -> &[String] {
        &self.lines[offset.min(self.lines.len())..]
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "log": self.lines })
    }
}
