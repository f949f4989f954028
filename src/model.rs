use crate::types::ElementType;
use serde::Deserialize;

pub const MOVES_PER_COMBATANT: usize = 4;

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(from = "MoveData")]
pub struct Move {
    pub name: String,
    pub element_type: ElementType,
    pub base_damage: u32,
    pub max_uses: u32,
    pub remaining_uses: u32,
}

// Roster JSON carries no use counter; every move starts full.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveData {
    name: String,
    #[serde(rename = "type")]
    element_type: ElementType,
    base_damage: u32,
    max_uses: u32,
}

impl From<MoveData> for Move {
    fn from(data: MoveData) -> Self {
        Move::new(data.name, data.element_type, data.base_damage, data.max_uses)
    }
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        base_damage: u32,
        max_uses: u32,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            base_damage,
            max_uses,
            remaining_uses: max_uses,
        }
    }

    /// Spends one use. Returns `false` and leaves the move untouched once it
    /// has run out.
    pub fn attempt_use(&mut self) -> bool {
        if self.remaining_uses > 0 {
            self.remaining_uses -= 1;
            true
        } else {
            false
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_uses == 0
    }
}

#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub element_type: ElementType,
    pub max_health: u32,
    pub current_health: u32,
    pub moves: [Move; MOVES_PER_COMBATANT],
}

impl Combatant {
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Health never drops below zero, and a negative amount never heals.
    pub fn apply_damage(&mut self, amount: i32) {
        let amount = amount.max(0) as u32;
        self.current_health = self.current_health.saturating_sub(amount);
    }

    pub fn move_at_mut(&mut self, index: usize) -> Option<&mut Move> {
        self.moves.get_mut(index)
    }
}

/// Roster entry. Every selection builds a fresh [`Combatant`] from it, so
/// depleting uses in one match never touches the template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub max_health: u32,
    pub moves: Vec<Move>,
}

impl CombatantTemplate {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_health == 0 {
            anyhow::bail!("{} must have a positive max health", self.name);
        }
        if self.moves.len() != MOVES_PER_COMBATANT {
            anyhow::bail!(
                "{} must have exactly {} moves, found {}",
                self.name,
                MOVES_PER_COMBATANT,
                self.moves.len()
            );
        }
        if let Some(mv) = self.moves.iter().find(|m| m.max_uses == 0) {
            anyhow::bail!("{}'s move {} must allow at least one use", self.name, mv.name);
        }
        Ok(())
    }

    pub fn instantiate(&self) -> anyhow::Result<Combatant> {
        self.validate()?;
        let moves: [Move; MOVES_PER_COMBATANT] = self
            .moves
            .iter()
            .map(|m| Move::new(m.name.clone(), m.element_type, m.base_damage, m.max_uses))
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| anyhow::anyhow!("{} has the wrong number of moves", self.name))?;
        Ok(Combatant {
            name: self.name.clone(),
            element_type: self.element_type,
            max_health: self.max_health,
            current_health: self.max_health,
            moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> CombatantTemplate {
        CombatantTemplate {
            name: "Testmon".to_string(),
            element_type: ElementType::Normal,
            max_health: 20,
            moves: vec![
                Move::new("A", ElementType::Normal, 1, 1),
                Move::new("B", ElementType::Fire, 2, 2),
                Move::new("C", ElementType::Water, 3, 3),
                Move::new("D", ElementType::Grass, 4, 4),
            ],
        }
    }

    #[test]
    fn attempt_use_decrements_until_exhausted() {
        let mut mv = Move::new("Ember", ElementType::Fire, 5, 2);
        assert!(mv.attempt_use());
        assert!(mv.attempt_use());
        assert_eq!(mv.remaining_uses, 0);
        assert!(!mv.attempt_use());
        assert_eq!(mv.remaining_uses, 0);
        assert!(mv.is_exhausted());
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut mon = template().instantiate().expect("valid template");
        mon.apply_damage(15);
        assert_eq!(mon.current_health, 5);
        mon.apply_damage(15);
        assert_eq!(mon.current_health, 0);
        assert!(!mon.is_alive());
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut mon = template().instantiate().expect("valid template");
        mon.apply_damage(4);
        mon.apply_damage(-3);
        assert_eq!(mon.current_health, 16);
    }

    #[test]
    fn instances_do_not_share_move_state() {
        let tmpl = template();
        let mut first = tmpl.instantiate().expect("valid template");
        let second = tmpl.instantiate().expect("valid template");
        assert!(first.move_at_mut(3).expect("fourth move").attempt_use());
        assert_eq!(first.moves[3].remaining_uses, 3);
        assert_eq!(second.moves[3].remaining_uses, 4);
        assert_eq!(first.current_health, first.max_health);
    }

    #[test]
    fn rejects_templates_without_four_moves() {
        let mut tmpl = template();
        tmpl.moves.pop();
        assert!(tmpl.instantiate().is_err());
    }

    #[test]
    fn deserialized_moves_start_with_all_uses() {
        let mv: Move = serde_json::from_str(
            r#"{"name": "Ember", "type": "fire", "baseDamage": 5, "maxUses": 8}"#,
        )
        .expect("valid move");
        assert_eq!(mv, Move::new("Ember", ElementType::Fire, 5, 8));
        assert_eq!(mv.remaining_uses, 8);
    }

    #[test]
    fn rejects_moves_without_uses() {
        let mut tmpl = template();
        tmpl.moves[0].max_uses = 0;
        assert!(tmpl.validate().is_err());
    }
}
