// Compiled-in roster of selectable combatants.
use crate::model::{Combatant, CombatantTemplate};
use once_cell::sync::Lazy;

static ROSTER: Lazy<Vec<CombatantTemplate>> = Lazy::new(|| {
    let json_str = include_str!("../data/roster.json");
    serde_json::from_str(json_str).expect("Failed to parse data/roster.json")
});

pub fn roster() -> &'static [CombatantTemplate] {
    &ROSTER
}

pub fn roster_size() -> usize {
    ROSTER.len()
}

/// Builds an independent combatant from the roster entry at `index`.
pub fn instantiate(index: usize) -> anyhow::Result<Combatant> {
    let template = ROSTER.get(index).ok_or_else(|| {
        let last = ROSTER.len().saturating_sub(1);
        anyhow::anyhow!("roster index {index} is out of range (0-{last})")
    })?;
    template.instantiate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{effectiveness, ElementType};

    #[test]
    fn roster_has_five_valid_entries() {
        assert_eq!(roster_size(), 5);
        for template in roster() {
            template.validate().expect("roster entry is valid");
        }
    }

    #[test]
    fn template_moves_start_with_all_uses() {
        for template in roster() {
            for mv in &template.moves {
                assert_eq!(
                    mv.remaining_uses, mv.max_uses,
                    "{}'s {} does not start full",
                    template.name, mv.name
                );
            }
        }
    }

    #[test]
    fn pikachu_and_charmander_stats() {
        let pikachu = instantiate(0).expect("Pikachu exists");
        assert_eq!(pikachu.name, "Pikachu");
        assert_eq!(pikachu.element_type, ElementType::Electric);
        assert_eq!(pikachu.max_health, 35);
        let thunderbolt = &pikachu.moves[2];
        assert_eq!(thunderbolt.name, "Thunderbolt");
        assert_eq!(thunderbolt.element_type, ElementType::Electric);
        assert_eq!(thunderbolt.base_damage, 10);
        assert_eq!(thunderbolt.remaining_uses, 5);

        let charmander = instantiate(3).expect("Charmander exists");
        assert_eq!(charmander.name, "Charmander");
        assert_eq!(charmander.element_type, ElementType::Fire);
        assert_eq!(charmander.current_health, 39);
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(instantiate(roster_size()).is_err());
    }

    #[test]
    fn every_entry_can_defeat_every_other_entry() {
        for attacker in roster() {
            for defender in roster().iter().filter(|d| d.name != attacker.name) {
                let total: u32 = attacker
                    .moves
                    .iter()
                    .map(|m| {
                        let modifier = effectiveness(m.element_type, defender.element_type);
                        let net = m.base_damage as i32 + modifier;
                        m.max_uses * net.max(0) as u32
                    })
                    .sum();
                assert!(
                    total >= defender.max_health,
                    "{} can only deal {total} damage to {}",
                    attacker.name,
                    defender.name
                );
            }
        }
    }
}
