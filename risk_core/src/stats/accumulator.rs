//! StatAccumulator - Collects modifier contributions before clamping

use super::EffectiveStats;
use crate::catalog::{Stance, StatBonus};

/// Running totals while sources are applied
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub max_hp: i64,
    /// Carried through from base stats, only clamped at the end
    pub current_hp: i64,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: &StatBonus) {
        self.attack += bonus.attack;
        self.defense += bonus.defense;
        self.speed += bonus.speed;
        self.max_hp += bonus.max_hp;
    }

    /// Multiply attack, defense and speed, truncating toward zero
    pub fn apply_stance(&mut self, stance: &Stance) {
        self.attack = (self.attack as f64 * stance.attack) as i64;
        self.defense = (self.defense as f64 * stance.defense) as i64;
        self.speed = (self.speed as f64 * stance.speed) as i64;
    }

    /// Clamp into an EffectiveStats snapshot
    pub fn finish(self) -> EffectiveStats {
        let max_hp = self.max_hp.max(0);
        EffectiveStats {
            attack: self.attack.max(0),
            defense: self.defense.max(0),
            speed: self.speed.max(0),
            max_hp,
            current_hp: self.current_hp.clamp(0, max_hp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stance_truncates() {
        let mut acc = StatAccumulator {
            attack: 15,
            defense: 7,
            speed: 9,
            ..Default::default()
        };
        let stance = Stance {
            key: "aggressive".to_string(),
            name: "Aggressive".to_string(),
            attack: 1.3,
            defense: 0.7,
            speed: 1.0,
        };
        acc.apply_stance(&stance);
        assert_eq!(acc.attack, 19);
        assert_eq!(acc.defense, 4);
        assert_eq!(acc.speed, 9);
    }

    #[test]
    fn test_finish_clamps() {
        let acc = StatAccumulator {
            attack: -4,
            defense: -1,
            speed: 3,
            max_hp: 50,
            current_hp: 80,
        };
        let stats = acc.finish();
        assert_eq!(stats.attack, 0);
        assert_eq!(stats.defense, 0);
        assert_eq!(stats.current_hp, 50);
    }
}
