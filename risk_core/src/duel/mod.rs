//! Duel resolution - Turn-based fight between two stat snapshots
//!
//! Resolution is purely computational: nothing here touches a store. The
//! caller applies the returned outcome with [`DuelSettlement`].

mod rating;
mod settlement;

pub use rating::PvpRecord;
pub use settlement::DuelSettlement;

use crate::config::DuelConstants;
use crate::random::RandomSource;
use crate::stats::EffectiveStats;
use serde::{Deserialize, Serialize};

/// One side of a duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelSide {
    A,
    B,
}

impl DuelSide {
    pub fn other(self) -> DuelSide {
        match self {
            DuelSide::A => DuelSide::B,
            DuelSide::B => DuelSide::A,
        }
    }
}

/// Who won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelWinner {
    A,
    B,
    Draw,
}

/// A single attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelEvent {
    pub round: u32,
    pub attacker: DuelSide,
    pub attacker_name: String,
    pub defender_name: String,
    pub damage: i64,
    /// Defender HP after the hit, floored at 0
    pub defender_hp: i64,
}

impl DuelEvent {
    /// Human-readable log line
    pub fn line(&self) -> String {
        format!(
            "Rnd {}: {} → {} dmg  [{} HP: {}]",
            self.round, self.attacker_name, self.damage, self.defender_name, self.defender_hp
        )
    }
}

/// Result of a resolved duel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelOutcome {
    pub winner: DuelWinner,
    pub rounds_elapsed: u32,
    pub first_striker: DuelSide,
    pub log: Vec<DuelEvent>,
    /// Remaining HP of each side, floored at 0
    pub final_hp_a: i64,
    pub final_hp_b: i64,
}

/// Resolve a duel with the default rules (50 rounds, ±3 variance)
pub fn resolve_duel(
    a: &EffectiveStats,
    b: &EffectiveStats,
    name_a: &str,
    name_b: &str,
    rng: &dyn RandomSource,
) -> DuelOutcome {
    resolve_duel_with(a, b, name_a, name_b, &DuelConstants::default(), rng)
}

/// Damage of one hit: `atk + U(0, max(1, atk/2))`, reduced by defense and
/// jittered by `U(-variance, variance)`, never below 1
fn strike(attacker: &EffectiveStats, defender: &EffectiveStats, variance: i64, rng: &dyn RandomSource) -> i64 {
    let raw = attacker.attack + rng.range(0, (attacker.attack / 2).max(1));
    (raw - defender.defense + rng.range(-variance, variance)).max(1)
}

/// Resolve a duel with explicit rules
pub fn resolve_duel_with(
    a: &EffectiveStats,
    b: &EffectiveStats,
    name_a: &str,
    name_b: &str,
    rules: &DuelConstants,
    rng: &dyn RandomSource,
) -> DuelOutcome {
    let first = if a.speed > b.speed {
        DuelSide::A
    } else if b.speed > a.speed {
        DuelSide::B
    } else if rng.coin_flip() {
        DuelSide::A
    } else {
        DuelSide::B
    };

    let mut hp_a = a.current_hp;
    let mut hp_b = b.current_hp;
    let mut log = Vec::new();
    let mut rounds_elapsed = 0;

    if hp_a > 0 && hp_b > 0 {
        for round in 1..=rules.max_rounds {
            rounds_elapsed = round;
            for side in [first, first.other()] {
                if hp_a <= 0 || hp_b <= 0 {
                    break;
                }
                let (attacker, defender, attacker_name, defender_name, defender_hp) = match side {
                    DuelSide::A => (a, b, name_a, name_b, &mut hp_b),
                    DuelSide::B => (b, a, name_b, name_a, &mut hp_a),
                };
                let damage = strike(attacker, defender, rules.variance, rng);
                *defender_hp -= damage;
                log.push(DuelEvent {
                    round,
                    attacker: side,
                    attacker_name: attacker_name.to_string(),
                    defender_name: defender_name.to_string(),
                    damage,
                    defender_hp: (*defender_hp).max(0),
                });
            }
            if hp_a <= 0 || hp_b <= 0 {
                break;
            }
        }
    }

    let winner = match (hp_a > 0, hp_b > 0) {
        (true, false) => DuelWinner::A,
        (false, true) => DuelWinner::B,
        _ => DuelWinner::Draw,
    };

    DuelOutcome {
        winner,
        rounds_elapsed,
        first_striker: first,
        log,
        final_hp_a: hp_a.max(0),
        final_hp_b: hp_b.max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ChaChaSource, ScriptedSource};

    fn stats(attack: i64, defense: i64, speed: i64, hp: i64) -> EffectiveStats {
        EffectiveStats {
            attack,
            defense,
            speed,
            max_hp: hp,
            current_hp: hp,
        }
    }

    #[test]
    fn test_faster_side_strikes_first() {
        let rng = ChaChaSource::seeded(1);
        let outcome = resolve_duel(&stats(10, 5, 8, 100), &stats(10, 5, 12, 100), "Vex", "Rook", &rng);
        assert_eq!(outcome.first_striker, DuelSide::B);
        assert_eq!(outcome.log[0].attacker, DuelSide::B);
    }

    #[test]
    fn test_scripted_damage() {
        // A is faster. Hit 1: 20 + 10 - 5 + 3 = 28 to B. Hit 2: 10 + 0 - 5 - 3 = 2 -> 2 to A.
        let rng = ScriptedSource::new([10, 3, 0, -3]);
        let outcome = resolve_duel(&stats(20, 5, 10, 100), &stats(10, 5, 8, 100), "Vex", "Rook", &rng);
        assert_eq!(outcome.log[0].damage, 28);
        assert_eq!(outcome.log[0].defender_hp, 72);
        assert_eq!(outcome.log[1].damage, 2);
        assert_eq!(outcome.log[0].line(), "Rnd 1: Vex → 28 dmg  [Rook HP: 72]");
    }

    #[test]
    fn test_minimum_damage_is_one() {
        // Attack 0 against defense 50: raw 0 + U(0,1), always floored to 1
        let rng = ChaChaSource::seeded(3);
        let outcome = resolve_duel(&stats(0, 0, 10, 100), &stats(0, 50, 1, 100), "Weak", "Wall", &rng);
        assert!(outcome.log.iter().all(|e| e.damage >= 1));
    }

    #[test]
    fn test_round_cap_is_a_draw() {
        // Both sides deal 1 damage per hit (scripted source exhausted returns minimums)
        let rng = ScriptedSource::default();
        let outcome = resolve_duel(&stats(1, 10, 5, 1000), &stats(1, 10, 4, 1000), "A", "B", &rng);
        assert_eq!(outcome.winner, DuelWinner::Draw);
        assert_eq!(outcome.rounds_elapsed, 50);
        assert_eq!(outcome.log.len(), 100);
    }

    #[test]
    fn test_knockout_stops_the_round() {
        let rng = ScriptedSource::default();
        // A hits for 50 - 0 - 3 = 47 against 40 HP; B never swings
        let outcome = resolve_duel(&stats(50, 0, 9, 100), &stats(5, 0, 1, 40), "A", "B", &rng);
        assert_eq!(outcome.winner, DuelWinner::A);
        assert_eq!(outcome.rounds_elapsed, 1);
        assert_eq!(outcome.log.len(), 1);
        assert_eq!(outcome.final_hp_b, 0);
    }

    #[test]
    fn test_equal_speed_flips_once() {
        // Coin flip draw of 1 means B goes first, and B keeps first strike every round
        let rng = ScriptedSource::new([1]);
        let outcome = resolve_duel(&stats(5, 0, 7, 30), &stats(5, 0, 7, 30), "A", "B", &rng);
        assert_eq!(outcome.first_striker, DuelSide::B);
        for pair in outcome.log.chunks(2) {
            assert_eq!(pair[0].attacker, DuelSide::B);
        }
    }

    #[test]
    fn test_zero_hp_combatant_loses_without_rounds() {
        let rng = ChaChaSource::seeded(5);
        let mut downed = stats(10, 5, 8, 100);
        downed.current_hp = 0;
        let outcome = resolve_duel(&stats(10, 5, 8, 100), &downed, "A", "B", &rng);
        assert_eq!(outcome.winner, DuelWinner::A);
        assert_eq!(outcome.rounds_elapsed, 0);
        assert!(outcome.log.is_empty());
    }

    #[test]
    fn test_seeded_duel_is_reproducible() {
        let a = stats(15, 6, 9, 100);
        let first = resolve_duel(&a, &a, "A", "B", &ChaChaSource::seeded(42));
        let second = resolve_duel(&a, &a, "A", "B", &ChaChaSource::seeded(42));
        assert_eq!(first, second);
    }
}
