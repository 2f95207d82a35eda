//! Game constants configuration

use super::ConfigError;
use crate::types::ActionKey;
use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub duel: DuelConstants,
    #[serde(default)]
    pub raid: RaidConstants,
    #[serde(default)]
    pub assault: AssaultConstants,
    #[serde(default)]
    pub siege: SiegeConstants,
    #[serde(default)]
    pub fortify: FortifyConstants,
    #[serde(default)]
    pub heist: HeistConstants,
    #[serde(default)]
    pub cooldowns: CooldownConstants,
}

impl GameConstants {
    /// Reject inverted roll ranges, out-of-range percentages and duels that
    /// could never be fought
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duel.max_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "duel.max_rounds must be at least 1".to_string(),
            ));
        }
        if self.duel.variance < 0 {
            return Err(ConfigError::ValidationError(format!(
                "duel.variance: {} is negative",
                self.duel.variance
            )));
        }

        let ranges = [
            ("raid.steal_percent", self.raid.steal_percent_min, self.raid.steal_percent_max),
            ("raid.failure_damage", self.raid.failure_damage_min, self.raid.failure_damage_max),
            ("assault.failure_damage", self.assault.failure_damage_min, self.assault.failure_damage_max),
            ("siege.damage", self.siege.damage_min, self.siege.damage_max),
            ("siege.casualty_damage", self.siege.casualty_damage_min, self.siege.casualty_damage_max),
            ("heist.chance", self.heist.min_chance, self.heist.max_chance),
        ];
        for (name, min, max) in ranges {
            if min > max {
                return Err(ConfigError::ValidationError(format!(
                    "{name}: min {min} exceeds max {max}"
                )));
            }
        }

        let percents = [
            ("raid.steal_percent_min", self.raid.steal_percent_min),
            ("raid.steal_percent_max", self.raid.steal_percent_max),
            ("siege.casualty_chance", self.siege.casualty_chance),
            ("heist.min_chance", self.heist.min_chance),
            ("heist.max_chance", self.heist.max_chance),
            ("heist.bonus_item_chance", self.heist.bonus_item_chance),
            ("heist.failure_fine_percent", self.heist.failure_fine_percent),
            ("heist.planning_fee_percent", self.heist.planning_fee_percent),
        ];
        for (name, value) in percents {
            if !(0..=100).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{name}: {value} is not a percentage"
                )));
            }
        }

        if self.fortify.max_defense > 100 {
            return Err(ConfigError::ValidationError(
                "fortify.max_defense cannot exceed 100".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuelConstants {
    /// Fee charged to the challenger when the duel starts
    #[serde(default = "default_entry_fee")]
    pub entry_fee: i64,
    /// Currency paid to the winner
    #[serde(default = "default_win_reward")]
    pub win_reward: i64,
    #[serde(default = "default_win_xp")]
    pub win_xp: i64,
    /// Currency taken from the loser, never more than their balance
    #[serde(default = "default_loss_penalty")]
    pub loss_penalty: i64,
    /// Round cap; reaching it is a draw
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Damage jitter is drawn from [-variance, variance]
    #[serde(default = "default_variance")]
    pub variance: i64,
    #[serde(default)]
    pub rating: RatingConstants,
}

impl Default for DuelConstants {
    fn default() -> Self {
        DuelConstants {
            entry_fee: 100,
            win_reward: 300,
            win_xp: 100,
            loss_penalty: 100,
            max_rounds: 50,
            variance: 3,
            rating: RatingConstants::default(),
        }
    }
}

fn default_entry_fee() -> i64 {
    100
}
fn default_win_reward() -> i64 {
    300
}
fn default_win_xp() -> i64 {
    100
}
fn default_loss_penalty() -> i64 {
    100
}
fn default_max_rounds() -> u32 {
    50
}
fn default_variance() -> i64 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConstants {
    pub starting: i64,
    pub win_gain: i64,
    pub loss_drop: i64,
}

impl Default for RatingConstants {
    fn default() -> Self {
        RatingConstants {
            starting: 1000,
            win_gain: 25,
            loss_drop: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidConstants {
    pub cost: i64,
    pub attacker_roll_max: i64,
    pub defender_roll_max: i64,
    pub steal_percent_min: i64,
    pub steal_percent_max: i64,
    pub success_xp: i64,
    pub defense_decrement: u32,
    pub failure_damage_min: i64,
    pub failure_damage_max: i64,
}

impl Default for RaidConstants {
    fn default() -> Self {
        RaidConstants {
            cost: 300,
            attacker_roll_max: 80,
            defender_roll_max: 60,
            steal_percent_min: 30,
            steal_percent_max: 70,
            success_xp: 150,
            defense_decrement: 5,
            failure_damage_min: 15,
            failure_damage_max: 35,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssaultConstants {
    pub cost: i64,
    pub min_faction_size: u32,
    /// Attack score bonus per faction member
    pub faction_weight: i64,
    pub roll_max: i64,
    /// Defense a captured territory is reset to
    pub capture_defense: u32,
    pub success_xp: i64,
    pub failure_xp: i64,
    pub failure_damage_min: i64,
    pub failure_damage_max: i64,
}

impl Default for AssaultConstants {
    fn default() -> Self {
        AssaultConstants {
            cost: 800,
            min_faction_size: 2,
            faction_weight: 15,
            roll_max: 100,
            capture_defense: 30,
            success_xp: 800,
            failure_xp: 200,
            failure_damage_min: 20,
            failure_damage_max: 45,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiegeConstants {
    /// Cost to declare a siege
    pub declare_cost: i64,
    pub min_defense: u32,
    pub min_faction_size: u32,
    pub starting_hp: i64,
    /// Cost of a single contribution
    pub contribute_cost: i64,
    pub damage_min: i64,
    pub damage_max: i64,
    /// Percent chance a contributor takes damage
    pub casualty_chance: i64,
    pub casualty_damage_min: i64,
    pub casualty_damage_max: i64,
    pub capture_defense: u32,
    pub capture_xp: i64,
}

impl Default for SiegeConstants {
    fn default() -> Self {
        SiegeConstants {
            declare_cost: 2000,
            min_defense: 60,
            min_faction_size: 3,
            starting_hp: 100,
            contribute_cost: 500,
            damage_min: 15,
            damage_max: 30,
            casualty_chance: 30,
            casualty_damage_min: 10,
            casualty_damage_max: 20,
            capture_defense: 25,
            capture_xp: 1200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FortifyConstants {
    pub cost_per_point: i64,
    pub xp_per_point: i64,
    pub max_defense: u32,
}

impl Default for FortifyConstants {
    fn default() -> Self {
        FortifyConstants {
            cost_per_point: 100,
            xp_per_point: 10,
            max_defense: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeistConstants {
    /// Planning fee as a percent of the target reward, charged to the leader
    pub planning_fee_percent: i64,
    pub base_chance: i64,
    /// Chance bonus per member above the minimum crew
    pub extra_crew_bonus: i64,
    /// Chance bonus per level of the leader's best tech or stealth skill
    pub skill_bonus_per_level: i64,
    pub difficulty_penalty: i64,
    pub min_chance: i64,
    pub max_chance: i64,
    pub xp_per_difficulty: i64,
    pub bonus_item_chance: i64,
    pub failure_fine_percent: i64,
}

impl Default for HeistConstants {
    fn default() -> Self {
        HeistConstants {
            planning_fee_percent: 10,
            base_chance: 50,
            extra_crew_bonus: 5,
            skill_bonus_per_level: 5,
            difficulty_penalty: 7,
            min_chance: 10,
            max_chance: 95,
            xp_per_difficulty: 40,
            bonus_item_chance: 30,
            failure_fine_percent: 10,
        }
    }
}

/// Cooldown length per action, in seconds. Zero disables the cooldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConstants {
    pub duel: i64,
    pub territory_attack: i64,
    pub siege_contribute: i64,
    pub fortify: i64,
    pub heist_create: i64,
    pub heist_join: i64,
}

impl Default for CooldownConstants {
    fn default() -> Self {
        CooldownConstants {
            duel: 300,
            territory_attack: 900,
            siege_contribute: 0,
            fortify: 0,
            heist_create: 1800,
            heist_join: 60,
        }
    }
}

impl CooldownConstants {
    pub fn seconds_for(&self, action: ActionKey) -> i64 {
        match action {
            ActionKey::Duel => self.duel,
            ActionKey::TerritoryAttack => self.territory_attack,
            ActionKey::SiegeContribute => self.siege_contribute,
            ActionKey::Fortify => self.fortify,
            ActionKey::HeistCreate => self.heist_create,
            ActionKey::HeistJoin => self.heist_join,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let toml = r#"
[siege]
min_defense = 70

[cooldowns]
duel = 60
"#;
        let constants: GameConstants = parse_toml(toml).unwrap();
        assert_eq!(constants.siege.min_defense, 70);
        assert_eq!(constants.siege.starting_hp, 100);
        assert_eq!(constants.cooldowns.seconds_for(ActionKey::Duel), 60);
        assert_eq!(constants.cooldowns.seconds_for(ActionKey::HeistCreate), 1800);
        assert_eq!(constants.duel.max_rounds, 50);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut constants = GameConstants::default();
        assert!(constants.validate().is_ok());

        constants.siege.damage_min = 40;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_percentage() {
        let mut constants = GameConstants::default();
        constants.heist.max_chance = 120;
        assert!(constants.validate().is_err());

        let mut constants = GameConstants::default();
        constants.raid.steal_percent_min = -10;
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_roundless_duel() {
        let mut constants = GameConstants::default();
        constants.duel.max_rounds = 0;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("max_rounds")
        ));
    }
}
