//! HeistResolver - Success odds and payouts

use super::HeistParty;
use crate::config::HeistConstants;
use crate::error::ValidationError;
use crate::random::RandomSource;
use crate::stats::{EffectiveStats, SkillProfile};
use crate::types::CharacterId;
use serde::{Deserialize, Serialize};

/// What the resolver knows about the leader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderProfile {
    pub stats: EffectiveStats,
    pub skills: SkillProfile,
}

/// Result of a heist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeistOutcome {
    pub success: bool,
    pub success_chance: i64,
    pub roll: i64,
    /// Share of the reward pool each member receives (0 on failure)
    pub reward_per_member: i64,
    pub xp_per_member: i64,
    /// Item key awarded to every member, if the bonus roll hit
    pub bonus_item: Option<String>,
    /// Fine charged to each member on failure, in join order
    pub penalties: Vec<(CharacterId, i64)>,
}

pub struct HeistResolver<'a> {
    rules: &'a HeistConstants,
}

impl<'a> HeistResolver<'a> {
    pub fn new(rules: &'a HeistConstants) -> Self {
        HeistResolver { rules }
    }

    /// `clamp(min, max, base + extra_crew*5 + tech + stealth - difficulty*7)`
    pub fn success_chance(&self, party: &HeistParty, leader: &LeaderProfile) -> i64 {
        let r = self.rules;
        let extra_crew = i64::from(party.crew_size().saturating_sub(party.min_crew));
        let tech = i64::from(leader.skills.tech_level) * r.skill_bonus_per_level;
        let stealth = i64::from(leader.skills.stealth_level) * r.skill_bonus_per_level;
        let raw = r.base_chance + extra_crew * r.extra_crew_bonus + tech + stealth
            - i64::from(party.difficulty) * r.difficulty_penalty;
        raw.clamp(r.min_chance, r.max_chance)
    }

    /// Roll the heist. `balances` holds each member's current credits and is
    /// only used to size failure fines.
    pub fn resolve(
        &self,
        party: &HeistParty,
        leader: &LeaderProfile,
        balances: &[(CharacterId, i64)],
        bonus_items: &[String],
        rng: &dyn RandomSource,
    ) -> Result<HeistOutcome, ValidationError> {
        party.check_ready()?;

        let success_chance = self.success_chance(party, leader);
        let roll = rng.percent();
        let success = roll <= success_chance;

        if success {
            let crew = i64::from(party.crew_size());
            let bonus_item = if !bonus_items.is_empty() && rng.roll_under(self.rules.bonus_item_chance) {
                let index = rng.range(0, bonus_items.len() as i64 - 1) as usize;
                bonus_items.get(index).cloned()
            } else {
                None
            };
            Ok(HeistOutcome {
                success,
                success_chance,
                roll,
                reward_per_member: party.reward_pool / crew,
                xp_per_member: i64::from(party.difficulty) * self.rules.xp_per_difficulty,
                bonus_item,
                penalties: Vec::new(),
            })
        } else {
            let penalties = party
                .members()
                .iter()
                .map(|id| {
                    let balance = balances
                        .iter()
                        .find(|(who, _)| who == id)
                        .map(|(_, b)| (*b).max(0))
                        .unwrap_or(0);
                    (*id, balance * self.rules.failure_fine_percent / 100)
                })
                .collect();
            Ok(HeistOutcome {
                success,
                success_chance,
                roll,
                reward_per_member: 0,
                xp_per_member: 0,
                bonus_item: None,
                penalties,
            })
        }
    }
}
