//! ConquestStateMachine - Raid, assault, siege and fortify
//!
//! Lock order is territory first, then actor. Every precondition is checked
//! before the gate charges, so a rejected call never mutates anything.

use super::outcome::{AssaultOutcome, FortifyOutcome, RaidOutcome, SiegeContribution, SiegeDeclared};
use super::{SiegeRegistry, SiegeSession, MAX_DEFENSE};
use crate::context::EngineContext;
use crate::error::{EngineError, ValidationError};
use crate::locks::KeyedLocks;
use crate::store::CharacterDelta;
use crate::types::{ActionKey, CharacterId, TerritoryKey};
use std::sync::Arc;
use tracing::{debug, info};

/// Territory state transitions
pub struct ConquestStateMachine {
    ctx: Arc<EngineContext>,
    territory_locks: KeyedLocks<TerritoryKey>,
    sieges: SiegeRegistry,
}

/// HP after taking `damage`, floored at 0
fn wounded(current_hp: i64, damage: i64) -> i64 {
    (current_hp - damage).max(0)
}

impl ConquestStateMachine {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        ConquestStateMachine {
            ctx,
            territory_locks: KeyedLocks::new(),
            sieges: SiegeRegistry::new(),
        }
    }

    pub fn sieges(&self) -> &SiegeRegistry {
        &self.sieges
    }

    /// Hit-and-run on a territory for a share of its income
    pub fn raid(&self, attacker: CharacterId, key: &TerritoryKey) -> Result<RaidOutcome, EngineError> {
        let ctx = &self.ctx;
        let rules = &ctx.constants.raid;
        let _territory = self.territory_locks.lock(key);
        let actor = ctx.gate.lock_actor(attacker);

        let (character, stats) = ctx.load_with_stats(attacker)?;
        let faction = EngineContext::require_faction(&character)?;
        let territory = ctx.territories.load(key)?;
        if territory.is_owned_by(faction) {
            return Err(ValidationError::AlreadyOwned(key.clone()).into());
        }

        ctx.gate.charge_locked(
            &actor,
            ctx.characters.as_ref(),
            attacker,
            ActionKey::TerritoryAttack,
            rules.cost,
        )?;

        let attack_score = stats.speed * 2 + stats.attack + ctx.rng.range(1, rules.attacker_roll_max);
        let defense_score = i64::from(territory.defense) + ctx.rng.range(1, rules.defender_roll_max);
        let success = attack_score > defense_score;

        let mut outcome = RaidOutcome {
            territory: key.clone(),
            success,
            attack_score,
            defense_score,
            cost: rules.cost,
            credits_stolen: 0,
            hp_lost: 0,
            xp_gained: 0,
            defense_after: territory.defense,
        };

        if success {
            let percent = ctx.rng.range(rules.steal_percent_min, rules.steal_percent_max);
            outcome.credits_stolen = territory.income_rate * percent / 100;
            outcome.xp_gained = rules.success_xp;
            outcome.defense_after = territory.defense.saturating_sub(rules.defense_decrement);

            ctx.territories.save_defense(key, outcome.defense_after)?;
            ctx.characters.save_delta(
                attacker,
                &CharacterDelta::currency(outcome.credits_stolen).with_xp(outcome.xp_gained),
            )?;
        } else {
            outcome.hp_lost = ctx.rng.range(rules.failure_damage_min, rules.failure_damage_max);
            ctx.characters.save_delta(
                attacker,
                &CharacterDelta::default().with_hp(wounded(character.base.current_hp, outcome.hp_lost)),
            )?;
        }

        debug!(%attacker, territory = %key, success, attack_score, defense_score, "raid resolved");
        Ok(outcome)
    }

    /// Full attack to take a territory. Needs a faction of at least two.
    pub fn assault(
        &self,
        attacker: CharacterId,
        key: &TerritoryKey,
        faction_size: u32,
    ) -> Result<AssaultOutcome, EngineError> {
        let ctx = &self.ctx;
        let rules = &ctx.constants.assault;
        let _territory = self.territory_locks.lock(key);
        let actor = ctx.gate.lock_actor(attacker);

        let (character, stats) = ctx.load_with_stats(attacker)?;
        let faction = EngineContext::require_faction(&character)?;
        let territory = ctx.territories.load(key)?;
        if territory.is_owned_by(faction) {
            return Err(ValidationError::AlreadyOwned(key.clone()).into());
        }
        if faction_size < rules.min_faction_size {
            return Err(ValidationError::FactionTooSmall {
                action: "assault",
                required: rules.min_faction_size,
                actual: faction_size,
            }
            .into());
        }

        ctx.gate.charge_locked(
            &actor,
            ctx.characters.as_ref(),
            attacker,
            ActionKey::TerritoryAttack,
            rules.cost,
        )?;

        let attack_score = stats.attack
            + stats.defense
            + stats.speed
            + i64::from(faction_size) * rules.faction_weight
            + ctx.rng.range(1, rules.roll_max);
        let defense_score = i64::from(territory.defense) * 2 + ctx.rng.range(1, rules.roll_max);
        let success = attack_score > defense_score;

        let mut outcome = AssaultOutcome {
            territory: key.clone(),
            success,
            attack_score,
            defense_score,
            cost: rules.cost,
            hp_lost: 0,
            xp_gained: 0,
            new_owner: None,
            defense_after: territory.defense,
        };

        if success {
            outcome.new_owner = Some(faction);
            outcome.xp_gained = rules.success_xp;
            outcome.defense_after = rules.capture_defense;

            ctx.territories.save_ownership(key, faction, rules.capture_defense)?;
            self.sieges.end_if_besieger(key, faction);
            ctx.characters
                .save_delta(attacker, &CharacterDelta::default().with_xp(outcome.xp_gained))?;
            info!(%faction, territory = %key, "territory captured by assault");
        } else {
            outcome.hp_lost = ctx.rng.range(rules.failure_damage_min, rules.failure_damage_max);
            outcome.xp_gained = rules.failure_xp;
            ctx.characters.save_delta(
                attacker,
                &CharacterDelta::default()
                    .with_hp(wounded(character.base.current_hp, outcome.hp_lost))
                    .with_xp(outcome.xp_gained),
            )?;
        }

        Ok(outcome)
    }

    /// Open a siege against a well-defended territory
    pub fn declare_siege(
        &self,
        attacker: CharacterId,
        key: &TerritoryKey,
        faction_size: u32,
    ) -> Result<SiegeDeclared, EngineError> {
        let ctx = &self.ctx;
        let rules = &ctx.constants.siege;
        let _territory = self.territory_locks.lock(key);
        let actor = ctx.gate.lock_actor(attacker);

        let character = ctx.characters.load(attacker)?;
        let faction = EngineContext::require_faction(&character)?;
        let territory = ctx.territories.load(key)?;
        if territory.is_owned_by(faction) {
            return Err(ValidationError::AlreadyOwned(key.clone()).into());
        }
        if territory.defense < rules.min_defense {
            return Err(ValidationError::DefenseTooLow {
                territory: key.clone(),
                defense: territory.defense,
                required: rules.min_defense,
            }
            .into());
        }
        if faction_size < rules.min_faction_size {
            return Err(ValidationError::FactionTooSmall {
                action: "siege",
                required: rules.min_faction_size,
                actual: faction_size,
            }
            .into());
        }
        if let Some(existing) = self.sieges.get(key) {
            let rejection = if existing.attacker_faction == faction {
                ValidationError::SiegeAlreadyActive(key.clone())
            } else {
                ValidationError::SiegeContested {
                    territory: key.clone(),
                    besieger: existing.attacker_faction,
                }
            };
            return Err(rejection.into());
        }

        ctx.gate.charge_locked(
            &actor,
            ctx.characters.as_ref(),
            attacker,
            ActionKey::TerritoryAttack,
            rules.declare_cost,
        )?;

        let session = SiegeSession {
            territory: key.clone(),
            attacker_faction: faction,
            siege_hp: rules.starting_hp,
            started_at: ctx.clock.now(),
            declared_by: attacker,
            territory_defense: territory.defense,
            contributions: 0,
        };
        self.sieges.put(session.clone());
        info!(%faction, territory = %key, "siege declared");

        Ok(SiegeDeclared {
            session,
            cost: rules.declare_cost,
        })
    }

    /// Wear down an active siege. The contribution that brings siege HP to 0
    /// transfers the territory; anyone arriving after that gets
    /// [`SiegeContribution::AlreadyCaptured`].
    pub fn contribute_to_siege(
        &self,
        attacker: CharacterId,
        key: &TerritoryKey,
    ) -> Result<SiegeContribution, EngineError> {
        let ctx = &self.ctx;
        let rules = &ctx.constants.siege;
        let _territory = self.territory_locks.lock(key);
        let actor = ctx.gate.lock_actor(attacker);

        let (character, stats) = ctx.load_with_stats(attacker)?;
        let faction = EngineContext::require_faction(&character)?;

        let Some(mut session) = self.sieges.get(key) else {
            let territory = ctx.territories.load(key)?;
            if territory.is_owned_by(faction) {
                debug!(%attacker, territory = %key, "siege already resolved in our favour");
                return Ok(SiegeContribution::AlreadyCaptured {
                    territory: key.clone(),
                    faction,
                });
            }
            return Err(ValidationError::NoActiveSiege(key.clone()).into());
        };
        if session.attacker_faction != faction {
            return Err(ValidationError::NotBesieger {
                territory: key.clone(),
                besieger: session.attacker_faction,
            }
            .into());
        }

        ctx.gate.charge_locked(
            &actor,
            ctx.characters.as_ref(),
            attacker,
            ActionKey::SiegeContribute,
            rules.contribute_cost,
        )?;

        let damage = ctx.rng.range(rules.damage_min, rules.damage_max) + stats.attack / 2;
        let hp_lost = if ctx.rng.roll_under(rules.casualty_chance) {
            ctx.rng.range(rules.casualty_damage_min, rules.casualty_damage_max)
        } else {
            0
        };

        session.siege_hp = (session.siege_hp - damage).max(0);
        session.contributions += 1;

        let mut delta = CharacterDelta::default();
        if hp_lost > 0 {
            delta = delta.with_hp(wounded(character.base.current_hp, hp_lost));
        }

        if session.siege_hp == 0 {
            ctx.territories.save_ownership(key, faction, rules.capture_defense)?;
            self.sieges.remove(key);
            ctx.characters.save_delta(attacker, &delta.with_xp(rules.capture_xp))?;
            info!(%faction, territory = %key, contributions = session.contributions, "siege broken, territory captured");
            return Ok(SiegeContribution::Captured {
                territory: key.clone(),
                faction,
                damage,
                hp_lost,
                cost: rules.contribute_cost,
                xp_gained: rules.capture_xp,
                defense_after: rules.capture_defense,
            });
        }

        let siege_hp_remaining = session.siege_hp;
        self.sieges.put(session);
        if !delta.is_empty() {
            ctx.characters.save_delta(attacker, &delta)?;
        }
        Ok(SiegeContribution::Progress {
            territory: key.clone(),
            damage,
            siege_hp_remaining,
            hp_lost,
            cost: rules.contribute_cost,
        })
    }

    /// Raise an owned territory's defense. Only the applied points are charged.
    pub fn fortify(
        &self,
        owner: CharacterId,
        key: &TerritoryKey,
        amount: u32,
    ) -> Result<FortifyOutcome, EngineError> {
        let ctx = &self.ctx;
        let rules = &ctx.constants.fortify;
        let max_defense = rules.max_defense.min(MAX_DEFENSE);
        let _territory = self.territory_locks.lock(key);
        let actor = ctx.gate.lock_actor(owner);

        if amount == 0 {
            return Err(ValidationError::NonPositiveAmount.into());
        }
        let character = ctx.characters.load(owner)?;
        let faction = EngineContext::require_faction(&character)?;
        let territory = ctx.territories.load(key)?;
        if !territory.is_owned_by(faction) {
            return Err(ValidationError::NotOwner(key.clone()).into());
        }
        if territory.defense >= max_defense {
            return Err(ValidationError::DefenseMaxed(key.clone()).into());
        }

        let applied = amount.min(max_defense - territory.defense);
        let cost = i64::from(applied) * rules.cost_per_point;
        ctx.gate.charge_locked(
            &actor,
            ctx.characters.as_ref(),
            owner,
            ActionKey::Fortify,
            cost,
        )?;

        let defense_after = territory.defense + applied;
        let xp_gained = i64::from(applied) * rules.xp_per_point;
        ctx.territories.save_defense(key, defense_after)?;
        ctx.characters
            .save_delta(owner, &CharacterDelta::default().with_xp(xp_gained))?;

        Ok(FortifyOutcome {
            territory: key.clone(),
            requested: amount,
            applied,
            cost,
            xp_gained,
            defense_after,
        })
    }

    /// The active siege on a territory, if any
    pub fn siege_status(&self, key: &TerritoryKey) -> Option<SiegeSession> {
        self.sieges.get(key)
    }

    pub fn active_sieges(&self) -> Vec<SiegeSession> {
        self.sieges.snapshot()
    }

    /// Put back a previously persisted session
    pub fn restore_siege(&self, session: SiegeSession) {
        let _territory = self.territory_locks.lock(&session.territory);
        self.sieges.put(session);
    }
}
