//! HeistBoard - Creating, joining and executing heists
//!
//! Lock order is heist first, then actors.

use super::{HeistOutcome, HeistParty, HeistResolver, HeistStatus, LeaderProfile};
use crate::context::EngineContext;
use crate::error::{EngineError, ValidationError};
use crate::locks::KeyedLocks;
use crate::stats::AggregationOptions;
use crate::store::CharacterDelta;
use crate::types::{ActionKey, CharacterId, HeistId};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// A heist posted to the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeistCreated {
    pub party: HeistParty,
    pub planning_fee: i64,
}

/// Result of an execute call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeistExecution {
    /// This call resolved the heist
    Resolved(HeistOutcome),
    /// Someone else already resolved it; nothing was paid again
    AlreadyResolved(HeistOutcome),
}

impl HeistExecution {
    pub fn outcome(&self) -> &HeistOutcome {
        match self {
            HeistExecution::Resolved(o) | HeistExecution::AlreadyResolved(o) => o,
        }
    }
}

pub struct HeistBoard {
    ctx: Arc<EngineContext>,
    parties: Mutex<HashMap<HeistId, HeistParty>>,
    heist_locks: KeyedLocks<HeistId>,
    next_id: AtomicU64,
}

impl HeistBoard {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        HeistBoard {
            ctx,
            parties: Mutex::new(HashMap::new()),
            heist_locks: KeyedLocks::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn party(&self, id: HeistId) -> Result<HeistParty, ValidationError> {
        self.parties
            .lock()
            .get(&id)
            .cloned()
            .ok_or(ValidationError::UnknownHeist(id))
    }

    fn store_party(&self, party: HeistParty) {
        self.parties.lock().insert(party.id, party);
    }

    /// Post a heist against the target at `target_index`. The leader pays the
    /// planning fee and becomes the first crew member.
    pub fn create(&self, leader: CharacterId, target_index: usize) -> Result<HeistCreated, EngineError> {
        let ctx = &self.ctx;
        let target = ctx
            .catalog
            .heist_target(target_index)
            .ok_or(ValidationError::UnknownHeistTarget(target_index))?
            .clone();
        let planning_fee = target.reward * ctx.constants.heist.planning_fee_percent / 100;

        let actor = ctx.gate.lock_actor(leader);
        let id = HeistId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let party = HeistParty::new(id, leader, &target, ctx.clock.now())?;

        ctx.gate.charge_locked(
            &actor,
            ctx.characters.as_ref(),
            leader,
            ActionKey::HeistCreate,
            planning_fee,
        )?;
        self.store_party(party.clone());
        info!(heist = %id, %leader, target = %party.target_name, "heist posted");

        Ok(HeistCreated {
            party,
            planning_fee,
        })
    }

    /// Add a member to a recruiting heist
    pub fn join(&self, heist: HeistId, member: CharacterId) -> Result<HeistParty, EngineError> {
        let ctx = &self.ctx;
        let _heist = self.heist_locks.lock(&heist);
        let mut party = self.party(heist)?;
        party.check_join(member)?;

        let actor = ctx.gate.lock_actor(member);
        ctx.characters.load(member)?;
        ctx.gate
            .charge_locked(&actor, ctx.characters.as_ref(), member, ActionKey::HeistJoin, 0)?;

        party.join(member)?;
        self.store_party(party.clone());
        Ok(party)
    }

    /// Resolve a heist. Only the leader may execute, and only once.
    pub fn execute(&self, heist: HeistId, caller: CharacterId) -> Result<HeistExecution, EngineError> {
        let ctx = &self.ctx;
        let _heist = self.heist_locks.lock(&heist);
        let mut party = self.party(heist)?;

        if let HeistStatus::Resolved(outcome) = &party.status {
            return Ok(HeistExecution::AlreadyResolved(outcome.clone()));
        }
        if party.leader != caller {
            return Err(ValidationError::NotLeader(heist).into());
        }
        party.check_ready()?;

        let _crew = ctx.gate.lock_actors(party.members());
        let leader = ctx.characters.load(party.leader)?;
        let profile = LeaderProfile {
            stats: ctx
                .aggregator
                .compute_effective(&leader, &AggregationOptions::default()),
            skills: ctx.aggregator.skill_profile(&leader),
        };
        let mut balances = Vec::with_capacity(party.members().len());
        for id in party.members() {
            balances.push((*id, ctx.characters.load(*id)?.credits));
        }

        let resolver = HeistResolver::new(&ctx.constants.heist);
        let outcome = resolver.resolve(
            &party,
            &profile,
            &balances,
            ctx.catalog.bonus_items(),
            ctx.rng.as_ref(),
        )?;

        if outcome.success {
            let delta = CharacterDelta::currency(outcome.reward_per_member).with_xp(outcome.xp_per_member);
            for id in party.members() {
                ctx.characters.save_delta(*id, &delta)?;
            }
        } else {
            for (id, fine) in &outcome.penalties {
                if *fine > 0 {
                    ctx.characters.save_delta(*id, &CharacterDelta::currency(-fine))?;
                }
            }
        }

        party.resolve(outcome.clone(), ctx.clock.now());
        self.store_party(party);
        info!(%heist, success = outcome.success, chance = outcome.success_chance, "heist resolved");

        Ok(HeistExecution::Resolved(outcome))
    }

    /// Forget heists resolved before `cutoff`, along with their locks.
    /// Returns how many were dropped. A pruned id reads as unknown afterwards.
    pub fn prune_resolved(&self, cutoff: DateTime<Utc>) -> usize {
        let stale: Vec<HeistId> = self
            .parties
            .lock()
            .values()
            .filter(|p| p.resolved_before(cutoff))
            .map(|p| p.id)
            .collect();

        let mut pruned = 0;
        for id in stale {
            let _heist = self.heist_locks.lock(&id);
            if self.parties.lock().remove(&id).is_some() {
                pruned += 1;
            }
            self.heist_locks.remove(&id);
        }
        if pruned > 0 {
            info!(pruned, "pruned resolved heists");
        }
        pruned
    }

    pub fn get(&self, heist: HeistId) -> Option<HeistParty> {
        self.parties.lock().get(&heist).cloned()
    }

    /// Heists still accepting crew, oldest first
    pub fn open_heists(&self) -> Vec<HeistParty> {
        let mut open: Vec<_> = self
            .parties
            .lock()
            .values()
            .filter(|p| p.is_recruiting())
            .cloned()
            .collect();
        open.sort_by_key(|p| p.id);
        open
    }
}
