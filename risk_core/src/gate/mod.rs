//! ResourceGate - Atomic currency and cooldown checks
//!
//! Every contested action passes through the gate before it resolves. The
//! gate serializes work per actor, so two concurrent requests from the same
//! character can never both spend the same balance.

mod cooldown;

pub use cooldown::CooldownTable;

use crate::clock::Clock;
use crate::config::CooldownConstants;
use crate::error::{EngineError, ResourceError};
use crate::locks::{KeyGuard, KeyedLocks};
use crate::store::{CharacterDelta, CharacterStore};
use crate::types::{ActionKey, CharacterId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Proof that one or more actors are locked for the lifetime of the guard
pub struct ActorGuard {
    actors: Vec<CharacterId>,
    _guards: Vec<KeyGuard>,
}

impl ActorGuard {
    pub fn holds(&self, actor: CharacterId) -> bool {
        self.actors.contains(&actor)
    }
}

/// Record of a successful charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    pub actor: CharacterId,
    pub action: ActionKey,
    pub charged: i64,
    pub balance_after: i64,
}

/// Per-actor serialization, cooldowns and funds checks
pub struct ResourceGate {
    clock: Arc<dyn Clock>,
    actor_locks: KeyedLocks<CharacterId>,
    cooldowns: CooldownTable,
}

impl ResourceGate {
    pub fn new(clock: Arc<dyn Clock>, cooldowns: CooldownConstants) -> Self {
        ResourceGate {
            clock,
            actor_locks: KeyedLocks::new(),
            cooldowns: CooldownTable::new(cooldowns),
        }
    }

    /// Lock one actor
    pub fn lock_actor(&self, actor: CharacterId) -> ActorGuard {
        self.lock_actors(&[actor])
    }

    /// Lock several actors in a deadlock-free order
    pub fn lock_actors(&self, actors: &[CharacterId]) -> ActorGuard {
        let guards = self.actor_locks.lock_many(actors);
        let mut held = actors.to_vec();
        held.sort();
        held.dedup();
        ActorGuard {
            actors: held,
            _guards: guards,
        }
    }

    /// Lock the actor, then check and charge in one step
    pub fn check_and_charge(
        &self,
        store: &dyn CharacterStore,
        actor: CharacterId,
        action: ActionKey,
        cost: i64,
    ) -> Result<ChargeReceipt, EngineError> {
        let guard = self.lock_actor(actor);
        self.charge_locked(&guard, store, actor, action, cost)
    }

    /// Check cooldown and funds without charging. The caller must hold the actor lock.
    pub fn check_locked(
        &self,
        guard: &ActorGuard,
        store: &dyn CharacterStore,
        actor: CharacterId,
        action: ActionKey,
        cost: i64,
    ) -> Result<i64, EngineError> {
        debug_assert!(guard.holds(actor), "actor {actor} is not locked");

        let remaining = self.cooldowns.remaining(actor, action, self.clock.now());
        if remaining > 0 {
            debug!(%actor, %action, remaining, "rejected: on cooldown");
            return Err(ResourceError::OnCooldown {
                action,
                remaining_secs: remaining,
            }
            .into());
        }

        let available = store.load(actor)?.credits;
        if available < cost {
            debug!(%actor, %action, cost, available, "rejected: insufficient funds");
            return Err(ResourceError::InsufficientFunds {
                required: cost,
                available,
            }
            .into());
        }
        Ok(available)
    }

    /// Check, then debit `cost` and start the action's cooldown.
    /// The caller must hold the actor lock.
    pub fn charge_locked(
        &self,
        guard: &ActorGuard,
        store: &dyn CharacterStore,
        actor: CharacterId,
        action: ActionKey,
        cost: i64,
    ) -> Result<ChargeReceipt, EngineError> {
        let available = self.check_locked(guard, store, actor, action, cost)?;

        if cost != 0 {
            store.save_delta(actor, &CharacterDelta::currency(-cost))?;
        }
        self.cooldowns.start(actor, action, self.clock.now());
        debug!(%actor, %action, cost, "charged");

        Ok(ChargeReceipt {
            actor,
            action,
            charged: cost,
            balance_after: available - cost,
        })
    }

    /// Seconds until `action` is available again for `actor`
    pub fn remaining_cooldown(&self, actor: CharacterId, action: ActionKey) -> i64 {
        self.cooldowns.remaining(actor, action, self.clock.now())
    }

    /// Drop every cooldown an actor has running
    pub fn clear_cooldowns(&self, actor: CharacterId) {
        self.cooldowns.clear(actor);
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}
