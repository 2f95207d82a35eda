//! Engine - The entry point callers use
//!
//! Loads actors, computes effective stats, gates the action and hands off to
//! the right resolver. Everything is synchronous; concurrent callers are
//! serialized per actor, per territory and per heist.

use crate::catalog::{ModifierCatalog, Stance};
use crate::clock::{Clock, SystemClock};
use crate::config::{default_catalog, default_constants, ConfigError, GameConstants};
use crate::conquest::{
    income_shares, AssaultOutcome, ConquestStateMachine, FortifyOutcome, IncomeSplit, RaidOutcome,
    SiegeContribution, SiegeDeclared, SiegeSession,
};
use crate::context::EngineContext;
use crate::duel::{resolve_duel_with, DuelOutcome, DuelSettlement, DuelWinner};
use crate::error::{EngineError, ValidationError};
use crate::heist::{HeistBoard, HeistCreated, HeistExecution, HeistParty};
use crate::random::{ChaChaSource, RandomSource};
use crate::stats::{AggregationOptions, EffectiveStats};
use crate::store::{
    CharacterDelta, CharacterStore, InMemoryCharacterStore, InMemoryTerritoryStore, TerritoryStore,
};
use crate::types::{ActionKey, CharacterId, FactionId, HeistId, TerritoryKey};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// A duel challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRequest {
    pub challenger: CharacterId,
    pub opponent: CharacterId,
    /// Stance key for the challenger; balanced when absent or unknown
    pub challenger_stance: Option<String>,
    /// Stance key for the opponent; balanced when absent or unknown
    pub opponent_stance: Option<String>,
}

impl DuelRequest {
    pub fn new(challenger: CharacterId, opponent: CharacterId) -> Self {
        DuelRequest {
            challenger,
            opponent,
            challenger_stance: None,
            opponent_stance: None,
        }
    }

    pub fn with_stance(mut self, stance: impl Into<String>) -> Self {
        self.challenger_stance = Some(stance.into());
        self
    }
}

/// A resolved and settled duel. Side A is the challenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelReport {
    pub challenger: CharacterId,
    pub opponent: CharacterId,
    pub winner: Option<CharacterId>,
    pub entry_fee: i64,
    pub challenger_stats: EffectiveStats,
    pub opponent_stats: EffectiveStats,
    pub outcome: DuelOutcome,
    pub settlement: DuelSettlement,
}

pub struct Engine {
    ctx: Arc<EngineContext>,
    conquest: ConquestStateMachine,
    heists: HeistBoard,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn from_context(ctx: EngineContext) -> Self {
        let ctx = Arc::new(ctx);
        Engine {
            conquest: ConquestStateMachine::new(ctx.clone()),
            heists: HeistBoard::new(ctx.clone()),
            ctx,
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn catalog(&self) -> &ModifierCatalog {
        &self.ctx.catalog
    }

    pub fn constants(&self) -> &GameConstants {
        &self.ctx.constants
    }

    /// Effective stats for a stored character
    pub fn effective_stats(
        &self,
        id: CharacterId,
        options: &AggregationOptions,
    ) -> Result<EffectiveStats, EngineError> {
        let character = self.ctx.characters.load(id)?;
        Ok(self.ctx.aggregator.compute_effective(&character, options))
    }

    fn stance_or_balanced(&self, key: Option<&str>) -> Stance {
        match key {
            None => Stance::balanced(),
            Some(key) => self.ctx.catalog.stance(key).cloned().unwrap_or_else(|| {
                debug!(stance = key, "unknown stance, fighting balanced");
                Stance::balanced()
            }),
        }
    }

    /// Challenge another character. The challenger pays the entry fee up front.
    pub fn duel(&self, request: &DuelRequest) -> Result<DuelReport, EngineError> {
        let ctx = &self.ctx;
        let rules = &ctx.constants.duel;
        if request.challenger == request.opponent {
            return Err(ValidationError::SelfDuel.into());
        }

        let actors = ctx.gate.lock_actors(&[request.challenger, request.opponent]);
        ctx.characters.load(request.opponent)?;
        ctx.gate.charge_locked(
            &actors,
            ctx.characters.as_ref(),
            request.challenger,
            ActionKey::Duel,
            rules.entry_fee,
        )?;

        let challenger = ctx.characters.load(request.challenger)?;
        let opponent = ctx.characters.load(request.opponent)?;
        let challenger_options =
            AggregationOptions::with_stance(self.stance_or_balanced(request.challenger_stance.as_deref()));
        let opponent_options =
            AggregationOptions::with_stance(self.stance_or_balanced(request.opponent_stance.as_deref()));
        let challenger_stats = ctx.aggregator.compute_effective(&challenger, &challenger_options);
        let opponent_stats = ctx.aggregator.compute_effective(&opponent, &opponent_options);

        let outcome = resolve_duel_with(
            &challenger_stats,
            &opponent_stats,
            &challenger.name,
            &opponent.name,
            rules,
            ctx.rng.as_ref(),
        );
        let settlement = DuelSettlement::from_outcome(&outcome, &challenger, &opponent, rules);
        if !settlement.delta_a.is_empty() {
            ctx.characters.save_delta(challenger.id, &settlement.delta_a)?;
        }
        if !settlement.delta_b.is_empty() {
            ctx.characters.save_delta(opponent.id, &settlement.delta_b)?;
        }

        let winner = match outcome.winner {
            DuelWinner::A => Some(challenger.id),
            DuelWinner::B => Some(opponent.id),
            DuelWinner::Draw => None,
        };
        info!(
            challenger = %challenger.id,
            opponent = %opponent.id,
            rounds = outcome.rounds_elapsed,
            ?winner,
            "duel resolved"
        );

        Ok(DuelReport {
            challenger: challenger.id,
            opponent: opponent.id,
            winner,
            entry_fee: rules.entry_fee,
            challenger_stats,
            opponent_stats,
            outcome,
            settlement,
        })
    }

    pub fn raid(&self, attacker: CharacterId, territory: &TerritoryKey) -> Result<RaidOutcome, EngineError> {
        self.conquest.raid(attacker, territory)
    }

    pub fn assault(
        &self,
        attacker: CharacterId,
        territory: &TerritoryKey,
        faction_size: u32,
    ) -> Result<AssaultOutcome, EngineError> {
        self.conquest.assault(attacker, territory, faction_size)
    }

    pub fn declare_siege(
        &self,
        attacker: CharacterId,
        territory: &TerritoryKey,
        faction_size: u32,
    ) -> Result<SiegeDeclared, EngineError> {
        self.conquest.declare_siege(attacker, territory, faction_size)
    }

    pub fn contribute_to_siege(
        &self,
        attacker: CharacterId,
        territory: &TerritoryKey,
    ) -> Result<SiegeContribution, EngineError> {
        self.conquest.contribute_to_siege(attacker, territory)
    }

    pub fn fortify(
        &self,
        owner: CharacterId,
        territory: &TerritoryKey,
        amount: u32,
    ) -> Result<FortifyOutcome, EngineError> {
        self.conquest.fortify(owner, territory, amount)
    }

    pub fn siege_status(&self, territory: &TerritoryKey) -> Option<SiegeSession> {
        self.conquest.siege_status(territory)
    }

    pub fn active_sieges(&self) -> Vec<SiegeSession> {
        self.conquest.active_sieges()
    }

    pub fn restore_siege(&self, session: SiegeSession) {
        self.conquest.restore_siege(session)
    }

    pub fn create_heist(&self, leader: CharacterId, target_index: usize) -> Result<HeistCreated, EngineError> {
        self.heists.create(leader, target_index)
    }

    pub fn join_heist(&self, heist: HeistId, member: CharacterId) -> Result<HeistParty, EngineError> {
        self.heists.join(heist, member)
    }

    pub fn execute_heist(&self, heist: HeistId, caller: CharacterId) -> Result<HeistExecution, EngineError> {
        self.heists.execute(heist, caller)
    }

    pub fn heist(&self, heist: HeistId) -> Option<HeistParty> {
        self.heists.get(heist)
    }

    pub fn open_heists(&self) -> Vec<HeistParty> {
        self.heists.open_heists()
    }

    /// Drop heists resolved more than `max_age_secs` ago
    pub fn prune_resolved_heists(&self, max_age_secs: i64) -> usize {
        let cutoff = self.ctx.clock.now() - chrono::Duration::seconds(max_age_secs);
        self.heists.prune_resolved(cutoff)
    }

    /// Pay each member an equal share of the income from the listed
    /// territories their faction owns
    pub fn distribute_income(
        &self,
        territories: &[TerritoryKey],
        faction: FactionId,
        members: &[CharacterId],
    ) -> Result<IncomeSplit, EngineError> {
        let ctx = &self.ctx;
        let mut loaded = Vec::with_capacity(territories.len());
        for key in territories {
            loaded.push(ctx.territories.load(key)?);
        }
        let split = income_shares(&loaded, faction, members);

        if split.per_member > 0 {
            let _members = ctx.gate.lock_actors(members);
            for (id, share) in &split.shares {
                ctx.characters.save_delta(*id, &CharacterDelta::currency(*share))?;
            }
        }
        Ok(split)
    }

    pub fn remaining_cooldown(&self, actor: CharacterId, action: ActionKey) -> i64 {
        self.ctx.gate.remaining_cooldown(actor, action)
    }

    pub fn clear_cooldowns(&self, actor: CharacterId) {
        self.ctx.gate.clear_cooldowns(actor)
    }
}

/// Assembles an [`Engine`]; every collaborator has an in-memory default
#[derive(Default)]
pub struct EngineBuilder {
    characters: Option<Arc<dyn CharacterStore>>,
    territories: Option<Arc<dyn TerritoryStore>>,
    catalog: Option<ModifierCatalog>,
    constants: Option<GameConstants>,
    clock: Option<Arc<dyn Clock>>,
    rng: Option<Arc<dyn RandomSource>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn characters(mut self, store: Arc<dyn CharacterStore>) -> Self {
        self.characters = Some(store);
        self
    }

    pub fn territories(mut self, store: Arc<dyn TerritoryStore>) -> Self {
        self.territories = Some(store);
        self
    }

    pub fn catalog(mut self, catalog: ModifierCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn constants(mut self, constants: GameConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn rng(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Shorthand for a seeded ChaCha source
    pub fn seed(self, seed: u64) -> Self {
        self.rng(Arc::new(ChaChaSource::seeded(seed)))
    }

    /// Assemble the engine. Constants are validated first, so a hand-built
    /// table with inverted ranges is rejected here rather than at roll time.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let constants = self.constants.unwrap_or_else(default_constants);
        constants.validate()?;
        let ctx = EngineContext::new(
            self.characters
                .unwrap_or_else(|| Arc::new(InMemoryCharacterStore::new())),
            self.territories
                .unwrap_or_else(|| Arc::new(InMemoryTerritoryStore::seeded())),
            Arc::new(self.catalog.unwrap_or_else(default_catalog)),
            Arc::new(constants),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.rng
                .unwrap_or_else(|| Arc::new(ChaChaSource::from_entropy())),
        );
        Ok(Engine::from_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    #[test]
    fn test_builder_defaults() {
        let engine = Engine::builder().seed(1).build().unwrap();
        assert_eq!(engine.constants().duel.max_rounds, 50);
        assert!(engine.catalog().stance("aggressive").is_some());
        assert!(engine.active_sieges().is_empty());
    }

    #[test]
    fn test_builder_rejects_inverted_heist_chance() {
        let mut constants = GameConstants::default();
        constants.heist.min_chance = 90;
        constants.heist.max_chance = 20;
        let result = Engine::builder()
            .constants(constants)
            .rng(Arc::new(ScriptedSource::default()))
            .build();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_builder_rejects_roundless_duels() {
        let mut constants = GameConstants::default();
        constants.duel.max_rounds = 0;
        assert!(Engine::builder().constants(constants).seed(3).build().is_err());
    }
}
