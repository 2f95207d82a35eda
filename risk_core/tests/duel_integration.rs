//! Duel integration tests
//!
//! An exhausted script always draws range minimums, which makes the fights
//! below fully predictable: every hit is `atk - def - 3`.

mod common;

use common::*;
use risk_core::prelude::*;
use risk_core::{PvpRecord, StoreError};

#[test]
fn test_duel_resolves_and_settles() {
    let w = world(scripted(&[]));
    let a = w.add(fighter(1, FACTION_RED, 1_000, 30, 5, 20));
    let b = w.add(member(2, FACTION_BLUE, 1_000));

    let report = w.engine.duel(&DuelRequest::new(a, b)).unwrap();
    let outcome = &report.outcome;

    // 22 damage per hit against 100 HP: the opponent falls in round 5
    // before striking back, having landed four 2-damage hits
    assert_eq!(report.winner, Some(a));
    assert_eq!(outcome.winner, DuelWinner::A);
    assert_eq!(outcome.rounds_elapsed, 5);
    assert_eq!(outcome.log.len(), 9);
    assert_eq!(outcome.final_hp_a, 92);
    assert_eq!(outcome.final_hp_b, 0);
    assert_eq!(outcome.log[0].line(), "Rnd 1: runner-1 → 22 dmg  [runner-2 HP: 78]");

    let winner = w.character(a);
    assert_eq!(winner.credits, 1_200);
    assert_eq!(winner.base.current_hp, 92);
    assert_eq!(winner.xp, 100);
    assert_eq!(
        winner.pvp,
        PvpRecord {
            wins: 1,
            losses: 0,
            rating: 1_025,
        }
    );

    let loser = w.character(b);
    assert_eq!(loser.credits, 900);
    assert_eq!(loser.base.current_hp, 1);
    assert_eq!(loser.pvp.losses, 1);
    assert_eq!(loser.pvp.rating, 985);
}

#[test]
fn test_loss_penalty_capped_at_balance() {
    let w = world(scripted(&[]));
    let a = w.add(fighter(1, FACTION_RED, 1_000, 30, 5, 20));
    let b = w.add(member(2, FACTION_BLUE, 30));

    w.engine.duel(&DuelRequest::new(a, b)).unwrap();
    assert_eq!(w.credits(b), 0);
}

#[test]
fn test_stances_and_unknown_stance() {
    let w = world(scripted(&[]));
    let a = w.add(fighter(1, FACTION_RED, 10_000, 25, 15, 20));
    let b = w.add(member(2, FACTION_BLUE, 10_000));

    // multipliers truncate: 32.5 -> 32, 10.5 -> 10
    let aggressive = w
        .engine
        .duel(&DuelRequest::new(a, b).with_stance("aggressive"))
        .unwrap();
    assert_eq!(aggressive.challenger_stats.attack, 32);
    assert_eq!(aggressive.challenger_stats.defense, 10);

    w.engine.clear_cooldowns(a);
    let unknown = w
        .engine
        .duel(&DuelRequest::new(a, b).with_stance("berserk"))
        .unwrap();
    assert_eq!(unknown.challenger_stats.attack, 25);
    assert_eq!(unknown.challenger_stats.defense, 15);
}

#[test]
fn test_seeded_duels_reproduce() {
    let run = || {
        let w = world(seeded(2077));
        let a = w.add(fighter(1, FACTION_RED, 1_000, 18, 6, 9));
        let b = w.add(fighter(2, FACTION_BLUE, 1_000, 17, 7, 9));
        w.engine.duel(&DuelRequest::new(a, b)).unwrap().outcome
    };
    let first = run();
    assert_eq!(first, run());
    assert!(first.rounds_elapsed <= 50);
}

#[test]
fn test_duel_rejections() {
    let w = world(scripted(&[]));
    let a = w.add(member(1, FACTION_RED, 1_000));
    let poor = w.add(member(2, FACTION_BLUE, 50));

    assert_eq!(
        w.engine.duel(&DuelRequest::new(a, a)).unwrap_err(),
        EngineError::Validation(ValidationError::SelfDuel)
    );
    assert_eq!(
        w.engine.duel(&DuelRequest::new(a, CharacterId(99))).unwrap_err(),
        EngineError::Store(StoreError::CharacterNotFound(CharacterId(99)))
    );
    assert_eq!(
        w.engine.duel(&DuelRequest::new(poor, a)).unwrap_err(),
        EngineError::Resource(ResourceError::InsufficientFunds {
            required: 100,
            available: 50,
        })
    );
    // nothing above touched a balance
    assert_eq!(w.credits(a), 1_000);
    assert_eq!(w.credits(poor), 50);
}

#[test]
fn test_duel_cooldown() {
    let w = world(scripted(&[]));
    let a = w.add(fighter(1, FACTION_RED, 10_000, 30, 5, 20));
    let b = w.add(member(2, FACTION_BLUE, 10_000));

    w.engine.duel(&DuelRequest::new(a, b)).unwrap();
    assert_eq!(
        w.engine.duel(&DuelRequest::new(a, b)).unwrap_err(),
        EngineError::Resource(ResourceError::OnCooldown {
            action: ActionKey::Duel,
            remaining_secs: 300,
        })
    );

    // only the challenger is gated
    assert!(w.engine.duel(&DuelRequest::new(b, a)).is_ok());

    w.clock.advance_secs(120);
    assert_eq!(w.engine.remaining_cooldown(a, ActionKey::Duel), 180);
    w.clock.advance_secs(180);
    assert!(w.engine.duel(&DuelRequest::new(a, b)).is_ok());
}
