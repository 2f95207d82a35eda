//! Applying a duel outcome to both characters

use super::{DuelOutcome, DuelWinner, PvpRecord};
use crate::character::Character;
use crate::config::DuelConstants;
use crate::store::CharacterDelta;
use serde::{Deserialize, Serialize};

/// Store deltas for both duelists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelSettlement {
    pub delta_a: CharacterDelta,
    pub delta_b: CharacterDelta,
}

impl DuelSettlement {
    /// Winner keeps surviving HP (at least 1), gains the reward, XP and rating.
    /// Loser drops to 1 HP and pays the penalty, capped at their balance.
    /// A draw changes nothing.
    pub fn from_outcome(
        outcome: &DuelOutcome,
        a: &Character,
        b: &Character,
        rules: &DuelConstants,
    ) -> Self {
        let (winner, loser, winner_hp) = match outcome.winner {
            DuelWinner::A => (a, b, outcome.final_hp_a),
            DuelWinner::B => (b, a, outcome.final_hp_b),
            DuelWinner::Draw => {
                return DuelSettlement {
                    delta_a: CharacterDelta::default(),
                    delta_b: CharacterDelta::default(),
                }
            }
        };

        let winner_delta = CharacterDelta::currency(rules.win_reward)
            .with_hp(winner_hp.max(1))
            .with_xp(rules.win_xp)
            .with_pvp(PvpRecord::after_win(winner.pvp, &rules.rating));

        let penalty = rules.loss_penalty.min(loser.credits.max(0));
        let loser_delta = CharacterDelta::currency(-penalty)
            .with_hp(1)
            .with_pvp(PvpRecord::after_loss(loser.pvp, &rules.rating));

        match outcome.winner {
            DuelWinner::A => DuelSettlement {
                delta_a: winner_delta,
                delta_b: loser_delta,
            },
            _ => DuelSettlement {
                delta_a: loser_delta,
                delta_b: winner_delta,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::DuelSide;
    use crate::types::CharacterId;

    fn outcome(winner: DuelWinner, hp_a: i64, hp_b: i64) -> DuelOutcome {
        DuelOutcome {
            winner,
            rounds_elapsed: 4,
            first_striker: DuelSide::A,
            log: Vec::new(),
            final_hp_a: hp_a,
            final_hp_b: hp_b,
        }
    }

    #[test]
    fn test_winner_and_loser_deltas() {
        let a = Character::new(CharacterId(1), "A").with_credits(500);
        let b = Character::new(CharacterId(2), "B").with_credits(500);
        let s = DuelSettlement::from_outcome(&outcome(DuelWinner::B, 0, 37), &a, &b, &DuelConstants::default());

        assert_eq!(s.delta_b.currency_delta, 300);
        assert_eq!(s.delta_b.hp_absolute, Some(37));
        assert_eq!(s.delta_b.xp_delta, 100);
        assert_eq!(s.delta_b.pvp.unwrap().rating, 1025);

        assert_eq!(s.delta_a.currency_delta, -100);
        assert_eq!(s.delta_a.hp_absolute, Some(1));
        assert_eq!(s.delta_a.pvp.unwrap().losses, 1);
    }

    #[test]
    fn test_penalty_capped_at_balance() {
        let a = Character::new(CharacterId(1), "A").with_credits(500);
        let b = Character::new(CharacterId(2), "B").with_credits(40);
        let s = DuelSettlement::from_outcome(&outcome(DuelWinner::A, 12, 0), &a, &b, &DuelConstants::default());
        assert_eq!(s.delta_b.currency_delta, -40);
    }

    #[test]
    fn test_draw_changes_nothing() {
        let a = Character::new(CharacterId(1), "A");
        let b = Character::new(CharacterId(2), "B");
        let s = DuelSettlement::from_outcome(&outcome(DuelWinner::Draw, 20, 20), &a, &b, &DuelConstants::default());
        assert!(s.delta_a.is_empty());
        assert!(s.delta_b.is_empty());
    }
}
