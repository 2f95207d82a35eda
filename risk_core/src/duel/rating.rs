//! PvP win/loss record and rating

use crate::config::RatingConstants;
use serde::{Deserialize, Serialize};

/// A character's duel history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvpRecord {
    pub wins: u32,
    pub losses: u32,
    pub rating: i64,
}

impl Default for PvpRecord {
    fn default() -> Self {
        PvpRecord::new(RatingConstants::default().starting)
    }
}

impl PvpRecord {
    pub fn new(starting_rating: i64) -> Self {
        PvpRecord {
            wins: 0,
            losses: 0,
            rating: starting_rating,
        }
    }

    pub fn after_win(self, rules: &RatingConstants) -> Self {
        PvpRecord {
            wins: self.wins + 1,
            rating: self.rating + rules.win_gain,
            ..self
        }
    }

    /// Rating never drops below zero
    pub fn after_loss(self, rules: &RatingConstants) -> Self {
        PvpRecord {
            losses: self.losses + 1,
            rating: (self.rating - rules.loss_drop).max(0),
            ..self
        }
    }

    /// Fraction of duels won, 0.0 with no history
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_and_loss() {
        let rules = RatingConstants::default();
        let record = PvpRecord::default().after_win(&rules).after_loss(&rules);
        assert_eq!(record.wins, 1);
        assert_eq!(record.losses, 1);
        assert_eq!(record.rating, 1010);
        assert!((record.win_rate() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_rating_floor() {
        let rules = RatingConstants::default();
        let record = PvpRecord::new(10).after_loss(&rules);
        assert_eq!(record.rating, 0);
    }
}
