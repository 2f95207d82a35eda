//! Faction income split

use super::Territory;
use crate::types::{CharacterId, FactionId};
use serde::{Deserialize, Serialize};

/// How a faction's territory income divides among its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSplit {
    pub faction: FactionId,
    pub territories_held: usize,
    pub total: i64,
    /// Floor of total / members; the remainder is not paid out
    pub per_member: i64,
    pub shares: Vec<(CharacterId, i64)>,
}

/// Sum the income of every territory `faction` owns and split it evenly
pub fn income_shares(
    territories: &[Territory],
    faction: FactionId,
    members: &[CharacterId],
) -> IncomeSplit {
    let held: Vec<_> = territories
        .iter()
        .filter(|t| t.is_owned_by(faction))
        .collect();
    let total: i64 = held.iter().map(|t| t.income_rate).sum();
    let per_member = if members.is_empty() {
        0
    } else {
        total / members.len() as i64
    };

    IncomeSplit {
        faction,
        territories_held: held.len(),
        total,
        per_member,
        shares: members.iter().map(|m| (*m, per_member)).collect(),
    }
}
