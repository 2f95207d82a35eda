//! Error taxonomy for contested-action resolution

use crate::types::{ActionKey, CharacterId, FactionId, HeistId, TerritoryKey};
use thiserror::Error;

/// A precondition of the requested action was not met.
///
/// These are user errors: nothing has been charged or mutated when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a character cannot duel themselves")]
    SelfDuel,
    #[error("{0} is not in a faction")]
    NoFaction(CharacterId),
    #[error("your faction already controls {0}")]
    AlreadyOwned(TerritoryKey),
    #[error("{action} needs at least {required} faction members, you have {actual}")]
    FactionTooSmall {
        action: &'static str,
        required: u32,
        actual: u32,
    },
    #[error("{territory} has defense {defense}; sieges need defense of at least {required}")]
    DefenseTooLow {
        territory: TerritoryKey,
        defense: u32,
        required: u32,
    },
    #[error("a siege on {0} is already active")]
    SiegeAlreadyActive(TerritoryKey),
    #[error("{territory} is already under siege by {besieger}")]
    SiegeContested {
        territory: TerritoryKey,
        besieger: FactionId,
    },
    #[error("there is no active siege on {0}")]
    NoActiveSiege(TerritoryKey),
    #[error("{territory} is besieged by {besieger}, not your faction")]
    NotBesieger {
        territory: TerritoryKey,
        besieger: FactionId,
    },
    #[error("only the owning faction can fortify {0}")]
    NotOwner(TerritoryKey),
    #[error("{0} is already at maximum defense")]
    DefenseMaxed(TerritoryKey),
    #[error("amount must be positive")]
    NonPositiveAmount,
    #[error("no heist target at index {0}")]
    UnknownHeistTarget(usize),
    #[error("{0} does not exist")]
    UnknownHeist(HeistId),
    #[error("{0} is no longer recruiting")]
    HeistNotRecruiting(HeistId),
    #[error("{member} is already in {heist}")]
    AlreadyInCrew { heist: HeistId, member: CharacterId },
    #[error("only the leader can execute {0}")]
    NotLeader(HeistId),
    #[error("crew of {actual} is below the minimum of {required}")]
    CrewTooSmall { required: u32, actual: u32 },
    #[error("heist difficulty must be between 1 and 10, got {0}")]
    InvalidDifficulty(u32),
    #[error("skill level must be between 1 and {max}, got {level}")]
    InvalidSkillLevel { level: u8, max: u8 },
}

/// The actor cannot currently afford the action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("insufficient funds: need {required}, have {available} (short by {})", .required - .available)]
    InsufficientFunds { required: i64, available: i64 },
    #[error("{action} is on cooldown for {}", remaining_label(.remaining_secs))]
    OnCooldown {
        action: ActionKey,
        remaining_secs: i64,
    },
}

impl ResourceError {
    /// Exact shortfall for an InsufficientFunds error
    pub fn shortfall(&self) -> Option<i64> {
        match self {
            ResourceError::InsufficientFunds {
                required,
                available,
            } => Some(required - available),
            ResourceError::OnCooldown { .. } => None,
        }
    }
}

/// Failure reported by an external record store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),
    #[error("territory {0} not found")]
    TerritoryNotFound(TerritoryKey),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Any error an engine call can surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Format a number of seconds as "1h 2m 3s", "4m 5s", "6s" or "Ready"
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return "Ready".to_string();
    }
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}

fn remaining_label(seconds: &i64) -> String {
    format_remaining(*seconds)
}
