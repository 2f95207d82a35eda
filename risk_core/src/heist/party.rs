//! HeistParty - A crew forming up against a target

use super::HeistOutcome;
use crate::catalog::HeistTarget;
use crate::error::ValidationError;
use crate::types::{CharacterId, HeistId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a party. Resolution happens once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeistStatus {
    Recruiting,
    Resolved(HeistOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeistParty {
    pub id: HeistId,
    pub target_name: String,
    pub leader: CharacterId,
    /// 1..=10
    pub difficulty: u32,
    pub min_crew: u32,
    pub reward_pool: i64,
    /// Join order; the leader is always first
    members: Vec<CharacterId>,
    pub status: HeistStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl HeistParty {
    pub fn new(
        id: HeistId,
        leader: CharacterId,
        target: &HeistTarget,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&target.difficulty) {
            return Err(ValidationError::InvalidDifficulty(target.difficulty));
        }
        Ok(HeistParty {
            id,
            target_name: target.name.clone(),
            leader,
            difficulty: target.difficulty,
            min_crew: target.min_crew,
            reward_pool: target.reward,
            members: vec![leader],
            status: HeistStatus::Recruiting,
            created_at,
            resolved_at: None,
        })
    }

    pub fn members(&self) -> &[CharacterId] {
        &self.members
    }

    pub fn crew_size(&self) -> u32 {
        self.members.len() as u32
    }

    pub fn is_recruiting(&self) -> bool {
        matches!(self.status, HeistStatus::Recruiting)
    }

    /// Check that `member` may join without adding them
    pub fn check_join(&self, member: CharacterId) -> Result<(), ValidationError> {
        if !self.is_recruiting() {
            return Err(ValidationError::HeistNotRecruiting(self.id));
        }
        if self.members.contains(&member) {
            return Err(ValidationError::AlreadyInCrew {
                heist: self.id,
                member,
            });
        }
        Ok(())
    }

    pub fn join(&mut self, member: CharacterId) -> Result<(), ValidationError> {
        self.check_join(member)?;
        self.members.push(member);
        Ok(())
    }

    /// Check that the crew is large enough to go
    pub fn check_ready(&self) -> Result<(), ValidationError> {
        if self.crew_size() < self.min_crew {
            return Err(ValidationError::CrewTooSmall {
                required: self.min_crew,
                actual: self.crew_size(),
            });
        }
        Ok(())
    }

    /// Record the outcome; the party stops recruiting
    pub fn resolve(&mut self, outcome: HeistOutcome, at: DateTime<Utc>) {
        self.status = HeistStatus::Resolved(outcome);
        self.resolved_at = Some(at);
    }

    /// True once resolved strictly before `cutoff`
    pub fn resolved_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.resolved_at.is_some_and(|at| at < cutoff)
    }
}
