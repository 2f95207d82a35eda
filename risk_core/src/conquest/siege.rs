//! Siege sessions
//!
//! Sessions live in memory only. A fresh registry starts empty; callers that
//! want sessions to outlive the process can persist [`SiegeRegistry::snapshot`]
//! and feed it back through [`SiegeRegistry::restore`].

use crate::types::{CharacterId, FactionId, TerritoryKey};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attrition state of an ongoing siege
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiegeSession {
    pub territory: TerritoryKey,
    pub attacker_faction: FactionId,
    /// Counts down to 0, at which point the territory falls
    pub siege_hp: i64,
    pub started_at: DateTime<Utc>,
    pub declared_by: CharacterId,
    /// Territory defense when the siege was declared
    pub territory_defense: u32,
    pub contributions: u32,
}

/// At most one session per territory
#[derive(Debug, Default)]
pub struct SiegeRegistry {
    sessions: Mutex<HashMap<TerritoryKey, SiegeSession>>,
}

impl SiegeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TerritoryKey) -> Option<SiegeSession> {
        self.sessions.lock().get(key).cloned()
    }

    /// Insert or replace the session for its territory
    pub fn put(&self, session: SiegeSession) {
        self.sessions
            .lock()
            .insert(session.territory.clone(), session);
    }

    pub fn remove(&self, key: &TerritoryKey) -> Option<SiegeSession> {
        self.sessions.lock().remove(key)
    }

    /// Remove the session on `key` only if `faction` is the besieger
    pub fn end_if_besieger(&self, key: &TerritoryKey, faction: FactionId) -> bool {
        let mut sessions = self.sessions.lock();
        match sessions.get(key) {
            Some(s) if s.attacker_faction == faction => {
                sessions.remove(key);
                true
            }
            _ => false,
        }
    }

    /// All sessions, sorted by territory key
    pub fn snapshot(&self) -> Vec<SiegeSession> {
        let mut all: Vec<_> = self.sessions.lock().values().cloned().collect();
        all.sort_by(|a, b| a.territory.cmp(&b.territory));
        all
    }

    /// Replace every session with the given set
    pub fn restore(&self, sessions: impl IntoIterator<Item = SiegeSession>) {
        let mut table = self.sessions.lock();
        table.clear();
        for s in sessions {
            table.insert(s.territory.clone(), s);
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    pub fn restore_json(&self, json: &str) -> Result<usize, serde_json::Error> {
        let sessions: Vec<SiegeSession> = serde_json::from_str(json)?;
        let count = sessions.len();
        self.restore(sessions);
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
