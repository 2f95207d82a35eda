//! Cooldown bookkeeping

use crate::config::CooldownConstants;
use crate::types::{ActionKey, CharacterId};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

/// When each (actor, action) pair becomes available again
pub struct CooldownTable {
    lengths: CooldownConstants,
    ready_at: Mutex<HashMap<(CharacterId, ActionKey), DateTime<Utc>>>,
}

impl CooldownTable {
    pub fn new(lengths: CooldownConstants) -> Self {
        CooldownTable {
            lengths,
            ready_at: Mutex::new(HashMap::new()),
        }
    }

    /// Whole seconds left, rounded up; 0 when ready
    pub fn remaining(&self, actor: CharacterId, action: ActionKey, now: DateTime<Utc>) -> i64 {
        match self.ready_at.lock().get(&(actor, action)) {
            Some(ready) if *ready > now => {
                let millis = (*ready - now).num_milliseconds();
                (millis + 999) / 1000
            }
            _ => 0,
        }
    }

    pub fn start(&self, actor: CharacterId, action: ActionKey, now: DateTime<Utc>) {
        let secs = self.lengths.seconds_for(action);
        let mut table = self.ready_at.lock();
        if secs > 0 {
            table.insert((actor, action), now + Duration::seconds(secs));
        } else {
            table.remove(&(actor, action));
        }
    }

    pub fn clear(&self, actor: CharacterId) {
        self.ready_at.lock().retain(|(who, _), _| *who != actor);
    }
}
