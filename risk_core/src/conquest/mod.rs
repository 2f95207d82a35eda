//! Territory control
//!
//! Ownership (`Unclaimed` / `Owned`) is stored in the TerritoryStore. Siege
//! state is orthogonal to ownership and lives only in memory.

mod income;
mod machine;
mod outcome;
mod siege;
mod territory;

pub use income::{income_shares, IncomeSplit};
pub use machine::ConquestStateMachine;
pub use outcome::{AssaultOutcome, FortifyOutcome, RaidOutcome, SiegeContribution, SiegeDeclared};
pub use siege::{SiegeRegistry, SiegeSession};
pub use territory::{Ownership, Territory, MAX_DEFENSE};
