//! Heists - Crew-based jobs with shared reward and shared risk

mod board;
mod party;
mod resolver;

pub use board::{HeistBoard, HeistCreated, HeistExecution};
pub use party::{HeistParty, HeistStatus};
pub use resolver::{HeistOutcome, HeistResolver, LeaderProfile};
