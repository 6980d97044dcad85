//! Core data structures.

mod ids;
mod player;
mod summary;

pub use ids::PlayerId;
pub use player::{MatchFormat, Player, PlayerDraft};
pub use summary::RosterSummary;
