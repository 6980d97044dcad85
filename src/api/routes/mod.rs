pub mod analytics;
pub mod interchange;
pub mod players;
