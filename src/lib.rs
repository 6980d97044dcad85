//! # Crease
//!
//! A local cricket performance tracker with validated per-player stats.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, formats, summaries)
//! - **validate**: The stats validator gating every mutation
//! - **calculate**: Derived metrics, leaderboards, and aggregates
//! - **roster**: The owned collection and its storage mirror
//! - **storage**: Single-file JSON persistence
//! - **csv**: CSV import/export with formula-injection guarding
//! - **assistant**: Rule-based query responder
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod assistant;
pub mod calculate;
pub mod config;
pub mod csv;
pub mod models;
pub mod roster;
pub mod storage;
pub mod validate;

pub use models::*;
