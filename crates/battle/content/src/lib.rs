//! Data-driven battle content and loaders.
//!
//! This crate reads definition data from RON files and tunables from TOML:
//! - Skills, states, equipment, classes, actors and enemies (RON)
//! - Encounters: which actors and enemies start a battle (RON)
//! - Battle configuration (TOML)
//!
//! Free-form tag maps on each definition are parsed into typed rules here,
//! once, so malformed data surfaces at load time rather than mid-battle.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentFactory, DatabaseLoader, Encounter, EncounterLoader, LoadResult, TagMode,
};
