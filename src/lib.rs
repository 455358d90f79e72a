//! tenten (workspace facade crate).
//!
//! Re-exports the game crates under `tenten::{core,engine,term,types}` and
//! hosts the pieces only the binary needs: run configuration and the JSONL
//! turn journal.

pub use tenten_core as core;
pub use tenten_engine as engine;
pub use tenten_term as term;
pub use tenten_types as types;

pub mod config;
pub mod journal;
