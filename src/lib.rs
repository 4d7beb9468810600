//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine crates under `blockfall::{core,types}` so front ends
//! and tests depend on one package.

pub use blockfall_core as core;
pub use blockfall_types as types;
