//! Banner art (workspace facade crate).
//!
//! This package exposes `banner_art::{core,server,types}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use banner_art_core as core;
pub use banner_art_server as server;
pub use banner_art_types as types;
