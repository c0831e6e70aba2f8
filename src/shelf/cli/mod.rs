//! # CLI Layer
//!
//! One possible UI client for shelf.
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: context wiring and per-command handlers
//! - `render.rs`: card and message rendering

mod commands;
mod render;
mod setup;

pub use commands::run;
