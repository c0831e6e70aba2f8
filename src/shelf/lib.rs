//! # Shelf Architecture
//!
//! Shelf manages a personal list of books. Like any good CRUD tool it is a
//! library first: the `shelf` binary is one client of it, and the same core
//! could back a TUI or a web page.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, renders cards                 │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the collection, the form staging area, the query    │
//! │  - Drives the add/edit form flow                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add, update, delete, toggle, search, get, config         │
//! │  - Copy, change, commit; never prints                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (collection.rs, store/, covers.rs)           │
//! │  - One key-value slot holding the whole collection          │
//! │  - Cover images behind transient references                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence Model
//!
//! The collection is read once when the API is opened. Every mutation builds
//! the next list, writes all of it, then swaps it in. There are no partial
//! writes and no record-level storage.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade and form/modal state machine
//! - [`commands`]: One module per operation
//! - [`collection`]: In-memory list mirrored to storage, id issuing
//! - [`store`]: Key-value slot abstraction and implementations
//! - [`covers`]: Cover reference registry
//! - [`form`]: Staging area, validation, modal state
//! - [`card`]: Render-ready view of one book
//! - [`model`]: `Book`, `BookId`, `BookDraft`
//! - [`config`]: Configuration
//! - [`init`]: Data directory resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod card;
pub mod collection;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod covers;
pub mod error;
pub mod form;
pub mod init;
pub mod model;
pub mod store;
