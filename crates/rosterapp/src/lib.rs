//! # Roster Architecture
//!
//! Rosterapp is a **UI-agnostic student roster library**. It keeps an ordered set of
//! student records in memory and offers CRUD, filtering, dashboard statistics, eight
//! tabular reports, and CSV import/export. Any client (the `roster` CLI, a desktop
//! front end, tests) drives it through the same facade.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the roster binary)                                 │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Supplies the clock and configuration                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation → mutation → structured result                │
//! │  - Built on validation, filter, reports, stats, codec       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, in-memory Registry with observers       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Views Are Pulled
//!
//! Filtered lists, dashboard numbers and report rows are computed from the full record
//! sequence every time they are asked for. Nothing is cached, so nothing can go stale;
//! the registry's observers only tell a client *when* to pull again.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust arguments (readers and writers for CSV, never stdin/stdout)
//! - Returns regular Rust types
//! - **Never** writes to stdout/stderr; diagnostics go through `tracing`
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and the in-memory registry
//! - [`model`]: `Student`, `Status`, `StudentForm`
//! - [`validation`]: Form validation
//! - [`filter`]: Search and filter criteria
//! - [`reports`]: The eight report computations
//! - [`stats`]: Dashboard aggregates and chart series
//! - [`codec`]: CSV line format and report files
//! - [`sample`]: Seed roster
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod reports;
pub mod sample;
pub mod stats;
pub mod store;
pub mod validation;
