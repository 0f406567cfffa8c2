//! # Roster CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/rosterapp/`: Core library with UI-agnostic business logic
//! - `crates/roster/`: This CLI tool, depends on the `rosterapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/roster/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch + logging (commands.rs)        │
//! │  - Terminal rendering with console (render.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/rosterapp/src/api.rs)                    │
//! │  - Supplies clock and configuration                         │
//! │  - Dispatches to command modules                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/rosterapp/src/commands/*)            │
//! │  - Validation, registry mutation, reports, CSV              │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Invocation, One Roster
//!
//! The library keeps students in memory only. Each invocation builds a fresh roster
//! (sample data unless `--no-sample`), imports any `--load` files, runs one command,
//! and writes the result with `--save` if asked. Chaining `--load` and `--save` on the
//! same file gives a simple file-backed workflow.
//!
//! ## Testing Approach
//!
//! - **Commands layer**: heavy unit testing in `rosterapp`.
//! - **CLI layer**: clap parsing tests in `setup.rs`, rendering tests on canned data in
//!   `render.rs`, and end-to-end runs of the binary under `tests/`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
