//! # CLI Behavior
//!
//! This is **one possible UI client** for the roster, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting.
//!
//! ### Naked Execution (`roster`)
//!
//! Running `roster` with no subcommand lists every student.
//!
//! ### Confirmation
//!
//! `roster delete <id>` asks before removing anything. `--yes` skips the question,
//! which is what scripts should pass.
//!
//! ### Machine Output
//!
//! `--json` replaces the styled tables with the library's result structures
//! serialized as JSON.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Tables, charts and messages
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
