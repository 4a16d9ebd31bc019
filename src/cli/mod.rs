// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Command-line interface.
//!
//! Argument parsing, the `detect` and `voice` commands, and the console
//! logging macros shared with the library.

// Modules
/// CLI arguments.
pub mod args;

/// Detect and voice commands.
pub mod detect;

/// Logging macros and verbosity flag.
pub mod logging;
