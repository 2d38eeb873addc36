//! # CLI Adventures - learn the shell by playing
//!
//! CLI Adventures is a text game that teaches basic shell commands. The player
//! explores a small virtual filesystem with `ls`, `cd`, `cat` and friends,
//! works through a ladder of lessons, and finishes by returning a stolen
//! `treasure.json` to `archive/relics`.
//!
//! ## Features
//!
//! - **Command Interpreter**: Fourteen commands with usage errors, typo suggestions and hints.
//! - **Virtual Filesystem**: A directory graph with strict parent/child navigation rules.
//! - **Lessons & Mission**: Ten ordered challenges graded after every successful command.
//! - **Front-ends**: An interactive stdin REPL and a newline-delimited JSON relay over TCP.
//! - **Async Design**: Built with Tokio; one task and one isolated session per connection.
//!
//! ## Quick Start
//!
//! ```rust
//! use cli_adventures::shell::Session;
//!
//! let mut session = Session::new();
//! let response = session.process("cd documents");
//! assert_eq!(response.location, "documents");
//! assert!(response.result.contains("Changed directory to documents"));
//! ```
//!
//! ## Module Organization
//!
//! - [`shell`] - Session, command dispatcher, virtual filesystem and lessons
//! - [`server`] - TCP relay speaking one JSON object per line
//! - [`config`] - Configuration management
//! - [`validation`] - Input validation for relay lines
//! - [`metrics`] - Process-wide counters
//! - [`logutil`] - Log sanitizing helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   ┌─────────────────┐
//! │  stdin REPL     │   │  TCP relay      │ ← Front-ends
//! └─────────────────┘   └─────────────────┘
//!          │                     │
//! ┌───────────────────────────────────────┐
//! │  Session::process(line) -> Response   │ ← Dispatch + lesson grading
//! └───────────────────────────────────────┘
//!          │
//! ┌─────────────────┐
//! │  World          │ ← Directory graph + file contents
//! └─────────────────┘
//! ```

pub mod config;
pub mod logutil;
pub mod metrics;
pub mod server;
pub mod shell;
pub mod validation;
