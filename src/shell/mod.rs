//! The tutorial shell: a toy filesystem, a command interpreter over it, and
//! the lesson/mission state machine that grades what the player types.
//!
//! Front-ends (the stdin REPL and the TCP relay) only ever hold a
//! [`Session`] and feed it lines; everything else is reached through it.

pub mod commands;
pub mod errors;
pub mod markup;
pub mod session;
pub mod tutorial;
pub mod types;
pub mod world;

pub use commands::{Command, Verb, FAREWELL, WELCOME};
pub use errors::{CommandError, ErrorCategory};
pub use session::{Response, Session};
pub use tutorial::{format_progress, is_satisfied, Lesson, LessonProgress, ALL_COMPLETE};
pub use types::{Location, LocationId};
pub use world::World;
