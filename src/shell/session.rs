//! One player's game: the world they are editing, where they stand, what they
//! typed, and how far through the lessons they are.
//!
//! [`Session::process`] is the only entry point front-ends need: it takes one
//! raw line and returns a [`Response`] carrying the rendered result plus the
//! state the prompt and challenge panel display.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::logutil::escape_log;
use crate::metrics;
use crate::shell::commands::{self, Command, Verb};
use crate::shell::errors::CommandError;
use crate::shell::markup;
use crate::shell::tutorial::{self, LessonProgress};
use crate::shell::types::{Location, LocationId};
use crate::shell::world::World;

/// What one processed line produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Rendered output; may carry color markup or the clear-screen sentinel.
    pub result: String,
    /// Key of the location the player is in after the command.
    pub location: String,
    pub challenge: String,
    pub challenge_hint: String,
}

impl Response {
    pub fn clears_screen(&self) -> bool {
        markup::clears_screen(&self.result)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) world: World,
    pub(crate) current: LocationId,
    pub(crate) history: Vec<String>,
    pub(crate) mission_complete: bool,
    /// Declared for front-ends that show a bag; no command fills it yet.
    pub(crate) inventory: Vec<String>,
    pub(crate) lessons: LessonProgress,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh game: seeded world, standing at home, nothing learned.
    pub fn new() -> Self {
        let world = World::seeded();
        let current = world.home();
        Session {
            world,
            current,
            history: Vec::new(),
            mission_complete: false,
            inventory: Vec::new(),
            lessons: LessonProgress::new(),
        }
    }

    /// Run one raw input line and report the outcome.
    pub fn process(&mut self, line: &str) -> Response {
        let result = self.run(line);
        self.response(result)
    }

    /// Current state without running anything, e.g. for a first prompt.
    pub fn snapshot(&self) -> Response {
        self.response(String::new())
    }

    fn response(&self, result: String) -> Response {
        let (challenge, hint) = self.lessons.challenge();
        Response {
            result,
            location: self.location_key().to_string(),
            challenge: challenge.to_string(),
            challenge_hint: hint.to_string(),
        }
    }

    fn run(&mut self, line: &str) -> String {
        let trimmed = line.trim();
        let Some(command) = Command::parse(trimmed) else {
            return CommandError::EmptyCommand.render();
        };
        self.history.push(trimmed.to_string());
        metrics::inc_commands();
        debug!(
            "command at {}: {}",
            self.location_key(),
            escape_log(trimmed)
        );

        let outcome = match &command.verb {
            Verb::Unknown(_) => {
                let token = trimmed.split_whitespace().next().unwrap_or_default();
                if self.current_location().has_item(token) {
                    Err(CommandError::NotExecutable(token.to_string()))
                } else {
                    commands::execute(self, &command)
                }
            }
            _ => commands::execute(self, &command),
        };

        match outcome {
            Ok(output) if command.verb.redraws_screen() => output,
            Ok(output) => self.check_lesson(&command, true, output),
            Err(err) => {
                metrics::inc_command_errors();
                debug!("command rejected ({:?}): {}", err.category(), escape_log(&err.to_string()));
                self.check_lesson(&command, false, err.render())
            }
        }
    }

    /// Evaluate the earliest pending lesson against the command just run.
    fn check_lesson(&mut self, command: &Command, succeeded: bool, output: String) -> String {
        let Some(lesson) = self.lessons.current() else {
            return output;
        };
        if !tutorial::is_satisfied(lesson, command, succeeded, self) {
            return output;
        }
        self.lessons.complete(lesson);
        metrics::inc_lessons_completed();
        info!("lesson complete: {}", lesson.id());
        format!("🎉 Challenge completed: {}\n{}", lesson.description(), output)
    }

    /// True when the last two history entries are the same command.
    pub(crate) fn repeated_last_command(&self) -> bool {
        match self.history.as_slice() {
            [.., previous, last] => Command::normalized(previous) == Command::normalized(last),
            _ => false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn location_id(&self) -> LocationId {
        self.current
    }

    pub fn current_location(&self) -> &Location {
        self.world.location(self.current)
    }

    pub fn location_key(&self) -> &str {
        &self.current_location().key
    }

    /// Prompt form of the location: `~` at home, the bare name elsewhere.
    pub fn prompt(&self) -> &str {
        if self.current == self.world.home() {
            "~"
        } else {
            &self.current_location().name
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn mission_complete(&self) -> bool {
        self.mission_complete
    }

    pub fn lessons(&self) -> &LessonProgress {
        &self.lessons
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::tutorial::Lesson;

    #[test]
    fn empty_line_is_an_error_and_not_recorded() {
        let mut session = Session::new();
        let response = session.process("   ");
        assert!(markup::strip(&response.result).starts_with("Error: No command entered"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn first_ls_completes_the_ls_lesson_once() {
        let mut session = Session::new();
        let first = session.process("ls");
        assert!(first
            .result
            .starts_with("🎉 Challenge completed: List directory contents using 'ls'\n"));
        assert_eq!(first.challenge, Lesson::Cd.description());

        let second = session.process("ls");
        assert!(!second.result.contains("Challenge completed"));
        assert_eq!(session.lessons().completed_ids(), vec!["ls"]);
    }

    #[test]
    fn failed_navigation_does_not_count() {
        let mut session = Session::new();
        session.process("ls");
        session.process("cd nowhere");
        assert_eq!(session.lessons().current(), Some(Lesson::Cd));
        session.process("cd documents");
        session.process("cat secret.txt");
        session.process("pwd");
        session.process("cd ~");
        let at_root = session.process("cd ..");
        assert!(markup::strip(&at_root.result).starts_with("Error: Already at the root"));
        assert_eq!(session.lessons().current(), Some(Lesson::CdParent));
    }

    #[test]
    fn typing_a_file_name_suggests_cat() {
        let mut session = Session::new();
        let response = session.process("notes.txt");
        assert!(markup::strip(&response.result)
            .contains("Cannot execute 'notes.txt'. To view this file, type 'cat notes.txt' instead."));
    }

    #[test]
    fn prompt_uses_display_names() {
        let mut session = Session::new();
        assert_eq!(session.prompt(), "~");
        session.process("cd projects");
        session.process("cd hidden_vault");
        assert_eq!(session.prompt(), "hidden_vault");
        assert_eq!(session.location_key(), "hidden_vault");
    }

    #[test]
    fn repeat_detection_ignores_spacing() {
        let mut session = Session::new();
        session.history.push("rm  mission.txt".into());
        session.history.push("rm mission.txt".into());
        assert!(session.repeated_last_command());
        session.history.push("ls".into());
        assert!(!session.repeated_last_command());
    }
}
