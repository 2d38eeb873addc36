//! Lesson progression for the shell tutorial.
//!
//! This module handles:
//! - The fixed, ordered list of lessons and their texts
//! - Evaluating the earliest pending lesson against a finished command
//! - Tracking which lessons are complete (monotonic until `reset`)
//!
//! Only the first pending lesson is ever checked, so lessons unlock one at a
//! time even though several predicates could match the same command.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::shell::commands::{Command, Verb};
use crate::shell::session::Session;
use crate::shell::types::LocationId;

/// Challenge text once every lesson is done.
pub const ALL_COMPLETE: &str = "All challenges completed! Explore freely!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lesson {
    Ls,
    Cd,
    Cat,
    Pwd,
    CdParent,
    MissionBrief,
    FindTreasure,
    UnzipArchive,
    CreateRelics,
    MissionComplete,
}

impl Lesson {
    /// Lessons in the order players meet them.
    pub const ALL: [Lesson; 10] = [
        Lesson::Ls,
        Lesson::Cd,
        Lesson::Cat,
        Lesson::Pwd,
        Lesson::CdParent,
        Lesson::MissionBrief,
        Lesson::FindTreasure,
        Lesson::UnzipArchive,
        Lesson::CreateRelics,
        Lesson::MissionComplete,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Lesson::Ls => "ls",
            Lesson::Cd => "cd",
            Lesson::Cat => "cat",
            Lesson::Pwd => "pwd",
            Lesson::CdParent => "cd_parent",
            Lesson::MissionBrief => "mission_brief",
            Lesson::FindTreasure => "find_treasure",
            Lesson::UnzipArchive => "unzip_archive",
            Lesson::CreateRelics => "create_relics",
            Lesson::MissionComplete => "mission_complete",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Lesson::Ls => "List directory contents using 'ls'",
            Lesson::Cd => "Change directories using 'cd'",
            Lesson::Cat => "View file contents using 'cat'",
            Lesson::Pwd => "Print working directory using 'pwd'",
            Lesson::CdParent => "Navigate to parent directory using 'cd ..'",
            Lesson::MissionBrief => "Read your mission briefing",
            Lesson::FindTreasure => "Locate the stolen treasure",
            Lesson::UnzipArchive => "Extract the archive.zip file",
            Lesson::CreateRelics => "Create the missing relics directory",
            Lesson::MissionComplete => "Return the treasure to its rightful place",
        }
    }

    /// Longer statement of what to do.
    pub fn objective(self) -> &'static str {
        match self {
            Lesson::Ls => "List the contents of your home directory",
            Lesson::Cd => "Navigate to any directory from home",
            Lesson::Cat => "Read the contents of any text file",
            Lesson::Pwd => "Check your current location using pwd",
            Lesson::CdParent => "Go to a directory and then return to the parent directory",
            Lesson::MissionBrief => "Read the mission.txt file in your home directory",
            Lesson::FindTreasure => {
                "Navigate to the hidden_vault and verify the treasure.json file is there"
            }
            Lesson::UnzipArchive => "Use the unzip command on archive.zip in the downloads directory",
            Lesson::CreateRelics => "Create a relics directory inside the archive directory",
            Lesson::MissionComplete => "Move the treasure.json file from hidden_vault to archive/relics",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Lesson::Ls => "Just type 'ls' and press Enter",
            Lesson::Cd => {
                "Type 'cd' followed by a directory name like 'cd documents' or 'cd downloads'"
            }
            Lesson::Cat => "First 'cd' to a directory, then 'cat filename' to view its contents",
            Lesson::Pwd => "Type 'pwd' to see your current location in the file system",
            Lesson::CdParent => "First 'cd' to a directory, then type 'cd ..' to go back up one level",
            Lesson::MissionBrief => {
                "Use 'cat mission.txt' in your home directory to read your mission briefing"
            }
            Lesson::FindTreasure => {
                "First go to the projects directory with 'cd projects', then to 'cd hidden_vault'"
            }
            Lesson::UnzipArchive => {
                "First navigate to your home directory with 'cd ~', then go to downloads with 'cd downloads', then use 'unzip archive.zip'"
            }
            Lesson::CreateRelics => "Navigate to the archive directory and use 'mkdir relics'",
            Lesson::MissionComplete => {
                "First get the treasure.json file, then move it to the archive/relics directory"
            }
        }
    }
}

/// Does `command` satisfy `lesson`?
///
/// Evaluated against the session state after the command ran, failed or not.
/// Goals are judged by where the player stands and what the world holds, so
/// `mkdir relics` answered with "already exists" still counts once relics is
/// in place. Only `cd ..` needs the command itself to have succeeded.
pub fn is_satisfied(lesson: Lesson, command: &Command, succeeded: bool, session: &Session) -> bool {
    let first = command.args.first().map(String::as_str);
    let here = session.location_id();
    let world = session.world();
    match lesson {
        Lesson::Ls => command.verb == Verb::Ls && command.args.is_empty(),
        Lesson::Cd => {
            command.verb == Verb::Cd
                && matches!(first, Some("documents" | "downloads" | "projects"))
                && first == Some(session.current_location().name.as_str())
        }
        Lesson::Cat => {
            command.verb == Verb::Cat
                && first.is_some_and(|f| {
                    session.current_location().has_item(f) && world.content(f).is_some()
                })
        }
        Lesson::Pwd => command.verb == Verb::Pwd,
        Lesson::CdParent => command.verb == Verb::Cd && first == Some("..") && succeeded,
        Lesson::MissionBrief => command.verb == Verb::Cat && first == Some("mission.txt"),
        Lesson::FindTreasure => {
            here == LocationId::HIDDEN_VAULT
                && (command.verb == Verb::Ls
                    || (command.verb == Verb::Cd
                        && matches!(first, Some("hidden_vault" | "projects/hidden_vault"))))
        }
        Lesson::UnzipArchive => {
            command.verb == Verb::Unzip
                && first == Some("archive.zip")
                && here == LocationId::DOWNLOADS
                && world.archive().is_some()
        }
        Lesson::CreateRelics => {
            command.verb == Verb::Mkdir
                && first == Some("relics")
                && Some(here) == world.archive()
                && world.relics().is_some()
        }
        Lesson::MissionComplete => session.mission_complete(),
    }
}

/// Completed-lesson set for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    completed: BTreeSet<Lesson>,
}

impl LessonProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// The earliest lesson not yet completed.
    pub fn current(&self) -> Option<Lesson> {
        Lesson::ALL.into_iter().find(|l| !self.completed.contains(l))
    }

    /// Mark a lesson complete. Returns false if it already was.
    pub fn complete(&mut self, lesson: Lesson) -> bool {
        self.completed.insert(lesson)
    }

    pub fn is_complete(&self, lesson: Lesson) -> bool {
        self.completed.contains(&lesson)
    }

    pub fn all_complete(&self) -> bool {
        self.current().is_none()
    }

    /// Completed lesson ids in curriculum order.
    pub fn completed_ids(&self) -> Vec<&'static str> {
        Lesson::ALL
            .into_iter()
            .filter(|l| self.completed.contains(l))
            .map(Lesson::id)
            .collect()
    }

    /// `(challenge, hint)` pair shown next to the prompt.
    pub fn challenge(&self) -> (&'static str, &'static str) {
        match self.current() {
            Some(lesson) => (lesson.description(), lesson.hint()),
            None => (ALL_COMPLETE, ""),
        }
    }
}

/// One-line progress summary, e.g. for a status bar.
pub fn format_progress(progress: &LessonProgress) -> String {
    let done = Lesson::ALL.iter().filter(|l| progress.is_complete(**l)).count();
    match progress.current() {
        Some(lesson) => format!(
            "Lessons {}/{}. Next: {}",
            done,
            Lesson::ALL.len(),
            lesson.objective()
        ),
        None => format!("Lessons {}/{}. {}", done, Lesson::ALL.len(), ALL_COMPLETE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_walks_lessons_in_order() {
        let mut progress = LessonProgress::new();
        assert_eq!(progress.current(), Some(Lesson::Ls));
        assert!(progress.complete(Lesson::Ls));
        assert!(!progress.complete(Lesson::Ls));
        assert_eq!(progress.current(), Some(Lesson::Cd));
        assert_eq!(progress.completed_ids(), vec!["ls"]);
    }

    #[test]
    fn finishing_everything_collapses_the_challenge() {
        let mut progress = LessonProgress::new();
        for lesson in Lesson::ALL {
            progress.complete(lesson);
        }
        assert!(progress.all_complete());
        assert_eq!(progress.challenge(), (ALL_COMPLETE, ""));
        assert!(format_progress(&progress).starts_with("Lessons 10/10"));
    }

    #[test]
    fn ls_lesson_needs_bare_ls() {
        let session = Session::new();
        let bare = Command::parse("ls").unwrap();
        let with_arg = Command::parse("ls documents").unwrap();
        assert!(is_satisfied(Lesson::Ls, &bare, true, &session));
        assert!(!is_satisfied(Lesson::Ls, &with_arg, true, &session));
    }

    #[test]
    fn cat_lesson_needs_readable_file_here() {
        let session = Session::new();
        let notes = Command::parse("cat notes.txt").unwrap();
        let elsewhere = Command::parse("cat secret.txt").unwrap();
        assert!(is_satisfied(Lesson::Cat, &notes, true, &session));
        assert!(!is_satisfied(Lesson::Cat, &elsewhere, false, &session));
    }
}
