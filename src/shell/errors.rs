//! Player-facing command errors, grouped by category, with optional hints.

use thiserror::Error;

use crate::shell::markup;

/// Broad grouping of command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    NotFound,
    KindMismatch,
    Precondition,
    UnknownCommand,
}

/// Errors a shell command can return to the player.
///
/// Every variant is recoverable: the session is left untouched and the
/// message is shown in the same turn. `Display` yields the player-facing
/// text; [`CommandError::hint`] carries an optional follow-up line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    // --- usage ---
    #[error("No command entered. Type 'help' for a list of available commands.")]
    EmptyCommand,

    /// Required argument missing; the payload is the full usage sentence.
    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("Too many arguments provided. {0}")]
    TooManyArguments(&'static str),

    #[error("Invalid name '{0}'. Names cannot be '.', '..', '~' or contain '/'.")]
    InvalidName(String),

    // --- not found ---
    #[error("Directory '{0}' not found here. Check your spelling or use 'ls' to verify available directories.")]
    DirectoryNotFound(String),

    #[error("Directory '{segment}' not found in the path {path}.")]
    PathSegmentNotFound { segment: String, path: String },

    #[error("Could not find parent directory for part of the path.")]
    ParentNotFound,

    #[error("No such directory: '{0}'.")]
    NoSuchDirectory(String),

    #[error("File '{0}' does not exist here. Use 'ls' to verify available files.")]
    FileNotFound(String),

    #[error("Cannot display contents of '{0}'.")]
    NoContent(String),

    #[error("Cannot remove '{0}': File does not exist.")]
    RemoveMissing(String),

    #[error("Cannot move '{0}': File does not exist here.")]
    MoveMissing(String),

    #[error("Cannot copy '{0}': File does not exist here.")]
    CopyMissing(String),

    #[error("Zip archive '{0}' not found.")]
    ZipNotFound(String),

    // --- kind mismatch ---
    #[error("'{0}' is a file. You can only 'cd' into directories.")]
    NotADirectory(String),

    #[error("'{0}' is a directory. You can only use 'cat' to view file contents.")]
    CatDirectory(String),

    #[error("'{0}' is a directory. Current permissions do not allow directory removal.")]
    RemoveDirectory(String),

    #[error("'{0}' is a directory, not a zip archive.")]
    UnzipDirectory(String),

    #[error("'{0}' is not a zip file. Use 'ls' to check available files.")]
    NotAZip(String),

    #[error("Directory '{0}' already exists.")]
    DirectoryExists(String),

    #[error("Cannot create directory '{0}'. A file with that name already exists.")]
    FileInTheWay(String),

    #[error("Cannot create file '{0}'. A directory with that name already exists.")]
    DirectoryInTheWay(String),

    #[error("Cannot execute '{0}'. To view this file, type 'cat {0}' instead.")]
    NotExecutable(String),

    // --- precondition / navigation rules ---
    #[error("Already at the root directory; you cannot go any higher.")]
    AtRoot,

    #[error("Cannot access home directory directly from subdirectories. Use 'cd ~' instead.")]
    HomeByName,

    #[error("Cannot directly access parent directory '{target}' from '{current}'. Use 'cd ..' instead.")]
    ParentByName { target: String, current: String },

    #[error("To view contents of '{0}', first use 'cd {0}', then 'ls'.")]
    ListNeedsCd(String),

    #[error("Cannot access '{0}' from current location. Use 'cd' to navigate there first.")]
    ListElsewhere(String),

    #[error("Invalid operation. Cannot move '{0}' into itself.")]
    MoveOntoItself(String),

    #[error("Invalid operation. Cannot copy '{0}' into itself.")]
    CopyOntoItself(String),

    #[error("'{0}' already exists. Cannot overwrite existing file.")]
    WouldOverwrite(String),

    #[error("Cannot move '{0}': You must first navigate to the directory containing the file.")]
    NavigateToSource(String),

    #[error("Cannot move '{path}': File does not exist here.\n\nTo access this file, you need to navigate to it first:\ncd projects\ncd hidden_vault\nmv treasure.json {destination}")]
    TreasureNotHere { path: String, destination: String },

    #[error("Cannot move files between directories using paths. You need to:\n1. Navigate to the source directory with 'cd'\n2. Move the file to the destination directory\n\nExample:\ncd downloads\ncd archive\nmv file.txt relics")]
    CrossDirectory,

    #[error("Cannot move '{0}': Destination 'archive' not found.")]
    ArchiveMissing(String),

    #[error("Cannot move to 'relics': Directory not found.")]
    RelicsMissing,

    #[error("'{0}' is not a valid zip archive for this mission.")]
    WrongArchive(String),

    #[error("Cannot extract '{0}': a file named 'archive' already exists here.")]
    ArchiveFileInTheWay(String),

    // --- unknown ---
    #[error("Command '{input}' not recognized. Did you mean '{suggestion}'?")]
    UnknownWithSuggestion {
        input: String,
        suggestion: &'static str,
    },

    #[error("Command not recognized. Type 'help' for a list of valid commands.")]
    Unknown,
}

impl CommandError {
    pub fn category(&self) -> ErrorCategory {
        use CommandError::*;
        match self {
            EmptyCommand | MissingArgument(_) | TooManyArguments(_) | InvalidName(_) => {
                ErrorCategory::Usage
            }
            DirectoryNotFound(_)
            | PathSegmentNotFound { .. }
            | ParentNotFound
            | NoSuchDirectory(_)
            | FileNotFound(_)
            | NoContent(_)
            | RemoveMissing(_)
            | MoveMissing(_)
            | CopyMissing(_)
            | ZipNotFound(_) => ErrorCategory::NotFound,
            NotADirectory(_)
            | CatDirectory(_)
            | RemoveDirectory(_)
            | UnzipDirectory(_)
            | NotAZip(_)
            | DirectoryExists(_)
            | FileInTheWay(_)
            | DirectoryInTheWay(_)
            | NotExecutable(_) => ErrorCategory::KindMismatch,
            UnknownWithSuggestion { .. } | Unknown => ErrorCategory::UnknownCommand,
            _ => ErrorCategory::Precondition,
        }
    }

    /// Follow-up advice shown after the error line.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CommandError::ArchiveMissing(_) => Some(
                "You need to extract archive.zip first using 'unzip archive.zip' in the downloads directory.",
            ),
            CommandError::RelicsMissing => {
                Some("You need to create the relics directory inside archive using 'mkdir relics'.")
            }
            _ => None,
        }
    }

    /// Player-facing rendering: red `Error: ...` line plus any hint.
    pub fn render(&self) -> String {
        let line = markup::error(&format!("Error: {self}"));
        match self.hint() {
            Some(hint) => format!("{line}\n\nHint: {hint}"),
            None => line,
        }
    }
}
