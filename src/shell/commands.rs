//! Command parsing and per-command handlers.
//!
//! A raw line is split on whitespace: the first token, lowercased, picks the
//! [`Verb`]; the remaining tokens are kept verbatim as arguments. Each handler
//! checks arity before touching any state and either returns the rendered
//! output or a [`CommandError`]. Handlers never mutate the session on the
//! error path.

use log::info;

use crate::metrics;
use crate::shell::errors::CommandError;
use crate::shell::markup;
use crate::shell::session::Session;
use crate::shell::types::LocationId;
use crate::shell::world::{RELICS_DESCRIPTION, RELICS_NAME};

const TREASURE: &str = "treasure.json";
/// Files whose removal needs the same `rm` typed twice in a row.
const PROTECTED_FILES: &[&str] = &["treasure.json", "mission.txt"];

const HELP_TEXT: &str = "Available commands:
- help: Show this help message
- ls: List contents of current directory
- cd [directory]: Change to specified directory (use .. to go up one level, ~ to go home)
- cat [file]: View contents of a file
- pwd: Print working directory
- mkdir [directory]: Create a new directory
- touch [file]: Create a new empty file
- rm [file]: Remove a file
- mv [source] [destination]: Move or rename a file
- cp [source] [destination]: Copy a file
- clear: Clear the terminal
- reset: Reset the game to its initial state
- unzip [file.zip]: Extract contents of a zip file
- exit: Exit the game";

pub const FAREWELL: &str = "Thanks for playing CLI Adventures!";
pub const WELCOME: &str = "Welcome to CLI Adventures! Type 'help' to see available commands.";

/// Recognized command verbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Help,
    Ls,
    Cd,
    Cat,
    Pwd,
    Mkdir,
    Touch,
    Rm,
    Mv,
    Cp,
    Clear,
    Reset,
    Unzip,
    Exit,
    /// Anything else, lowercased.
    Unknown(String),
}

impl Verb {
    /// Spellings in help order; also the candidate list for suggestions.
    pub const NAMES: [&'static str; 14] = [
        "help", "ls", "cd", "cat", "pwd", "mkdir", "touch", "rm", "mv", "cp", "clear", "reset",
        "unzip", "exit",
    ];

    pub fn parse(token: &str) -> Verb {
        match token.to_lowercase().as_str() {
            "help" => Verb::Help,
            "ls" => Verb::Ls,
            "cd" => Verb::Cd,
            "cat" => Verb::Cat,
            "pwd" => Verb::Pwd,
            "mkdir" => Verb::Mkdir,
            "touch" => Verb::Touch,
            "rm" => Verb::Rm,
            "mv" => Verb::Mv,
            "cp" => Verb::Cp,
            "clear" => Verb::Clear,
            "reset" => Verb::Reset,
            "unzip" => Verb::Unzip,
            "exit" => Verb::Exit,
            other => Verb::Unknown(other.to_string()),
        }
    }

    /// Verbs that wipe the screen; lesson checks are skipped for them.
    pub fn redraws_screen(&self) -> bool {
        matches!(self, Verb::Clear | Verb::Reset)
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<String>,
}

impl Command {
    /// Parse a raw line; `None` when it holds nothing but whitespace.
    pub fn parse(line: &str) -> Option<Command> {
        let mut parts = line.split_whitespace();
        let verb = Verb::parse(parts.next()?);
        Some(Command {
            verb,
            args: parts.map(str::to_string).collect(),
        })
    }

    /// Canonical single-spaced form, used to compare repeated commands.
    pub fn normalized(line: &str) -> String {
        line.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Run a parsed command against the session.
pub(crate) fn execute(session: &mut Session, command: &Command) -> Result<String, CommandError> {
    let args = command.args.as_slice();
    match &command.verb {
        Verb::Help => Ok(HELP_TEXT.to_string()),
        Verb::Ls => handle_ls(session, args),
        Verb::Cd => handle_cd(session, args),
        Verb::Cat => handle_cat(session, args),
        Verb::Pwd => Ok(handle_pwd(session)),
        Verb::Mkdir => handle_mkdir(session, args),
        Verb::Touch => handle_touch(session, args),
        Verb::Rm => handle_rm(session, args),
        Verb::Mv => handle_mv(session, args),
        Verb::Cp => handle_cp(session, args),
        Verb::Clear => Ok(markup::CLEAR_SCREEN.to_string()),
        Verb::Reset => Ok(handle_reset(session)),
        Verb::Unzip => handle_unzip(session, args),
        Verb::Exit => Ok(FAREWELL.to_string()),
        Verb::Unknown(input) => Err(suggest(input)),
    }
}

fn one_arg<'a>(
    args: &'a [String],
    missing: &'static str,
    usage: &'static str,
) -> Result<&'a str, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument(missing)),
        [only] => Ok(only.as_str()),
        _ => Err(CommandError::TooManyArguments(usage)),
    }
}

fn two_args<'a>(
    args: &'a [String],
    missing: &'static str,
) -> Result<(&'a str, &'a str), CommandError> {
    match args {
        [a, b] => Ok((a.as_str(), b.as_str())),
        [] | [_] => Err(CommandError::MissingArgument(missing)),
        _ => Err(CommandError::TooManyArguments(
            "Use 'help' to confirm proper command usage.",
        )),
    }
}

/// Names `mkdir`/`touch`/`cp` refuse to create.
fn check_new_name(name: &str) -> Result<(), CommandError> {
    if matches!(name, "." | ".." | "~") || name.contains('/') {
        return Err(CommandError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn handle_ls(session: &Session, args: &[String]) -> Result<String, CommandError> {
    let world = session.world();
    let here = session.location_id();
    if let Some(target) = args.first() {
        return Err(if world.has_exit(here, target) {
            CommandError::ListNeedsCd(target.clone())
        } else if world.knows_directory(target) {
            CommandError::ListElsewhere(target.clone())
        } else {
            CommandError::NoSuchDirectory(target.clone())
        });
    }

    let items = world.location(here).items.join(" ");
    let dirs = world
        .child_exits(here)
        .iter()
        .map(|loc| markup::directory(&loc.name))
        .collect::<Vec<_>>()
        .join(" ");
    if items.is_empty() || dirs.is_empty() {
        Ok(format!("{items}{dirs}"))
    } else {
        Ok(format!("{items} {dirs}"))
    }
}

fn handle_cd(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let target = one_arg(
        args,
        "No directory specified. Use 'cd [directory]' to navigate.",
        "Usage: 'cd [directory]'.",
    )?;
    let world = session.world();

    if target.contains('/') {
        let mut cursor = if target.starts_with('/') {
            world.home()
        } else {
            session.location_id()
        };
        for segment in target.split('/').filter(|s| !s.is_empty()) {
            cursor = step(session, cursor, segment, Some(target))?;
        }
        session.current = cursor;
        return Ok(format!("Changed directory to {target}"));
    }

    let dest = step(session, session.location_id(), target, None)?;
    session.current = dest;
    Ok(format!(
        "Changed directory to {}",
        session.world().location(dest).name
    ))
}

/// Resolve one path segment from `from`. `path` is set while walking a
/// slash-separated path and only changes the not-found wording.
fn step(
    session: &Session,
    from: LocationId,
    segment: &str,
    path: Option<&str>,
) -> Result<LocationId, CommandError> {
    let world = session.world();
    match segment {
        "~" => Ok(world.home()),
        ".." => world.parent_of(from).ok_or(if from == world.home() {
            CommandError::AtRoot
        } else {
            CommandError::ParentNotFound
        }),
        name => {
            let here = world.location(from);
            if here.has_item(name) {
                return Err(CommandError::NotADirectory(name.to_string()));
            }
            let Some(dest) = world.exit_named(from, name) else {
                return Err(match path {
                    Some(path) => CommandError::PathSegmentNotFound {
                        segment: name.to_string(),
                        path: path.to_string(),
                    },
                    None => CommandError::DirectoryNotFound(name.to_string()),
                });
            };
            if world.parent_of(from) == Some(dest) {
                return Err(if dest == world.home() {
                    CommandError::HomeByName
                } else {
                    CommandError::ParentByName {
                        target: name.to_string(),
                        current: here.name.clone(),
                    }
                });
            }
            Ok(dest)
        }
    }
}

fn handle_cat(session: &Session, args: &[String]) -> Result<String, CommandError> {
    let file = one_arg(
        args,
        "Specify a file to view its contents. Usage: 'cat [filename]'.",
        "Usage: 'cat [filename]'.",
    )?;
    let world = session.world();
    let here = session.location_id();
    if world.has_exit(here, file) {
        return Err(CommandError::CatDirectory(file.to_string()));
    }
    if !world.location(here).has_item(file) {
        return Err(CommandError::FileNotFound(file.to_string()));
    }
    let content = world
        .content(file)
        .ok_or_else(|| CommandError::NoContent(file.to_string()))?;

    let reads = session
        .history()
        .iter()
        .filter(|line| line.starts_with("cat treasure"))
        .count();
    if file == TREASURE && reads > 2 {
        return Ok(format!(
            "{content}\n\nHint: 'treasure.json' seems like something you'd want to move, not just read."
        ));
    }
    Ok(content.to_string())
}

fn handle_pwd(session: &Session) -> String {
    let here = session.current_location();
    if here.id == session.world().home() {
        "~".to_string()
    } else {
        format!("/{}", here.name)
    }
}

fn handle_mkdir(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let name = one_arg(
        args,
        "Specify a name. Usage: 'mkdir [dirname]'.",
        "Usage: 'mkdir [dirname]'.",
    )?;
    check_new_name(name)?;
    let here = session.location_id();
    if session.world().has_exit(here, name) {
        return Err(CommandError::DirectoryExists(name.to_string()));
    }
    if session.current_location().has_item(name) {
        return Err(CommandError::FileInTheWay(name.to_string()));
    }

    let in_archive = session.world().archive() == Some(here);
    if in_archive && name == RELICS_NAME {
        session.world.create_directory(here, name, RELICS_DESCRIPTION);
        let treasure_waiting = session
            .world()
            .location(LocationId::HIDDEN_VAULT)
            .has_item(TREASURE);
        if treasure_waiting {
            return Ok(format!(
                "Created directory: {name}\n\nHint: Now you can move the treasure.json from hidden_vault to archive/relics!"
            ));
        }
    } else {
        let description = format!("A directory you created named {name}.");
        session.world.create_directory(here, name, &description);
    }
    Ok(format!("Created directory: {name}"))
}

fn handle_touch(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let name = one_arg(
        args,
        "Specify a name. Usage: 'touch [filename]'.",
        "Usage: 'touch [filename]'.",
    )?;
    check_new_name(name)?;
    let here = session.location_id();
    if session.world().has_exit(here, name) {
        return Err(CommandError::DirectoryInTheWay(name.to_string()));
    }
    if session.current_location().has_item(name) {
        return Ok(format!("Updated timestamp of {name}"));
    }
    session.world.add_file(here, name, "");
    Ok(format!("Created file: {name}"))
}

fn handle_rm(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let name = one_arg(
        args,
        "Specify a file to remove. Usage: 'rm [filename]'.",
        "Usage: 'rm [filename]'.",
    )?;
    let here = session.location_id();
    if session.world().has_exit(here, name) {
        return Err(CommandError::RemoveDirectory(name.to_string()));
    }
    if !session.current_location().has_item(name) {
        return Err(CommandError::RemoveMissing(name.to_string()));
    }
    if PROTECTED_FILES.contains(&name) && !session.repeated_last_command() {
        return Ok(markup::error(&format!(
            "Warning: You're attempting to remove a crucial file '{name}'. This action may impact your mission progress. Confirm by running the command again."
        )));
    }
    session.world.remove_file(here, name);
    Ok(format!("Removed: {name}"))
}

fn handle_mv(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let (source, destination) = two_args(
        args,
        "Missing arguments. Proper usage is 'mv [source] [destination]'.",
    )?;
    let here = session.location_id();

    if source.contains('/') {
        if source.contains("projects/hidden_vault/treasure.json") {
            return Err(CommandError::TreasureNotHere {
                path: source.to_string(),
                destination: destination.to_string(),
            });
        }
        let first = source.split('/').next().unwrap_or_default();
        if first == "~" || first == "home" || session.world().has_exit(here, first) {
            return Err(CommandError::NavigateToSource(source.to_string()));
        }
        return Err(CommandError::MoveMissing(source.to_string()));
    }
    if !session.current_location().has_item(source) {
        return Err(CommandError::MoveMissing(source.to_string()));
    }
    if source == destination {
        return Err(CommandError::MoveOntoItself(source.to_string()));
    }

    if source == TREASURE && here == LocationId::HIDDEN_VAULT && destination.contains("archive") {
        return return_treasure(session);
    }

    if destination.contains('/')
        || destination.starts_with('~')
        || matches!(destination, "." | "..")
        || session.world().has_exit(here, destination)
    {
        return Err(CommandError::CrossDirectory);
    }
    if session.current_location().has_item(destination) {
        return Err(CommandError::WouldOverwrite(destination.to_string()));
    }

    session.world.rename_file(here, source, destination);
    Ok(format!("Moved {source} to {destination}"))
}

/// The one cross-directory move the game allows: hidden_vault → archive/relics.
fn return_treasure(session: &mut Session) -> Result<String, CommandError> {
    if session.world().archive().is_none() {
        return Err(CommandError::ArchiveMissing(TREASURE.to_string()));
    }
    let Some(relics) = session.world().relics() else {
        return Err(CommandError::RelicsMissing);
    };
    session
        .world
        .relocate_file(LocationId::HIDDEN_VAULT, relics, TREASURE);
    session.mission_complete = true;
    metrics::inc_missions_completed();
    info!("mission complete: treasure returned to archive/relics");
    Ok(format!(
        "{}\nYou've successfully returned the treasure to its rightful place in archive/relics!",
        markup::success("🎉 MISSION ACCOMPLISHED! 🎉")
    ))
}

fn handle_cp(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let (source, destination) = two_args(
        args,
        "Missing arguments. Proper usage is 'cp [source] [destination]'.",
    )?;
    let here = session.location_id();
    if source.contains('/') || destination.contains('/') {
        return Err(CommandError::CrossDirectory);
    }
    if source == destination {
        return Err(CommandError::CopyOntoItself(source.to_string()));
    }
    if !session.current_location().has_item(source) {
        return Err(CommandError::CopyMissing(source.to_string()));
    }
    if session.current_location().has_item(destination) {
        return Err(CommandError::WouldOverwrite(destination.to_string()));
    }
    if session.world().has_exit(here, destination) {
        return Err(CommandError::CrossDirectory);
    }
    check_new_name(destination)?;
    session.world.copy_file(here, source, destination);
    Ok(format!("Copied {source} to {destination}"))
}

fn handle_unzip(session: &mut Session, args: &[String]) -> Result<String, CommandError> {
    let file = one_arg(
        args,
        "Specify a file to unzip. Usage: 'unzip [filename.zip]'.",
        "Usage: 'unzip [filename.zip]'.",
    )?;
    let here = session.location_id();
    if session.world().has_exit(here, file) {
        return Err(CommandError::UnzipDirectory(file.to_string()));
    }
    if !session.current_location().has_item(file) {
        return Err(CommandError::ZipNotFound(file.to_string()));
    }
    if !file.ends_with(".zip") {
        return Err(CommandError::NotAZip(file.to_string()));
    }
    if here != LocationId::DOWNLOADS || file != "archive.zip" {
        return Err(CommandError::WrongArchive(file.to_string()));
    }
    if session.world().archive().is_some() {
        return Ok(format!(
            "{}\n\nHint: Archive is already extracted. Continue with your mission!",
            markup::error("Warning: Archive already extracted. Files already exist here.")
        ));
    }
    if session.current_location().has_item("archive") {
        return Err(CommandError::ArchiveFileInTheWay(file.to_string()));
    }
    session.world.extract_archive();
    Ok("Archive extracted successfully. You can now access the 'archive' directory.".to_string())
}

fn handle_reset(session: &mut Session) -> String {
    *session = Session::new();
    format!(
        "{}\n{}\n{}",
        markup::CLEAR_SCREEN,
        markup::success("=== Game Reset ==="),
        WELCOME
    )
}

/// Legacy "did you mean" heuristic: a candidate qualifies when at least half
/// of the input's characters occur in it; the closest length wins, earliest
/// in [`Verb::NAMES`] on ties.
fn suggest(input: &str) -> CommandError {
    let len = input.chars().count();
    let mut best: Option<&'static str> = None;
    let mut best_distance = usize::MAX;
    for candidate in Verb::NAMES {
        let distance = candidate.len().abs_diff(len);
        let matching = input.chars().filter(|c| candidate.contains(*c)).count();
        if 2 * matching >= len && distance < best_distance {
            best = Some(candidate);
            best_distance = distance;
        }
    }
    match best {
        Some(suggestion) if suggestion != input && len > 1 => CommandError::UnknownWithSuggestion {
            input: input.to_string(),
            suggestion,
        },
        _ => CommandError::Unknown,
    }
}
