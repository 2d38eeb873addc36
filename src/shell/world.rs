//! Virtual filesystem graph and its canonical starting state.
//!
//! The world is a small directed graph of [`Location`]s plus a flat, global
//! table of file contents. A file lives "in" a directory only through that
//! directory's item list; its content is looked up by name alone, so two
//! directories holding a file of the same name share one content entry.
//!
//! Structural edits are additive for directories (nothing deletes a
//! location), which keeps every node reachable from `home`.

use std::collections::HashMap;

use log::debug;

use crate::shell::types::{Location, LocationId};

/// Seed row: key, description, items, parent key.
type SeedRow = (&'static str, &'static str, &'static [&'static str], Option<&'static str>);

/// Starting topology. Row order fixes the `LocationId` constants.
const SEED_LOCATIONS: &[SeedRow] = &[
    (
        "home",
        "Your home directory. A clean, minimal space with a terminal prompt blinking.",
        &["notes.txt", "mission.txt"],
        None,
    ),
    (
        "documents",
        "A directory containing important files.",
        &["secret.txt", "manual.pdf"],
        Some("home"),
    ),
    (
        "downloads",
        "A cluttered space with various downloaded files.",
        &["image.jpg", "archive.zip"],
        Some("home"),
    ),
    (
        "projects",
        "Your coding projects directory.",
        &["README.md"],
        Some("home"),
    ),
    (
        "hidden_vault",
        "A secret directory containing treasures.",
        &["treasure.json"],
        Some("projects"),
    ),
];

const SEED_FILES: &[(&str, &str)] = &[
    (
        "notes.txt",
        "Welcome to CLI Adventures!\nType 'help' to see available commands.",
    ),
    (
        "mission.txt",
        "MISSION BRIEFING:\nA precious treasure.json file has been stolen from the archive.zip/relics folder!\nThe thief has hidden it in the hidden_vault directory.\n\nYour mission:\n1. Find and recover the treasure.json file\n2. Use unzip command to extract the archive.zip\n3. Create a 'relics' directory inside the extracted archive if it doesn't exist\n4. Move the treasure.json file to its rightful place in archive/relics\n\nGood luck, agent!",
    ),
    ("secret.txt", "The password is 'opensesame'"),
    (
        "README.md",
        "# Project Documentation\nUse 'ls' to list files\nUse 'cd' to change directories\nUse 'cat' to read files",
    ),
    (
        "treasure.json",
        r#"{"reward":"You've mastered basic CLI commands!","value":"$1,000,000","origin":"archive/relics"}"#,
    ),
];

pub const ARCHIVE_NAME: &str = "archive";
const ARCHIVE_DESCRIPTION: &str = "Contents of the extracted archive";
const ARCHIVE_FILES: &[(&str, &str)] = &[
    (
        "README.txt",
        "Archive contents. These files were recovered from an ancient system.",
    ),
    ("data.csv", "item,value\napple,1\nbanana,2\ntreasure,1000000"),
];

pub const RELICS_NAME: &str = "relics";
pub const RELICS_DESCRIPTION: &str = "A secure directory for storing valuable treasures";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    locations: Vec<Location>,
    files: HashMap<String, String>,
    archive: Option<LocationId>,
}

impl Default for World {
    fn default() -> Self {
        Self::seeded()
    }
}

impl World {
    /// Build the canonical five-directory starting world.
    pub fn seeded() -> Self {
        let mut world = World {
            locations: Vec::with_capacity(SEED_LOCATIONS.len() + 2),
            files: HashMap::new(),
            archive: None,
        };
        for (key, description, items, parent_key) in SEED_LOCATIONS {
            let parent = parent_key.and_then(|p| world.find_key(p));
            let id = world.insert_location(key, key, description, parent);
            world.locations[id.0].items = items.iter().map(|s| s.to_string()).collect();
        }
        for (name, content) in SEED_FILES {
            world.files.insert(name.to_string(), content.to_string());
        }
        world
    }

    pub fn home(&self) -> LocationId {
        LocationId::HOME
    }

    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.0]
    }

    fn location_mut(&mut self, id: LocationId) -> &mut Location {
        &mut self.locations[id.0]
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn find_key(&self, key: &str) -> Option<LocationId> {
        self.locations.iter().find(|l| l.key == key).map(|l| l.id)
    }

    /// True if any location anywhere carries this key or display name.
    pub fn knows_directory(&self, name: &str) -> bool {
        self.locations.iter().any(|l| l.key == name || l.name == name)
    }

    /// Resolve an exit of `from` by the name a player would type.
    pub fn exit_named(&self, from: LocationId, name: &str) -> Option<LocationId> {
        self.location(from)
            .exits
            .iter()
            .copied()
            .find(|&id| self.location(id).name == name)
    }

    pub fn has_exit(&self, from: LocationId, name: &str) -> bool {
        self.exit_named(from, name).is_some()
    }

    /// Parent of `id`; `None` only for the root.
    ///
    /// Uses the recorded parent link and falls back to the first location,
    /// in creation order, that lists `id` among its exits.
    pub fn parent_of(&self, id: LocationId) -> Option<LocationId> {
        if id == self.home() {
            return None;
        }
        self.location(id).parent.or_else(|| {
            self.locations
                .iter()
                .find(|l| l.id != id && l.exits.contains(&id))
                .map(|l| l.id)
        })
    }

    /// Exits shown by `ls`: everything but the way back up.
    pub fn child_exits(&self, id: LocationId) -> Vec<&Location> {
        let parent = self.parent_of(id);
        self.location(id)
            .exits
            .iter()
            .filter(|&&e| Some(e) != parent)
            .map(|&e| self.location(e))
            .collect()
    }

    pub fn content(&self, file: &str) -> Option<&str> {
        self.files.get(file).map(String::as_str)
    }

    /// Create a subdirectory of `parent`, namespacing its key on collision.
    pub fn create_directory(&mut self, parent: LocationId, name: &str, description: &str) -> LocationId {
        let key = self.unique_key(parent, name);
        let id = self.insert_location(&key, name, description, Some(parent));
        debug!("created directory key={} under {}", key, self.location(parent).key);
        id
    }

    fn unique_key(&self, parent: LocationId, name: &str) -> String {
        if self.find_key(name).is_none() {
            return name.to_string();
        }
        let base = format!("{}_{}", self.location(parent).key, name);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.find_key(&candidate).is_some() {
            candidate = format!("{}{}", base, n);
            n += 1;
        }
        candidate
    }

    fn insert_location(
        &mut self,
        key: &str,
        name: &str,
        description: &str,
        parent: Option<LocationId>,
    ) -> LocationId {
        let id = LocationId(self.locations.len());
        self.locations.push(Location {
            id,
            key: key.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            items: Vec::new(),
            exits: parent.into_iter().collect(),
            parent,
        });
        if let Some(p) = parent {
            self.location_mut(p).exits.push(id);
        }
        id
    }

    /// Add an item and (re)set its global content.
    pub fn add_file(&mut self, at: LocationId, name: &str, content: &str) {
        let loc = self.location_mut(at);
        if !loc.has_item(name) {
            loc.items.push(name.to_string());
        }
        self.files.insert(name.to_string(), content.to_string());
    }

    /// Drop an item from a directory and its content entry.
    pub fn remove_file(&mut self, at: LocationId, name: &str) -> bool {
        let loc = self.location_mut(at);
        let Some(pos) = loc.items.iter().position(|i| i == name) else {
            return false;
        };
        loc.items.remove(pos);
        self.files.remove(name);
        true
    }

    /// Rename an item within one directory; content follows the new name.
    pub fn rename_file(&mut self, at: LocationId, from: &str, to: &str) -> bool {
        let loc = self.location_mut(at);
        let Some(pos) = loc.items.iter().position(|i| i == from) else {
            return false;
        };
        loc.items.remove(pos);
        loc.items.retain(|i| i != to);
        loc.items.push(to.to_string());
        if let Some(content) = self.files.remove(from) {
            self.files.insert(to.to_string(), content);
        }
        true
    }

    /// Duplicate an item within one directory.
    pub fn copy_file(&mut self, at: LocationId, from: &str, to: &str) {
        self.location_mut(at).items.push(to.to_string());
        if let Some(content) = self.files.get(from).cloned() {
            self.files.insert(to.to_string(), content);
        }
    }

    /// Move an item between directories, keeping its content.
    pub fn relocate_file(&mut self, from: LocationId, to: LocationId, name: &str) -> bool {
        let src = self.location_mut(from);
        let Some(pos) = src.items.iter().position(|i| i == name) else {
            return false;
        };
        src.items.remove(pos);
        let dst = self.location_mut(to);
        if !dst.has_item(name) {
            dst.items.push(name.to_string());
        }
        true
    }

    /// The directory produced by extracting `archive.zip`, once it exists.
    pub fn archive(&self) -> Option<LocationId> {
        self.archive
    }

    /// Merge the scripted archive contents under `downloads`.
    ///
    /// A directory named `archive` the player already made there is adopted
    /// as the archive; its existing files stay and the scripted ones are added.
    pub fn extract_archive(&mut self) -> LocationId {
        if let Some(existing) = self.archive {
            return existing;
        }
        let id = match self.exit_named(LocationId::DOWNLOADS, ARCHIVE_NAME) {
            Some(made) => {
                debug!("adopting existing directory key={} as archive", self.location(made).key);
                made
            }
            None => self.create_directory(LocationId::DOWNLOADS, ARCHIVE_NAME, ARCHIVE_DESCRIPTION),
        };
        for (name, content) in ARCHIVE_FILES {
            self.add_file(id, name, content);
        }
        self.archive = Some(id);
        id
    }

    /// `archive/relics`, the mission's destination, if both exist.
    pub fn relics(&self) -> Option<LocationId> {
        self.archive.and_then(|a| self.exit_named(a, RELICS_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exit_names(world: &World, id: LocationId) -> Vec<String> {
        world
            .location(id)
            .exits
            .iter()
            .map(|&e| world.location(e).key.clone())
            .collect()
    }

    #[test]
    fn seeded_topology_matches_layout() {
        let world = World::seeded();
        assert_eq!(world.len(), 5);
        assert_eq!(
            exit_names(&world, LocationId::HOME),
            vec!["documents", "downloads", "projects"]
        );
        assert_eq!(exit_names(&world, LocationId::DOCUMENTS), vec!["home"]);
        assert_eq!(exit_names(&world, LocationId::DOWNLOADS), vec!["home"]);
        assert_eq!(
            exit_names(&world, LocationId::PROJECTS),
            vec!["home", "hidden_vault"]
        );
        assert_eq!(exit_names(&world, LocationId::HIDDEN_VAULT), vec!["projects"]);
        assert_eq!(world.location(LocationId::HIDDEN_VAULT).items, vec!["treasure.json"]);
        assert!(world.content("manual.pdf").is_none());
        assert!(world.content("treasure.json").unwrap().contains("archive/relics"));
    }

    #[test]
    fn parents_follow_the_fixed_table() {
        let world = World::seeded();
        assert_eq!(world.parent_of(LocationId::HOME), None);
        assert_eq!(world.parent_of(LocationId::DOCUMENTS), Some(LocationId::HOME));
        assert_eq!(world.parent_of(LocationId::HIDDEN_VAULT), Some(LocationId::PROJECTS));
    }

    #[test]
    fn parent_falls_back_to_exit_scan() {
        let mut world = World::seeded();
        let id = world.create_directory(LocationId::DOCUMENTS, "drafts", "d");
        world.location_mut(id).parent = None;
        assert_eq!(world.parent_of(id), Some(LocationId::DOCUMENTS));
    }

    #[test]
    fn colliding_names_get_namespaced_keys() {
        let mut world = World::seeded();
        let id = world.create_directory(LocationId::PROJECTS, "documents", "d");
        let loc = world.location(id);
        assert_eq!(loc.key, "projects_documents");
        assert_eq!(loc.name, "documents");
        assert_eq!(world.exit_named(LocationId::PROJECTS, "documents"), Some(id));
        // the original documents keeps its key
        assert_eq!(world.find_key("documents"), Some(LocationId::DOCUMENTS));
    }

    #[test]
    fn child_exits_hide_the_parent() {
        let world = World::seeded();
        let names: Vec<_> = world
            .child_exits(LocationId::PROJECTS)
            .iter()
            .map(|l| l.name.clone())
            .collect();
        assert_eq!(names, vec!["hidden_vault"]);
        assert!(world.child_exits(LocationId::DOCUMENTS).is_empty());
    }

    #[test]
    fn archive_extraction_is_idempotent() {
        let mut world = World::seeded();
        let first = world.extract_archive();
        let second = world.extract_archive();
        assert_eq!(first, second);
        assert_eq!(world.location(first).items, vec!["README.txt", "data.csv"]);
        assert_eq!(world.location(LocationId::DOWNLOADS).exits.len(), 2);
        assert_eq!(world.parent_of(first), Some(LocationId::DOWNLOADS));
        assert!(world.relics().is_none());
    }

    #[test]
    fn extraction_adopts_a_player_made_archive() {
        let mut world = World::seeded();
        let made = world.create_directory(LocationId::DOWNLOADS, "archive", "mine");
        world.add_file(made, "data.csv", "");
        world.add_file(made, "scratch.txt", "");
        assert_eq!(world.extract_archive(), made);
        assert_eq!(world.archive(), Some(made));
        assert_eq!(world.location(made).items, vec!["data.csv", "scratch.txt", "README.txt"]);
        assert_eq!(world.location(LocationId::DOWNLOADS).exits.len(), 2);
    }

    #[test]
    fn rename_moves_content_with_the_name() {
        let mut world = World::seeded();
        assert!(world.rename_file(LocationId::HOME, "notes.txt", "todo.txt"));
        assert!(world.content("notes.txt").is_none());
        assert!(world.content("todo.txt").unwrap().starts_with("Welcome"));
        assert_eq!(world.location(LocationId::HOME).items, vec!["mission.txt", "todo.txt"]);
    }
}
