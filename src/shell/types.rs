use serde::{Deserialize, Serialize};

/// Stable surrogate identifier of a directory node.
///
/// Ids are indices into the world's location table and are never reused;
/// nothing removes locations once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocationId(pub(crate) usize);

impl LocationId {
    pub const HOME: LocationId = LocationId(0);
    pub const DOCUMENTS: LocationId = LocationId(1);
    pub const DOWNLOADS: LocationId = LocationId(2);
    pub const PROJECTS: LocationId = LocationId(3);
    pub const HIDDEN_VAULT: LocationId = LocationId(4);
}

/// A directory node in the virtual filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Unique lookup key exposed to front-ends. Collisions on creation are
    /// namespaced as `<parent key>_<name>`.
    pub key: String,
    /// What players see and type; never namespaced.
    pub name: String,
    pub description: String,
    /// File names, in insertion order.
    pub items: Vec<String>,
    /// Directed edges navigable with `cd`; includes the back-link to the parent.
    pub exits: Vec<LocationId>,
    pub parent: Option<LocationId>,
}

impl Location {
    pub fn has_item(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }
}
