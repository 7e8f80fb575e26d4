use std::fmt;

use serde::{Deserialize, Serialize};

/// The identifying component of an [`EntityKey`].
///
/// Exactly one of the two forms is present: a numeric id (normally assigned
/// by the datastore) or a caller-chosen string name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyId {
    /// Datastore-assigned (or caller-supplied) numeric identifier.
    Id(i64),
    /// Caller-chosen string name.
    Name(String),
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyId::Id(id) => write!(f, "{id}"),
            KeyId::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<i64> for KeyId {
    fn from(id: i64) -> Self {
        KeyId::Id(id)
    }
}

impl From<&str> for KeyId {
    fn from(name: &str) -> Self {
        KeyId::Name(name.to_string())
    }
}

impl From<String> for KeyId {
    fn from(name: String) -> Self {
        KeyId::Name(name)
    }
}

/// Structured identifier for a stored entity.
///
/// A key names the entity's kind, its id-or-name, and optionally a parent
/// key. Parents form a strictly decreasing ancestor chain terminating in
/// `None`; ownership makes cycles unrepresentable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    /// The entity's kind (schema name).
    pub kind: String,
    /// Numeric id or string name.
    pub id: KeyId,
    /// Optional ancestor key.
    pub parent: Option<Box<EntityKey>>,
}

impl EntityKey {
    /// Create a root key (no parent).
    pub fn new(kind: impl Into<String>, id: impl Into<KeyId>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            parent: None,
        }
    }

    /// Return a copy of this key nested under the given parent.
    pub fn with_parent(mut self, parent: EntityKey) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Number of ancestors above this key (0 for a root key).
    pub fn depth(&self) -> usize {
        match &self.parent {
            Some(parent) => 1 + parent.depth(),
            None => 0,
        }
    }

    /// The root ancestor of this key (itself, if it has no parent).
    pub fn root(&self) -> &EntityKey {
        match &self.parent {
            Some(parent) => parent.root(),
            None => self,
        }
    }
}

impl fmt::Display for EntityKey {
    /// Path form, root ancestor first: `Parent:1/Child:foo`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{parent}/")?;
        }
        write!(f, "{}:{}", self.kind, self.id)
    }
}
