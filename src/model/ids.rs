use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SantaError, SantaResult};

/// Primary key of a stored row, tagged with the entity it belongs to.
///
/// Members, groups and assignments all live in one database and are all
/// UUIDs; the tag stops a giver's `Id<Member>` from being handed to a
/// function that wants an `Id<Group>`. Stored as hyphenated text.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _entity: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _entity: PhantomData,
        }
    }

    /// A fresh random (v4) id for a row about to be inserted.
    pub fn generate() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Reads an id back from a text column.
    pub fn from_db(s: &str) -> SantaResult<Self> {
        Uuid::parse_str(s)
            .map(Self::from_uuid)
            .map_err(|e| SantaError::InvalidId {
                entity_type: entity_name::<T>().to_string(),
                value: s.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn to_db(&self) -> String {
        self.uuid.hyphenated().to_string()
    }
}

/// `santa::model::member::Member` -> `Member`.
fn entity_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", entity_name::<T>(), self.uuid)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}
