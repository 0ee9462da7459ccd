use serde::{Deserialize, Serialize};

use super::ids::Id;

/// A reusable contact that can be imported into any group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friend {
    pub id: Id<Friend>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Friend {
    pub fn create(name: String) -> Self {
        Self {
            id: Id::generate(),
            name,
            email: None,
            phone: None,
            notes: None,
        }
    }
}
