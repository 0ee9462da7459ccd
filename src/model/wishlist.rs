use serde::{Deserialize, Serialize};

use super::group::Group;
use super::ids::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: &'static [Priority] = &[Priority::Low, Priority::Medium, Priority::High];

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Something the owner would like to receive, optionally tied to one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Id<WishlistItem>,
    pub group_id: Option<Id<Group>>,
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub priority: Priority,
}

impl WishlistItem {
    pub fn create(title: String) -> Self {
        Self {
            id: Id::generate(),
            group_id: None,
            title,
            description: None,
            url: None,
            price: None,
            priority: Priority::default(),
        }
    }
}
