use serde::{Deserialize, Serialize};

use super::friend::Friend;
use super::ids::Id;
use super::user::User;
use super::wishlist::Priority;

/// Rough price band for a gift idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Low,
    Medium,
    High,
    Luxury,
}

impl PriceRange {
    pub const ALL: &'static [PriceRange] = &[
        PriceRange::Low,
        PriceRange::Medium,
        PriceRange::High,
        PriceRange::Luxury,
    ];

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(PriceRange::Low),
            "medium" => Some(PriceRange::Medium),
            "high" => Some(PriceRange::High),
            "luxury" => Some(PriceRange::Luxury),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            PriceRange::Low => "low",
            PriceRange::Medium => "medium",
            PriceRange::High => "high",
            PriceRange::Luxury => "luxury",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Low => "$ (up to 15)",
            PriceRange::Medium => "$$ (15-30)",
            PriceRange::High => "$$$ (30-50)",
            PriceRange::Luxury => "$$$$ (50+)",
        }
    }
}

/// Which gift ideas a listing should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurchaseFilter {
    #[default]
    All,
    Purchased,
    Pending,
}

impl PurchaseFilter {
    pub fn matches(&self, idea: &GiftIdea) -> bool {
        match self {
            PurchaseFilter::All => true,
            PurchaseFilter::Purchased => idea.is_purchased,
            PurchaseFilter::Pending => !idea.is_purchased,
        }
    }
}

/// A present the owner is considering for one of their friends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftIdea {
    pub id: Id<GiftIdea>,
    pub owner_id: Id<User>,
    pub friend_id: Id<Friend>,
    pub title: String,
    pub description: Option<String>,
    pub price_range: Option<PriceRange>,
    pub url: Option<String>,
    pub priority: Priority,
    pub is_purchased: bool,
}

impl GiftIdea {
    pub fn create(owner_id: Id<User>, friend_id: Id<Friend>, title: String) -> Self {
        Self {
            id: Id::generate(),
            owner_id,
            friend_id,
            title,
            description: None,
            price_range: None,
            url: None,
            priority: Priority::default(),
            is_purchased: false,
        }
    }
}
