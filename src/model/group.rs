use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::user::User;

/// A gift-exchange event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Id<Group>,
    pub owner_id: Id<User>,
    pub name: String,
    pub description: Option<String>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub draw_date: Option<NaiveDate>,
    pub exchange_date: Option<NaiveDate>,
    pub is_drawn: bool,
}

impl Group {
    pub fn create(owner_id: Id<User>, name: String) -> Self {
        Self {
            id: Id::generate(),
            owner_id,
            name,
            description: None,
            budget_min: None,
            budget_max: None,
            draw_date: None,
            exchange_date: None,
            is_drawn: false,
        }
    }

    /// Human-readable budget, e.g. "10 - 25", "min 10", "max 25".
    pub fn budget_label(&self) -> Option<String> {
        match (self.budget_min, self.budget_max) {
            (Some(lo), Some(hi)) => Some(format!("{} - {}", lo, hi)),
            (Some(lo), None) => Some(format!("min {}", lo)),
            (None, Some(hi)) => Some(format!("max {}", hi)),
            (None, None) => None,
        }
    }
}
