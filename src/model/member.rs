use serde::{Deserialize, Serialize};

use super::friend::Friend;
use super::group::Group;
use super::ids::Id;
use super::user::User;

/// A participant scoped to exactly one group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Id<Member>,
    pub group_id: Id<Group>,
    pub name: String,
    pub email: Option<String>,
    pub friend_id: Option<Id<Friend>>,
    pub user_id: Option<Id<User>>,
}

impl Member {
    pub fn create(group_id: Id<Group>, name: String) -> Self {
        Self {
            id: Id::generate(),
            group_id,
            name,
            email: None,
            friend_id: None,
            user_id: None,
        }
    }

    /// A member copied from a friend record, keeping a link back to it.
    pub fn from_friend(group_id: Id<Group>, friend: &Friend) -> Self {
        Self {
            id: Id::generate(),
            group_id,
            name: friend.name.clone(),
            email: friend.email.clone(),
            friend_id: Some(friend.id),
            user_id: None,
        }
    }
}
