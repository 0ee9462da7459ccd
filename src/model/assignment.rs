use serde::{Deserialize, Serialize};

use super::group::Group;
use super::ids::Id;
use super::member::Member;

/// One draw result: `giver_id` buys a gift for `receiver_id`.
///
/// `is_revealed` is stored but not used for on-screen disclosure, which is
/// tracked per session by [`crate::draw::RevealState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Id<Assignment>,
    pub group_id: Id<Group>,
    pub giver_id: Id<Member>,
    pub receiver_id: Id<Member>,
    pub is_revealed: bool,
}

impl Assignment {
    pub fn create(group_id: Id<Group>, giver_id: Id<Member>, receiver_id: Id<Member>) -> Self {
        Self {
            id: Id::generate(),
            group_id,
            giver_id,
            receiver_id,
            is_revealed: false,
        }
    }
}
