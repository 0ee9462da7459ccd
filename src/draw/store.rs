use rusqlite::Connection;

use crate::db::{assignment_repo, group_repo, member_repo};
use crate::error::SantaResult;
use crate::model::{Assignment, Group, Id, Member};

/// The storage calls a draw needs. Implementations are not assumed to be
/// transactional; the engine reports how far it got when a call fails.
pub trait DrawStore {
    fn list_members(&self, group_id: Id<Group>) -> SantaResult<Vec<Member>>;
    fn delete_assignments(&self, group_id: Id<Group>) -> SantaResult<()>;
    fn insert_assignments(&self, assignments: &[Assignment]) -> SantaResult<()>;
    fn mark_drawn(&self, group_id: Id<Group>) -> SantaResult<()>;
}

impl DrawStore for Connection {
    fn list_members(&self, group_id: Id<Group>) -> SantaResult<Vec<Member>> {
        member_repo::find_by_group(self, group_id)
    }

    fn delete_assignments(&self, group_id: Id<Group>) -> SantaResult<()> {
        assignment_repo::delete_by_group(self, group_id).map(|_| ())
    }

    fn insert_assignments(&self, assignments: &[Assignment]) -> SantaResult<()> {
        assignment_repo::insert_all(self, assignments)
    }

    fn mark_drawn(&self, group_id: Id<Group>) -> SantaResult<()> {
        group_repo::set_drawn(self, group_id, true)
    }
}
