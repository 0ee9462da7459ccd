use rusqlite::Connection;
use serde::Serialize;

use crate::db::{group_repo, member_repo};
use crate::draw::MIN_PARTICIPANTS;
use crate::error::SantaResult;
use crate::model::{Group, Id, Member};
use crate::ops::group_ops;
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
pub struct GroupWithMembers {
    pub group: Group,
    pub members: Vec<Member>,
}

impl GroupWithMembers {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has enough members for a draw.
    pub fn can_draw(&self) -> bool {
        self.members.len() >= MIN_PARTICIPANTS
    }
}

/// The session user's groups with their members, newest first.
pub fn groups_with_members(conn: &Connection, session: &Session) -> SantaResult<Vec<GroupWithMembers>> {
    group_repo::find_by_owner(conn, session.owner_id())?
        .into_iter()
        .map(|group| {
            let members = member_repo::find_by_group(conn, group.id)?;
            Ok(GroupWithMembers { group, members })
        })
        .collect()
}

pub fn group_with_members(
    conn: &Connection,
    session: &Session,
    group_id: Id<Group>,
) -> SantaResult<GroupWithMembers> {
    let group = group_ops::owned_group(conn, session, group_id)?;
    let members = member_repo::find_by_group(conn, group.id)?;
    Ok(GroupWithMembers { group, members })
}

/// Case-insensitive substring search over group names.
pub fn find_groups_by_name(conn: &Connection, session: &Session, query: &str) -> SantaResult<Vec<Group>> {
    let lower = query.to_lowercase();
    Ok(group_repo::find_by_owner(conn, session.owner_id())?
        .into_iter()
        .filter(|g| g.name.to_lowercase().contains(&lower))
        .collect())
}
