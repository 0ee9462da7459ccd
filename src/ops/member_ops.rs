use rusqlite::Connection;
use tracing::warn;

use crate::db::{assignment_repo, group_repo, member_repo};
use crate::error::{SantaError, SantaResult};
use crate::model::{Friend, Group, Id, Member};
use crate::ops::{friend_ops, group_ops};
use crate::session::Session;
use crate::validation;

pub fn add_member(
    conn: &Connection,
    session: &Session,
    group_id: Id<Group>,
    name: &str,
    email: Option<&str>,
) -> SantaResult<Member> {
    let group = group_ops::owned_group(conn, session, group_id)?;
    let valid_name = validation::non_blank(name, "name")?;

    let mut member = Member::create(group.id, valid_name);
    member.email = validation::optional_email(email)?;

    insert_into(conn, &group, &member)?;
    Ok(member)
}

/// Adds a friend to a group as a new member, copying name and email.
pub fn add_friend_to_group(
    conn: &Connection,
    session: &Session,
    group_id: Id<Group>,
    friend_id: Id<Friend>,
) -> SantaResult<Member> {
    let group = group_ops::owned_group(conn, session, group_id)?;
    let friend = friend_ops::owned_friend(conn, session, friend_id)?;

    let already_in = member_repo::find_by_group(conn, group.id)?
        .iter()
        .any(|m| m.friend_id == Some(friend.id));
    if already_in {
        return Err(SantaError::AlreadyExists {
            entity_type: "Member".into(),
            identifier: friend.name,
        });
    }

    let member = Member::from_friend(group.id, &friend);
    insert_into(conn, &group, &member)?;
    Ok(member)
}

/// Adds the session user to one of their own groups, linked to their account
/// so the person who draws them can see their wishlist.
pub fn join_group(conn: &Connection, session: &Session, group_id: Id<Group>) -> SantaResult<Member> {
    let group = group_ops::owned_group(conn, session, group_id)?;
    let user = session.user();

    let already_in = member_repo::find_by_group(conn, group.id)?
        .iter()
        .any(|m| m.user_id == Some(user.id));
    if already_in {
        return Err(SantaError::AlreadyExists {
            entity_type: "Member".into(),
            identifier: user.name.clone(),
        });
    }

    let mut member = Member::create(group.id, user.name.clone());
    member.email = validation::trim_optional(Some(&user.email));
    member.user_id = Some(user.id);

    insert_into(conn, &group, &member)?;
    Ok(member)
}

pub fn remove_member(conn: &Connection, session: &Session, member_id: Id<Member>) -> SantaResult<()> {
    let member = member_repo::find_by_id(conn, member_id)?
        .ok_or_else(|| SantaError::not_found("Member", member_id))?;
    let group = group_ops::owned_group(conn, session, member.group_id)?;

    let tx = conn.unchecked_transaction()?;
    clear_draw(&tx, &group)?;
    member_repo::delete(&tx, member_id)?;
    tx.commit()?;
    Ok(())
}

pub fn list_members(conn: &Connection, session: &Session, group_id: Id<Group>) -> SantaResult<Vec<Member>> {
    group_ops::owned_group(conn, session, group_id)?;
    member_repo::find_by_group(conn, group_id)
}

fn insert_into(conn: &Connection, group: &Group, member: &Member) -> SantaResult<()> {
    let tx = conn.unchecked_transaction()?;
    clear_draw(&tx, group)?;
    member_repo::insert(&tx, member)?;
    tx.commit()?;
    Ok(())
}

/// A stored draw no longer covers the member list once it changes. Leftovers
/// from an interrupted draw are removed even when the group is not flagged.
fn clear_draw(conn: &Connection, group: &Group) -> SantaResult<()> {
    let removed = assignment_repo::delete_by_group(conn, group.id)?;
    if group.is_drawn {
        group_repo::set_drawn(conn, group.id, false)?;
    }
    if removed > 0 || group.is_drawn {
        warn!(group_id = %group.id, removed, "members changed, previous draw cleared");
    }
    Ok(())
}
