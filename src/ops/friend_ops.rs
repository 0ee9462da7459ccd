use rusqlite::Connection;
use tracing::debug;

use crate::db::{friend_repo, gift_idea_repo, member_repo};
use crate::error::{SantaError, SantaResult};
use crate::model::{Friend, Id};
use crate::session::Session;
use crate::validation::{self, trim_optional};

pub fn add_friend(
    conn: &Connection,
    session: &Session,
    name: &str,
    email: Option<&str>,
    phone: Option<&str>,
    notes: Option<&str>,
) -> SantaResult<Friend> {
    let valid_name = validation::non_blank(name, "name")?;

    let mut friend = Friend::create(valid_name);
    friend.email = validation::optional_email(email)?;
    friend.phone = trim_optional(phone);
    friend.notes = trim_optional(notes);

    friend_repo::insert(conn, session.owner_id(), &friend)?;
    debug!(friend_id = %friend.id, "friend added");
    Ok(friend)
}

pub fn update_friend(
    conn: &Connection,
    session: &Session,
    friend_id: Id<Friend>,
    name: Option<&str>,
    email: Option<Option<&str>>,
    phone: Option<Option<&str>>,
    notes: Option<Option<&str>>,
) -> SantaResult<Friend> {
    let mut friend = owned_friend(conn, session, friend_id)?;

    if let Some(n) = name {
        friend.name = validation::non_blank(n, "name")?;
    }
    if let Some(e) = email {
        friend.email = validation::optional_email(e)?;
    }
    if let Some(p) = phone {
        friend.phone = trim_optional(p);
    }
    if let Some(n) = notes {
        friend.notes = trim_optional(n);
    }

    friend_repo::update(conn, &friend)?;
    Ok(friend)
}

/// Deletes a friend together with the gift ideas recorded for them, as one
/// transaction. Group members imported from the friend keep their name and
/// email but lose the link.
pub fn delete_friend(conn: &Connection, session: &Session, friend_id: Id<Friend>) -> SantaResult<()> {
    owned_friend(conn, session, friend_id)?;

    let tx = conn.unchecked_transaction()?;
    let unlinked = member_repo::clear_friend(&tx, friend_id)?;
    let ideas = gift_idea_repo::delete_by_friend(&tx, friend_id)?;
    friend_repo::delete(&tx, friend_id)?;
    tx.commit()?;

    debug!(%friend_id, unlinked, ideas, "friend deleted");
    Ok(())
}

pub fn list_friends(conn: &Connection, session: &Session) -> SantaResult<Vec<Friend>> {
    friend_repo::find_by_owner(conn, session.owner_id())
}

/// Loads a friend, checking it belongs to the session user.
pub fn owned_friend(conn: &Connection, session: &Session, friend_id: Id<Friend>) -> SantaResult<Friend> {
    let owner = friend_repo::find_owner(conn, friend_id)?
        .ok_or_else(|| SantaError::not_found("Friend", friend_id))?;
    if owner != session.owner_id() {
        return Err(SantaError::NotOwner {
            entity_type: "Friend".into(),
            id: friend_id.to_string(),
        });
    }
    friend_repo::find_by_id(conn, friend_id)?.ok_or_else(|| SantaError::not_found("Friend", friend_id))
}
