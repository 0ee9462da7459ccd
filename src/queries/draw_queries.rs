use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;

use crate::db::{assignment_repo, member_repo, wishlist_repo};
use crate::draw::check_assignments;
use crate::error::{SantaError, SantaResult};
use crate::model::{Assignment, Group, Id, Member, WishlistItem};
use crate::ops::group_ops;
use crate::session::Session;

const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
pub struct DrawResultEntry {
    pub assignment: Assignment,
    pub giver_name: String,
    pub receiver_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawResults {
    pub group_name: String,
    /// True only when the group is flagged as drawn and the stored set covers
    /// the current members exactly once. An interrupted draw leaves this
    /// false, and such a set must not be shown.
    pub complete: bool,
    pub entries: Vec<DrawResultEntry>,
}

impl DrawResults {
    pub fn assignment_ids(&self) -> impl Iterator<Item = Id<Assignment>> + '_ {
        self.entries.iter().map(|e| e.assignment.id)
    }
}

/// What one participant should see: who they give to and that person's wishes.
#[derive(Debug, Clone, Serialize)]
pub struct DrawReveal {
    pub group_name: String,
    pub giver_name: String,
    pub receiver_name: String,
    pub receiver_wishlist: Vec<WishlistItem>,
}

pub fn draw_results(conn: &Connection, session: &Session, group_id: Id<Group>) -> SantaResult<DrawResults> {
    let group = group_ops::owned_group(conn, session, group_id)?;
    let members = member_repo::find_by_group(conn, group.id)?;
    let assignments = assignment_repo::find_by_group(conn, group.id)?;

    let complete = group.is_drawn && check_assignments(&members, &assignments).is_ok();
    let names: HashMap<Id<Member>, &str> = members.iter().map(|m| (m.id, m.name.as_str())).collect();
    let name_of = |id: Id<Member>| names.get(&id).copied().unwrap_or(UNKNOWN_NAME).to_string();

    let entries = assignments
        .into_iter()
        .map(|assignment| DrawResultEntry {
            giver_name: name_of(assignment.giver_id),
            receiver_name: name_of(assignment.receiver_id),
            assignment,
        })
        .collect();

    Ok(DrawResults {
        group_name: group.name,
        complete,
        entries,
    })
}

/// The single result for `giver_id`, plus the receiver's wishlist when the
/// receiver is linked to a user account.
pub fn reveal_for_member(conn: &Connection, session: &Session, giver_id: Id<Member>) -> SantaResult<DrawReveal> {
    let giver = member_repo::find_by_id(conn, giver_id)?
        .ok_or_else(|| SantaError::not_found("Member", giver_id))?;
    let group = group_ops::owned_group(conn, session, giver.group_id)?;

    let assignment = assignment_repo::find_by_giver(conn, giver.id)?
        .ok_or_else(|| SantaError::not_found("Draw result for member", giver.id))?;
    let receiver = member_repo::find_by_id(conn, assignment.receiver_id)?;

    let receiver_wishlist = match receiver.as_ref().and_then(|r| r.user_id) {
        Some(user_id) => wishlist_repo::find_for_group(conn, user_id, group.id)?,
        None => Vec::new(),
    };

    Ok(DrawReveal {
        group_name: group.name,
        giver_name: giver.name,
        receiver_name: receiver
            .map(|r| r.name)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        receiver_wishlist,
    })
}
