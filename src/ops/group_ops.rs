use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

use crate::db::{assignment_repo, group_repo, member_repo, wishlist_repo};
use crate::error::{SantaError, SantaResult};
use crate::model::{Group, Id};
use crate::session::Session;
use crate::validation::{self, trim_optional};

pub fn create_group(
    conn: &Connection,
    session: &Session,
    name: &str,
    description: Option<&str>,
    budget_min: Option<f64>,
    budget_max: Option<f64>,
    draw_date: Option<NaiveDate>,
    exchange_date: Option<NaiveDate>,
) -> SantaResult<Group> {
    let valid_name = validation::non_blank(name, "name")?;
    let (budget_min, budget_max) = validation::budget_range(budget_min, budget_max)?;

    let mut group = Group::create(session.owner_id(), valid_name);
    group.description = trim_optional(description);
    group.budget_min = budget_min;
    group.budget_max = budget_max;
    group.draw_date = draw_date;
    group.exchange_date = exchange_date;

    group_repo::insert(conn, &group)?;
    info!(group_id = %group.id, name = %group.name, "group created");
    Ok(group)
}

/// Edits group details. `None` leaves a field alone, `Some(None)` clears it.
/// The drawn flag is never touched here.
pub fn update_group(
    conn: &Connection,
    session: &Session,
    group_id: Id<Group>,
    name: Option<&str>,
    description: Option<Option<&str>>,
    budget_min: Option<Option<f64>>,
    budget_max: Option<Option<f64>>,
    draw_date: Option<Option<NaiveDate>>,
    exchange_date: Option<Option<NaiveDate>>,
) -> SantaResult<Group> {
    let mut group = owned_group(conn, session, group_id)?;

    if let Some(n) = name {
        group.name = validation::non_blank(n, "name")?;
    }
    if let Some(desc) = description {
        group.description = trim_optional(desc);
    }
    let (min, max) = validation::budget_range(
        budget_min.unwrap_or(group.budget_min),
        budget_max.unwrap_or(group.budget_max),
    )?;
    group.budget_min = min;
    group.budget_max = max;
    if let Some(d) = draw_date {
        group.draw_date = d;
    }
    if let Some(d) = exchange_date {
        group.exchange_date = d;
    }

    group_repo::update(conn, &group)?;
    Ok(group)
}

/// Deletes a group with its draw results and members, in that order, as one
/// transaction.
pub fn delete_group(conn: &Connection, session: &Session, group_id: Id<Group>) -> SantaResult<()> {
    owned_group(conn, session, group_id)?;

    let tx = conn.unchecked_transaction()?;
    assignment_repo::delete_by_group(&tx, group_id)?;
    member_repo::delete_by_group(&tx, group_id)?;
    wishlist_repo::detach_group(&tx, group_id)?;
    group_repo::delete(&tx, group_id)?;
    tx.commit()?;

    info!(%group_id, "group deleted");
    Ok(())
}

pub fn list_groups(conn: &Connection, session: &Session) -> SantaResult<Vec<Group>> {
    group_repo::find_by_owner(conn, session.owner_id())
}

/// Loads a group, checking it belongs to the session user.
pub fn owned_group(conn: &Connection, session: &Session, group_id: Id<Group>) -> SantaResult<Group> {
    let group = group_repo::find_by_id(conn, group_id)?
        .ok_or_else(|| SantaError::not_found("Group", group_id))?;

    if group.owner_id != session.owner_id() {
        return Err(SantaError::NotOwner {
            entity_type: "Group".into(),
            id: group_id.to_string(),
        });
    }
    Ok(group)
}
