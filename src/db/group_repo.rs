use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::error::SantaResult;
use crate::model::{Group, Id, User};

const COLUMNS: &str =
    "id, owner_id, name, description, budget_min, budget_max, draw_date, exchange_date, is_drawn";

pub fn insert(conn: &Connection, group: &Group) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO groups (id, owner_id, name, description, budget_min, budget_max, draw_date, exchange_date, is_drawn)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            group.id.to_db(),
            group.owner_id.to_db(),
            group.name,
            group.description,
            group.budget_min,
            group.budget_max,
            group.draw_date.map(|d| d.to_string()),
            group.exchange_date.map(|d| d.to_string()),
            group.is_drawn as i32,
        ],
    )?;
    Ok(())
}

/// Updates the editable details. `is_drawn` is only changed by [`set_drawn`].
pub fn update(conn: &Connection, group: &Group) -> SantaResult<()> {
    conn.execute(
        "UPDATE groups SET name = ?1, description = ?2, budget_min = ?3, budget_max = ?4,
         draw_date = ?5, exchange_date = ?6, updated_at = datetime('now')
         WHERE id = ?7",
        params![
            group.name,
            group.description,
            group.budget_min,
            group.budget_max,
            group.draw_date.map(|d| d.to_string()),
            group.exchange_date.map(|d| d.to_string()),
            group.id.to_db(),
        ],
    )?;
    Ok(())
}

pub fn set_drawn(conn: &Connection, group_id: Id<Group>, is_drawn: bool) -> SantaResult<()> {
    conn.execute(
        "UPDATE groups SET is_drawn = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![is_drawn as i32, group_id.to_db()],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    conn.execute("DELETE FROM groups WHERE id = ?1", params![group_id.to_db()])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Group>) -> SantaResult<Option<Group>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM groups WHERE id = ?1", COLUMNS))?;
    let result = stmt.query_row(params![id.to_db()], |row| Ok(row_to_group(row)));

    match result {
        Ok(group) => Ok(Some(group?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Groups owned by `owner_id`, newest first.
pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> SantaResult<Vec<Group>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM groups WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
        COLUMNS
    ))?;

    let groups = stmt
        .query_map(params![owner_id.to_db()], |row| Ok(row_to_group(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<SantaResult<Vec<_>>>()?;

    Ok(groups)
}

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn row_to_group(row: &rusqlite::Row) -> SantaResult<Group> {
    let id_str: String = row.get(0)?;
    let owner_str: String = row.get(1)?;

    Ok(Group {
        id: Id::from_db(&id_str)?,
        owner_id: Id::from_db(&owner_str)?,
        name: row.get(2)?,
        description: row.get(3)?,
        budget_min: row.get(4)?,
        budget_max: row.get(5)?,
        draw_date: parse_date(row.get(6)?),
        exchange_date: parse_date(row.get(7)?),
        is_drawn: row.get::<_, i32>(8)? != 0,
    })
}
