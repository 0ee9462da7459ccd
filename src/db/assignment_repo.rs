use rusqlite::{params, Connection};

use crate::error::SantaResult;
use crate::model::{Assignment, Group, Id, Member};

const COLUMNS: &str = "id, group_id, giver_id, receiver_id, is_revealed";

/// Inserts a full assignment set with one prepared statement.
pub fn insert_all(conn: &Connection, assignments: &[Assignment]) -> SantaResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO draw_results (id, group_id, giver_id, receiver_id, is_revealed)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for a in assignments {
        stmt.execute(params![
            a.id.to_db(),
            a.group_id.to_db(),
            a.giver_id.to_db(),
            a.receiver_id.to_db(),
            a.is_revealed as i32,
        ])?;
    }
    Ok(())
}

pub fn delete_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<usize> {
    let removed = conn.execute(
        "DELETE FROM draw_results WHERE group_id = ?1",
        params![group_id.to_db()],
    )?;
    Ok(removed)
}

pub fn find_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Vec<Assignment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM draw_results WHERE group_id = ?1 ORDER BY rowid",
        COLUMNS
    ))?;

    let assignments = stmt
        .query_map(params![group_id.to_db()], |row| Ok(row_to_assignment(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<SantaResult<Vec<_>>>()?;

    Ok(assignments)
}

pub fn find_by_giver(conn: &Connection, giver_id: Id<Member>) -> SantaResult<Option<Assignment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM draw_results WHERE giver_id = ?1",
        COLUMNS
    ))?;
    let result = stmt.query_row(params![giver_id.to_db()], |row| Ok(row_to_assignment(row)));

    match result {
        Ok(a) => Ok(Some(a?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_assignment(row: &rusqlite::Row) -> SantaResult<Assignment> {
    let id_str: String = row.get(0)?;
    let group_str: String = row.get(1)?;
    let giver_str: String = row.get(2)?;
    let receiver_str: String = row.get(3)?;

    Ok(Assignment {
        id: Id::from_db(&id_str)?,
        group_id: Id::from_db(&group_str)?,
        giver_id: Id::from_db(&giver_str)?,
        receiver_id: Id::from_db(&receiver_str)?,
        is_revealed: row.get::<_, i32>(4)? != 0,
    })
}
