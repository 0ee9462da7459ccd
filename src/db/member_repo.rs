use rusqlite::{params, Connection};

use crate::error::SantaResult;
use crate::model::{Friend, Group, Id, Member};

const COLUMNS: &str = "id, group_id, name, email, friend_id, user_id";

pub fn insert(conn: &Connection, member: &Member) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO group_members (id, group_id, name, email, friend_id, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            member.id.to_db(),
            member.group_id.to_db(),
            member.name,
            member.email,
            member.friend_id.map(|id| id.to_db()),
            member.user_id.map(|id| id.to_db()),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, member_id: Id<Member>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM group_members WHERE id = ?1",
        params![member_id.to_db()],
    )?;
    Ok(())
}

pub fn delete_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM group_members WHERE group_id = ?1",
        params![group_id.to_db()],
    )?;
    Ok(())
}

/// Drops the link to a deleted friend; the member keeps its copied details.
pub fn clear_friend(conn: &Connection, friend_id: Id<Friend>) -> SantaResult<usize> {
    let changed = conn.execute(
        "UPDATE group_members SET friend_id = NULL WHERE friend_id = ?1",
        params![friend_id.to_db()],
    )?;
    Ok(changed)
}

pub fn find_by_id(conn: &Connection, id: Id<Member>) -> SantaResult<Option<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM group_members WHERE id = ?1",
        COLUMNS
    ))?;
    let result = stmt.query_row(params![id.to_db()], |row| Ok(row_to_member(row)));

    match result {
        Ok(member) => Ok(Some(member?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Members of a group in the order they were added.
pub fn find_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM group_members WHERE group_id = ?1 ORDER BY created_at, rowid",
        COLUMNS
    ))?;

    let members = stmt
        .query_map(params![group_id.to_db()], |row| Ok(row_to_member(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<SantaResult<Vec<_>>>()?;

    Ok(members)
}

pub fn count_by_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM group_members WHERE group_id = ?1",
        params![group_id.to_db()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn row_to_member(row: &rusqlite::Row) -> SantaResult<Member> {
    let id_str: String = row.get(0)?;
    let group_str: String = row.get(1)?;
    let friend_str: Option<String> = row.get(4)?;
    let user_str: Option<String> = row.get(5)?;

    Ok(Member {
        id: Id::from_db(&id_str)?,
        group_id: Id::from_db(&group_str)?,
        name: row.get(2)?,
        email: row.get(3)?,
        friend_id: friend_str.as_deref().map(Id::from_db).transpose()?,
        user_id: user_str.as_deref().map(Id::from_db).transpose()?,
    })
}
