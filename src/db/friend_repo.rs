use rusqlite::{params, Connection};

use crate::error::SantaResult;
use crate::model::{Friend, Id, User};

const COLUMNS: &str = "id, name, email, phone, notes";

pub fn insert(conn: &Connection, owner_id: Id<User>, friend: &Friend) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO friends (id, owner_id, name, email, phone, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            friend.id.to_db(),
            owner_id.to_db(),
            friend.name,
            friend.email,
            friend.phone,
            friend.notes,
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, friend: &Friend) -> SantaResult<()> {
    conn.execute(
        "UPDATE friends SET name = ?1, email = ?2, phone = ?3, notes = ?4, updated_at = datetime('now')
         WHERE id = ?5",
        params![
            friend.name,
            friend.email,
            friend.phone,
            friend.notes,
            friend.id.to_db(),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, friend_id: Id<Friend>) -> SantaResult<()> {
    conn.execute("DELETE FROM friends WHERE id = ?1", params![friend_id.to_db()])?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Friend>) -> SantaResult<Option<Friend>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM friends WHERE id = ?1", COLUMNS))?;
    let result = stmt.query_row(params![id.to_db()], |row| Ok(row_to_friend(row)));

    match result {
        Ok(friend) => Ok(Some(friend?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The owner of a friend record, used for ownership checks.
pub fn find_owner(conn: &Connection, id: Id<Friend>) -> SantaResult<Option<Id<User>>> {
    let mut stmt = conn.prepare("SELECT owner_id FROM friends WHERE id = ?1")?;
    let result = stmt.query_row(params![id.to_db()], |row| row.get::<_, String>(0));

    match result {
        Ok(s) => Ok(Some(Id::from_db(&s)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> SantaResult<Vec<Friend>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM friends WHERE owner_id = ?1 ORDER BY name COLLATE NOCASE",
        COLUMNS
    ))?;

    let friends = stmt
        .query_map(params![owner_id.to_db()], |row| Ok(row_to_friend(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<SantaResult<Vec<_>>>()?;

    Ok(friends)
}

fn row_to_friend(row: &rusqlite::Row) -> SantaResult<Friend> {
    let id_str: String = row.get(0)?;
    Ok(Friend {
        id: Id::from_db(&id_str)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        notes: row.get(4)?,
    })
}
