use rusqlite::{params, Connection};

use crate::error::SantaResult;
use crate::model::{Id, User};

pub fn insert(conn: &Connection, user: &User) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)",
        params![user.id.to_db(), user.name, user.email],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, user_id: Id<User>) -> SantaResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email FROM users WHERE id = ?1")?;
    let result = stmt.query_row(params![user_id.to_db()], |row| Ok(row_to_user(row)));

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_first(conn: &Connection) -> SantaResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email FROM users ORDER BY rowid LIMIT 1")?;
    let result = stmt.query_row([], |row| Ok(row_to_user(row)));

    match result {
        Ok(user) => Ok(Some(user?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_user(row: &rusqlite::Row) -> SantaResult<User> {
    let id_str: String = row.get(0)?;
    Ok(User {
        id: Id::from_db(&id_str)?,
        name: row.get(1)?,
        email: row.get(2)?,
    })
}
