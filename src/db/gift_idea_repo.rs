use rusqlite::{params, Connection};

use crate::error::{SantaError, SantaResult};
use crate::model::{Friend, GiftIdea, Id, PriceRange, Priority, User};

const COLUMNS: &str =
    "id, owner_id, friend_id, title, description, price_range, url, priority, is_purchased";

pub fn insert(conn: &Connection, idea: &GiftIdea) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO gift_ideas (id, owner_id, friend_id, title, description, price_range, url, priority, is_purchased)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            idea.id.to_db(),
            idea.owner_id.to_db(),
            idea.friend_id.to_db(),
            idea.title,
            idea.description,
            idea.price_range.map(|r| r.to_db_str()),
            idea.url,
            idea.priority.to_db_str(),
            idea.is_purchased,
        ],
    )?;
    Ok(())
}

/// Saves every editable field, including `is_purchased`.
pub fn update(conn: &Connection, idea: &GiftIdea) -> SantaResult<()> {
    conn.execute(
        "UPDATE gift_ideas SET friend_id = ?1, title = ?2, description = ?3, price_range = ?4,
         url = ?5, priority = ?6, is_purchased = ?7, updated_at = datetime('now')
         WHERE id = ?8",
        params![
            idea.friend_id.to_db(),
            idea.title,
            idea.description,
            idea.price_range.map(|r| r.to_db_str()),
            idea.url,
            idea.priority.to_db_str(),
            idea.is_purchased,
            idea.id.to_db(),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, idea_id: Id<GiftIdea>) -> SantaResult<()> {
    conn.execute("DELETE FROM gift_ideas WHERE id = ?1", params![idea_id.to_db()])?;
    Ok(())
}

/// Returns the number of ideas removed.
pub fn delete_by_friend(conn: &Connection, friend_id: Id<Friend>) -> SantaResult<usize> {
    let removed = conn.execute(
        "DELETE FROM gift_ideas WHERE friend_id = ?1",
        params![friend_id.to_db()],
    )?;
    Ok(removed)
}

pub fn find_by_id(conn: &Connection, id: Id<GiftIdea>) -> SantaResult<Option<GiftIdea>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM gift_ideas WHERE id = ?1", COLUMNS))?;
    let result = stmt.query_row(params![id.to_db()], |row| Ok(row_to_idea(row)));

    match result {
        Ok(idea) => Ok(Some(idea?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All ideas of an owner, newest first.
pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> SantaResult<Vec<GiftIdea>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM gift_ideas WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
        COLUMNS
    ))?;
    let rows = stmt.query_map(params![owner_id.to_db()], |row| Ok(row_to_idea(row)))?;
    collect(rows)
}

/// Ideas for one friend, newest first.
pub fn find_by_friend(conn: &Connection, friend_id: Id<Friend>) -> SantaResult<Vec<GiftIdea>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM gift_ideas WHERE friend_id = ?1 ORDER BY created_at DESC, rowid DESC",
        COLUMNS
    ))?;
    let rows = stmt.query_map(params![friend_id.to_db()], |row| Ok(row_to_idea(row)))?;
    collect(rows)
}

fn collect<I>(rows: I) -> SantaResult<Vec<GiftIdea>>
where
    I: Iterator<Item = rusqlite::Result<SantaResult<GiftIdea>>>,
{
    rows.collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect()
}

fn row_to_idea(row: &rusqlite::Row) -> SantaResult<GiftIdea> {
    let id_str: String = row.get(0)?;
    let owner_str: String = row.get(1)?;
    let friend_str: String = row.get(2)?;
    let range_str: Option<String> = row.get(5)?;
    let priority_str: String = row.get(7)?;

    let price_range = match range_str {
        Some(s) => Some(
            PriceRange::from_db_str(&s)
                .ok_or_else(|| SantaError::Other(format!("Invalid price range: {}", s)))?,
        ),
        None => None,
    };

    Ok(GiftIdea {
        id: Id::from_db(&id_str)?,
        owner_id: Id::from_db(&owner_str)?,
        friend_id: Id::from_db(&friend_str)?,
        title: row.get(3)?,
        description: row.get(4)?,
        price_range,
        url: row.get(6)?,
        priority: Priority::from_db_str(&priority_str)
            .ok_or_else(|| SantaError::Other(format!("Invalid priority: {}", priority_str)))?,
        is_purchased: row.get(8)?,
    })
}
