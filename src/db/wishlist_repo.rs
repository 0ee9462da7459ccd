use rusqlite::{params, Connection};

use crate::error::{SantaError, SantaResult};
use crate::model::{Group, Id, Priority, User, WishlistItem};

const COLUMNS: &str = "id, group_id, title, description, url, price, priority";

pub fn insert(conn: &Connection, owner_id: Id<User>, item: &WishlistItem) -> SantaResult<()> {
    conn.execute(
        "INSERT INTO wishlist_items (id, owner_id, group_id, title, description, url, price, priority)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            item.id.to_db(),
            owner_id.to_db(),
            item.group_id.map(|id| id.to_db()),
            item.title,
            item.description,
            item.url,
            item.price,
            item.priority.to_db_str(),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, item: &WishlistItem) -> SantaResult<()> {
    conn.execute(
        "UPDATE wishlist_items SET group_id = ?1, title = ?2, description = ?3, url = ?4,
         price = ?5, priority = ?6, updated_at = datetime('now')
         WHERE id = ?7",
        params![
            item.group_id.map(|id| id.to_db()),
            item.title,
            item.description,
            item.url,
            item.price,
            item.priority.to_db_str(),
            item.id.to_db(),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, item_id: Id<WishlistItem>) -> SantaResult<()> {
    conn.execute(
        "DELETE FROM wishlist_items WHERE id = ?1",
        params![item_id.to_db()],
    )?;
    Ok(())
}

/// Unlinks items from a group that is being deleted; the items themselves stay.
pub fn detach_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    conn.execute(
        "UPDATE wishlist_items SET group_id = NULL WHERE group_id = ?1",
        params![group_id.to_db()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<WishlistItem>) -> SantaResult<Option<WishlistItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM wishlist_items WHERE id = ?1",
        COLUMNS
    ))?;
    let result = stmt.query_row(params![id.to_db()], |row| Ok(row_to_item(row)));

    match result {
        Ok(item) => Ok(Some(item?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_owner(conn: &Connection, id: Id<WishlistItem>) -> SantaResult<Option<Id<User>>> {
    let mut stmt = conn.prepare("SELECT owner_id FROM wishlist_items WHERE id = ?1")?;
    let result = stmt.query_row(params![id.to_db()], |row| row.get::<_, String>(0));

    match result {
        Ok(s) => Ok(Some(Id::from_db(&s)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All items of an owner, highest priority first.
pub fn find_by_owner(conn: &Connection, owner_id: Id<User>) -> SantaResult<Vec<WishlistItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM wishlist_items WHERE owner_id = ?1
         ORDER BY CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END, title",
        COLUMNS
    ))?;

    let items = stmt
        .query_map(params![owner_id.to_db()], |row| Ok(row_to_item(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<SantaResult<Vec<_>>>()?;

    Ok(items)
}

/// Items an owner wants for a given group: those tied to it plus the general ones.
pub fn find_for_group(
    conn: &Connection,
    owner_id: Id<User>,
    group_id: Id<Group>,
) -> SantaResult<Vec<WishlistItem>> {
    Ok(find_by_owner(conn, owner_id)?
        .into_iter()
        .filter(|item| item.group_id.map_or(true, |g| g == group_id))
        .collect())
}

fn row_to_item(row: &rusqlite::Row) -> SantaResult<WishlistItem> {
    let id_str: String = row.get(0)?;
    let group_str: Option<String> = row.get(1)?;
    let priority_str: String = row.get(6)?;

    Ok(WishlistItem {
        id: Id::from_db(&id_str)?,
        group_id: group_str.as_deref().map(Id::from_db).transpose()?,
        title: row.get(2)?,
        description: row.get(3)?,
        url: row.get(4)?,
        price: row.get(5)?,
        priority: Priority::from_db_str(&priority_str)
            .ok_or_else(|| SantaError::Other(format!("Invalid priority: {}", priority_str)))?,
    })
}
