use rusqlite::Connection;

use crate::db::wishlist_repo;
use crate::error::{SantaError, SantaResult};
use crate::model::{Group, Id, Priority, WishlistItem};
use crate::ops::group_ops;
use crate::session::Session;
use crate::validation::{self, trim_optional};

pub fn add_item(
    conn: &Connection,
    session: &Session,
    title: &str,
    description: Option<&str>,
    url: Option<&str>,
    price: Option<f64>,
    priority: Priority,
    group_id: Option<Id<Group>>,
) -> SantaResult<WishlistItem> {
    let valid_title = validation::non_blank(title, "title")?;
    if let Some(gid) = group_id {
        group_ops::owned_group(conn, session, gid)?;
    }

    let mut item = WishlistItem::create(valid_title);
    item.description = trim_optional(description);
    item.url = trim_optional(url);
    item.price = validation::optional_non_negative(price, "price")?;
    item.priority = priority;
    item.group_id = group_id;

    wishlist_repo::insert(conn, session.owner_id(), &item)?;
    Ok(item)
}

pub fn update_item(
    conn: &Connection,
    session: &Session,
    item_id: Id<WishlistItem>,
    title: Option<&str>,
    price: Option<Option<f64>>,
    priority: Option<Priority>,
) -> SantaResult<WishlistItem> {
    let mut item = owned_item(conn, session, item_id)?;

    if let Some(t) = title {
        item.title = validation::non_blank(t, "title")?;
    }
    if let Some(p) = price {
        item.price = validation::optional_non_negative(p, "price")?;
    }
    if let Some(p) = priority {
        item.priority = p;
    }

    wishlist_repo::update(conn, &item)?;
    Ok(item)
}

pub fn delete_item(conn: &Connection, session: &Session, item_id: Id<WishlistItem>) -> SantaResult<()> {
    owned_item(conn, session, item_id)?;
    wishlist_repo::delete(conn, item_id)
}

pub fn list_items(conn: &Connection, session: &Session) -> SantaResult<Vec<WishlistItem>> {
    wishlist_repo::find_by_owner(conn, session.owner_id())
}

fn owned_item(conn: &Connection, session: &Session, item_id: Id<WishlistItem>) -> SantaResult<WishlistItem> {
    let owner = wishlist_repo::find_owner(conn, item_id)?
        .ok_or_else(|| SantaError::not_found("Wishlist item", item_id))?;
    if owner != session.owner_id() {
        return Err(SantaError::NotOwner {
            entity_type: "Wishlist item".into(),
            id: item_id.to_string(),
        });
    }
    wishlist_repo::find_by_id(conn, item_id)?
        .ok_or_else(|| SantaError::not_found("Wishlist item", item_id))
}
