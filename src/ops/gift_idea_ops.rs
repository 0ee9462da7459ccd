use rusqlite::Connection;
use tracing::debug;

use crate::db::gift_idea_repo;
use crate::error::{SantaError, SantaResult};
use crate::model::{Friend, GiftIdea, Id, PriceRange, Priority, PurchaseFilter};
use crate::ops::friend_ops;
use crate::session::Session;
use crate::validation::{self, trim_optional};

pub fn add_idea(
    conn: &Connection,
    session: &Session,
    friend_id: Id<Friend>,
    title: &str,
    description: Option<&str>,
    price_range: Option<PriceRange>,
    url: Option<&str>,
    priority: Priority,
) -> SantaResult<GiftIdea> {
    let friend = friend_ops::owned_friend(conn, session, friend_id)?;
    let valid_title = validation::non_blank(title, "title")?;

    let mut idea = GiftIdea::create(session.owner_id(), friend.id, valid_title);
    idea.description = trim_optional(description);
    idea.price_range = price_range;
    idea.url = trim_optional(url);
    idea.priority = priority;

    gift_idea_repo::insert(conn, &idea)?;
    debug!(idea_id = %idea.id, friend_id = %friend.id, "gift idea added");
    Ok(idea)
}

/// `None` leaves a field unchanged; `Some(None)` clears an optional one.
pub fn update_idea(
    conn: &Connection,
    session: &Session,
    idea_id: Id<GiftIdea>,
    friend_id: Option<Id<Friend>>,
    title: Option<&str>,
    description: Option<Option<&str>>,
    price_range: Option<Option<PriceRange>>,
    url: Option<Option<&str>>,
    priority: Option<Priority>,
) -> SantaResult<GiftIdea> {
    let mut idea = owned_idea(conn, session, idea_id)?;

    if let Some(fid) = friend_id {
        idea.friend_id = friend_ops::owned_friend(conn, session, fid)?.id;
    }
    if let Some(t) = title {
        idea.title = validation::non_blank(t, "title")?;
    }
    if let Some(d) = description {
        idea.description = trim_optional(d);
    }
    if let Some(r) = price_range {
        idea.price_range = r;
    }
    if let Some(u) = url {
        idea.url = trim_optional(u);
    }
    if let Some(p) = priority {
        idea.priority = p;
    }

    gift_idea_repo::update(conn, &idea)?;
    Ok(idea)
}

/// Flips the purchased flag and returns the updated idea.
pub fn toggle_purchased(conn: &Connection, session: &Session, idea_id: Id<GiftIdea>) -> SantaResult<GiftIdea> {
    let mut idea = owned_idea(conn, session, idea_id)?;
    idea.is_purchased = !idea.is_purchased;
    gift_idea_repo::update(conn, &idea)?;
    Ok(idea)
}

pub fn delete_idea(conn: &Connection, session: &Session, idea_id: Id<GiftIdea>) -> SantaResult<()> {
    owned_idea(conn, session, idea_id)?;
    gift_idea_repo::delete(conn, idea_id)
}

/// The session user's ideas, newest first, optionally narrowed to one friend.
pub fn list_ideas(
    conn: &Connection,
    session: &Session,
    friend_id: Option<Id<Friend>>,
    filter: PurchaseFilter,
) -> SantaResult<Vec<GiftIdea>> {
    let ideas = match friend_id {
        Some(fid) => {
            friend_ops::owned_friend(conn, session, fid)?;
            gift_idea_repo::find_by_friend(conn, fid)?
        }
        None => gift_idea_repo::find_by_owner(conn, session.owner_id())?,
    };
    Ok(ideas.into_iter().filter(|i| filter.matches(i)).collect())
}

/// Loads a gift idea, checking it belongs to the session user.
pub fn owned_idea(conn: &Connection, session: &Session, idea_id: Id<GiftIdea>) -> SantaResult<GiftIdea> {
    let idea = gift_idea_repo::find_by_id(conn, idea_id)?
        .ok_or_else(|| SantaError::not_found("Gift idea", idea_id))?;
    if idea.owner_id != session.owner_id() {
        return Err(SantaError::NotOwner {
            entity_type: "Gift idea".into(),
            id: idea_id.to_string(),
        });
    }
    Ok(idea)
}
