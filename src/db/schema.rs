use rusqlite::Connection;

use crate::error::SantaResult;

/// Initialize the database schema. Creates all tables if they don't exist.
///
/// No `ON DELETE CASCADE` is declared: deleting a group removes its draw
/// results and members explicitly (see `group_ops::delete_group`), and
/// deleting a friend removes their gift ideas (see `friend_ops::delete_friend`).
pub fn initialize(conn: &Connection) -> SantaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS friends (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL REFERENCES users(id),
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS groups (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL REFERENCES users(id),
            name TEXT NOT NULL,
            description TEXT,
            budget_min REAL,
            budget_max REAL,
            draw_date TEXT,
            exchange_date TEXT,
            is_drawn INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS group_members (
            id TEXT PRIMARY KEY NOT NULL,
            group_id TEXT NOT NULL REFERENCES groups(id),
            name TEXT NOT NULL,
            email TEXT,
            friend_id TEXT,
            user_id TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        );

        CREATE TABLE IF NOT EXISTS draw_results (
            id TEXT PRIMARY KEY NOT NULL,
            group_id TEXT NOT NULL REFERENCES groups(id),
            giver_id TEXT NOT NULL REFERENCES group_members(id),
            receiver_id TEXT NOT NULL REFERENCES group_members(id),
            is_revealed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS wishlist_items (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL REFERENCES users(id),
            group_id TEXT REFERENCES groups(id),
            title TEXT NOT NULL,
            description TEXT,
            url TEXT,
            price REAL,
            priority TEXT NOT NULL DEFAULT 'medium',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS gift_ideas (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL REFERENCES users(id),
            friend_id TEXT NOT NULL REFERENCES friends(id),
            title TEXT NOT NULL,
            description TEXT,
            price_range TEXT,
            url TEXT,
            priority TEXT NOT NULL DEFAULT 'medium',
            is_purchased INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_group_members_group ON group_members(group_id);
        CREATE INDEX IF NOT EXISTS idx_draw_results_group ON draw_results(group_id);
        CREATE INDEX IF NOT EXISTS idx_gift_ideas_friend ON gift_ideas(friend_id);

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
