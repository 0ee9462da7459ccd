use rusqlite::Connection;

use crate::db::user_repo;
use crate::error::SantaResult;
use crate::model::{Id, User};
use crate::validation;

/// The signed-in user. Operations that act on owned data take this
/// explicitly instead of looking the user up themselves.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// Resume the first stored user, if there is one.
    pub fn resume(conn: &Connection) -> SantaResult<Option<Self>> {
        Ok(user_repo::find_first(conn)?.map(Self::new))
    }

    /// Create and store a new user, then sign in as them.
    pub fn register(conn: &Connection, name: &str, email: Option<&str>) -> SantaResult<Self> {
        let name = validation::non_blank(name, "name")?;
        let email = validation::optional_email(email)?.unwrap_or_default();
        let user = User::create(name, email);
        user_repo::insert(conn, &user)?;
        Ok(Self::new(user))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn owner_id(&self) -> Id<User> {
        self.user.id
    }
}
