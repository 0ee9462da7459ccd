use rand::Rng;
use rusqlite::Connection;
use tracing::warn;

use crate::draw::{engine, DrawStore};
use crate::error::{SantaError, SantaResult};
use crate::model::{Assignment, Group, Id};
use crate::ops::group_ops;
use crate::session::Session;

/// Runs a draw for one of the session user's groups.
///
/// The engine's writes run inside a SQLite transaction. When a step fails and
/// the rollback succeeds nothing was applied, so the underlying error is
/// returned rather than a partial failure.
pub fn draw_group<R>(
    conn: &Connection,
    session: &Session,
    group_id: Id<Group>,
    rng: &mut R,
) -> SantaResult<Vec<Assignment>>
where
    R: Rng + ?Sized,
{
    let group = group_ops::owned_group(conn, session, group_id)?;

    let tx = conn.unchecked_transaction()?;
    let members = tx.list_members(group.id)?;

    match engine::perform_draw(&*tx, &group, &members, rng) {
        Ok(assignments) => {
            tx.commit()?;
            Ok(assignments)
        }
        Err(SantaError::PartialFailure { stage, source }) => match tx.rollback() {
            Ok(()) => Err(*source),
            Err(e) => {
                warn!(%group_id, error = %e, "rollback after failed draw did not complete");
                Err(SantaError::PartialFailure { stage, source })
            }
        },
        Err(e) => Err(e),
    }
}
