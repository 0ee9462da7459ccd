use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, info_span, warn};

use super::store::DrawStore;
use crate::error::{DrawStage, SantaError, SantaResult};
use crate::model::{Assignment, Group, Id, Member};

/// Smallest group that can be drawn.
pub const MIN_PARTICIPANTS: usize = 3;

/// Builds a new assignment set for `members` without touching storage.
///
/// Members are shuffled with Fisher-Yates and each one gives to the next in
/// the shuffled order, wrapping around. The result is a single cycle over
/// every member, so nobody draws themselves.
pub fn build_assignments<R>(
    group_id: Id<Group>,
    members: &[Member],
    rng: &mut R,
) -> SantaResult<Vec<Assignment>>
where
    R: Rng + ?Sized,
{
    if members.len() < MIN_PARTICIPANTS {
        return Err(SantaError::InsufficientParticipants {
            required: MIN_PARTICIPANTS,
            found: members.len(),
        });
    }

    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if member.group_id != group_id {
            return Err(SantaError::InvalidDraw(format!(
                "member {} belongs to another group",
                member.name
            )));
        }
        if !seen.insert(member.id) {
            return Err(SantaError::InvalidDraw(format!(
                "member {} is listed twice",
                member.name
            )));
        }
    }

    let mut order: Vec<Id<Member>> = members.iter().map(|m| m.id).collect();
    order.shuffle(rng);

    let n = order.len();
    Ok((0..n)
        .map(|i| Assignment::create(group_id, order[i], order[(i + 1) % n]))
        .collect())
}

/// Draws `group` and replaces its stored results.
///
/// Storage is written in order: delete old results, insert the new set, set
/// `is_drawn`. All validation happens before the first write. A failure while
/// deleting is returned unchanged; a failure after that is wrapped in
/// [`SantaError::PartialFailure`] naming the step that failed.
///
/// Drawing an already-drawn group is allowed and produces a fresh result.
pub fn perform_draw<S, R>(
    store: &S,
    group: &Group,
    members: &[Member],
    rng: &mut R,
) -> SantaResult<Vec<Assignment>>
where
    S: DrawStore + ?Sized,
    R: Rng + ?Sized,
{
    let span = info_span!("draw", group_id = %group.id, members = members.len());
    let _enter = span.enter();

    let assignments = build_assignments(group.id, members, rng)?;
    debug_assert!(super::check::check_assignments(members, &assignments).is_ok());

    if group.is_drawn {
        info!("replacing previous draw");
    }

    store.delete_assignments(group.id)?;
    store
        .insert_assignments(&assignments)
        .map_err(|e| partial_failure(DrawStage::InsertAssignments, e))?;
    store
        .mark_drawn(group.id)
        .map_err(|e| partial_failure(DrawStage::MarkDrawn, e))?;

    info!(assignments = assignments.len(), "draw committed");
    Ok(assignments)
}

fn partial_failure(stage: DrawStage, source: SantaError) -> SantaError {
    warn!(%stage, error = %source, "draw left partially applied");
    SantaError::PartialFailure {
        stage,
        source: Box::new(source),
    }
}
