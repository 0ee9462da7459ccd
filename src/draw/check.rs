use std::collections::{HashMap, HashSet};

use crate::error::{SantaError, SantaResult};
use crate::model::{Assignment, Id, Member};

/// Checks that `assignments` is a complete draw over `members`: every member
/// gives exactly once, receives exactly once, and nobody draws themselves.
pub fn check_assignments(members: &[Member], assignments: &[Assignment]) -> SantaResult<()> {
    let member_ids: HashSet<Id<Member>> = members.iter().map(|m| m.id).collect();

    if assignments.len() != member_ids.len() {
        return Err(SantaError::InvalidDraw(format!(
            "{} assignments for {} members",
            assignments.len(),
            member_ids.len()
        )));
    }

    let mut givers = HashSet::with_capacity(assignments.len());
    let mut receivers = HashSet::with_capacity(assignments.len());

    for a in assignments {
        if a.giver_id == a.receiver_id {
            return Err(SantaError::InvalidDraw(format!(
                "member {} draws themselves",
                a.giver_id
            )));
        }
        if !member_ids.contains(&a.giver_id) || !member_ids.contains(&a.receiver_id) {
            return Err(SantaError::InvalidDraw(format!(
                "assignment {} references a non-member",
                a.id
            )));
        }
        if !givers.insert(a.giver_id) {
            return Err(SantaError::InvalidDraw(format!(
                "member {} gives more than once",
                a.giver_id
            )));
        }
        if !receivers.insert(a.receiver_id) {
            return Err(SantaError::InvalidDraw(format!(
                "member {} receives more than once",
                a.receiver_id
            )));
        }
    }

    Ok(())
}

/// True when following giver -> receiver from any member visits every member
/// once before returning to the start.
pub fn is_single_cycle(assignments: &[Assignment]) -> bool {
    let next: HashMap<Id<Member>, Id<Member>> = assignments
        .iter()
        .map(|a| (a.giver_id, a.receiver_id))
        .collect();

    let Some(start) = assignments.first().map(|a| a.giver_id) else {
        return false;
    };
    if next.len() != assignments.len() {
        return false;
    }

    let mut seen = HashSet::with_capacity(next.len());
    let mut current = start;
    loop {
        if !seen.insert(current) {
            return current == start && seen.len() == next.len();
        }
        match next.get(&current) {
            Some(receiver) => current = *receiver,
            None => return false,
        }
    }
}
