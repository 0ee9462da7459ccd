//! Gift-assignment draw: building the giver -> receiver cycle, writing it
//! through a [`DrawStore`], and tracking which results are on screen.

pub mod check;
pub mod engine;
pub mod reveal;
pub mod store;

pub use check::{check_assignments, is_single_cycle};
pub use engine::{build_assignments, perform_draw, MIN_PARTICIPANTS};
pub use reveal::RevealState;
pub use store::DrawStore;
