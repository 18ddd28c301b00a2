use log::warn;

use crate::store::AttendanceStore;
use crate::types::Goal;

/// The active goal for (user, institute), or the stock 75/70 defaults when
/// no row exists or the lookup fails. Never an error state.
pub fn resolve_goal(store: &dyn AttendanceStore, user_id: i32, institute_id: i32) -> Goal {
    match store.active_goal(user_id, institute_id) {
        Ok(Some(goal)) => goal,
        Ok(None) => Goal::default(),
        Err(e) => {
            warn!(
                "goal lookup failed for user {} institute {}, using defaults: {}",
                user_id, institute_id, e
            );
            Goal::default()
        }
    }
}
