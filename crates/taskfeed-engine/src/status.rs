//! Task status lifecycle: `Pending` may move to either terminal state;
//! terminal states admit no transition except an idempotent re-assert.

use taskfeed_types::models::TaskStatus;

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The status actually changes.
    Apply,
    /// Re-asserting the current state; nothing to write.
    NoOp,
}

pub fn check_transition(current: TaskStatus, requested: TaskStatus) -> EngineResult<Transition> {
    if current == requested {
        return Ok(Transition::NoOp);
    }
    if current.is_terminal() {
        return Err(EngineError::InvalidTransition {
            from: current,
            to: requested,
        });
    }
    Ok(Transition::Apply)
}
