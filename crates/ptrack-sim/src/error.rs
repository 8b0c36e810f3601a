use ptrack_behavior::BehaviorError;
use ptrack_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("invalid robot parameters: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("{what} length {got} does not match configured count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{what} at index {index} carries id {id}")]
    AgentIdMismatch {
        index: usize,
        id:    u32,
        what:  &'static str,
    },
}

pub type SimResult<T> = Result<T, SimError>;
