use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BehaviorError {
    #[error("force profile has no points")]
    EmptyProfile,

    #[error("force profile point {index} is not finite")]
    NonFiniteProfile { index: usize },

    #[error("force profile distances must be non-negative and non-decreasing (point {index})")]
    UnsortedProfile { index: usize },

    #[error("target profile needs at least {required} points to define sensing and tracking ranges, got {got}")]
    ProfileTooShort { required: usize, got: usize },

    #[error("robot max speed must be positive and finite, got {0}")]
    InvalidMaxSpeed(f64),

    #[error("target max speed must be non-negative and finite, got {0}")]
    InvalidTargetMaxSpeed(f64),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
