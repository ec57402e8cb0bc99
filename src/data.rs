//! Outcome of evaluating a property against one input.

use std::fmt;

/// Result of a single predicate evaluation, or of a whole run.
///
/// The discriminants mirror the order the engine reasons about them in:
/// a failure is "false", a success is "true", and the remaining two are
/// neither. `Undetermined` is never produced by a predicate; it is the
/// accumulator value before the first attempt has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The predicate was falsified by the input.
    Failure = 0,
    /// The predicate held for the input.
    Success = 1,
    /// The predicate declined to judge the input.
    Discard = 2,
    /// Nothing has been evaluated yet.
    Undetermined = 3,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        self == Outcome::Failure
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn is_discard(self) -> bool {
        self == Outcome::Discard
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Undetermined
    }
}

impl From<bool> for Outcome {
    fn from(holds: bool) -> Self {
        if holds {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "failure"),
            Outcome::Success => write!(f, "success"),
            Outcome::Discard => write!(f, "discard"),
            Outcome::Undetermined => write!(f, "undetermined"),
        }
    }
}
