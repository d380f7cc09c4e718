use crate::profile::Day;
use crate::profile::Minutes;

/// Errors raised by the usage calculations.
///
/// Every variant is raised at the point of detection; no partial result is
/// ever returned alongside one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UsageError {
    /// A state outside the domain of the model in use, either unparseable
    /// text or `auto-off` reaching the binary on/off model.
    #[error("state must be \"on\" or \"off\", got \"{0}\"")]
    InvalidState(String),

    #[error("day must be an integer, got {0}")]
    NotAnInteger(f64),

    /// Holds the day as the caller wrote it, so huge floats are not
    /// reported saturated.
    #[error("day out of range: {0} is not within {first}..={last}", first = Day::FIRST, last = Day::LAST)]
    DayOutOfRange(String),

    /// An interval between two timestamps does not fit in [`Minutes`].
    #[error("timestamp {0} is too far from the previous transition to measure")]
    TimestampOverflow(Minutes),
}

pub type Result<T, E = UsageError> = std::result::Result<T, E>;
