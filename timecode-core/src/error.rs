//! Error types for timecode operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for timecode operations.
pub type Result<T> = std::result::Result<T, TimecodeError>;

/// Errors that can occur during timecode operations.
///
/// Malformed input (`InvalidRate`, `InvalidFormat`, `InvalidComponent`,
/// `DroppedCode`, `NegativeNotAllowed`, `Overflow`) is kept apart from
/// caller misuse, see [`TimecodeError::is_misuse`].
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimecodeError {
    /// Rate is zero, or not usable with the counting mode.
    #[error("Invalid rate {rate} for {mode}: {reason}")]
    InvalidRate {
        /// The rejected rate.
        rate: u32,
        /// Label of the counting mode that rejected it.
        mode: String,
        /// Why the rate was rejected.
        reason: String,
    },

    /// Invalid timecode format in string.
    #[error("Invalid timecode format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// Invalid timecode component value.
    #[error("Invalid timecode component: {component} = {value} (max {max})")]
    InvalidComponent {
        /// Name of the invalid component (minutes, seconds, frames).
        component: String,
        /// The invalid value that was provided.
        value: u64,
        /// The maximum allowed value for this component.
        max: u64,
    },

    /// A drop-frame code that drop-frame counting skips.
    #[error("{timecode} is a dropped frame code")]
    DroppedCode {
        /// The skipped code as written.
        timecode: String,
    },

    /// A negative timecode was given to a mode that forbids it.
    #[error("Negative timecodes are not allowed in {mode} mode")]
    NegativeNotAllowed {
        /// Label of the counting mode.
        mode: String,
    },

    /// Operands use different counting modes or rates.
    #[error("Incompatible timecodes: {left} vs {right}")]
    Incompatible {
        /// Mode and rate of the left operand.
        left: String,
        /// Mode and rate of the right operand.
        right: String,
    },

    /// A copy was asked to change mode or rate, which only `convert` may do.
    #[error("Cannot copy a {source_value} timecode as {requested}; use convert()")]
    ConversionRequired {
        /// Mode and rate of the source timecode.
        source_value: String,
        /// Mode and rate that were requested.
        requested: String,
    },

    /// Start, duration and end were all given but do not agree.
    #[error("Range end {end} does not match start + duration ({computed})")]
    RangeMismatch {
        /// The end that was supplied.
        end: String,
        /// The end computed from start and duration.
        computed: String,
    },

    /// Fewer than two of start, duration and end were given.
    #[error("Two of start, duration and end are required")]
    RangeUnderdetermined,

    /// Overflow during timecode arithmetic.
    #[error("Timecode overflow")]
    Overflow,
}

impl TimecodeError {
    /// Create an invalid rate error.
    pub fn invalid_rate(rate: u32, mode: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            rate,
            mode: mode.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an invalid component error.
    pub fn invalid_component(component: impl Into<String>, value: u64, max: u64) -> Self {
        Self::InvalidComponent {
            component: component.into(),
            value,
            max,
        }
    }

    /// Create a dropped code error.
    pub fn dropped_code(timecode: impl Into<String>) -> Self {
        Self::DroppedCode {
            timecode: timecode.into(),
        }
    }

    /// Create a negative-not-allowed error.
    pub fn negative_not_allowed(mode: impl Into<String>) -> Self {
        Self::NegativeNotAllowed { mode: mode.into() }
    }

    /// Create an incompatibility error.
    pub fn incompatible(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Incompatible {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create a conversion-required error.
    pub fn conversion_required(source: impl Into<String>, requested: impl Into<String>) -> Self {
        Self::ConversionRequired {
            source_value: source.into(),
            requested: requested.into(),
        }
    }

    /// Create a range mismatch error.
    pub fn range_mismatch(end: impl Into<String>, computed: impl Into<String>) -> Self {
        Self::RangeMismatch {
            end: end.into(),
            computed: computed.into(),
        }
    }

    /// Whether the error points at a bug in the calling code rather than
    /// at malformed input.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::Incompatible { .. }
                | Self::ConversionRequired { .. }
                | Self::RangeMismatch { .. }
                | Self::RangeUnderdetermined
        )
    }
}
