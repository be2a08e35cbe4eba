//! SMPTE-style timecode codec and arithmetic.
//!
//! This crate converts between signed frame counts and `HH:MM:SS:FF`
//! timecode strings under a frame counting mode:
//!
//! - **Non-drop-frame**: plain modular counting at any integer rate
//! - **Drop-frame**: skips frame codes every minute except every tenth, for
//!   rates that are multiples of 30
//! - **Ranges**: contiguous runs of timecodes with containment and iteration
//!
//! # Quick Start
//!
//! ```rust
//! use timecode_core::{CountingMode, Timecode};
//!
//! // Parse from string (non-drop-frame at 24 fps by default)
//! let tc: Timecode = "01:30:45:12".parse().unwrap();
//! assert_eq!(tc.to_string(), "01:30:45:12");
//!
//! // Timecodes are frame numbers underneath
//! let tc = Timecode::new(86400, CountingMode::NonDropFrame, Some(24)).unwrap();
//! assert_eq!(tc.to_string(), "01:00:00:00");
//!
//! // Arithmetic checks that mode and rate match
//! let later = tc.add(24).unwrap();
//! assert_eq!(later.to_string(), "01:00:01:00");
//! ```
//!
//! # Drop-Frame Timecode
//!
//! Drop-frame timecode skips two codes per minute at 30 fps (four at 60 fps)
//! except on every tenth minute, and is written with a semicolon before the
//! frames. The skipped-code count is appended for diagnostics:
//!
//! ```rust
//! use timecode_core::{CountingMode, Timecode};
//!
//! let tc = Timecode::new(1800, CountingMode::DropFrame, None).unwrap();
//! assert_eq!(tc.to_string(), "00:01:00;02 (2)");
//!
//! let back = Timecode::parse("00:01:00;02", CountingMode::DropFrame, None).unwrap();
//! assert_eq!(back.frame_number(), 1800);
//! ```
//!
//! # Ranges
//!
//! ```rust
//! use timecode_core::TimecodeRange;
//!
//! let range = TimecodeRange::from_start_end("01:00:00:00", "01:30:00:00").unwrap();
//! assert!(range.contains("01:29:59:23").unwrap());
//! assert!(!range.contains("01:30:00:00").unwrap());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod dropframe;
pub mod error;
pub mod mode;
pub mod range;
pub mod timecode;

// Re-export main types
pub use dropframe::DropSchedule;
pub use error::{Result, TimecodeError};
pub use mode::{CountingMode, ModeTraits};
pub use range::{RangeBound, TimecodeIter, TimecodeRange};
pub use timecode::{Operand, Timecode};

/// Maximum minutes value in a timecode (59).
pub const MAX_MINUTES: u64 = 59;

/// Maximum seconds value in a timecode (59).
pub const MAX_SECONDS: u64 = 59;

/// Create a non-drop-frame timecode from hours, minutes, seconds, and frames.
///
/// # Arguments
/// * `hours` - Hours (not wrapped at 24)
/// * `minutes` - Minutes (0-59)
/// * `seconds` - Seconds (0-59)
/// * `frames` - Frames (0 to rate-1)
/// * `rate` - Frames per second
///
/// # Example
/// ```rust
/// use timecode_core::timecode;
///
/// let tc = timecode(1, 30, 45, 12, 24).unwrap();
/// assert_eq!(tc.to_string(), "01:30:45:12");
/// ```
pub fn timecode(
    hours: u64,
    minutes: u64,
    seconds: u64,
    frames: u64,
    rate: u32,
) -> Result<Timecode> {
    Timecode::from_components(
        hours,
        minutes,
        seconds,
        frames,
        CountingMode::NonDropFrame,
        Some(rate),
    )
}

/// Create a drop-frame timecode from its displayed components.
///
/// # Arguments
/// * `hours` - Hours (not wrapped at 24)
/// * `minutes` - Minutes (0-59)
/// * `seconds` - Seconds (0-59)
/// * `frames` - Frames (0 to rate-1, excluding skipped codes)
/// * `rate` - Frames per second (a multiple of 30)
///
/// # Example
/// ```rust
/// use timecode_core::timecode_df;
///
/// let tc = timecode_df(0, 1, 0, 2, 30).unwrap();
/// assert_eq!(tc.frame_number(), 1800);
/// ```
pub fn timecode_df(
    hours: u64,
    minutes: u64,
    seconds: u64,
    frames: u64,
    rate: u32,
) -> Result<Timecode> {
    Timecode::from_components(
        hours,
        minutes,
        seconds,
        frames,
        CountingMode::DropFrame,
        Some(rate),
    )
}

/// Calculate the duration between two timecodes in frames.
///
/// Both timecodes must share mode and rate.
///
/// # Returns
/// Duration in frames (negative if end is before start)
pub fn frames_between(start: &Timecode, end: &Timecode) -> Result<i64> {
    end.subtract(start).map(i64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timecode_convenience() {
        let tc = timecode(1, 30, 45, 12, 24).unwrap();
        assert_eq!(tc.to_string(), "01:30:45:12");
        assert_eq!(tc.mode(), CountingMode::NonDropFrame);
    }

    #[test]
    fn test_timecode_df_convenience() {
        let tc = timecode_df(1, 0, 0, 2, 30).unwrap();
        assert_eq!(tc.to_string(), "01:00:00;02 (108)");
        assert_eq!(tc.mode(), CountingMode::DropFrame);

        assert!(timecode_df(0, 0, 0, 0, 25).is_err());
    }

    #[test]
    fn test_frames_between() {
        let start = timecode(0, 0, 0, 0, 24).unwrap();
        let end = timecode(0, 0, 1, 0, 24).unwrap();
        assert_eq!(frames_between(&start, &end).unwrap(), 24);
        assert_eq!(frames_between(&end, &start).unwrap(), -24);

        let other = timecode(0, 0, 1, 0, 25).unwrap();
        assert!(frames_between(&start, &other).is_err());
    }

    #[test]
    fn test_constants() {
        assert_eq!(MAX_MINUTES, 59);
        assert_eq!(MAX_SECONDS, 59);
    }

    #[test]
    fn test_drop_frame_roundtrip() {
        for frame in [0, 1, 29, 30, 1799, 1800, 1801, 17982] {
            let tc = Timecode::new(frame, CountingMode::DropFrame, None).unwrap();
            let back = Timecode::parse(&tc.to_string(), CountingMode::DropFrame, None).unwrap();
            assert_eq!(
                frame,
                back.frame_number(),
                "Drop-frame {} roundtrip failed via {}",
                frame,
                tc
            );
        }
    }

    #[test]
    fn test_rates_roundtrip() {
        for rate in [24, 25, 30, 48, 50, 60, 120] {
            let tc = timecode(0, 1, 0, 0, rate).unwrap();
            assert!((tc.to_seconds() - 60.0).abs() < 1e-9, "rate {}", rate);
        }
    }
}
