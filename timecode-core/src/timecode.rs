//! The timecode value type.
//!
//! A [`Timecode`] is an immutable frame number at a fixed integer rate,
//! displayed through a [`CountingMode`]. It provides:
//! - Parsing and formatting through the counting mode
//! - Compatibility-checked comparison and arithmetic
//! - Explicit rate and mode conversion

use crate::error::{Result, TimecodeError};
use crate::mode::CountingMode;
use crate::{MAX_MINUTES, MAX_SECONDS};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Right-hand side of a comparison or arithmetic operation.
///
/// Timecodes must match the mode and rate of the left-hand side; bare
/// integers are frame numbers and always match.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    /// Another timecode.
    Timecode(Timecode),
    /// A raw frame number.
    Frames(i64),
}

impl Operand {
    /// The frame number carried by this operand.
    #[must_use]
    pub fn frame_number(&self) -> i64 {
        match self {
            Self::Timecode(tc) => tc.frame_number,
            Self::Frames(frames) => *frames,
        }
    }
}

impl From<Timecode> for Operand {
    fn from(tc: Timecode) -> Self {
        Self::Timecode(tc)
    }
}

impl From<&Timecode> for Operand {
    fn from(tc: &Timecode) -> Self {
        Self::Timecode(*tc)
    }
}

impl From<i64> for Operand {
    fn from(frames: i64) -> Self {
        Self::Frames(frames)
    }
}

impl From<i32> for Operand {
    fn from(frames: i32) -> Self {
        Self::Frames(i64::from(frames))
    }
}

/// A single frame at a given rate and counting mode.
///
/// There is no `PartialEq`, `PartialOrd` or `Hash`: a timecode is only
/// comparable with one of the same mode and rate. Use [`Timecode::equals`]
/// and [`Timecode::compare`], which fail on a mismatch, and
/// [`Timecode::hash_key`] as the key in hashed collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "TimecodeFields", into = "TimecodeFields")]
pub struct Timecode {
    mode: CountingMode,
    rate: u32,
    frame_number: i64,
}

/// Serialized form; deserialization goes back through [`Timecode::new`].
#[derive(Serialize, Deserialize)]
struct TimecodeFields {
    frame_number: i64,
    rate: u32,
    #[serde(default)]
    mode: CountingMode,
}

impl TryFrom<TimecodeFields> for Timecode {
    type Error = TimecodeError;

    fn try_from(fields: TimecodeFields) -> Result<Self> {
        Self::new(fields.frame_number, fields.mode, Some(fields.rate))
    }
}

impl From<Timecode> for TimecodeFields {
    fn from(tc: Timecode) -> Self {
        Self {
            frame_number: tc.frame_number,
            rate: tc.rate,
            mode: tc.mode,
        }
    }
}

impl Timecode {
    /// Counting mode used when none is given.
    pub const DEFAULT_MODE: CountingMode = CountingMode::NonDropFrame;

    /// Create a timecode from a raw frame number.
    ///
    /// `rate` defaults to the mode's default rate.
    pub fn new(frame_number: i64, mode: CountingMode, rate: Option<u32>) -> Result<Self> {
        let rate = mode.validate_rate(rate)?;

        if frame_number < 0 && !mode.allows_negative() {
            return Err(TimecodeError::negative_not_allowed(mode.label()));
        }

        Ok(Self {
            mode,
            rate,
            frame_number,
        })
    }

    /// Parse a timecode string under a counting mode.
    pub fn parse(text: &str, mode: CountingMode, rate: Option<u32>) -> Result<Self> {
        let rate = mode.validate_rate(rate)?;
        let frame_number = mode.decode(text, rate)?;
        Ok(Self {
            mode,
            rate,
            frame_number,
        })
    }

    /// Create a timecode from a frame number with the default mode and rate.
    pub fn from_frames(frame_number: i64) -> Result<Self> {
        Self::new(frame_number, Self::DEFAULT_MODE, None)
    }

    /// Copy another timecode.
    ///
    /// A `mode` or `rate` that differs from the source is an error; changing
    /// either is what [`Timecode::convert`] is for.
    pub fn from_timecode(
        source: &Timecode,
        mode: Option<CountingMode>,
        rate: Option<u32>,
    ) -> Result<Self> {
        let mode_differs = mode.is_some_and(|mode| mode != source.mode);
        let rate_differs = rate.is_some_and(|rate| rate != source.rate);

        if mode_differs || rate_differs {
            let requested = format!(
                "{} @ {}",
                mode.unwrap_or(source.mode),
                rate.unwrap_or(source.rate)
            );
            return Err(TimecodeError::conversion_required(
                source.describe(),
                requested,
            ));
        }

        Ok(*source)
    }

    /// Create a timecode from displayed components.
    ///
    /// For drop-frame, the components are the displayed code and the skipped
    /// codes are rejected.
    pub fn from_components(
        hours: u64,
        minutes: u64,
        seconds: u64,
        frames: u64,
        mode: CountingMode,
        rate: Option<u32>,
    ) -> Result<Self> {
        let rate = mode.validate_rate(rate)?;

        if minutes > MAX_MINUTES {
            return Err(TimecodeError::invalid_component("minutes", minutes, MAX_MINUTES));
        }
        if seconds > MAX_SECONDS {
            return Err(TimecodeError::invalid_component("seconds", seconds, MAX_SECONDS));
        }
        if frames >= u64::from(rate) {
            return Err(TimecodeError::invalid_component(
                "frames",
                frames,
                u64::from(rate) - 1,
            ));
        }

        let display = hours
            .checked_mul(3600)
            .and_then(|s| s.checked_add(minutes * 60 + seconds))
            .and_then(|s| s.checked_mul(u64::from(rate)))
            .and_then(|f| f.checked_add(frames))
            .ok_or(TimecodeError::Overflow)?;

        let frame_number = match mode.drop_schedule(rate) {
            Some(schedule) => {
                if schedule.is_dropped_code(minutes, seconds, frames) {
                    return Err(TimecodeError::dropped_code(format!(
                        "{:02}:{:02}:{:02}{}{:02}",
                        hours,
                        minutes,
                        seconds,
                        mode.separator(),
                        frames
                    )));
                }
                schedule.frame_from_display(display)
            }
            None => display,
        };

        let frame_number = i64::try_from(frame_number).map_err(|_| TimecodeError::Overflow)?;
        Self::new(frame_number, mode, Some(rate))
    }

    /// Resample to a new rate and/or counting mode.
    ///
    /// The frame number is scaled by `new_rate / rate` and rounded to the
    /// nearest integer (ties to even). The conversion is lossy when the new
    /// rate is lower.
    pub fn convert(&self, rate: Option<u32>, mode: Option<CountingMode>) -> Result<Self> {
        let mode = mode.unwrap_or(self.mode);
        let rate = mode.validate_rate(Some(rate.unwrap_or(self.rate)))?;
        let frame_number = rescale(self.frame_number, self.rate, rate)?;

        tracing::trace!(
            from = %self.describe(),
            to_mode = %mode,
            to_rate = rate,
            frame_number,
            "Converting timecode"
        );

        Self::new(frame_number, mode, Some(rate))
    }

    /// The timecode as a frame number.
    #[must_use]
    pub fn frame_number(&self) -> i64 {
        self.frame_number
    }

    /// Frames per second.
    #[must_use]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Counting mode.
    #[must_use]
    pub fn mode(&self) -> CountingMode {
        self.mode
    }

    /// Hours elapsed.
    #[must_use]
    pub fn hours(&self) -> u64 {
        self.mode.hours(self.frame_number, self.rate)
    }

    /// Minutes past the hour.
    #[must_use]
    pub fn minutes(&self) -> u64 {
        self.mode.minutes(self.frame_number, self.rate)
    }

    /// Seconds past the minute.
    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.mode.seconds(self.frame_number, self.rate)
    }

    /// Frames past the second.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.mode.frames(self.frame_number, self.rate)
    }

    /// Codes skipped so far (0 for non-drop-frame).
    #[must_use]
    pub fn dropped_frames(&self) -> i64 {
        self.mode.dropped_frames(self.frame_number, self.rate)
    }

    /// Whether the frame number is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.frame_number < 0
    }

    /// Whether the frame number is zero or above.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.is_negative()
    }

    /// Nominal seconds (`frame_number / rate`), not wall-clock time.
    #[must_use]
    pub fn to_seconds(&self) -> f64 {
        self.frame_number as f64 / f64::from(self.rate)
    }

    /// Whether `other` has the same counting mode and rate.
    #[must_use]
    pub fn is_compatible(&self, other: &Timecode) -> bool {
        self.mode == other.mode && self.rate == other.rate
    }

    /// Fail unless `other` can be compared with or added to this timecode.
    pub fn check_compatible(&self, other: impl Into<Operand>) -> Result<()> {
        self.resolve(other.into()).map(|_| ())
    }

    /// Equality of frame numbers, after the compatibility check.
    pub fn equals(&self, other: impl Into<Operand>) -> Result<bool> {
        Ok(self.frame_number == self.resolve(other.into())?)
    }

    /// Ordering of frame numbers, after the compatibility check.
    pub fn compare(&self, other: impl Into<Operand>) -> Result<Ordering> {
        Ok(self.frame_number.cmp(&self.resolve(other.into())?))
    }

    /// Sum with another timecode or a frame count, keeping mode and rate.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: impl Into<Operand>) -> Result<Self> {
        let frames = self.resolve(other.into())?;
        let frame_number = self
            .frame_number
            .checked_add(frames)
            .ok_or(TimecodeError::Overflow)?;
        Self::new(frame_number, self.mode, Some(self.rate))
    }

    /// Difference with another timecode or a frame count, keeping mode and rate.
    pub fn subtract(&self, other: impl Into<Operand>) -> Result<Self> {
        let frames = self.resolve(other.into())?;
        let frame_number = self
            .frame_number
            .checked_sub(frames)
            .ok_or(TimecodeError::Overflow)?;
        Self::new(frame_number, self.mode, Some(self.rate))
    }

    /// Key identifying this value, for use in hashed collections.
    #[must_use]
    pub fn hash_key(&self) -> (CountingMode, u32, i64) {
        (self.mode, self.rate, self.frame_number)
    }

    /// Mode and rate, e.g. `DF @ 30`.
    pub(crate) fn describe(&self) -> String {
        format!("{} @ {}", self.mode, self.rate)
    }

    /// Build a timecode that shares this one's (already validated) mode and rate.
    pub(crate) fn with_frame_number(&self, frame_number: i64) -> Self {
        Self {
            frame_number,
            ..*self
        }
    }

    fn resolve(&self, other: Operand) -> Result<i64> {
        match other {
            Operand::Timecode(tc) if !self.is_compatible(&tc) => {
                Err(TimecodeError::incompatible(self.describe(), tc.describe()))
            }
            other => Ok(other.frame_number()),
        }
    }
}

/// Scale a frame number from one rate to another, rounding ties to even.
fn rescale(frame_number: i64, from_rate: u32, to_rate: u32) -> Result<i64> {
    let numerator = i128::from(frame_number) * i128::from(to_rate);
    let denominator = i128::from(from_rate);

    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);

    let rounded = match (remainder * 2).cmp(&denominator) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };

    i64::try_from(rounded).map_err(|_| TimecodeError::Overflow)
}

impl Default for Timecode {
    fn default() -> Self {
        Self {
            mode: Self::DEFAULT_MODE,
            rate: Self::DEFAULT_MODE.default_rate(),
            frame_number: 0,
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mode.encode(self.frame_number, self.rate))
    }
}

impl FromStr for Timecode {
    type Err = TimecodeError;

    /// Parse with the default mode and rate.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, Self::DEFAULT_MODE, None)
    }
}

impl TryFrom<i64> for Timecode {
    type Error = TimecodeError;

    fn try_from(frame_number: i64) -> Result<Self> {
        Self::from_frames(frame_number)
    }
}

impl From<Timecode> for i64 {
    fn from(tc: Timecode) -> Self {
        tc.frame_number
    }
}
