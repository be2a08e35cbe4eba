//! Contiguous ranges of timecodes.
//!
//! A [`TimecodeRange`] is a start timecode plus a signed duration in frames.
//! The end is exclusive and derived on demand. Ranges with a negative
//! duration are normalized: containment and iteration always cover
//! `[min(start, end), max(start, end))`.

use crate::error::{Result, TimecodeError};
use crate::mode::CountingMode;
use crate::timecode::Timecode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;

/// A start, duration or end argument for [`TimecodeRange::new`].
#[derive(Debug, Clone)]
pub enum RangeBound {
    /// A timecode; its mode and rate must match the other timecode arguments.
    Timecode(Timecode),
    /// A raw frame count.
    Frames(i64),
    /// A timecode string, decoded with the range's mode and rate.
    Text(String),
}

impl RangeBound {
    fn to_timecode(&self, mode: CountingMode, rate: u32) -> Result<Timecode> {
        match self {
            Self::Timecode(tc) => Timecode::from_timecode(tc, Some(mode), Some(rate)),
            Self::Frames(frames) => Timecode::new(*frames, mode, Some(rate)),
            Self::Text(text) => Timecode::parse(text, mode, Some(rate)),
        }
    }
}

impl From<Timecode> for RangeBound {
    fn from(tc: Timecode) -> Self {
        Self::Timecode(tc)
    }
}

impl From<&Timecode> for RangeBound {
    fn from(tc: &Timecode) -> Self {
        Self::Timecode(*tc)
    }
}

impl From<i64> for RangeBound {
    fn from(frames: i64) -> Self {
        Self::Frames(frames)
    }
}

impl From<i32> for RangeBound {
    fn from(frames: i32) -> Self {
        Self::Frames(i64::from(frames))
    }
}

impl From<&str> for RangeBound {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RangeBound {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An unbroken run of timecodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "RangeFields", into = "RangeFields")]
pub struct TimecodeRange {
    start: Timecode,
    duration: i64,
}

#[derive(Serialize, Deserialize)]
struct RangeFields {
    start: Timecode,
    duration: i64,
}

impl TryFrom<RangeFields> for TimecodeRange {
    type Error = TimecodeError;

    fn try_from(fields: RangeFields) -> Result<Self> {
        Self::from_parts(fields.start, fields.duration)
    }
}

impl From<TimecodeRange> for RangeFields {
    fn from(range: TimecodeRange) -> Self {
        Self {
            start: range.start,
            duration: range.duration,
        }
    }
}

impl TimecodeRange {
    /// Create a range from any two of start, duration and end.
    ///
    /// Timecode arguments must share one mode and rate, which is then used
    /// for the integer and string arguments. Without any timecode argument
    /// the default mode and its default rate apply. If all three are given,
    /// `start + duration` must equal `end`.
    pub fn new(
        start: Option<RangeBound>,
        duration: Option<RangeBound>,
        end: Option<RangeBound>,
    ) -> Result<Self> {
        let given = [start.is_some(), duration.is_some(), end.is_some()]
            .into_iter()
            .filter(|given| *given)
            .count();
        if given < 2 {
            return Err(TimecodeError::RangeUnderdetermined);
        }

        let (mode, rate) = common_mode([start.as_ref(), duration.as_ref(), end.as_ref()])?;
        let resolve = |bound: Option<RangeBound>| {
            bound
                .map(|bound| bound.to_timecode(mode, rate))
                .transpose()
        };
        let start = resolve(start)?;
        let duration = resolve(duration)?;
        let end = resolve(end)?;

        let range = match (start, duration, end) {
            (Some(start), Some(duration), None) => Self::from_parts(start, duration.frame_number()),
            (Some(start), None, Some(end)) => {
                let duration = end.subtract(&start)?;
                Self::from_parts(start, duration.frame_number())
            }
            (None, Some(duration), Some(end)) => {
                let start = end.subtract(&duration)?;
                Self::from_parts(start, duration.frame_number())
            }
            (Some(start), Some(duration), Some(end)) => {
                let computed = start.add(&duration)?;
                if !computed.equals(&end)? {
                    return Err(TimecodeError::range_mismatch(
                        end.to_string(),
                        computed.to_string(),
                    ));
                }
                Self::from_parts(start, duration.frame_number())
            }
            _ => Err(TimecodeError::RangeUnderdetermined),
        }?;

        tracing::trace!(range = %range, "Created timecode range");
        Ok(range)
    }

    /// Create a range from a start and a duration.
    pub fn from_start_duration(
        start: impl Into<RangeBound>,
        duration: impl Into<RangeBound>,
    ) -> Result<Self> {
        Self::new(Some(start.into()), Some(duration.into()), None)
    }

    /// Create a range from a start and an exclusive end.
    pub fn from_start_end(
        start: impl Into<RangeBound>,
        end: impl Into<RangeBound>,
    ) -> Result<Self> {
        Self::new(Some(start.into()), None, Some(end.into()))
    }

    /// Create a range from a duration and an exclusive end.
    pub fn from_duration_end(
        duration: impl Into<RangeBound>,
        end: impl Into<RangeBound>,
    ) -> Result<Self> {
        Self::new(None, Some(duration.into()), Some(end.into()))
    }

    fn from_parts(start: Timecode, duration: i64) -> Result<Self> {
        // The end must be representable for end() to be infallible.
        start.add(duration)?;
        Ok(Self { start, duration })
    }

    /// First timecode of the range.
    #[must_use]
    pub fn start(&self) -> Timecode {
        self.start
    }

    /// Duration as a timecode in the range's mode and rate.
    #[must_use]
    pub fn duration(&self) -> Timecode {
        self.start.with_frame_number(self.duration)
    }

    /// Duration in frames (negative if the end precedes the start).
    #[must_use]
    pub fn duration_frames(&self) -> i64 {
        self.duration
    }

    /// Exclusive end timecode.
    #[must_use]
    pub fn end(&self) -> Timecode {
        self.start
            .with_frame_number(self.start.frame_number() + self.duration)
    }

    /// Frames per second.
    #[must_use]
    pub fn rate(&self) -> u32 {
        self.start.rate()
    }

    /// Counting mode.
    #[must_use]
    pub fn mode(&self) -> CountingMode {
        self.start.mode()
    }

    /// Number of frames in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.duration.unsigned_abs()
    }

    /// Whether the range holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duration == 0
    }

    /// Whether the end precedes the start.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.duration < 0
    }

    /// Lower (inclusive) and upper (exclusive) frame numbers.
    fn span(&self) -> (i64, i64) {
        let start = self.start.frame_number();
        let end = start + self.duration;
        (start.min(end), start.max(end))
    }

    /// Whether a frame lies in the range.
    ///
    /// Strings are decoded with the range's mode and rate, integers are
    /// frame numbers and timecodes must match the range's mode and rate.
    pub fn contains(&self, frame: impl Into<RangeBound>) -> Result<bool> {
        let frame_number = match frame.into() {
            RangeBound::Timecode(tc) => {
                self.start.check_compatible(&tc)?;
                tc.frame_number()
            }
            RangeBound::Frames(frames) => frames,
            RangeBound::Text(text) => self.mode().decode(&text, self.rate())?,
        };

        let (lower, upper) = self.span();
        Ok(lower <= frame_number && frame_number < upper)
    }

    /// Whether every frame of `other` lies in this range.
    ///
    /// An empty `other` is contained when its start lies within
    /// `[lower, upper]`.
    pub fn contains_range(&self, other: &TimecodeRange) -> Result<bool> {
        self.start.check_compatible(&other.start)?;

        let (lower, upper) = self.span();
        let (other_lower, other_upper) = other.span();
        Ok(lower <= other_lower && other_upper <= upper)
    }

    /// Iterate over every timecode in the range, in ascending order.
    #[must_use]
    pub fn iter(&self) -> TimecodeIter {
        let (lower, upper) = self.span();
        TimecodeIter {
            template: self.start,
            next: lower,
            end: upper,
        }
    }
}

/// Find the mode and rate shared by the timecode arguments.
fn common_mode<'a>(
    bounds: impl IntoIterator<Item = Option<&'a RangeBound>>,
) -> Result<(CountingMode, u32)> {
    let mut known: Option<Timecode> = None;

    for bound in bounds.into_iter().flatten() {
        let RangeBound::Timecode(tc) = bound else {
            continue;
        };
        match known {
            Some(first) => first.check_compatible(tc)?,
            None => known = Some(*tc),
        }
    }

    Ok(match known {
        Some(tc) => (tc.mode(), tc.rate()),
        None => (
            Timecode::DEFAULT_MODE,
            Timecode::DEFAULT_MODE.default_rate(),
        ),
    })
}

impl fmt::Display for TimecodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) @ {} {}",
            self.start,
            self.end(),
            self.duration,
            self.rate(),
            self.mode()
        )
    }
}

impl IntoIterator for &TimecodeRange {
    type Item = Timecode;
    type IntoIter = TimecodeIter;

    fn into_iter(self) -> TimecodeIter {
        self.iter()
    }
}

impl IntoIterator for TimecodeRange {
    type Item = Timecode;
    type IntoIter = TimecodeIter;

    fn into_iter(self) -> TimecodeIter {
        self.iter()
    }
}

/// Iterator over the timecodes of a [`TimecodeRange`].
#[derive(Debug, Clone)]
pub struct TimecodeIter {
    template: Timecode,
    next: i64,
    end: i64,
}

impl Iterator for TimecodeIter {
    type Item = Timecode;

    fn next(&mut self) -> Option<Timecode> {
        if self.next >= self.end {
            return None;
        }
        let tc = self.template.with_frame_number(self.next);
        self.next += 1;
        Some(tc)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.abs_diff(self.next);
        match usize::try_from(remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for TimecodeIter {
    fn next_back(&mut self) -> Option<Timecode> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.template.with_frame_number(self.end))
    }
}

impl ExactSizeIterator for TimecodeIter {}

impl FusedIterator for TimecodeIter {}
