//! Drop-frame counting for rates that are multiples of 30.
//!
//! Drop-frame timecode keeps the displayed clock close to wall time at
//! 29.97 fps (and its multiples) by skipping frame *codes*, never frames
//! of footage. The rules are:
//! - Skip codes 0 and 1 (scaled by `rate / 30`) at the start of each minute
//! - Except for minutes 0, 10, 20, 30, 40, 50
//!
//! One full minute followed by nine shortened minutes forms a repeating
//! ten-minute *drop segment*. The displayed components of a frame number
//! are the plain modular components of `frame_number + dropped_frames`.

use serde::{Deserialize, Serialize};

/// Number of codes skipped per shortened minute at 30 fps.
const CODES_DROPPED_AT_30: u64 = 2;

/// Drop schedule for a single rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropSchedule {
    /// Codes skipped at the start of each shortened minute.
    pub drop_offset: u64,
    /// Length of a full (non-dropping) minute in frames.
    pub full_minute: u64,
    /// Length of a shortened minute in frames.
    pub drop_minute: u64,
    /// Length of one full minute plus nine shortened minutes in frames.
    pub drop_segment: u64,
}

impl DropSchedule {
    /// Build the schedule for a rate.
    ///
    /// Returns `None` for a zero rate. Rates that are not a multiple of 30
    /// produce a schedule with a truncated `drop_offset`; counting modes
    /// reject such rates before they get here.
    #[must_use]
    pub const fn for_rate(rate: u32) -> Option<Self> {
        if rate == 0 {
            return None;
        }
        let rate = rate as u64;
        let drop_offset = CODES_DROPPED_AT_30 * rate / 30;
        let full_minute = rate * 60;
        let drop_minute = full_minute - drop_offset;
        Some(Self {
            drop_offset,
            full_minute,
            drop_minute,
            drop_segment: full_minute + drop_minute * 9,
        })
    }

    /// Schedule for 30 fps (29.97 fps NTSC).
    #[must_use]
    pub const fn ntsc() -> Self {
        Self {
            drop_offset: 2,
            full_minute: 1800,
            // 30 * 60 - 2
            drop_minute: 1798,
            // 1800 + 1798 * 9
            drop_segment: 17982,
        }
    }

    /// Number of codes skipped up to `frame_number`, carrying its sign.
    #[must_use]
    pub fn dropped_frames(&self, frame_number: i64) -> i64 {
        let dropped = self.dropped_frames_unsigned(frame_number.unsigned_abs());
        // dropped < |frame_number| / 800, always fits
        let dropped = dropped as i64;
        if frame_number < 0 {
            -dropped
        } else {
            dropped
        }
    }

    /// Number of codes skipped up to a non-negative frame number.
    #[must_use]
    pub fn dropped_frames_unsigned(&self, frame_number: u64) -> u64 {
        let segments = frame_number / self.drop_segment;
        let from_segments = segments * 9 * self.drop_offset;

        // Frames past the first, full minute of the current segment.
        let remaining = frame_number % self.drop_segment;
        let remaining_drop_frames = (remaining + 1).saturating_sub(self.full_minute);

        let minutes_elapsed = remaining_drop_frames / self.drop_minute;
        let from_minutes = minutes_elapsed * self.drop_offset;

        // The skip is applied at the minute boundary, not spread over the minute.
        let partial = if remaining_drop_frames % self.drop_minute != 0 {
            self.drop_offset
        } else {
            0
        };

        from_segments + from_minutes + partial
    }

    /// Number of codes skipped before the given elapsed display minute.
    #[must_use]
    pub fn dropped_before_minute(&self, total_minutes: u64) -> u64 {
        self.drop_offset * (total_minutes - total_minutes / 10)
    }

    /// Displayed frame count (plain modular count) for a frame number.
    #[must_use]
    pub fn display_frames(&self, frame_number: u64) -> u64 {
        frame_number + self.dropped_frames_unsigned(frame_number)
    }

    /// Frame number for a displayed frame count.
    ///
    /// Inverse of [`DropSchedule::display_frames`] for every count it
    /// produces. Counts that land on a skipped code are moved forward to
    /// the first code shown in that minute, so `00:01:00;00` and
    /// `00:01:00;01` both read as `00:01:00;02` at 30 fps.
    #[must_use]
    pub fn frame_from_display(&self, display_frames: u64) -> u64 {
        let total_minutes = display_frames / self.full_minute;
        let minute_start = total_minutes * self.full_minute;
        let display_frames = if total_minutes % 10 != 0 {
            display_frames.max(minute_start.saturating_add(self.drop_offset))
        } else {
            display_frames
        };
        display_frames - self.dropped_before_minute(total_minutes)
    }

    /// Whether a displayed code is one that drop-frame counting skips.
    #[must_use]
    pub fn is_dropped_code(&self, minutes: u64, seconds: u64, frames: u64) -> bool {
        seconds == 0 && minutes % 10 != 0 && frames < self.drop_offset
    }
}
