//! Frame counting modes.
//!
//! A counting mode decides how a signed frame number maps to the displayed
//! `HH:MM:SS:FF` components and back:
//! - Non-drop-frame: plain modular arithmetic
//! - Drop-frame: modular arithmetic over a frame number shifted by the
//!   codes skipped so far (see [`crate::dropframe`])

use crate::dropframe::DropSchedule;
use crate::error::{Result, TimecodeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Names of the timecode fields, right to left.
const FIELD_NAMES: [&str; 4] = ["frames", "seconds", "minutes", "hours"];

/// Per-mode constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTraits {
    /// Short label used in diagnostics ("NDF", "DF").
    pub label: &'static str,
    /// Separator written before the frames field.
    pub separator: char,
    /// Whether negative timecodes are accepted.
    pub allow_negative: bool,
    /// Rate used when none is given.
    pub default_rate: u32,
}

const NON_DROP_FRAME: ModeTraits = ModeTraits {
    label: "NDF",
    separator: ':',
    allow_negative: true,
    default_rate: 24,
};

const DROP_FRAME: ModeTraits = ModeTraits {
    label: "DF",
    separator: ';',
    allow_negative: true,
    default_rate: 30,
};

/// Frame counting mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Plain modular counting.
    #[default]
    NonDropFrame,
    /// Drop-frame counting for rates that are multiples of 30.
    DropFrame,
}

impl CountingMode {
    /// Constants for this mode.
    #[must_use]
    pub const fn traits(self) -> &'static ModeTraits {
        match self {
            Self::NonDropFrame => &NON_DROP_FRAME,
            Self::DropFrame => &DROP_FRAME,
        }
    }

    /// Short label ("NDF" or "DF").
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.traits().label
    }

    /// Separator written before the frames field.
    #[must_use]
    pub const fn separator(self) -> char {
        self.traits().separator
    }

    /// Whether this mode accepts negative timecodes.
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        self.traits().allow_negative
    }

    /// Rate used when none is given.
    #[must_use]
    pub const fn default_rate(self) -> u32 {
        self.traits().default_rate
    }

    /// Check a rate for this mode, falling back to the default rate.
    pub fn validate_rate(self, rate: Option<u32>) -> Result<u32> {
        let Some(rate) = rate else {
            return Ok(self.default_rate());
        };

        if rate == 0 {
            return Err(TimecodeError::invalid_rate(
                rate,
                self.label(),
                "must be a positive integer",
            ));
        }

        if self == Self::DropFrame && rate % 30 != 0 {
            return Err(TimecodeError::invalid_rate(
                rate,
                self.label(),
                "drop-frame requires a multiple of 30",
            ));
        }

        Ok(rate)
    }

    /// Drop schedule for `rate`, if this mode drops codes.
    #[must_use]
    pub fn drop_schedule(self, rate: u32) -> Option<DropSchedule> {
        match self {
            Self::NonDropFrame => None,
            Self::DropFrame => DropSchedule::for_rate(rate),
        }
    }

    /// Codes skipped up to `frame_number`, carrying its sign. Always 0 for
    /// non-drop-frame.
    #[must_use]
    pub fn dropped_frames(self, frame_number: i64, rate: u32) -> i64 {
        self.drop_schedule(rate)
            .map_or(0, |schedule| schedule.dropped_frames(frame_number))
    }

    /// Hours element.
    ///
    /// # Panics
    /// Panics if `rate` is zero. Rates from [`CountingMode::validate_rate`]
    /// never are.
    #[must_use]
    pub fn hours(self, frame_number: i64, rate: u32) -> u64 {
        split_display(self.display_frames(frame_number, rate), rate)[3]
    }

    /// Minutes element (0-59).
    ///
    /// # Panics
    /// Panics if `rate` is zero.
    #[must_use]
    pub fn minutes(self, frame_number: i64, rate: u32) -> u64 {
        split_display(self.display_frames(frame_number, rate), rate)[2]
    }

    /// Seconds element (0-59).
    ///
    /// # Panics
    /// Panics if `rate` is zero.
    #[must_use]
    pub fn seconds(self, frame_number: i64, rate: u32) -> u64 {
        split_display(self.display_frames(frame_number, rate), rate)[1]
    }

    /// Frames element (0 to rate-1).
    ///
    /// # Panics
    /// Panics if `rate` is zero.
    #[must_use]
    pub fn frames(self, frame_number: i64, rate: u32) -> u64 {
        split_display(self.display_frames(frame_number, rate), rate)[0]
    }

    /// Parse a timecode string into a frame number.
    ///
    /// Accepts `:` and `;` as separators in any mode. Up to four fields are
    /// read right to left as frames, seconds, minutes and hours. A trailing
    /// parenthesized annotation (as written by drop-frame [`encode`]) is
    /// ignored.
    ///
    /// Drop-frame decoding is not a literal sum of the fields: the codes
    /// skipped before the displayed minute are subtracted, so that
    /// `decode(encode(n)) == n`. A skipped code such as `00:01:00;00` is
    /// read as the first code shown in its minute (`00:01:00;02`).
    ///
    /// [`encode`]: CountingMode::encode
    pub fn decode(self, text: &str, rate: u32) -> Result<i64> {
        let (negative, display) = parse_display_frames(text, rate, self.traits())?;

        let magnitude = match self.drop_schedule(rate) {
            Some(schedule) => {
                let [frames, seconds, minutes, _] = split_display(display, rate);
                if schedule.is_dropped_code(minutes, seconds, frames) {
                    tracing::debug!(timecode = text, rate, "Decoding a skipped drop-frame code");
                }
                schedule.frame_from_display(display)
            }
            None => display,
        };

        let magnitude = i64::try_from(magnitude).map_err(|_| TimecodeError::Overflow)?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    /// Format a frame number as `[-]HH:MM:SS<sep>FF`.
    ///
    /// Frames are padded to the number of digits in `rate`. Drop-frame
    /// appends the number of skipped codes, e.g. `00:01:00;02 (2)`.
    ///
    /// # Panics
    /// Panics if `rate` is zero.
    #[must_use]
    pub fn encode(self, frame_number: i64, rate: u32) -> String {
        let [frames, seconds, minutes, hours] =
            split_display(self.display_frames(frame_number, rate), rate);
        let sign = if frame_number < 0 { "-" } else { "" };
        let frame_width = rate.to_string().len();

        let mut out = format!(
            "{}{:02}:{:02}:{:02}{}{:0width$}",
            sign,
            hours,
            minutes,
            seconds,
            self.separator(),
            frames,
            width = frame_width
        );

        if let Some(schedule) = self.drop_schedule(rate) {
            let _ = write!(out, " ({})", schedule.dropped_frames(frame_number));
        }

        out
    }

    /// Unsigned frame count whose plain components are displayed.
    fn display_frames(self, frame_number: i64, rate: u32) -> u64 {
        let frame_number = frame_number.unsigned_abs();
        match self.drop_schedule(rate) {
            Some(schedule) => schedule.display_frames(frame_number),
            None => frame_number,
        }
    }
}

impl fmt::Display for CountingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CountingMode {
    type Err = TimecodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ndf" | "non-drop-frame" | "non_drop_frame" => Ok(Self::NonDropFrame),
            "df" | "drop-frame" | "drop_frame" => Ok(Self::DropFrame),
            other => Err(TimecodeError::invalid_format(format!(
                "Unknown counting mode: {}",
                other
            ))),
        }
    }
}

/// Split a plain frame count into `[frames, seconds, minutes, hours]`.
fn split_display(display: u64, rate: u32) -> [u64; 4] {
    let rate = u64::from(rate);
    [
        display % rate,
        display / rate % 60,
        display / (rate * 60) % 60,
        display / (rate * 3600),
    ]
}

/// Parse the literal digits of a timecode string.
///
/// Returns the sign and the plain (non-drop) frame count the fields add up to.
pub(crate) fn parse_display_frames(
    text: &str,
    rate: u32,
    traits: &ModeTraits,
) -> Result<(bool, u64)> {
    let mut body = text.trim();
    if let Some(stripped) = body.strip_suffix(')') {
        if let Some(open) = stripped.rfind('(') {
            body = stripped[..open].trim_end();
        }
    }

    let negative = body.starts_with('-');
    if negative && !traits.allow_negative {
        return Err(TimecodeError::negative_not_allowed(traits.label));
    }

    let body = body.trim_start_matches(['-', '+', ':', ';']);
    let fields: Vec<&str> = body.split([':', ';']).collect();

    if fields.len() > FIELD_NAMES.len() {
        return Err(TimecodeError::invalid_format(format!(
            "Expected at most HH:MM:SS:FF, got {}",
            text
        )));
    }

    let rate = u64::from(rate);
    let multipliers = [1, rate, rate * 60, rate * 3600];

    let mut total: u64 = 0;
    for ((field, multiplier), name) in fields.iter().rev().zip(multipliers).zip(FIELD_NAMES) {
        let value: u64 = field.trim().parse().map_err(|_| {
            TimecodeError::invalid_format(format!("Invalid {}: {:?}", name, field))
        })?;
        total = value
            .checked_mul(multiplier)
            .and_then(|v| total.checked_add(v))
            .ok_or(TimecodeError::Overflow)?;
    }

    Ok((negative, total))
}
