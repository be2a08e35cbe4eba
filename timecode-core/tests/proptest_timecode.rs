//! Property-based tests for timecode encoding and arithmetic.
//!
//! Uses proptest to verify round-trip correctness of encode/decode and
//! the invariants of drop-frame display codes.

use proptest::prelude::*;
use std::collections::HashSet;
use timecode_core::{CountingMode, DropSchedule, Timecode, TimecodeRange};

/// Strip the drop-frame diagnostic suffix.
fn core_string(encoded: &str) -> &str {
    encoded.split(" (").next().unwrap_or(encoded)
}

// =============================================================================
// Encode/Decode Round-Trip Tests
// =============================================================================

proptest! {
    /// Non-drop-frame decode(encode(n)) == n for any rate.
    #[test]
    fn roundtrip_non_drop_frame(n in -1_000_000_000_000i64..1_000_000_000_000, rate in 1u32..=240) {
        let mode = CountingMode::NonDropFrame;
        let encoded = mode.encode(n, rate);
        prop_assert_eq!(mode.decode(&encoded, rate).unwrap(), n);
    }

    /// Drop-frame decode(encode(n)) == n for every multiple of 30.
    #[test]
    fn roundtrip_drop_frame(n in -10_000_000_000i64..10_000_000_000, multiple in 1u32..=8) {
        let mode = CountingMode::DropFrame;
        let rate = 30 * multiple;
        let encoded = mode.encode(n, rate);
        prop_assert_eq!(mode.decode(&encoded, rate).unwrap(), n);
        // The diagnostic suffix plays no part in decoding
        prop_assert_eq!(mode.decode(core_string(&encoded), rate).unwrap(), n);
    }

    /// Timecode values survive a trip through their own string form.
    #[test]
    fn roundtrip_timecode_string(n in 0i64..100_000_000, drop_frame in any::<bool>()) {
        let mode = if drop_frame { CountingMode::DropFrame } else { CountingMode::NonDropFrame };
        let tc = Timecode::new(n, mode, None).unwrap();
        let parsed = Timecode::parse(&tc.to_string(), mode, None).unwrap();
        prop_assert_eq!(parsed.hash_key(), tc.hash_key());
    }
}

// =============================================================================
// Drop-Frame Display Invariants
// =============================================================================

proptest! {
    /// No two frames in a contiguous run share a displayed code.
    #[test]
    fn drop_frame_encode_is_injective(
        start in 0i64..20_000_000,
        len in 1i64..4000,
        multiple in 1u32..=4,
    ) {
        let mode = CountingMode::DropFrame;
        let rate = 30 * multiple;
        let codes: HashSet<String> = (start..start + len)
            .map(|n| core_string(&mode.encode(n, rate)).to_owned())
            .collect();
        prop_assert_eq!(codes.len() as i64, len);
    }

    /// Displayed codes advance by exactly one frame, or jump over the
    /// skipped codes at a minute boundary.
    #[test]
    fn drop_frame_display_is_monotonic(n in 0i64..50_000_000) {
        let schedule = DropSchedule::ntsc();
        let here = schedule.display_frames(n as u64);
        let next = schedule.display_frames(n as u64 + 1);
        prop_assert!(next == here + 1 || next == here + 1 + schedule.drop_offset);
    }

    /// Drop-frame counting never shows a skipped code.
    #[test]
    fn drop_frame_never_shows_skipped_code(n in 0i64..50_000_000, multiple in 1u32..=4) {
        let mode = CountingMode::DropFrame;
        let rate = 30 * multiple;
        let schedule = mode.drop_schedule(rate).unwrap();
        let minutes = mode.minutes(n, rate);
        let seconds = mode.seconds(n, rate);
        let frames = mode.frames(n, rate);
        prop_assert!(!schedule.is_dropped_code(minutes, seconds, frames));
    }

    /// A skipped code decodes to the first code shown in its minute.
    #[test]
    fn drop_frame_skipped_code_reads_forward(minute in 1u64..6000, skipped in 0u64..2) {
        prop_assume!(minute % 10 != 0);
        let mode = CountingMode::DropFrame;
        let text = format!("{:02}:{:02}:00;{:02}", minute / 60, minute % 60, skipped);
        let shown = format!("{:02}:{:02}:00;02", minute / 60, minute % 60);
        let frame_number = mode.decode(&text, 30).unwrap();
        prop_assert_eq!(frame_number, mode.decode(&shown, 30).unwrap());
        let encoded = mode.encode(frame_number, 30);
        prop_assert_eq!(core_string(&encoded), shown.as_str());
    }

    /// Components stay within their display ranges.
    #[test]
    fn components_in_range(n in any::<i64>(), rate in 1u32..=240, drop_frame in any::<bool>()) {
        let (mode, rate) = if drop_frame {
            (CountingMode::DropFrame, (rate + 29) / 30 * 30)
        } else {
            (CountingMode::NonDropFrame, rate)
        };
        prop_assert!(mode.minutes(n, rate) < 60);
        prop_assert!(mode.seconds(n, rate) < 60);
        prop_assert!(mode.frames(n, rate) < u64::from(rate));
    }
}

// =============================================================================
// Arithmetic, Conversion and Range Tests
// =============================================================================

proptest! {
    /// Adding then subtracting the same frame count is the identity.
    #[test]
    fn add_subtract_identity(
        n in -1_000_000_000i64..1_000_000_000,
        delta in -1_000_000i64..1_000_000,
    ) {
        let tc = Timecode::new(n, CountingMode::NonDropFrame, Some(25)).unwrap();
        let back = tc.add(delta).unwrap().subtract(delta).unwrap();
        prop_assert_eq!(back.hash_key(), tc.hash_key());
    }

    /// Converting up by an integer factor and back is lossless.
    #[test]
    fn convert_up_and_back(
        n in -1_000_000_000i64..1_000_000_000,
        rate in 1u32..=120,
        factor in 1u32..=8,
    ) {
        let tc = Timecode::new(n, CountingMode::NonDropFrame, Some(rate)).unwrap();
        let up = tc.convert(Some(rate * factor), None).unwrap();
        prop_assert_eq!(up.frame_number(), n * i64::from(factor));
        let down = up.convert(Some(rate), None).unwrap();
        prop_assert_eq!(down.hash_key(), tc.hash_key());
    }

    /// A range yields exactly len() timecodes, all contained in it.
    #[test]
    fn range_len_matches_iteration(start in -100_000i64..100_000, duration in -2000i64..2000) {
        let range = TimecodeRange::from_start_duration(start, duration).unwrap();
        prop_assert_eq!(range.iter().count() as u64, range.len());
        for tc in range.iter() {
            prop_assert!(range.contains(tc).unwrap());
        }
        let upper = range.start().frame_number().max(range.end().frame_number());
        prop_assert!(!range.contains(upper).unwrap());
    }
}
