//! End-to-end checks of the documented timecode behavior.

use pretty_assertions::assert_eq;
use timecode_core::{CountingMode, Timecode, TimecodeError, TimecodeRange};

const NDF: CountingMode = CountingMode::NonDropFrame;
const DF: CountingMode = CountingMode::DropFrame;

#[test]
fn drop_frame_boundaries_at_30fps() {
    let encode = |n| Timecode::new(n, DF, Some(30)).unwrap().to_string();

    assert!(encode(1799).starts_with("00:00:59;29"));
    // Two codes skipped after the first minute
    assert!(encode(1800).starts_with("00:01:00;02"));
    // No skip on the tenth minute
    assert!(encode(17982).starts_with("00:10:00;00"));
    assert!(encode(17981).starts_with("00:09:59;29"));
}

#[test]
fn rate_conversion_scales_frames() {
    let tc = Timecode::parse("01:00:00:00", NDF, Some(24)).unwrap();
    assert_eq!(tc.frame_number(), 86400);
    assert_eq!(tc.convert(Some(48), None).unwrap().frame_number(), 172_800);
}

#[test]
fn drop_frame_range_basics() {
    let range = TimecodeRange::from_start_duration(
        Timecode::new(0, DF, None).unwrap(),
        Timecode::new(1800, DF, None).unwrap(),
    )
    .unwrap();

    assert_eq!(range.end().frame_number(), 1800);
    assert_eq!(range.iter().count(), 1800);
    assert!(range.iter().all(|tc| tc.mode() == DF && tc.rate() == 30));
}

#[test]
fn containment_has_exclusive_end() {
    let range = TimecodeRange::from_start_end("01:00:00:00", "01:30:00:00").unwrap();
    assert!(range.contains("01:29:59:23").unwrap());
    assert!(!range.contains("01:30:00:00").unwrap());
}

#[test]
fn drop_frame_rejects_rate_25() {
    let err = Timecode::new(0, DF, Some(25)).unwrap_err();
    assert!(matches!(err, TimecodeError::InvalidRate { rate: 25, .. }));
    assert!(!err.is_misuse());
}

#[test]
fn error_kinds_are_distinguishable() {
    let a = Timecode::new(0, NDF, Some(24)).unwrap();
    let b = Timecode::new(0, NDF, Some(25)).unwrap();

    let misuse = a.compare(&b).unwrap_err();
    assert!(matches!(misuse, TimecodeError::Incompatible { .. }));
    assert!(misuse.is_misuse());

    let malformed = Timecode::parse("1:2:3:4:5", NDF, None).unwrap_err();
    assert!(matches!(malformed, TimecodeError::InvalidFormat { .. }));
    assert!(!malformed.is_misuse());
}

#[test]
fn one_hour_of_ntsc_is_one_hour_of_drop_frame() {
    // 30000/1001 fps * 3600 s
    let tc = Timecode::new(107_892, DF, None).unwrap();
    assert_eq!(tc.hours(), 1);
    assert_eq!(tc.minutes(), 0);
    assert_eq!(tc.seconds(), 0);
    assert_eq!(tc.frames(), 0);
    assert_eq!(tc.dropped_frames(), 108);
}

#[test]
fn ndf_and_df_convert_between_modes() {
    let ndf = Timecode::parse("00:00:59:30", NDF, Some(30)).unwrap();
    let df = ndf.convert(None, Some(DF)).unwrap();
    assert_eq!(df.frame_number(), ndf.frame_number());
    assert_eq!(df.to_string(), "00:01:00;02 (2)");
    assert_eq!(ndf.to_string(), "00:01:00:00");

    // Same frame number, different modes: never silently equal
    assert!(ndf.equals(&df).is_err());
    assert!(ndf.compare(&df).is_err());
}

#[test]
fn mismatched_rate_comparison_is_an_error() {
    let a = Timecode::new(10, NDF, Some(24)).unwrap();
    let b = Timecode::new(10, NDF, Some(25)).unwrap();

    assert_eq!(
        a.equals(&b).unwrap_err(),
        TimecodeError::incompatible("NDF @ 24", "NDF @ 25")
    );
    assert!(matches!(a.compare(&b), Err(TimecodeError::Incompatible { .. })));
    // Hashed collections key on mode, rate and frame number
    assert_ne!(a.hash_key(), b.hash_key());
}
