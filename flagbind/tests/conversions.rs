use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, Weekday};
use flagbind::{FlagEnum, MatchMode, ParseError, Registry};
use rust_decimal::Decimal;
use semver::Version;

#[test]
fn test_numeric_flags_bind_typed_values() {
    let mut flags = Registry::new("app");
    let level = flags.u8("--level", 0, "Compression level");
    let offset = flags.i64("--offset", 0, "Byte offset");
    let ratio = flags.f64("--ratio", 1.0, "Scaling ratio");

    flags
        .parse_from(["app", "--level", "9", "--offset=-1024", "--ratio:2.5"])
        .unwrap();

    assert_eq!(level.get(), 9);
    assert_eq!(offset.get(), -1024);
    assert_eq!(ratio.get(), 2.5);
}

#[test]
fn test_integer_overflow_is_a_conversion_error() {
    let mut flags = Registry::new("app");
    flags.u8("--level", 0, "Compression level");

    let err = flags.parse_from(["app", "--level", "256"]).unwrap_err();
    assert_eq!(err.to_string(), "flag '--level': cannot convert '256' to u8");
}

#[test]
fn test_decimal_flag_keeps_exact_scale() {
    let mut flags = Registry::new("app");
    let price = flags.decimal("--price", Decimal::ZERO, "Unit price");

    flags.parse_from(["app", "--price=19.99"]).unwrap();
    assert_eq!(price.get(), Decimal::new(1999, 2));
}

#[test]
fn test_datetime_flag_accepts_iso_forms() {
    let mut flags = Registry::new("app");
    let default = NaiveDate::from_ymd_opt(2000, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let cutoff = flags.datetime("--max-date", default, "Cutoff date");

    flags
        .parse_from(["app", "--max-date=2024-06-01T08:30:00"])
        .unwrap();
    assert_eq!(
        cutoff.get(),
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    );

    flags.parse_from(["app", "--max-date", "2024-06-02"]).unwrap();
    assert_eq!(
        cutoff.get(),
        NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    );
}

#[test]
fn test_duration_flag_uses_human_units() {
    let mut flags = Registry::new("app");
    let timeout = flags.duration("--timeout", Duration::from_secs(30), "Give up after");

    flags.parse_from(["app", "--timeout", "90s"]).unwrap();
    assert_eq!(timeout.get(), Duration::from_secs(90));

    flags.parse_from(["app", "--timeout=1h 30m"]).unwrap();
    assert_eq!(timeout.get(), Duration::from_secs(5400));
}

#[test]
fn test_version_flag_parses_semver() {
    let mut flags = Registry::new("app");
    let min = flags.version(
        "--min-version",
        Version::new(0, 1, 0),
        "Oldest supported version",
    );

    flags.parse_from(["app", "--min-version", "1.2.3"]).unwrap();
    assert_eq!(min.get(), Version::new(1, 2, 3));

    let err = flags.parse_from(["app", "--min-version=1.2"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "flag '--min-version': cannot convert '1.2' to version"
    );
}

#[test]
fn test_ip_addr_flag_handles_both_families() {
    let mut flags = Registry::new("app");
    let v4 = flags.ip_addr(
        "--host",
        "0.0.0.0".parse::<IpAddr>().unwrap(),
        "Target address",
    );
    let v6 = flags.ip_addr(
        "--bind",
        "::".parse::<IpAddr>().unwrap(),
        "Listen address",
    );

    flags
        .parse_from(["app", "--host", "10.0.0.7", "--bind=::1"])
        .unwrap();
    assert_eq!(v4.get(), "10.0.0.7".parse::<IpAddr>().unwrap());
    assert_eq!(v6.get(), "::1".parse::<IpAddr>().unwrap());
}

#[test]
fn test_file_and_dir_flags_bind_paths_verbatim() {
    let mut flags = Registry::new("app");
    let out = flags.file("--out", "out.bin", "Output file");
    let work = flags.dir("--workdir", ".", "Working directory");

    flags
        .parse_from(["app", "--out", "/tmp/result.bin", "--workdir=/var/empty"])
        .unwrap();
    assert_eq!(out.get(), PathBuf::from("/tmp/result.bin"));
    assert_eq!(work.get(), PathBuf::from("/var/empty"));
}

#[test]
fn test_weekday_flag_matches_any_case_by_default() {
    let mut flags = Registry::new("app");
    let day = flags.weekday("--day", Weekday::Mon, "Day to run on");

    flags.parse_from(["app", "--day", "FRIDAY"]).unwrap();
    assert_eq!(day.get(), Weekday::Fri);
}

#[test]
fn test_weekday_flag_rejects_unknown_names() {
    let mut flags = Registry::new("app");
    flags.weekday("--day", Weekday::Mon, "Day to run on");

    let err = flags.parse_from(["app", "--day", "someday"]).unwrap_err();
    assert!(matches!(err, ParseError::Conversion { .. }));
    assert_eq!(
        err.to_string(),
        "flag '--day': cannot convert 'someday' to Weekday"
    );
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Fast,
    Thorough,
}

impl FlagEnum for Mode {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("fast", Mode::Fast),
        ("thorough", Mode::Thorough),
    ];
}

#[test]
fn test_custom_enumeration_selects_variant_by_name() {
    let mut flags = Registry::new("app");
    let mode = flags.enumeration("--mode", Mode::Fast, "Scan mode");

    flags.parse_from(["app", "--mode", "Thorough"]).unwrap();
    assert_eq!(mode.get(), Mode::Thorough);
}

#[test]
fn test_custom_enumeration_honors_match_mode() {
    let mut flags = Registry::new("app");
    let mode = flags.enumeration("--mode", Mode::Fast, "Scan mode");
    flags.set_match_mode(MatchMode::Sensitive);

    let err = flags.parse_from(["app", "--mode", "Thorough"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "flag '--mode': cannot convert 'Thorough' to Mode"
    );

    flags.parse_from(["app", "--mode", "thorough"]).unwrap();
    assert_eq!(mode.get(), Mode::Thorough);
}

#[test]
fn test_string_flag_preserves_value_verbatim() {
    let mut flags = Registry::new("app");
    let label = flags.string("--label", "", "Display label");

    flags.parse_from(["app", "--label=Hello World"]).unwrap();
    assert_eq!(label.get(), "Hello World");
}

#[test]
fn test_bool_flag_accepts_explicit_values() {
    let mut flags = Registry::new("app");
    let verbose = flags.bool("--verbose", true, "Enable verbose output");

    flags.parse_from(["app", "--verbose=false"]).unwrap();
    assert!(!verbose.get());

    flags.parse_from(["app", "--verbose:true"]).unwrap();
    assert!(verbose.get());
}
