//! Value kinds and text-to-typed conversion for flag values.
//!
//! Every registered flag declares a value type drawn from a closed set,
//! expressed as the [`FlagValue`] implementors in this module. Conversion
//! takes exactly one raw token and either produces the typed value or a
//! [`ConvertError`] carrying the token and the expected [`ValueKind`].
//! Enumerations are the one open extension point, via [`FlagEnum`].

use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rust_decimal::Decimal;
use semver::Version;
use thiserror::Error;

use crate::matcher::MatchMode;

/// Kind tag for a flag's declared value type.
///
/// Carried by every registered flag and surfaced in help output and
/// conversion diagnostics. The set is closed; see [`FlagValue`].
///
/// # Examples
///
/// ```
/// use flagbind::ValueKind;
///
/// assert_eq!(ValueKind::I32.to_string(), "i32");
/// assert_eq!(ValueKind::DateTime.to_string(), "date-time");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Boolean switch (value optional; bare occurrence means `true`).
    Bool,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit signed integer.
    I16,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit signed integer.
    I32,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit signed integer.
    I64,
    /// 64-bit unsigned integer.
    U64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Fixed-point decimal.
    Decimal,
    /// Verbatim string.
    String,
    /// Calendar date/time without a time zone.
    DateTime,
    /// Length of time (e.g., `5s`, `1h 30m`).
    Duration,
    /// Semantic version.
    Version,
    /// IPv4 or IPv6 address.
    IpAddr,
    /// Filesystem path (not checked for existence).
    Path,
    /// Enumeration selected by variant name, tagged with the type's name.
    Enum(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::DateTime => "date-time",
            Self::Duration => "duration",
            Self::Version => "version",
            Self::IpAddr => "IP address",
            Self::Path => "path",
            // Type names arrive fully qualified; keep the last segment.
            Self::Enum(full) => return f.write_str(full.rsplit("::").next().unwrap_or(full)),
        };
        f.write_str(name)
    }
}

/// Failure to convert a raw token into a typed flag value.
///
/// Keeps the offending token and the kind the flag was declared with, so
/// the message names both (`cannot convert 'abc' to i32`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert '{raw}' to {kind}")]
pub struct ConvertError {
    /// The raw token that failed to parse.
    pub raw: String,
    /// The kind the flag was declared with.
    pub kind: ValueKind,
}

impl ConvertError {
    pub(crate) fn new(raw: &str, kind: ValueKind) -> Self {
        Self {
            raw: raw.to_string(),
            kind,
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A type that can back a registered flag.
///
/// The implementing set is closed (the trait is sealed): booleans, the
/// integer widths, floats, [`Decimal`], [`String`], [`NaiveDateTime`],
/// [`Duration`], [`Version`], [`IpAddr`], and [`PathBuf`]. Asking for any
/// other type is a compile error rather than a parse-time surprise.
/// Enumerations go through [`FlagEnum`] instead.
pub trait FlagValue: sealed::Sealed + Sized + 'static {
    /// Kind tag reported in help output and conversion errors.
    const KIND: ValueKind;

    /// Converts one raw command-line token into the typed value.
    fn convert(raw: &str) -> Result<Self, ConvertError>;

    /// Value produced when the flag occurs with no value token.
    ///
    /// `None` means the flag requires a value. Booleans return
    /// `Some(true)` so a bare `--verbose` acts as a switch.
    fn absent() -> Option<Self> {
        None
    }
}

macro_rules! from_str_values {
    ($($ty:ty => $kind:expr),+ $(,)?) => {$(
        impl sealed::Sealed for $ty {}

        impl FlagValue for $ty {
            const KIND: ValueKind = $kind;

            fn convert(raw: &str) -> Result<Self, ConvertError> {
                raw.parse().map_err(|_| ConvertError::new(raw, Self::KIND))
            }
        }
    )+};
}

from_str_values! {
    u8 => ValueKind::U8,
    i16 => ValueKind::I16,
    u16 => ValueKind::U16,
    i32 => ValueKind::I32,
    u32 => ValueKind::U32,
    i64 => ValueKind::I64,
    u64 => ValueKind::U64,
    f32 => ValueKind::F32,
    f64 => ValueKind::F64,
    Decimal => ValueKind::Decimal,
    Version => ValueKind::Version,
    IpAddr => ValueKind::IpAddr,
}

impl sealed::Sealed for bool {}

impl FlagValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn convert(raw: &str) -> Result<Self, ConvertError> {
        raw.parse().map_err(|_| ConvertError::new(raw, Self::KIND))
    }

    fn absent() -> Option<Self> {
        Some(true)
    }
}

impl sealed::Sealed for String {}

impl FlagValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn convert(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_string())
    }
}

impl sealed::Sealed for PathBuf {}

impl FlagValue for PathBuf {
    const KIND: ValueKind = ValueKind::Path;

    fn convert(raw: &str) -> Result<Self, ConvertError> {
        Ok(PathBuf::from(raw))
    }
}

impl sealed::Sealed for NaiveDateTime {}

impl FlagValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::DateTime;

    /// Accepts ISO-8601 date-times (`2024-01-15T10:30:00`), the
    /// space-separated equivalent, and bare dates (taken as midnight).
    fn convert(raw: &str) -> Result<Self, ConvertError> {
        if let Ok(dt) = raw.parse::<NaiveDateTime>() {
            return Ok(dt);
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Ok(dt);
        }
        raw.parse::<NaiveDate>()
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| ConvertError::new(raw, Self::KIND))
    }
}

impl sealed::Sealed for Duration {}

impl FlagValue for Duration {
    const KIND: ValueKind = ValueKind::Duration;

    fn convert(raw: &str) -> Result<Self, ConvertError> {
        humantime::parse_duration(raw).map_err(|_| ConvertError::new(raw, Self::KIND))
    }
}

/// An enumeration whose variants are selected by name on the command line.
///
/// Implementors list accepted `(name, value)` pairs. Name lookup honors the
/// registry's [`MatchMode`], so the default configuration accepts any ASCII
/// casing.
///
/// # Examples
///
/// ```
/// use flagbind::{FlagEnum, MatchMode};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color {
///     Red,
///     Green,
///     Blue,
/// }
///
/// impl FlagEnum for Color {
///     const VARIANTS: &'static [(&'static str, Self)] = &[
///         ("red", Color::Red),
///         ("green", Color::Green),
///         ("blue", Color::Blue),
///     ];
/// }
///
/// assert_eq!(Color::from_name("GREEN", MatchMode::Insensitive), Some(Color::Green));
/// assert_eq!(Color::from_name("GREEN", MatchMode::Sensitive), None);
/// ```
pub trait FlagEnum: Sized + Clone + 'static {
    /// Accepted names and the values they select, in declaration order.
    const VARIANTS: &'static [(&'static str, Self)];

    /// Looks up a variant by symbolic name under the given comparison mode.
    fn from_name(raw: &str, mode: MatchMode) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(name, _)| mode.eq(name, raw))
            .map(|(_, value)| value.clone())
    }
}

impl FlagEnum for Weekday {
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("monday", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sunday", Weekday::Sun),
    ];
}
