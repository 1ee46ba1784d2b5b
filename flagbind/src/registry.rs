//! Flag registration and the argument-parsing pass.
//!
//! A [`Registry`] owns the declared flags for one parser. Hosts register
//! flags up front (each registration hands back a [`Binding`] to the flag's
//! value cell), then run a single left-to-right pass over the process
//! argument list with [`Registry::parse_from`]. Parsing itself never prints
//! and never exits; [`Registry::parse_or_exit`] layers the conventional
//! help-and-exit behavior on top for binary entry points.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::net::IpAddr;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use std::time::Duration;

use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use semver::Version;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::help::{self, AppInfo, HELP_TEMPLATE};
use crate::matcher::{MatchMode, template_matches};
use crate::value::{ConvertError, FlagEnum, FlagValue, ValueKind};

/// Live handle to a registered flag's value cell.
///
/// Every registration returns one. The parser writes converted values into
/// the shared cell, so any read made after parsing observes the flag's
/// final value without a registry lookup. Clones alias the same cell.
#[derive(Debug)]
pub struct Binding<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: Clone> Binding<T> {
    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }
}

impl<T> Binding<T> {
    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow())
    }
}

/// Conversion outcome local to one flag application; the parser adds the
/// alias context when turning this into a [`ParseError`].
enum ApplyError {
    MissingValue,
    Invalid(ConvertError),
}

type ApplyFn = Box<dyn Fn(Option<&str>, MatchMode) -> std::result::Result<(), ApplyError>>;

/// One registered flag: alias template, help text, declared kind, and the
/// conversion routine that stores into the binding cell.
struct FlagDef {
    template: String,
    usage: String,
    kind: ValueKind,
    apply: ApplyFn,
}

impl FlagDef {
    fn matches(&self, name: &str, mode: MatchMode) -> bool {
        template_matches(&self.template, name, mode)
    }
}

/// Outcome of a completed parse pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was consumed and all matched flags were applied.
    Complete,
    /// Help was requested, either explicitly via `-?`/`--help` or by an
    /// invocation with no arguments; scanning stopped there.
    HelpRequested,
}

/// Ordered collection of registered flags plus everything one parse pass
/// produces: bound values, positional arguments, and passthrough arguments.
///
/// A registry is an ordinary host-owned value; tests routinely hold several
/// side by side. Flags match in registration order, so when two
/// registrations share an alias the earlier one wins.
///
/// # Examples
///
/// ```
/// use flagbind::{ParseOutcome, Registry};
///
/// let mut flags = Registry::new("transfer");
/// let retries = flags.u32("-r|--retries", 3, "Retry count before giving up");
///
/// let outcome = flags.parse_from(["transfer", "--retries=5", "payload.bin"]).unwrap();
/// assert_eq!(outcome, ParseOutcome::Complete);
/// assert_eq!(retries.get(), 5);
/// assert_eq!(flags.arg(0), Some("payload.bin"));
/// ```
pub struct Registry {
    info: AppInfo,
    flags: Vec<FlagDef>,
    positional: Vec<String>,
    remaining: Option<Vec<String>>,
    mode: MatchMode,
    sink: Option<Box<dyn Write>>,
}

impl Registry {
    /// Creates an empty registry. `name` appears in the help banner and
    /// usage synopsis.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: AppInfo {
                name: name.into(),
                ..AppInfo::default()
            },
            flags: Vec::new(),
            positional: Vec::new(),
            remaining: None,
            mode: MatchMode::default(),
            sink: None,
        }
    }

    /// Sets the version shown on the first line of help output.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.info.version = version.into();
        self
    }

    /// Sets the one-line description shown in the help banner.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.info.about = about.into();
        self
    }

    /// Sets the comparison mode used for alias and enumeration-name
    /// matching. Takes effect from the next parse pass.
    pub fn set_match_mode(&mut self, mode: MatchMode) {
        self.mode = mode;
    }

    /// Returns the active comparison mode.
    pub fn match_mode(&self) -> MatchMode {
        self.mode
    }

    /// Redirects help output away from standard error, e.g. into a buffer.
    pub fn set_output<W: Write + 'static>(&mut self, sink: W) {
        self.sink = Some(Box::new(sink));
    }

    fn add<T, P>(
        &mut self,
        template: &str,
        default: T,
        usage: &str,
        kind: ValueKind,
        parse: P,
    ) -> Binding<T>
    where
        T: 'static,
        P: Fn(Option<&str>, MatchMode) -> std::result::Result<T, ApplyError> + 'static,
    {
        let cell = Rc::new(RefCell::new(default));
        let store = Rc::clone(&cell);
        self.flags.push(FlagDef {
            template: template.to_string(),
            usage: usage.to_string(),
            kind,
            apply: Box::new(move |raw, mode| {
                *store.borrow_mut() = parse(raw, mode)?;
                Ok(())
            }),
        });
        debug!(template = %template, kind = %kind, "Registered flag");
        Binding { cell }
    }

    /// Registers a flag of any supported value type.
    ///
    /// `template` is a `|`-delimited alias list (`"-n|--count"`). It is not
    /// validated; a malformed alias simply never matches. The returned
    /// [`Binding`] starts at `default` and tracks every value the parser
    /// converts for this flag.
    pub fn flag<T: FlagValue>(&mut self, template: &str, default: T, usage: &str) -> Binding<T> {
        self.add(template, default, usage, T::KIND, |raw, _mode| match raw {
            Some(raw) => T::convert(raw).map_err(ApplyError::Invalid),
            None => T::absent().ok_or(ApplyError::MissingValue),
        })
    }

    /// Registers a flag that selects an enumeration variant by name.
    ///
    /// Name matching respects the registry's comparison mode at parse time.
    pub fn enumeration<E: FlagEnum>(
        &mut self,
        template: &str,
        default: E,
        usage: &str,
    ) -> Binding<E> {
        let kind = ValueKind::Enum(std::any::type_name::<E>());
        self.add(template, default, usage, kind, move |raw, mode| {
            let raw = raw.ok_or(ApplyError::MissingValue)?;
            E::from_name(raw, mode).ok_or_else(|| ApplyError::Invalid(ConvertError::new(raw, kind)))
        })
    }

    /// Registers a boolean switch; a bare occurrence sets `true`.
    pub fn bool(&mut self, template: &str, default: bool, usage: &str) -> Binding<bool> {
        self.flag(template, default, usage)
    }

    /// Registers an 8-bit unsigned integer flag.
    pub fn u8(&mut self, template: &str, default: u8, usage: &str) -> Binding<u8> {
        self.flag(template, default, usage)
    }

    /// Registers a 16-bit signed integer flag.
    pub fn i16(&mut self, template: &str, default: i16, usage: &str) -> Binding<i16> {
        self.flag(template, default, usage)
    }

    /// Registers a 16-bit unsigned integer flag.
    pub fn u16(&mut self, template: &str, default: u16, usage: &str) -> Binding<u16> {
        self.flag(template, default, usage)
    }

    /// Registers a 32-bit signed integer flag.
    pub fn i32(&mut self, template: &str, default: i32, usage: &str) -> Binding<i32> {
        self.flag(template, default, usage)
    }

    /// Registers a 32-bit unsigned integer flag.
    pub fn u32(&mut self, template: &str, default: u32, usage: &str) -> Binding<u32> {
        self.flag(template, default, usage)
    }

    /// Registers a 64-bit signed integer flag.
    pub fn i64(&mut self, template: &str, default: i64, usage: &str) -> Binding<i64> {
        self.flag(template, default, usage)
    }

    /// Registers a 64-bit unsigned integer flag.
    pub fn u64(&mut self, template: &str, default: u64, usage: &str) -> Binding<u64> {
        self.flag(template, default, usage)
    }

    /// Registers a 32-bit float flag.
    pub fn f32(&mut self, template: &str, default: f32, usage: &str) -> Binding<f32> {
        self.flag(template, default, usage)
    }

    /// Registers a 64-bit float flag.
    pub fn f64(&mut self, template: &str, default: f64, usage: &str) -> Binding<f64> {
        self.flag(template, default, usage)
    }

    /// Registers a fixed-point decimal flag.
    pub fn decimal(&mut self, template: &str, default: Decimal, usage: &str) -> Binding<Decimal> {
        self.flag(template, default, usage)
    }

    /// Registers a verbatim string flag.
    pub fn string(
        &mut self,
        template: &str,
        default: impl Into<String>,
        usage: &str,
    ) -> Binding<String> {
        self.flag(template, default.into(), usage)
    }

    /// Registers a calendar date/time flag (ISO-8601; bare dates mean
    /// midnight).
    pub fn datetime(
        &mut self,
        template: &str,
        default: NaiveDateTime,
        usage: &str,
    ) -> Binding<NaiveDateTime> {
        self.flag(template, default, usage)
    }

    /// Registers a duration flag (`5s`, `1h 30m`, `250ms`).
    pub fn duration(
        &mut self,
        template: &str,
        default: Duration,
        usage: &str,
    ) -> Binding<Duration> {
        self.flag(template, default, usage)
    }

    /// Registers a semantic-version flag.
    pub fn version(&mut self, template: &str, default: Version, usage: &str) -> Binding<Version> {
        self.flag(template, default, usage)
    }

    /// Registers an IP address flag (v4 or v6).
    pub fn ip_addr(&mut self, template: &str, default: IpAddr, usage: &str) -> Binding<IpAddr> {
        self.flag(template, default, usage)
    }

    /// Registers a file reference flag; the path is not checked against the
    /// filesystem.
    pub fn file(
        &mut self,
        template: &str,
        default: impl Into<PathBuf>,
        usage: &str,
    ) -> Binding<PathBuf> {
        self.flag(template, default.into(), usage)
    }

    /// Registers a directory reference flag; the path is not checked
    /// against the filesystem.
    pub fn dir(
        &mut self,
        template: &str,
        default: impl Into<PathBuf>,
        usage: &str,
    ) -> Binding<PathBuf> {
        self.flag(template, default.into(), usage)
    }

    /// Registers a day-of-week flag matched by full English day name.
    pub fn weekday(&mut self, template: &str, default: Weekday, usage: &str) -> Binding<Weekday> {
        self.enumeration(template, default, usage)
    }

    /// Parses an argument list, updating bindings in place.
    ///
    /// `argv` is the full process argument vector; index 0 is taken to be
    /// the program path and is skipped. The scan is one left-to-right pass:
    ///
    /// - tokens without a leading `-` are collected as positional arguments
    ///   (see [`arg`](Self::arg) and [`args`](Self::args));
    /// - a literal `--` stops the scan and preserves it plus everything
    ///   after it verbatim (see [`remaining`](Self::remaining));
    /// - any other token is split on its first `=` or `:` into an alias and
    ///   an optional inline value; with no inline value the next token is
    ///   consumed as the value unless it starts with `-`;
    /// - `-?`/`--help`, matched before any registered flag, and an argument
    ///   list with no tokens at all both short-circuit the scan with
    ///   [`ParseOutcome::HelpRequested`].
    ///
    /// Later occurrences of a flag overwrite earlier ones. Each call
    /// starts a fresh pass: positional and passthrough arguments from an
    /// earlier call are discarded, while bindings keep whatever value was
    /// written last.
    ///
    /// # Errors
    ///
    /// [`ParseError::Unrecognized`] when a `-`-prefixed token matches no
    /// alias, [`ParseError::Conversion`] when a value string fails to
    /// convert, and [`ParseError::MissingValue`] when a value-requiring
    /// flag has no value token. The pass aborts on the first error;
    /// conversions already applied stay visible through their bindings.
    pub fn parse_from<I, S>(&mut self, argv: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = argv.into_iter().map(Into::into).collect();

        self.positional.clear();
        self.remaining = None;

        if args.len() <= 1 {
            debug!("No arguments beyond the program path, requesting help");
            return Ok(ParseOutcome::HelpRequested);
        }

        let mut i = 1;
        while i < args.len() {
            let token = args[i].as_str();

            if !token.starts_with('-') {
                self.positional.push(token.to_string());
                i += 1;
                continue;
            }

            if token == "--" {
                debug!(at = i, "Terminator reached, capturing remaining arguments");
                self.remaining = Some(args[i..].to_vec());
                break;
            }

            let (name, inline) = split_inline(token);
            let mut value = inline;

            // Bind the next token as the value unless it looks like a flag.
            if value.is_none() && i + 1 < args.len() && !args[i + 1].starts_with('-') {
                value = Some(args[i + 1].as_str());
                i += 1;
            }

            if template_matches(HELP_TEMPLATE, name, self.mode) {
                debug!(token = %name, "Help requested, stopping scan");
                return Ok(ParseOutcome::HelpRequested);
            }

            self.apply(name, value)?;
            i += 1;
        }

        debug!(
            positional = self.positional.len(),
            remaining = self.remaining.as_ref().map_or(0, Vec::len),
            "Parse pass complete"
        );
        Ok(ParseOutcome::Complete)
    }

    /// Parses like [`parse_from`](Self::parse_from), then applies the
    /// classic terminal policy: when help is requested the help text is
    /// written to the sink and the process exits with status 2. Parse
    /// errors are returned untouched and nothing is printed for them.
    pub fn parse_or_exit<I, S>(&mut self, argv: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.parse_from(argv)? {
            ParseOutcome::Complete => Ok(()),
            ParseOutcome::HelpRequested => {
                let _ = self.write_help();
                process::exit(2);
            }
        }
    }

    fn apply(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let mode = self.mode;
        let def = self
            .flags
            .iter()
            .find(|def| def.matches(name, mode))
            .ok_or_else(|| ParseError::Unrecognized(name.to_string()))?;

        debug!(flag = %name, kind = %def.kind, value = ?value, "Matched flag");

        (def.apply)(value, mode).map_err(|err| match err {
            ApplyError::MissingValue => ParseError::MissingValue {
                flag: name.to_string(),
                expected: def.kind,
            },
            ApplyError::Invalid(source) => ParseError::Conversion {
                flag: name.to_string(),
                source,
            },
        })
    }

    /// Returns the positional argument at `index`, if one was collected.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// All positional arguments in encounter order.
    pub fn args(&self) -> &[String] {
        &self.positional
    }

    /// Arguments from the literal `--` onward, the terminator included, or
    /// `None` when no terminator was seen.
    pub fn remaining(&self) -> Option<&[String]> {
        self.remaining.as_deref()
    }

    /// Renders the help text: version, banner, usage synopsis, and one line
    /// per registered flag in registration order, the built-in `-?|--help`
    /// entry last.
    pub fn render_help(&self) -> String {
        help::render(
            &self.info,
            self.flags
                .iter()
                .map(|def| (def.template.as_str(), def.usage.as_str())),
        )
    }

    /// Writes the rendered help text to the configured sink (standard
    /// error by default) and flushes it.
    pub fn write_help(&mut self) -> io::Result<()> {
        let text = self.render_help();
        match self.sink.as_mut() {
            Some(sink) => {
                sink.write_all(text.as_bytes())?;
                sink.flush()
            }
            None => {
                let mut stderr = io::stderr().lock();
                stderr.write_all(text.as_bytes())?;
                stderr.flush()
            }
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.info.name)
            .field("mode", &self.mode)
            .field(
                "flags",
                &self
                    .flags
                    .iter()
                    .map(|def| def.template.as_str())
                    .collect::<Vec<_>>(),
            )
            .field("positional", &self.positional)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Splits a flag token on its first `=` or `:` into alias and inline value.
fn split_inline(token: &str) -> (&str, Option<&str>) {
    match token.find(['=', ':']) {
        Some(at) => (&token[..at], Some(&token[at + 1..])),
        None => (token, None),
    }
}
