//! Declarative command-line flags with live typed bindings.
//!
//! A host registers named flags up front, each registration handing back a
//! [`Binding`] that aliases the flag's value cell, then runs one parse pass
//! over the process argument list. The pass converts each matched value
//! string into the flag's declared type and stores it through the binding,
//! so the host reads final values directly with no lookups afterwards.
//!
//! - [`Registry`] holds the declared flags and owns the parse pass,
//!   positional and passthrough argument capture, and help rendering.
//! - [`Binding`] is a cheap cloneable handle to one flag's current value.
//! - [`FlagValue`] is the closed set of supported value types: booleans,
//!   integer widths, floats, decimals, strings, date/times, durations,
//!   semantic versions, IP addresses, and paths.
//! - [`FlagEnum`] opens registration to host enumerations selected by
//!   variant name.
//! - [`MatchMode`] controls alias and variant-name comparison (ASCII
//!   case-insensitive by default).
//!
//! # Quick start
//!
//! ```
//! use flagbind::{ParseOutcome, Registry};
//!
//! # fn main() -> flagbind::Result<()> {
//! let mut flags = Registry::new("transfer")
//!     .with_version("0.3.1")
//!     .with_about("Moves files between hosts");
//!
//! let verbose = flags.bool("-v|--verbose", false, "Enable verbose output");
//! let retries = flags.u32("-r|--retries", 3, "Retry count before giving up");
//! let host = flags.string("--host", "localhost", "Target host name");
//!
//! let outcome = flags.parse_from(["transfer", "--retries=5", "payload.bin"])?;
//!
//! assert_eq!(outcome, ParseOutcome::Complete);
//! assert_eq!(retries.get(), 5);
//! assert!(!verbose.get());
//! assert_eq!(host.get(), "localhost");
//! assert_eq!(flags.arg(0), Some("payload.bin"));
//! # Ok(())
//! # }
//! ```
//!
//! # Token grammar
//!
//! - `--name value`, `--name=value`, and `--name:value` all bind `value`;
//!   the token splits on its first `=` or `:`.
//! - With no inline value, the next token is consumed as the value unless
//!   it starts with `-`.
//! - A literal `--` stops the scan; it and everything after it are kept
//!   verbatim in [`Registry::remaining`].
//! - `-?`/`--help` is reserved and matches ahead of every registered flag.
//!
//! Parsing never exits the process and never prints. For binary entry
//! points, [`Registry::parse_or_exit`] adds the conventional
//! render-help-and-exit step on top of [`Registry::parse_from`].

mod error;
mod help;
mod matcher;
mod registry;
mod value;

pub use error::{ParseError, Result};
pub use matcher::MatchMode;
pub use registry::{Binding, ParseOutcome, Registry};
pub use value::{ConvertError, FlagEnum, FlagValue, ValueKind};
