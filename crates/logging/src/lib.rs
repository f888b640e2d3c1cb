#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` maps the front-end's `-v` count onto a [`Verbosity`] and installs
//! the process-wide `tracing` subscriber that renders diagnostics on stderr.
//!
//! # Design
//!
//! Every crate in the workspace emits events through the `tracing` macros
//! under a `rsync_preview::<area>` target. [`init_tracing`] installs a
//! `tracing_subscriber::fmt` subscriber filtered by an `EnvFilter` derived
//! from the verbosity; setting [`LOG_ENV`] replaces that filter with explicit
//! directives.
//!
//! # Invariants
//!
//! - Diagnostics never go to stdout, which carries the change log.
//! - Initialising twice is harmless: the second call reports `false` and
//!   leaves the first subscriber in place.
//!
//! # Examples
//!
//! ```
//! use logging::Verbosity;
//!
//! assert_eq!(Verbosity::from_occurrences(0), Verbosity::Warn);
//! assert_eq!(Verbosity::from_occurrences(2), Verbosity::Debug);
//! assert_eq!(Verbosity::from_occurrences(9), Verbosity::Trace);
//! ```

mod subscriber;
mod verbosity;

pub use subscriber::{LOG_ENV, TARGET_ROOT, init_tracing};
pub use verbosity::Verbosity;
