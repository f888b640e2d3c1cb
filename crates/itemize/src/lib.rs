#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `itemize` reads the report that `rsync --itemize-changes` prints and turns
//! each relevant line into a [`ChangeEvent`]: something would be added,
//! modified or deleted at the destination.
//!
//! # Design
//!
//! - [`grammar`] owns the fixed-width `YXcstpoguax` prefix format and is the
//!   only place that knows its layout. [`grammar::parse_report_line`] is the
//!   single entry point into it.
//! - [`classify`] maps a parsed line onto a [`ChangeKind`].
//! - [`change_events`] and [`try_change_events`] adapt any line source (a
//!   buffered transcript or a live process) into a lazy event iterator.
//!
//! # Invariants
//!
//! - Classification is line-local: the same line always yields the same
//!   result regardless of what came before it.
//! - Paths are reported exactly as rsync printed them, minus the ` -> target`
//!   and ` => target` link annotations. A trailing `/` marks a directory.
//! - Unrecognised lines are discarded, never reported as errors.
//!
//! # Examples
//!
//! ```
//! use itemize::{ChangeEvent, ChangeKind, change_events};
//!
//! let transcript = [
//!     "sending incremental file list",
//!     "cd+++++++++ new dir/",
//!     ">f+++++++++ new file",
//!     "*deleting   old file",
//!     "",
//!     "sent 120 bytes  received 24 bytes  288.00 bytes/sec",
//! ];
//!
//! let events: Vec<ChangeEvent> = change_events(transcript).collect();
//! assert_eq!(
//!     events,
//!     [
//!         ChangeEvent::new(ChangeKind::Added, "new dir/", true),
//!         ChangeEvent::new(ChangeKind::Added, "new file", false),
//!         ChangeEvent::new(ChangeKind::Deleted, "old file", false),
//!     ]
//! );
//! ```

mod classify;
mod event;
pub mod grammar;
mod stream;

pub use classify::classify;
pub use event::{ChangeEvent, ChangeKind};
pub use stream::{ChangeEvents, TryChangeEvents, change_events, try_change_events};
