#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `invocation` turns the arguments a user typed into an rsync command line
//! that is safe to run for a preview. It never spawns anything and never
//! touches the filesystem; every entry point is a pure function over a token
//! list.
//!
//! # Design
//!
//! - [`locate`] finds the leftmost token whose basename is `rsync`, which lets
//!   [`split_arguments`] separate the front-end's own flags from the embedded
//!   rsync invocation.
//! - [`normalize`] guarantees that token 0 is an rsync program token.
//! - [`has_quiet_flag`] reports quiet options that would suppress the
//!   per-item report, and [`itemize_overrides`] the output formats or
//!   cancellations that would replace it.
//! - [`ensure_dry_run`] injects `-n`/`-i` after the program token unless the
//!   user already asked for them. Options are scanned the way rsync reads
//!   them, so letters inside option values (`-essh -n`) are not mistaken for
//!   flags.
//! - [`parse_command_line`] splits a command line saved in a file using
//!   shell-like quoting rules.
//!
//! # Invariants
//!
//! - [`ensure_dry_run`] only ever inserts tokens directly after position 0;
//!   user tokens keep their relative order and spelling.
//! - [`ensure_dry_run`] is idempotent, and its result enters dry-run mode
//!   within the first two tokens after the program.
//! - [`locate`] and [`normalize`] compare basenames exactly, so a path such as
//!   `/usr/bin/rsync/` (trailing separator) never counts as the program.
//!
//! # Errors
//!
//! Only [`parse_command_line`] can fail, returning [`CommandLineError`] for
//! unterminated quotes or a dangling escape. All other helpers report absence
//! through `Option`/`bool` results.
//!
//! # Examples
//!
//! ```
//! use invocation::{ensure_dry_run, has_quiet_flag, normalize, split_arguments};
//!
//! let split = split_arguments(["-b", "rsync", "-a", "src/", "dst/"]);
//! assert_eq!(split.own, ["-b"]);
//!
//! let command = ensure_dry_run(&normalize(&split.rsync));
//! assert_eq!(command, ["rsync", "-n", "-i", "-a", "src/", "dst/"]);
//! assert!(!has_quiet_flag(&command));
//! ```

mod command_file;
mod dry_run;
mod flags;
mod options;
mod program;
mod quiet;
mod split;

pub use command_file::{CommandLineError, parse_command_line};
pub use dry_run::{
    DRY_RUN_FLAG, ITEMIZE_FLAG, dry_run_position, ensure_dry_run, requests_dry_run,
    requests_itemize,
};
pub use program::{PROGRAM_NAME, basename, is_program_token, locate, normalize};
pub use quiet::{has_quiet_flag, itemize_overrides};
pub use split::{SplitArguments, split_arguments};
