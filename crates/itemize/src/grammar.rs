//! Grammar of rsync's `--itemize-changes` (-i) report lines.
//!
//! Every item line starts with an 11-character field `YXcstpoguax`, a single
//! space, then the path:
//!
//! - Position 0 (Y): update type
//!   - `<` sent to remote
//!   - `>` received from remote
//!   - `c` local change (created)
//!   - `h` hard link
//!   - `.` not updated
//!   - `*` message (e.g., `*deleting`)
//! - Position 1 (X): file type
//!   - `f` regular file
//!   - `d` directory
//!   - `L` symlink
//!   - `D` device (char or block)
//!   - `S` special file (fifo, socket)
//! - Positions 2-10: attribute changes
//!   - `c` checksum, `s` size, `t`/`T` modification time, `p` permissions,
//!     `o` owner, `g` group, `u`/`n`/`b` access/change time, `a` ACL,
//!     `x` extended attributes
//!
//! Unchanged attributes show `.`; rsync blanks the whole attribute run with
//! spaces when nothing changed. New entries show `+` in every position and
//! `?` marks an attribute the peer could not report.
//!
//! Messages reuse the same field: `*deleting` is padded to 11 columns and
//! followed by the path of the entry that would be removed.
//!
//! # Examples
//!
//! ```
//! use itemize::grammar::{FileType, ReportLine, UpdateType, parse_report_line};
//!
//! let Some(ReportLine::Itemized { prefix, path }) = parse_report_line(">fcs....... notes.txt") else {
//!     panic!("expected an itemized line");
//! };
//! assert_eq!(prefix.update_type(), UpdateType::Received);
//! assert_eq!(prefix.file_type(), FileType::RegularFile);
//! assert!(prefix.has_changed_attribute());
//! assert_eq!(path, "notes.txt");
//!
//! assert_eq!(
//!     parse_report_line("*deleting   stale.log"),
//!     Some(ReportLine::Deletion { path: "stale.log" })
//! );
//! assert_eq!(parse_report_line("sending incremental file list"), None);
//! ```

/// Width of the itemize field, excluding the separating space.
pub const PREFIX_WIDTH: usize = 11;

/// Number of per-attribute positions following the update and file type.
pub const ATTRIBUTE_COUNT: usize = PREFIX_WIDTH - 2;

/// Message that announces a deletion.
pub const DELETION_MARKER: &str = "*deleting";

const SYMLINK_TARGET_SEPARATOR: &str = " -> ";
const HARD_LINK_TARGET_SEPARATOR: &str = " => ";

/// Update type indicator (position 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    /// `<` - sent to remote
    Sent,
    /// `>` - received from remote
    Received,
    /// `c` - local change (created)
    Created,
    /// `h` - hard link
    HardLink,
    /// `.` - not updated
    NotUpdated,
}

impl UpdateType {
    /// Parses the character at position 0. Messages (`*`) are not update types.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '<' => Some(Self::Sent),
            '>' => Some(Self::Received),
            'c' => Some(Self::Created),
            'h' => Some(Self::HardLink),
            '.' => Some(Self::NotUpdated),
            _ => None,
        }
    }

    /// Reports whether the entry itself would be transferred or created.
    #[must_use]
    pub const fn transfers(self) -> bool {
        !matches!(self, Self::NotUpdated)
    }
}

/// File type indicator (position 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// `f` - regular file
    RegularFile,
    /// `d` - directory
    Directory,
    /// `L` - symlink
    Symlink,
    /// `D` - device (char or block)
    Device,
    /// `S` - special file (fifo, socket)
    Special,
}

impl FileType {
    /// Parses the character at position 1.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'f' => Some(Self::RegularFile),
            'd' => Some(Self::Directory),
            'L' => Some(Self::Symlink),
            'D' => Some(Self::Device),
            'S' => Some(Self::Special),
            _ => None,
        }
    }
}

/// State of one attribute position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// `.` or blank: the attribute matches.
    Unchanged,
    /// `+`: the entry is new.
    Created,
    /// `?`: the attribute could not be compared.
    Unknown,
    /// A letter naming the attribute that differs.
    Changed(char),
}

impl Attribute {
    /// Parses one attribute position.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' | ' ' => Some(Self::Unchanged),
            '+' => Some(Self::Created),
            '?' => Some(Self::Unknown),
            ch if ch.is_ascii_alphabetic() => Some(Self::Changed(ch)),
            _ => None,
        }
    }

    /// Reports whether this position records a difference.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Changed(_) | Self::Unknown)
    }
}

/// The parsed `YXcstpoguax` field of an item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemizePrefix {
    update_type: UpdateType,
    file_type: FileType,
    attributes: [Attribute; ATTRIBUTE_COUNT],
}

impl ItemizePrefix {
    /// Parses an 11-character field. Returns `None` for anything else.
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        let mut chars = field.chars();
        let update_type = UpdateType::from_char(chars.next()?)?;
        let file_type = FileType::from_char(chars.next()?)?;

        let mut attributes = [Attribute::Unchanged; ATTRIBUTE_COUNT];
        for slot in &mut attributes {
            *slot = Attribute::from_char(chars.next()?)?;
        }
        if chars.next().is_some() {
            return None;
        }

        Some(Self {
            update_type,
            file_type,
            attributes,
        })
    }

    /// Returns the update type (position 0).
    #[must_use]
    pub const fn update_type(&self) -> UpdateType {
        self.update_type
    }

    /// Returns the file type (position 1).
    #[must_use]
    pub const fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Returns the attribute positions 2-10.
    #[must_use]
    pub const fn attributes(&self) -> &[Attribute; ATTRIBUTE_COUNT] {
        &self.attributes
    }

    /// Reports whether every attribute position carries the creation marker.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.attributes
            .iter()
            .all(|attribute| *attribute == Attribute::Created)
    }

    /// Reports whether any attribute position records a difference.
    #[must_use]
    pub fn has_changed_attribute(&self) -> bool {
        self.attributes.iter().any(|attribute| attribute.is_change())
    }
}

/// A report line recognised by [`parse_report_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLine<'a> {
    /// `*deleting` followed by the path that would be removed.
    Deletion {
        /// Path as printed by rsync.
        path: &'a str,
    },
    /// An item line with its parsed prefix.
    Itemized {
        /// The `YXcstpoguax` field.
        prefix: ItemizePrefix,
        /// Path with any link annotation removed.
        path: &'a str,
    },
}

/// Parses one line of rsync output.
///
/// Trailing `\n`/`\r\n` are ignored. Returns `None` for every line that is not
/// a deletion or item line: banners, progress, statistics, blank lines, other
/// `*` messages, and malformed prefixes.
#[must_use]
pub fn parse_report_line(line: &str) -> Option<ReportLine<'_>> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let (field, rest) = line.split_at_checked(PREFIX_WIDTH)?;
    let path = rest.strip_prefix(' ')?;
    if path.is_empty() {
        return None;
    }

    if let Some(padding) = field.strip_prefix(DELETION_MARKER) {
        return padding
            .bytes()
            .all(|byte| byte == b' ')
            .then_some(ReportLine::Deletion { path });
    }

    let prefix = ItemizePrefix::parse(field)?;
    let path = strip_link_target(&prefix, path);
    Some(ReportLine::Itemized { prefix, path })
}

fn strip_link_target<'a>(prefix: &ItemizePrefix, path: &'a str) -> &'a str {
    let separator = if prefix.file_type() == FileType::Symlink {
        SYMLINK_TARGET_SEPARATOR
    } else if prefix.update_type() == UpdateType::HardLink {
        HARD_LINK_TARGET_SEPARATOR
    } else {
        return path;
    };

    match path.find(separator) {
        Some(index) if index > 0 => &path[..index],
        _ => path,
    }
}
