use std::fmt;

/// What a synchronisation run would do to one destination entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ChangeKind {
    /// The entry does not exist at the destination yet.
    Added,
    /// The entry exists but its content or metadata would change.
    Modified,
    /// The entry would be removed from the destination.
    Deleted,
}

impl ChangeKind {
    /// Returns the one-letter code used in the change log (`A`, `M`, `D`).
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
        };
        f.write_str(label)
    }
}

/// A single classified line of the itemized change report.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ChangeEvent {
    /// The kind of change.
    pub kind: ChangeKind,
    /// The path as rsync reported it, relative to the transfer root.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

impl ChangeEvent {
    /// Creates an event.
    pub fn new(kind: ChangeKind, path: impl Into<String>, is_directory: bool) -> Self {
        Self {
            kind,
            path: path.into(),
            is_directory,
        }
    }
}

/// Renders the change-log form `<code> <path>`.
impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.code(), self.path)
    }
}
