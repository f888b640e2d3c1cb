//! Lazy adapters from line sources to change events.
//!
//! Classification is stateless, so the adapters only pull lines until one
//! classifies. A buffered transcript and a live process stream produce the
//! same event sequence.

use std::iter::FusedIterator;

use crate::classify::classify;
use crate::event::ChangeEvent;

/// Iterator over the change events of an infallible line source.
#[derive(Clone, Debug)]
pub struct ChangeEvents<I> {
    lines: I,
}

impl<I, S> Iterator for ChangeEvents<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = ChangeEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.by_ref().find_map(|line| classify(line.as_ref()))
    }
}

impl<I, S> FusedIterator for ChangeEvents<I>
where
    I: FusedIterator<Item = S>,
    S: AsRef<str>,
{
}

/// Classifies every line of `lines`, yielding events in line order.
pub fn change_events<I>(lines: I) -> ChangeEvents<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    ChangeEvents {
        lines: lines.into_iter(),
    }
}

/// Iterator over the change events of a fallible line source.
///
/// Read errors are yielded as they occur; iteration can continue afterwards if
/// the underlying source supports it.
#[derive(Clone, Debug)]
pub struct TryChangeEvents<I> {
    lines: I,
}

impl<I, S, E> Iterator for TryChangeEvents<I>
where
    I: Iterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    type Item = Result<ChangeEvent, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.by_ref().find_map(|line| match line {
            Ok(line) => classify(line.as_ref()).map(Ok),
            Err(error) => Some(Err(error)),
        })
    }
}

/// Classifies every successfully read line of `lines`, passing read errors through.
///
/// ```
/// use std::io::{BufRead, Cursor};
/// use itemize::{ChangeKind, try_change_events};
///
/// let output = Cursor::new("receiving file list\n>f.st...... report.txt\n");
/// let events: Vec<_> = try_change_events(output.lines()).collect::<Result<_, _>>()?;
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].kind, ChangeKind::Modified);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn try_change_events<I, S, E>(lines: I) -> TryChangeEvents<I::IntoIter>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    TryChangeEvents {
        lines: lines.into_iter(),
    }
}
