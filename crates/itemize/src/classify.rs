use crate::event::{ChangeEvent, ChangeKind};
use crate::grammar::{FileType, ItemizePrefix, ReportLine, parse_report_line};

const TARGET: &str = "rsync_preview::itemize";

/// Classifies one line of rsync's itemized report.
///
/// Returns `None` for lines that do not describe a change: noise such as
/// banners and statistics, unparsable lines, and item lines whose prefix
/// reports no difference at all.
///
/// ```
/// use itemize::{ChangeKind, classify};
///
/// let added = classify(">f+++++++++ new file").unwrap();
/// assert_eq!(added.kind, ChangeKind::Added);
///
/// let modified = classify(".d..t...... ./").unwrap();
/// assert_eq!(modified.kind, ChangeKind::Modified);
/// assert!(modified.is_directory);
///
/// assert!(classify("receiving incremental file list").is_none());
/// ```
#[must_use]
pub fn classify(line: &str) -> Option<ChangeEvent> {
    match parse_report_line(line) {
        Some(ReportLine::Deletion { path }) => Some(ChangeEvent::new(
            ChangeKind::Deleted,
            path,
            path.ends_with('/'),
        )),
        Some(ReportLine::Itemized { prefix, path }) => {
            let Some(kind) = item_kind(&prefix) else {
                tracing::trace!(target: TARGET, line, "item without changes discarded");
                return None;
            };
            let is_directory = prefix.file_type() == FileType::Directory || path.ends_with('/');
            Some(ChangeEvent::new(kind, path, is_directory))
        }
        None => {
            tracing::trace!(target: TARGET, line, "non-report line discarded");
            None
        }
    }
}

fn item_kind(prefix: &ItemizePrefix) -> Option<ChangeKind> {
    if prefix.is_new() {
        Some(ChangeKind::Added)
    } else if prefix.has_changed_attribute() || prefix.update_type().transfers() {
        Some(ChangeKind::Modified)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> Option<ChangeKind> {
        classify(line).map(|event| event.kind)
    }

    #[test]
    fn creation_markers_mean_added() {
        assert_eq!(kind_of(">f+++++++++ new file"), Some(ChangeKind::Added));
        assert_eq!(kind_of("cd+++++++++ new dir/"), Some(ChangeKind::Added));
        assert_eq!(kind_of("cL+++++++++ new link -> new file"), Some(ChangeKind::Added));
        assert_eq!(kind_of("hf+++++++++ twin => new file"), Some(ChangeKind::Added));
    }

    #[test]
    fn content_changes_mean_modified() {
        assert_eq!(kind_of(">f.st...... modified file"), Some(ChangeKind::Modified));
        assert_eq!(kind_of(">fcst...... modified file"), Some(ChangeKind::Modified));
        assert_eq!(kind_of("<f..t...... pushed file"), Some(ChangeKind::Modified));
    }

    #[test]
    fn attribute_only_changes_mean_modified() {
        assert_eq!(kind_of(".d..t...... modified dir/"), Some(ChangeKind::Modified));
        assert_eq!(kind_of(".f...p..... mode change"), Some(ChangeKind::Modified));
        assert_eq!(kind_of(".f....og... owner change"), Some(ChangeKind::Modified));
    }

    #[test]
    fn forced_transfer_without_attribute_change_is_modified() {
        assert_eq!(kind_of(">f......... same file"), Some(ChangeKind::Modified));
    }

    #[test]
    fn unchanged_items_are_discarded() {
        assert_eq!(kind_of(".f......... untouched"), None);
        assert_eq!(kind_of(".d          ./"), None);
    }

    #[test]
    fn deletions_are_deleted() {
        let file = classify("*deleting   old file").expect("deletion");
        assert_eq!(file, ChangeEvent::new(ChangeKind::Deleted, "old file", false));

        let dir = classify("*deleting   old dir/").expect("deletion");
        assert_eq!(dir, ChangeEvent::new(ChangeKind::Deleted, "old dir/", true));
    }

    #[test]
    fn directory_flag_follows_file_type_or_trailing_slash() {
        assert!(classify("cd+++++++++ nested").expect("event").is_directory);
        assert!(classify(">f+++++++++ odd/").expect("event").is_directory);
        assert!(!classify(">f+++++++++ plain").expect("event").is_directory);
        assert!(!classify("cL+++++++++ link -> dir/").expect("event").is_directory);
    }

    #[test]
    fn path_is_reported_verbatim() {
        let event = classify(">f+++++++++ a  b/../c").expect("event");
        assert_eq!(event.path, "a  b/../c");
    }

    #[test]
    fn noise_produces_nothing() {
        assert_eq!(classify("building file list ... done"), None);
        assert_eq!(classify("\n"), None);
        assert_eq!(classify("sent 91 bytes  received 17 bytes  216.00 bytes/sec"), None);
    }
}
