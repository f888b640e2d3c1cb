use std::env;
use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::verbosity::Verbosity;

/// Environment variable holding `EnvFilter` directives that replace the
/// verbosity-derived filter.
pub const LOG_ENV: &str = "RSYNC_PREVIEW_LOG";

/// Common prefix of every target the workspace logs under.
pub const TARGET_ROOT: &str = "rsync_preview";

/// Installs the stderr subscriber for `verbosity`.
///
/// [`LOG_ENV`], when set to valid directives, takes precedence over
/// `verbosity`. Invalid directives are reported once the subscriber is up and
/// otherwise ignored.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(verbosity: Verbosity) -> bool {
    let requested = env::var(LOG_ENV).ok();
    let (filter, rejected) = build_filter(verbosity, requested.as_deref());

    let installed = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(verbosity >= Verbosity::Debug)
        .without_time()
        .try_init()
        .is_ok();

    if let Some(error) = rejected {
        tracing::warn!(target: TARGET_ROOT, %error, "ignoring invalid {LOG_ENV} directives");
    }
    installed
}

fn build_filter(verbosity: Verbosity, requested: Option<&str>) -> (EnvFilter, Option<ParseError>) {
    match requested.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(error) => (verbosity_filter(verbosity), Some(error)),
        },
        None => (verbosity_filter(verbosity), None),
    }
}

fn verbosity_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::default()
        .add_directive(Verbosity::Warn.level_filter().into())
        .add_directive(
            format!("{TARGET_ROOT}={}", verbosity.level_filter())
                .parse()
                .unwrap_or_else(|_| verbosity.level_filter().into()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn verbosity_sets_the_ceiling() {
        let (filter, rejected) = build_filter(Verbosity::Debug, None);
        assert!(rejected.is_none());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn quiet_default_stays_at_warn() {
        let (filter, _) = build_filter(Verbosity::Warn, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn explicit_directives_win() {
        let (filter, rejected) = build_filter(Verbosity::Warn, Some("rsync_preview::runner=trace"));
        assert!(rejected.is_none());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn blank_directives_are_ignored() {
        let (filter, rejected) = build_filter(Verbosity::Info, Some("   "));
        assert!(rejected.is_none());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn invalid_directives_fall_back_to_verbosity() {
        let (filter, rejected) = build_filter(Verbosity::Info, Some("rsync_preview=loud"));
        assert!(rejected.is_some());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
