use tracing::level_filters::LevelFilter;

/// How much diagnostic output the front-end emits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Warn,
    /// Adds progress milestones such as the launched command.
    Info,
    /// Adds per-stage decisions.
    Debug,
    /// Adds one event per discarded report line.
    Trace,
}

impl Verbosity {
    /// Maps the number of `-v` flags to a verbosity.
    #[must_use]
    pub const fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Returns the corresponding `tracing` level filter.
    #[must_use]
    pub const fn level_filter(self) -> LevelFilter {
        match self {
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrences_saturate_at_trace() {
        assert_eq!(Verbosity::from_occurrences(1), Verbosity::Info);
        assert_eq!(Verbosity::from_occurrences(3), Verbosity::Trace);
        assert_eq!(Verbosity::from_occurrences(u8::MAX), Verbosity::Trace);
    }

    #[test]
    fn default_is_quiet() {
        assert_eq!(Verbosity::default(), Verbosity::Warn);
        assert_eq!(Verbosity::default().level_filter(), LevelFilter::WARN);
    }

    #[test]
    fn ordering_follows_detail() {
        assert!(Verbosity::Warn < Verbosity::Info);
        assert!(Verbosity::Debug < Verbosity::Trace);
    }
}
