use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Frame rejections are logged at debug and per-frame summaries at trace.
    pub fn shows_frame_events(self) -> bool {
        self.as_filter() >= LevelFilter::DEBUG
    }
}

/// Install the stderr subscriber.
///
/// Once `robolink-frame` events are visible, each line carries its target so
/// codec rejections can be told apart from CLI messages.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_ansi(false)
        .with_target(level.shows_frame_events());

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_events_need_debug_or_finer() {
        assert!(!LogLevel::Error.shows_frame_events());
        assert!(!LogLevel::Warn.shows_frame_events());
        assert!(!LogLevel::Info.shows_frame_events());
        assert!(LogLevel::Debug.shows_frame_events());
        assert!(LogLevel::Trace.shows_frame_events());
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(LogLevel::from_str("warn", true), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("TRACE", true), Ok(LogLevel::Trace));
        assert!(LogLevel::from_str("verbose", true).is_err());
    }
}
