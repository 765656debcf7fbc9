use std::fmt;
use std::str::FromStr;

use crate::settings::SettingsError;

/// Log severity, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Fatal,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Fatal,
    ];

    /// Token as spelled on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// `tracing` filter directive. FATAL has no tracing level of its own and
    /// maps to `error`.
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Fatal => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = SettingsError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == token)
            .ok_or_else(|| SettingsError::UnknownLogLevel {
                token: token.to_string(),
            })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_token_exactly() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>(), Ok(level));
        }
        assert!("warn".parse::<LogLevel>().is_err());
        assert!("ERROR".parse::<LogLevel>().is_err());
    }

    #[test]
    fn ordered_by_severity() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Fatal);
        assert_eq!(LogLevel::default(), LogLevel::Warn);
    }
}
