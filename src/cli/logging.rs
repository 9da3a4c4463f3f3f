//! CLI output levels
//!
//! Reports go to stdout, warnings to stderr, and `--quiet` silences both.

/// Output level selected by the CLI flags
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    fn permits(self, required: LogLevel) -> bool {
        self != LogLevel::Quiet && (self == required || required == LogLevel::Normal)
    }
}

/// Print a message to stdout if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.permits(required) {
        println!("{msg}");
    }
}

/// Print a warning to stderr unless output is suppressed
pub fn warn(level: LogLevel, msg: &str) {
    if level != LogLevel::Quiet {
        eprintln!("Warning: {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert!(LogLevel::from_flags(false, true) == LogLevel::Quiet);
        assert!(LogLevel::from_flags(true, false) == LogLevel::Verbose);
        assert!(LogLevel::from_flags(false, false) == LogLevel::Normal);
    }

    #[test]
    fn test_permits() {
        assert!(LogLevel::Verbose.permits(LogLevel::Verbose));
        assert!(LogLevel::Verbose.permits(LogLevel::Normal));
        assert!(!LogLevel::Normal.permits(LogLevel::Verbose));
        assert!(!LogLevel::Quiet.permits(LogLevel::Normal));
    }
}
