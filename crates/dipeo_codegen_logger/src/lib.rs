use colored::Colorize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    /// Nothing but errors are printed.
    Quiet,
}

#[derive(Debug, Clone, Default)]
pub struct Logger {
    pub level: LogLevel,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn debug(&self, message: &str) {
        if self.level == LogLevel::Debug {
            println!("{}", format!("[DEBUG] {message}").dimmed());
        }
    }

    pub fn info(&self, message: &str) {
        if matches!(self.level, LogLevel::Debug | LogLevel::Info) {
            let prefix = "[INFO]".blue();
            println!("{prefix}  {message}");
        }
    }

    pub fn warn(&self, message: &str) {
        if matches!(self.level, LogLevel::Debug | LogLevel::Info | LogLevel::Warn) {
            println!("{}", format!("[WARN]  {message}").yellow());
        }
    }

    pub fn error(&self, message: &str) {
        let prefix = "[ERROR]".red();
        eprintln!("{}", format!("{prefix} {message}").red());
    }

    pub fn success(&self, message: &str) {
        if self.level != LogLevel::Quiet {
            println!("{} {message}", "✓".green());
        }
    }

    /// Reports a single path touched by a phase (written, staged, applied, ...).
    pub fn file(&self, verb: &str, path: &str) {
        if matches!(self.level, LogLevel::Debug | LogLevel::Info) {
            println!("  {} {}", verb.dimmed(), path);
        }
    }
}
