//! Status line output.
//!
//! All user-facing progress lines go through [`Shell`], which right-aligns
//! a status word and colors it when stderr is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal};

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Finished,
    Removed,
    Copied,

    // In-progress statuses (cyan)
    Compiling,
    Linking,
    Probing,

    // Informational statuses (yellow)
    Fresh,
    Dependency,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Finished => "Finished",
            Status::Removed => "Removed",
            Status::Copied => "Copied",
            Status::Compiling => "Compiling",
            Status::Linking => "Linking",
            Status::Probing => "Probing",
            Status::Fresh => "Fresh",
            Status::Dependency => "Dependency",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Finished | Status::Removed | Status::Copied => "\x1b[1;32m",
            Status::Compiling | Status::Linking | Status::Probing => "\x1b[1;36m",
            Status::Fresh | Status::Dependency => "\x1b[1;33m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Central shell for CLI status output.
#[derive(Debug, Clone)]
pub struct Shell {
    use_color: bool,
    quiet: bool,
}

impl Shell {
    pub fn new(color: ColorChoice) -> Self {
        let use_color = match color {
            ColorChoice::Auto => io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        Shell {
            use_color,
            quiet: false,
        }
    }

    /// A shell that prints nothing.
    pub fn quiet() -> Self {
        Shell {
            use_color: false,
            quiet: true,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a status message.
    ///
    /// Format: `{status:>12} {message}`
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.quiet {
            return;
        }
        eprintln!("{} {}", self.format_status(status), msg);
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!(
                "{}{:>width$}\x1b[0m",
                status.color_code(),
                text,
                width = STATUS_WIDTH
            )
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ColorChoice::Auto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_plain() {
        let shell = Shell::new(ColorChoice::Never);
        assert_eq!(shell.format_status(Status::Removed), "     Removed");
    }

    #[test]
    fn test_format_status_colored() {
        let shell = Shell::new(ColorChoice::Always);
        let out = shell.format_status(Status::Compiling);
        assert!(out.starts_with("\x1b[1;36m"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("NEVER".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        assert!("sometimes".parse::<ColorChoice>().is_err());
    }
}
