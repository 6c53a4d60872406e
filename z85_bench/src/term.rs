//! Terminal capability detection and the few escapes the report uses.

use std::io;

/// Resets all styles and colors.
pub const RESET: &str = "\x1b[0m";

/// Bold text.
pub const BOLD: &str = "\x1b[1m";

/// Dimmed text.
pub const DIM: &str = "\x1b[2m";

/// Whether styled output should be written to `stream`.
pub fn supports_ansi_escapes(stream: &impl io::IsTerminal) -> bool {
    ColorEnv::detect().allows(stream.is_terminal())
}

/// The color-related hints read from the environment.
#[derive(Debug, Clone, Copy, Default)]
struct ColorEnv {
    no_color: bool,
    force: bool,
    clicolor: Option<bool>,
    term_color: bool,
    ci: bool,
}

impl ColorEnv {
    fn detect() -> Self {
        Self {
            no_color: anstyle_query::no_color(),
            force: anstyle_query::clicolor_force(),
            clicolor: anstyle_query::clicolor(),
            term_color: anstyle_query::term_supports_color(),
            ci: anstyle_query::is_ci(),
        }
    }

    /// `NO_COLOR` beats `CLICOLOR_FORCE`, which beats everything else.
    fn allows(self, is_terminal: bool) -> bool {
        if self.no_color {
            return false;
        }

        if self.force {
            return true;
        }

        match self.clicolor {
            Some(false) => false,
            Some(true) => is_terminal,
            None => is_terminal && (self.term_color || self.ci),
        }
    }
}

/// A pair of escapes wrapped around styled text, or nothing if color is
/// disabled.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub start: &'static str,
    pub end: &'static str,
}

impl Style {
    pub const NONE: Self = Self { start: "", end: "" };

    /// Returns `NONE` unless `color` is set.
    pub const fn new(start: &'static str, color: bool) -> Self {
        if color {
            Self { start, end: RESET }
        } else {
            Self::NONE
        }
    }
}
