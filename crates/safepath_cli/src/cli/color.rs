use owo_colors::OwoColorize;
use safepath_core::RouteStatus;

use crate::ui::Style;

/// Color helper with a single policy shared across commands.
///
/// All functions return `String`; colors are applied only if the style
/// asked for them.
pub struct Colors {
    pub enabled: bool,
}

impl Colors {
    pub fn new(style: &Style) -> Self {
        Self {
            enabled: style.color,
        }
    }

    fn paint(&self, s: &str, f: impl FnOnce(&str) -> String) -> String {
        if self.enabled { f(s) } else { s.to_string() }
    }

    #[inline]
    pub fn ok(&self, s: impl AsRef<str>) -> String {
        self.paint(s.as_ref(), |s| s.green().to_string())
    }

    #[inline]
    pub fn err(&self, s: impl AsRef<str>) -> String {
        self.paint(s.as_ref(), |s| s.red().to_string())
    }

    #[inline]
    pub fn warn(&self, s: impl AsRef<str>) -> String {
        self.paint(s.as_ref(), |s| s.yellow().to_string())
    }

    #[inline]
    pub fn key(&self, s: impl AsRef<str>) -> String {
        self.paint(s.as_ref(), |s| s.cyan().to_string())
    }

    #[inline]
    pub fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(s.as_ref(), |s| s.bright_black().to_string())
    }

    pub fn status(&self, status: RouteStatus, s: impl AsRef<str>) -> String {
        match status {
            RouteStatus::OnRoute => self.ok(s),
            RouteStatus::OffRoute => self.err(s),
            RouteStatus::Unknown => self.warn(s),
        }
    }

    /// Color a distance against the corridor.
    /// Policy:
    /// - inside the tolerance: green
    /// - up to twice the tolerance: yellow
    /// - else: red
    pub fn distance(&self, meters: f64, tolerance_m: f64, txt: impl AsRef<str>) -> String {
        if meters < tolerance_m {
            self.ok(txt)
        } else if meters < 2.0 * tolerance_m {
            self.warn(txt)
        } else {
            self.err(txt)
        }
    }
}
