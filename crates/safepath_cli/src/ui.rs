use owo_colors::OwoColorize;
use safepath_core::RouteStatus;

#[derive(Clone, Copy, Debug)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl From<RouteStatus> for Level {
    fn from(status: RouteStatus) -> Self {
        match status {
            RouteStatus::OnRoute => Level::Success,
            RouteStatus::OffRoute => Level::Error,
            RouteStatus::Unknown => Level::Warning,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Style {
    pub emoji: bool,
    pub color: bool,
}

impl Style {
    /// Colors only when the target stream is a TTY; emojis always on.
    pub fn for_stream(stream: atty::Stream) -> Self {
        Self {
            emoji: true,
            color: atty::is(stream),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            emoji: false,
            color: false,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::for_stream(atty::Stream::Stdout)
    }
}

pub fn info(msg: impl AsRef<str>) {
    print_line(Level::Info, msg.as_ref(), Style::default());
}

pub fn success(msg: impl AsRef<str>) {
    print_line(Level::Success, msg.as_ref(), Style::default());
}

/// Goes to stderr so `--json` output on stdout stays parseable.
pub fn warning(msg: impl AsRef<str>) {
    eprint_line(Level::Warning, msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    eprint_line(Level::Error, msg.as_ref());
}

/// Caregiver-facing wording of a status.
pub fn status_text(status: RouteStatus) -> &'static str {
    match status {
        RouteStatus::OnRoute => "On route: the person is on the planned path",
        RouteStatus::OffRoute => "Strayed from path: the person appears to be off the planned route",
        RouteStatus::Unknown => "Unknown: no route or no current location",
    }
}

pub fn status_badge(status: RouteStatus, style: Style) -> String {
    decorate(Level::from(status), status_text(status), style)
}

pub fn print_line(level: Level, msg: &str, style: Style) {
    println!("{}", decorate(level, msg, style));
}

fn eprint_line(level: Level, msg: &str) {
    let style = Style::for_stream(atty::Stream::Stderr);
    eprintln!("{}", decorate(level, msg, style));
}

fn decorate(level: Level, msg: &str, style: Style) -> String {
    let emoji = match level {
        Level::Info => "ℹ️ ",
        Level::Success => "✅ ",
        Level::Warning => "⚠️ ",
        Level::Error => "❌ ",
    };

    let prefix = if style.emoji { emoji } else { "" };
    let line = format!("{}{}", prefix, msg);

    if !style.color {
        return line;
    }

    match level {
        Level::Info => line,
        Level::Success => line.green().to_string(),
        Level::Warning => line.yellow().to_string(),
        Level::Error => line.red().to_string(),
    }
}
