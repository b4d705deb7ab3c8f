//! Terminal styling for command output
//!
//! Colors are semantic rather than literal, and each style knows which
//! stream it targets so `owo-colors` can check color support (TTY, `NO_COLOR`,
//! `CLICOLOR_FORCE`) for the right one.
//!
//! | Style        | Look   | Stream | Used for                        |
//! |--------------|--------|--------|---------------------------------|
//! | `accent`     | cyan   | stdout | icon paths, branch names, counts |
//! | `emphasis`   | bold   | stdout | repository, login, headings     |
//! | `muted`      | dim    | stdout | byte sizes, stage labels, hints |
//! | `warn`       | yellow | stderr | no-op outcomes, duplicate names |

use icon_sync::types::FileStatus;
use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

const ACCENT: Style = Style::new().cyan();
const EMPHASIS: Style = Style::new().bold();
const MUTED: Style = Style::new().dimmed();
const GOOD: Style = Style::new().green();
const WARN: Style = Style::new().yellow();
const BAD: Style = Style::new().red();

/// A value rendered with a style when its stream supports color
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn on(stream: Stream, style: Style, value: T) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }

    /// Check color support against stderr instead
    #[must_use]
    pub const fn for_stderr(mut self) -> Self {
        self.stream = Stream::Stderr;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.style;
        write!(
            f,
            "{}",
            self.value.if_supports_color(self.stream, |v| v.style(style))
        )
    }
}

/// Semantic styles for anything printable
pub trait Stylize: Display {
    /// Cyan, stdout
    fn accent(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, ACCENT, self)
    }

    /// Bold, stdout
    fn emphasis(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, EMPHASIS, self)
    }

    /// Dim, stdout
    fn muted(&self) -> Styled<&Self> {
        Styled::on(Stream::Stdout, MUTED, self)
    }

    /// Yellow, stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::on(Stream::Stderr, WARN, self)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check for a finished step
pub const fn check() -> Styled<&'static str> {
    Styled::on(Stream::Stdout, GOOD, "✓")
}

/// Red cross for a failure
pub const fn cross() -> Styled<&'static str> {
    Styled::on(Stream::Stderr, BAD, "✗")
}

/// `+`, `~`, or `-` marker for a changed file
pub const fn change_marker(status: FileStatus) -> Styled<&'static str> {
    match status {
        FileStatus::Added => Styled::on(Stream::Stdout, GOOD, "+"),
        FileStatus::Modified => Styled::on(Stream::Stdout, WARN, "~"),
        FileStatus::Removed => Styled::on(Stream::Stdout, BAD, "-"),
    }
}

/// OSC 8 link whose text is the URL, or the bare URL where unsupported
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while a publish runs
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
