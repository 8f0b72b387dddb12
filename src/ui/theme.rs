//! Terminal coloring for human-mode output

use owo_colors::{OwoColorize, Style};
use std::ffi::OsString;
use std::sync::OnceLock;

static COLORED: OnceLock<bool> = OnceLock::new();

/// What a piece of terminal text is, which decides how it is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Banners, section titles and record names
    Heading,
    Good,
    Bad,
    Caution,
    /// Addresses and URLs
    Link,
    /// Field labels next to a value
    Label,
    /// Placeholder text for empty results
    Faint,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Heading => Style::new().cyan().bold(),
            Tone::Good => Style::new().green().bold(),
            Tone::Bad => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow().bold(),
            Tone::Link => Style::new().blue(),
            Tone::Label => Style::new().white().dimmed(),
            Tone::Faint => Style::new().bright_black(),
        }
    }
}

/// Color only on an interactive stdout, and never when `NO_COLOR` is non-empty
fn wants_color(no_color: Option<OsString>, is_term: bool) -> bool {
    let opted_out = no_color.is_some_and(|v| !v.is_empty());
    is_term && !opted_out
}

pub fn colors_enabled() -> bool {
    *COLORED.get_or_init(|| {
        wants_color(std::env::var_os("NO_COLOR"), console::Term::stdout().is_term())
    })
}

/// Render `text` in the given tone, or unchanged when colors are off
pub fn paint(text: &str, tone: Tone) -> String {
    paint_with(text, tone, colors_enabled())
}

fn paint_with(text: &str, tone: Tone, colored: bool) -> String {
    if colored {
        text.style(tone.style()).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_and_pipes_disable_colors() {
        assert!(wants_color(None, true));
        assert!(wants_color(Some(OsString::new()), true));
        assert!(!wants_color(Some(OsString::from("1")), true));
        assert!(!wants_color(None, false));
    }

    #[test]
    fn test_paint_plain_is_unchanged() {
        assert_eq!(paint_with("Acme", Tone::Heading, false), "Acme");
    }

    #[test]
    fn test_paint_colored_wraps_text() {
        let painted = paint_with("Acme", Tone::Bad, true);
        assert!(painted.contains("Acme"));
        assert!(painted.starts_with('\u{1b}'));
    }
}
