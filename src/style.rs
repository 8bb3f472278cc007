//! ANSI styling for the report: titles, and the marks for passed and failed
//! checks. `ColorChoice::Auto` asks the terminal once and remembers.
use clap::ValueEnum;
use once_cell::sync::Lazy;

/// When to color the report
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color if stdout is a terminal that supports it
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// The escape sequences wrapped around each kind of report text
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    title_start: &'static str,
    good_start: &'static str,
    bad_start: &'static str,
    end: &'static str,
}

impl StyleSheet {
    /// A section title
    #[must_use]
    pub fn title(&self, s: &str) -> String {
        format!("{}{}{}", self.title_start, s, self.end)
    }
    /// Something that is as it should be
    #[must_use]
    pub fn good(&self, s: &str) -> String {
        format!("{}{}{}", self.good_start, s, self.end)
    }
    /// Something that isn't
    #[must_use]
    pub fn bad(&self, s: &str) -> String {
        format!("{}{}{}", self.bad_start, s, self.end)
    }
}

const ESC: u8 = b'\x1B';
const GREEN: &str = "\x1B[32m";
const RED: &str = "\x1B[31;1m";
const YELLOW: &str = "\x1B[33m";
const RESET: &str = "\x1B[m";
const ALWAYS: StyleSheet =
    StyleSheet { title_start: YELLOW, good_start: GREEN, bad_start: RED, end: RESET };
const NEVER: StyleSheet = StyleSheet { title_start: "", good_start: "", bad_start: "", end: "" };
static AUTO: Lazy<StyleSheet> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    let use_color = enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some();
    if use_color {
        ALWAYS
    } else {
        NEVER
    }
});

/// The style sheet for `cc`
#[must_use]
pub fn colored(cc: ColorChoice) -> &'static StyleSheet {
    match cc {
        ColorChoice::Always => &ALWAYS,
        ColorChoice::Never => &NEVER,
        ColorChoice::Auto => Lazy::force(&AUTO),
    }
}

/// The number of columns `s` occupies on screen: its length in chars, less the escape
/// sequences at either end if it was produced by a `StyleSheet`.
#[must_use]
pub fn display_width(s: &str) -> usize {
    use bstr::ByteSlice;
    let bytes = s.as_bytes();
    let mut content = bytes;
    if bytes.len() >= GREEN.len() + RESET.len()
        && bytes[0] == ESC
        && bytes[1] == b'['
        && bytes.ends_with_str(RESET)
    {
        if let Some(m) = bytes.find_byte(b'm').filter(|&m| m + RESET.len() < bytes.len()) {
            content = &bytes[m + 1..bytes.len() - RESET.len()];
        }
    }
    content.chars().count()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_width() {
        let contents = "abc";
        for choice in [ALWAYS, NEVER] {
            assert_eq!(display_width(&choice.title(contents)), contents.len());
            assert_eq!(display_width(&choice.good(contents)), contents.len());
            assert_eq!(display_width(&choice.bad(contents)), contents.len());
        }
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        assert_eq!(display_width("Nichtsingulär"), 13);
        assert_eq!(display_width(&ALWAYS.title("Ünïcödé")), 7);
        assert_eq!(display_width(&NEVER.good("✓")), 1);
    }

    #[test]
    fn never_means_plain() {
        assert_eq!(colored(ColorChoice::Never).bad("x"), "x");
        assert_eq!(colored(ColorChoice::Always).bad("x"), "\x1B[31;1mx\x1B[m");
    }
}
