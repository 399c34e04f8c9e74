pub mod palette;

pub use palette::*;

use std::fmt;

/// Powerline arrow drawn between two segments
pub const ICON_SEGMENT_SEP: &str = "\u{E0B0}";

/// Thin arrow used inside a segment, e.g. between directory names
pub const ICON_SEGMENT_SEP_THIN: &str = "\u{E0B1}";

/// Foreground/background pair of 256-color palette indices.
///
/// An unset color is expressed as `Option<SegmentColor>::None`, so every
/// value of this type is a real color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentColor {
    pub fg: u8,
    pub bg: u8,
}

impl SegmentColor {
    pub const fn new(fg: u8, bg: u8) -> Self {
        Self { fg, bg }
    }

    /// Prompt escape setting both foreground and background
    pub fn escape(&self) -> String {
        format!("{}{}", fmt_color_fg(self.fg), fmt_color_bg(self.bg))
    }
}

impl fmt::Display for SegmentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.escape())
    }
}

// `\[` and `\]` mark non-printing sequences for the shell's prompt width
// calculation.
fn fmt_color_internal(prefix: u8, code: u8) -> String {
    format!("\\[\\e[{};5;{}m\\]", prefix, code)
}

pub fn fmt_color_fg(code: u8) -> String {
    fmt_color_internal(38, code)
}

pub fn fmt_color_bg(code: u8) -> String {
    fmt_color_internal(48, code)
}

pub fn reset_colors() -> &'static str {
    "\\[\\e[0m\\]"
}
