pub mod context;
pub mod directory;
pub mod git;
pub mod runtimes;
pub mod session;
pub mod system;

pub use context::*;

use crate::themes::SegmentColor;
use std::collections::HashMap;

/// Completed segments keyed by segment name
pub type SegmentMap = HashMap<String, Segment>;

/// Output accumulated by one segment task.
///
/// Everything appended to `text` or `headlines` is escaped for the shell's
/// prompt evaluator first, so content read from the environment or from
/// project files can never turn into a command substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    begin_color: Option<SegmentColor>,
    current_color: Option<SegmentColor>,
    headlines: Vec<String>,
    text: String,
}

impl Segment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallback recorded for a task that did not finish in time
    pub fn timed_out(name: &str) -> Self {
        let mut segment = Self::new();
        segment.add_headline(format!("Segment {} timed out", name));
        segment
    }

    pub fn add_headline(&mut self, text: impl AsRef<str>) {
        self.headlines.push(escape_prompt_text(text.as_ref()));
    }

    pub fn add_text(&mut self, text: impl AsRef<str>) {
        self.text.push_str(&escape_prompt_text(text.as_ref()));
    }

    /// Append a prompt escape sequence (`\t`, `\[..\]`, colors) unescaped.
    ///
    /// Only for fixed sequences built by this crate, never for content read
    /// from the environment or the file system.
    pub fn add_prompt_escape(&mut self, code: impl AsRef<str>) {
        self.text.push_str(code.as_ref());
    }

    /// Switch the color of everything appended afterwards.
    ///
    /// The first color ever set becomes the begin color and is never replaced.
    pub fn set_text_color(&mut self, color: SegmentColor) {
        self.begin_color.get_or_insert(color);
        self.current_color = Some(color);
        self.add_prompt_escape(color.escape());
    }

    pub fn begin_color(&self) -> Option<SegmentColor> {
        self.begin_color
    }

    pub fn current_color(&self) -> Option<SegmentColor> {
        self.current_color
    }

    pub fn headlines(&self) -> &[String] {
        &self.headlines
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Only segments with colored body text take part in the powerline chain
    pub fn is_printable(&self) -> bool {
        !self.text.is_empty() && self.current_color.is_some()
    }
}

/// Quote text for a prompt installed as `PS1="$(powerline-prompt ...)"`.
///
/// Bash decodes prompt backslash escapes first and then runs parameter and
/// command expansion on the result. Each backslash is doubled twice so it
/// survives both passes, and `$` or a backtick gets `\\` in front, which
/// decodes to `\` and leaves the character literal for the expansion pass.
pub fn escape_prompt_text(text: &str) -> String {
    text.replace('\\', "\\\\\\\\")
        .replace('$', "\\\\$")
        .replace('`', "\\\\`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_color_is_write_once() {
        let mut segment = Segment::new();
        segment.set_text_color(SegmentColor::new(1, 2));
        segment.set_text_color(SegmentColor::new(3, 4));

        assert_eq!(segment.begin_color(), Some(SegmentColor::new(1, 2)));
        assert_eq!(segment.current_color(), Some(SegmentColor::new(3, 4)));
    }

    #[test]
    fn printable_needs_text_and_color() {
        let mut plain = Segment::new();
        plain.add_text("plain");
        assert!(!plain.is_printable());

        let mut headline_only = Segment::new();
        headline_only.add_headline("warning");
        assert!(!headline_only.is_printable());

        let mut colored = Segment::new();
        colored.set_text_color(SegmentColor::new(0, 148));
        colored.add_text("main");
        assert!(colored.is_printable());
    }

    #[test]
    fn timed_out_segment_only_has_a_headline() {
        let segment = Segment::timed_out("git");
        assert_eq!(segment.headlines(), ["Segment git timed out".to_string()]);
        assert!(segment.text().is_empty());
        assert_eq!(segment.current_color(), None);
        assert!(!segment.is_printable());
    }

    #[test]
    fn escapes_dollar_and_backtick() {
        let mut segment = Segment::new();
        segment.add_text("$(rm -rf ~) `id` ${HOME}");
        segment.add_headline("cost: $5");

        assert_eq!(segment.text(), r"\\$(rm -rf ~) \\`id\\` \\${HOME}");
        assert_eq!(segment.headlines()[0], r"cost: \\$5");
    }

    #[test]
    fn escapes_backslashes_before_dollar() {
        assert_eq!(escape_prompt_text(r"\$(id)"), r"\\\\\\$(id)");
        assert_eq!(escape_prompt_text(r"C:\w"), r"C:\\\\w");
    }

    #[test]
    fn prompt_escapes_are_kept_verbatim() {
        let mut segment = Segment::new();
        segment.set_text_color(SegmentColor::new(0, 148));
        segment.add_prompt_escape(r"\t");

        assert_eq!(segment.text(), format!(r"{}\t", SegmentColor::new(0, 148).escape()));
        assert!(segment.is_printable());
    }
}
