use crate::scheduler::SegmentRequest;
use crate::segments::{Segment, SegmentMap};
use crate::themes::{fmt_color_fg, reset_colors, SegmentColor, ICON_SEGMENT_SEP};

/// Compose the final prompt: all headlines first, then the powerline body.
///
/// Output order always follows `requests`; a request missing from
/// `segments` renders like an empty segment.
pub fn render(requests: &[SegmentRequest], segments: &SegmentMap) -> String {
    let empty = Segment::new();
    let ordered: Vec<&Segment> = requests
        .iter()
        .map(|request| segments.get(&request.name).unwrap_or(&empty))
        .collect();

    let mut out = render_headlines(&ordered);
    out.push_str(&render_body(&ordered));
    out
}

/// Every headline on its own line, in request order
pub fn render_headlines(segments: &[&Segment]) -> String {
    let mut out = String::new();
    for headline in segments.iter().flat_map(|segment| segment.headlines()) {
        out.push_str(headline);
        out.push('\n');
    }
    out
}

/// Printable segments chained with separators whose foreground is the
/// previous background and whose background is the next one.
pub fn render_body(segments: &[&Segment]) -> String {
    let mut out = String::new();
    let mut last_color: Option<SegmentColor> = None;
    let mut first_printed = false;

    for (index, segment) in segments.iter().enumerate() {
        if let Some(begin) = segment.begin_color().filter(|_| segment.is_printable()) {
            match last_color.filter(|_| first_printed) {
                Some(previous) => {
                    let separator = SegmentColor::new(previous.bg, begin.bg);
                    out.push(' ');
                    out.push_str(&separator.escape());
                    out.push_str(ICON_SEGMENT_SEP);
                    out.push(' ');
                }
                None => {
                    first_printed = true;
                    out.push_str(&begin.escape());
                    out.push(' ');
                }
            }
        }

        out.push_str(segment.text());

        if index == segments.len() - 1 {
            if let Some(active) = segment.current_color().or(last_color) {
                out.push_str(&closing_cap(active));
            }
        }

        if let Some(current) = segment.current_color() {
            last_color = Some(current);
        }
    }

    out
}

/// Arrow in the last active background color, ending with a full reset
fn closing_cap(active: SegmentColor) -> String {
    format!(
        " {}{}{} {}",
        reset_colors(),
        fmt_color_fg(active.bg),
        ICON_SEGMENT_SEP,
        reset_colors()
    )
}
