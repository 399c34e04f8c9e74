use crate::segments::{Segment, SegmentContext};
use crate::themes::*;

/// Terminal title escape (`user@host: cwd`), no visible glyph
pub async fn term_title(_ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    segment.add_prompt_escape("\\[\\e]0;\\u@\\h: \\w\\a\\]");
    segment
}

/// Time placeholder the shell expands when drawing the prompt
pub async fn current_time(_ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    segment.set_text_color(COLOR_TIME);
    segment.add_prompt_escape("\\t");
    segment
}

pub async fn ssh_connection(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    if ctx.env().var("SSH_CLIENT").is_some() {
        segment.set_text_color(COLOR_SSH);
        segment.add_text("SSH");
    }
    segment
}

/// `$USER`, hidden when it equals the optional default given as parameter
pub async fn user_name(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let hidden = ctx.param().unwrap_or_default();

    if let Some(user) = ctx.env().var("USER").filter(|user| *user != hidden) {
        segment.set_text_color(COLOR_USERNAME);
        segment.add_text(format!("👤 {}", user));
    }
    segment
}

/// Flag with the exit status of the previous command, hidden on `0`
pub async fn exit_code(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let code = ctx.param().unwrap_or_default().trim();

    if !code.is_empty() && code != "0" {
        segment.set_text_color(COLOR_CMD_FAILED);
        segment.add_text(format!("⚑ {}", code));
    }
    segment
}
