use crate::segments::{Segment, SegmentContext};
use crate::themes::{COLOR_GIT_CLEAN, COLOR_GIT_DIRTY};
use crate::utils::command_stdout;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

const ICON_GIT: &str = "\u{E0A0}";

/// Parsed `git status --porcelain --branch` output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitStatus {
    pub branch: String,
    pub ahead: u32,
    pub behind: u32,
    pub changes: usize,
}

impl GitStatus {
    pub fn parse(porcelain: &str) -> Self {
        let first_line = porcelain.lines().next().unwrap_or_default();
        let header = first_line.strip_prefix("## ").unwrap_or(first_line);
        let branch = header.split("...").next().unwrap_or_default().to_string();

        let (mut ahead, mut behind) = (0, 0);
        if let Some((_, tracking)) = first_line.split_once(" [") {
            ahead = capture_count(ahead_regex(), tracking);
            behind = capture_count(behind_regex(), tracking);
        }

        Self {
            branch,
            ahead,
            behind,
            changes: porcelain.matches('\n').count().saturating_sub(1),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.changes == 0
    }
}

fn ahead_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ahead (\d+)").expect("valid regex"))
}

fn behind_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"behind (\d+)").expect("valid regex"))
}

fn capture_count(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Change count as a parenthesized digit up to 20, plain number above
fn format_changes(changes: usize) -> String {
    if changes <= 20 {
        char::from_u32(9331 + changes as u32)
            .map(String::from)
            .unwrap_or_else(|| changes.to_string())
    } else {
        changes.to_string()
    }
}

/// Branch, change count and ahead/behind arrows for the enclosing repository
pub async fn git(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let cwd = ctx.working_dir();

    if !is_inside_repository(cwd.clone()).await {
        debug!(segment = ctx.name(), "not in a git repository");
        return segment;
    }

    let Some(porcelain) = command_stdout(
        ctx.cancellation(),
        &cwd,
        "git",
        &["status", "--porcelain", "--branch", "--untracked-files=all"],
    )
    .await
    else {
        return segment;
    };

    let status = GitStatus::parse(&porcelain);
    debug!(
        segment = ctx.name(),
        branch = %status.branch,
        changes = status.changes,
        ahead = status.ahead,
        behind = status.behind,
        "git status"
    );
    write_status(&mut segment, &status);
    segment
}

fn write_status(segment: &mut Segment, status: &GitStatus) {
    if status.is_clean() {
        segment.set_text_color(COLOR_GIT_CLEAN);
        segment.add_text(format!("{} {}", ICON_GIT, status.branch));
    } else {
        segment.set_text_color(COLOR_GIT_DIRTY);
        segment.add_text(format!(
            "{} {} {}",
            ICON_GIT,
            status.branch,
            format_changes(status.changes)
        ));
    }

    if status.ahead > 0 {
        segment.add_text(format!(" ⇑{}", status.ahead));
    }
    if status.behind > 0 {
        segment.add_text(format!(" ⇓{}", status.behind));
    }
}

// Repository discovery walks the filesystem, so keep it off the async workers.
async fn is_inside_repository(cwd: PathBuf) -> bool {
    tokio::task::spawn_blocking(move || gix::discover(&cwd).is_ok())
        .await
        .unwrap_or(false)
}
