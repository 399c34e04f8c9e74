use crate::segments::{Segment, SegmentContext};
use crate::themes::*;
use crate::utils::highest_valid_dir;
use rustix::fs::Access;
use std::path::Path;
use tokio::fs;

const ICON_HOME: &str = "🏠";
const ICON_READ_ONLY: &str = "🔒";
const ELLIPSIS: &str = "\u{2026}";

/// Headlines when `$PWD` no longer exists, naming the closest valid parent
pub async fn cwd_exists(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let cwd = ctx.working_dir();

    if fs::metadata(&cwd).await.is_err() {
        let valid = highest_valid_dir(&cwd).await;
        segment.add_headline("Your current directory is invalid.");
        segment.add_headline(format!("Highest valid directory: {}", valid.display()));
    }

    segment
}

/// Current directory, optionally shortened to `N` folders by the parameter.
///
/// A missing, invalid or non-positive limit shows the full path.
pub async fn work_dir(ctx: SegmentContext) -> Segment {
    let max_depth = ctx
        .param()
        .and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|depth| *depth > 0);

    let cwd = ctx.working_dir().to_string_lossy().into_owned();
    let home = ctx.env().var("HOME").map(str::to_string);

    let mut segment = Segment::new();
    write_work_dir(&mut segment, &cwd, home.as_deref(), max_depth);
    segment
}

/// Split `cwd` into display names, replacing the home prefix by an icon
fn directory_names(cwd: &str, home: Option<&str>) -> Vec<String> {
    let display = match home {
        Some(home) if is_within(cwd, home) => {
            format!("{}{}", ICON_HOME, &cwd[home.len()..])
        }
        _ => cwd.to_string(),
    };

    let names: Vec<String> = display
        .trim_start_matches('/')
        .split('/')
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        vec!["/".to_string()]
    } else {
        names
    }
}

fn is_within(cwd: &str, home: &str) -> bool {
    !home.is_empty()
        && cwd
            .strip_prefix(home)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn write_work_dir(segment: &mut Segment, cwd: &str, home: Option<&str>, max_depth: Option<usize>) {
    let names = directory_names(cwd, home);
    let count = names.len();

    // Folders kept before the ellipsis; the tail keeps `max_depth - 1` more.
    let keep_before = max_depth.map(|depth| depth.saturating_sub(1).min(2));

    let thin_sep = |segment: &mut Segment| {
        segment.add_text(" ");
        segment.set_text_color(COLOR_DIR_SEP);
        segment.add_text(ICON_SEGMENT_SEP_THIN);
    };

    for (index, name) in names.iter().enumerate() {
        let visible = match (max_depth, keep_before) {
            (Some(depth), Some(before)) => index < before || index + depth > count,
            _ => true,
        };

        if visible {
            let is_home_dir = name == ICON_HOME;
            let is_last_dir = index == count - 1;
            if is_home_dir {
                segment.set_text_color(COLOR_HOME_DIR);
            } else if is_last_dir {
                segment.set_text_color(COLOR_LAST_DIR);
            } else {
                segment.set_text_color(COLOR_PATH_DIR);
            }

            if index > 0 {
                segment.add_text(" ");
            }
            segment.add_text(name);

            if is_home_dir && count > 1 {
                segment.add_text(" ");
                segment.set_text_color(SegmentColor::new(COLOR_HOME_DIR.bg, COLOR_PATH_DIR.bg));
                segment.add_text(ICON_SEGMENT_SEP);
            } else if index < count - 1 {
                thin_sep(segment);
            }
        } else if Some(index) == keep_before {
            segment.add_text(format!(" {}", ELLIPSIS));
            thin_sep(segment);
        }
    }
}

/// Lock icon when the current directory is not writable
pub async fn read_only(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    if !is_writable(&ctx.working_dir()) {
        segment.set_text_color(COLOR_READONLY_DIR);
        segment.add_text(ICON_READ_ONLY);
    }
    segment
}

fn is_writable(path: &Path) -> bool {
    rustix::fs::access(path, Access::WRITE_OK).is_ok()
}
