use crate::segments::{Segment, SegmentContext};
use crate::themes::*;
use crate::utils::command_stdout;
use regex::Regex;
use std::net::IpAddr;
use std::path::Path;
use std::sync::OnceLock;
use sysinfo::{Networks, System};
use tokio::fs;
use tracing::debug;

pub const MEMINFO_PATH: &str = "/proc/meminfo";

/// Number of nested shells from `$SHLVL`
pub async fn shell_level(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    if let Some(level) = ctx.env().var("SHLVL") {
        if level.trim().parse::<i64>().is_ok_and(|n| n > 0) {
            segment.set_text_color(COLOR_SHELL_LEVEL);
            segment.add_text(format!("⏫{}", level));
        }
    }
    segment
}

/// Key icon when sudo would run without asking for a password
pub async fn sudo_root(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    if command_stdout(ctx.cancellation(), &ctx.working_dir(), "sudo", &["-n", "echo"])
        .await
        .is_some()
    {
        segment.set_text_color(COLOR_SUDO_ROOT);
        segment.add_text("🔑");
    }
    segment
}

/// Kernel release, shown only where it matters: `/`, `/boot` and `/usr/src`
pub async fn kernel_version(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let cwd = ctx.working_dir();

    let relevant = cwd == Path::new("/") || cwd.starts_with("/boot") || cwd.starts_with("/usr/src");
    if relevant {
        if let Some(release) = System::kernel_version() {
            segment.set_text_color(COLOR_KERNEL);
            segment.add_text(format!("🐧 {}", release));
        }
    }
    segment
}

/// Memory counters in kB, `None` when the line was missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total: Option<u64>,
    pub mem_available: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free: Option<u64>,
}

impl MemInfo {
    pub fn parse(content: &str) -> Self {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"^(\w+):\s+(\d+)\s+kB").expect("valid regex"));

        let mut info = Self::default();
        for line in content.lines() {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            let value = caps[2].parse().ok();
            match &caps[1] {
                "MemTotal" => info.mem_total = value,
                "MemAvailable" => info.mem_available = value,
                "SwapTotal" => info.swap_total = value,
                "SwapFree" => info.swap_free = value,
                _ => {}
            }
        }
        info
    }

    pub fn ram_percent(&self) -> u64 {
        used_percent(self.mem_total, self.mem_available)
    }

    pub fn swap_percent(&self) -> u64 {
        used_percent(self.swap_total, self.swap_free)
    }

    /// Warning text when RAM or swap usage reaches `max_percent`
    pub fn warning(&self, max_percent: u64) -> Option<String> {
        let ram = self.ram_percent();
        let swap = self.swap_percent();
        if ram < max_percent && swap < max_percent {
            return None;
        }

        let mut text = format!("High memory usage: {}% RAM", ram);
        if swap != 0 {
            text.push_str(&format!(", {}% Swap", swap));
        }
        Some(text)
    }
}

fn used_percent(total: Option<u64>, free: Option<u64>) -> u64 {
    match (total, free) {
        (Some(total), Some(free)) if total > 0 => 100u64.saturating_sub(free * 100 / total),
        _ => 0,
    }
}

/// Headline when RAM or swap usage reaches the `N%` parameter
pub async fn warn_memory(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();

    let raw = ctx.param().unwrap_or_default();
    let Ok(max_percent) = raw.trim().trim_end_matches('%').parse::<u64>() else {
        debug!(segment = ctx.name(), param = raw, "invalid memory percentage");
        return segment;
    };

    let info = match fs::read_to_string(MEMINFO_PATH).await {
        Ok(content) => MemInfo::parse(&content),
        Err(err) => {
            debug!(segment = ctx.name(), error = %err, "cannot read {}", MEMINFO_PATH);
            MemInfo::default()
        }
    };

    if let Some(warning) = info.warning(max_percent) {
        segment.add_headline(warning);
    }
    segment
}

/// Red "Offline" block when no interface has a routable address
pub async fn warn_offline(_ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();

    let online = tokio::task::spawn_blocking(|| {
        let networks = Networks::new_with_refreshed_list();
        networks
            .iter()
            .flat_map(|(_, data)| data.ip_networks())
            .any(|network| is_routable(&network.addr))
    })
    .await
    .unwrap_or(true);

    if !online {
        segment.set_text_color(COLOR_OFFLINE);
        segment.add_text("Offline");
    }
    segment
}

fn is_routable(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => !v4.is_loopback() && !v4.is_link_local(),
        IpAddr::V6(v6) => !v6.is_loopback() && (v6.segments()[0] & 0xffc0) != 0xfe80,
    }
}
