use crate::segments::{Segment, SegmentContext};
use crate::themes::*;
use crate::utils::{command_combined_output, command_stdout, find_file_upwards, has_file_with_extension};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Installed python version when the directory holds `*.py` files and no
/// virtual environment is active
pub async fn python_version(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let cwd = ctx.working_dir();

    if ctx.env().var("VIRTUAL_ENV").is_some() || !has_file_with_extension(&cwd, "py").await {
        return segment;
    }

    if let Some(out) = command_stdout(ctx.cancellation(), &cwd, "python3", &["--version"]).await {
        if let Some(version) = out.split(' ').nth(1) {
            segment.set_text_color(COLOR_PYTHON);
            segment.add_text(format!("py{}", version.trim_end()));
        }
    }
    segment
}

/// Installed go version when the directory holds `*.go` files
pub async fn go_version(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let cwd = ctx.working_dir();

    if !has_file_with_extension(&cwd, "go").await {
        return segment;
    }

    // "go version go1.22.1 linux/amd64"
    if let Some(out) = command_stdout(ctx.cancellation(), &cwd, "go", &["version"]).await {
        if let Some(version) = out.split(' ').nth(2) {
            segment.set_text_color(COLOR_GOLANG);
            segment.add_text(version.trim_end());
        }
    }
    segment
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default = "unknown_version")]
    version: String,
}

fn unknown_name() -> String {
    "?".to_string()
}

fn unknown_version() -> String {
    "!".to_string()
}

/// Name and version from the nearest `package.json`
pub async fn nodejs_project(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();

    let Some(manifest) = find_file_upwards(&ctx.working_dir(), "package.json").await else {
        return segment;
    };

    match read_package_json(&manifest).await {
        Ok(package) => {
            segment.set_text_color(COLOR_NODEJS);
            segment.add_text(format!("\u{2B22} {} {}", package.name, package.version));
        }
        Err(err) => {
            debug!(segment = ctx.name(), path = %manifest.display(), error = %err, "unreadable package.json");
        }
    }
    segment
}

async fn read_package_json(path: &Path) -> anyhow::Result<PackageJson> {
    let raw = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Docker client version when the directory holds a `Dockerfile`
pub async fn docker_version(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();
    let cwd = ctx.working_dir();

    if fs::metadata(cwd.join("Dockerfile")).await.is_err() {
        return segment;
    }

    let version = command_stdout(
        ctx.cancellation(),
        &cwd,
        "docker",
        &["version", "--format", "{{.Client.Version}}"],
    )
    .await
    .unwrap_or_default();

    let version = version.trim();
    if !version.is_empty() {
        segment.set_text_color(COLOR_DOCKER);
        segment.add_text(format!("🐋 {}", version));
    }
    segment
}

/// Name of the active python virtual environment and its interpreter version
pub async fn virtual_env(ctx: SegmentContext) -> Segment {
    let mut segment = Segment::new();

    let Some(env_path) = ctx.env().var("VIRTUAL_ENV") else {
        return segment;
    };

    segment.set_text_color(COLOR_VIRTUAL_ENV);
    segment.add_text(virtual_env_name(Path::new(env_path)));

    // Python 2 reports its version on stderr.
    if let Some(out) =
        command_combined_output(ctx.cancellation(), &ctx.working_dir(), "python", &["--version"]).await
    {
        let version = out.trim_start_matches("Python ").trim_end_matches('\n');
        segment.add_text(format!(" py{}", version));
    }
    segment
}

/// `~/src/app/.venv` is named after `app`, any other env after itself
fn virtual_env_name(path: &Path) -> String {
    let path = match path.file_name() {
        Some(name) if name == ".venv" => path.parent().unwrap_or(path),
        _ => path,
    };
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
