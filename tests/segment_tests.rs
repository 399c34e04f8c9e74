use powerline_prompt::segments::{directory, git, runtimes, session, system};
use powerline_prompt::themes::*;
use powerline_prompt::*;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use tokio_util::sync::CancellationToken;

fn ctx(name: &str, param: Option<&str>, vars: &[(&str, &str)]) -> SegmentContext {
    SegmentContext::new(
        name,
        param.map(str::to_string),
        Arc::new(Environment::from_vars(vars.iter().copied())),
        CancellationToken::new(),
    )
}

#[tokio::test]
async fn test_shell_level_segment() {
    let segment = system::shell_level(ctx("shell-level", None, &[("SHLVL", "2")])).await;
    assert!(segment.is_printable());
    assert_eq!(segment.current_color(), Some(COLOR_SHELL_LEVEL));
    assert!(segment.text().ends_with("⏫2"));

    let segment = system::shell_level(ctx("shell-level", None, &[("SHLVL", "0")])).await;
    assert_eq!(segment, Segment::new());
}

#[tokio::test]
async fn test_exit_code_segment() {
    let segment = session::exit_code(ctx("exit-code", Some("0"), &[])).await;
    assert!(!segment.is_printable());

    let segment = session::exit_code(ctx("exit-code", Some("127"), &[])).await;
    assert_eq!(segment.begin_color(), Some(COLOR_CMD_FAILED));
    assert!(segment.text().ends_with("⚑ 127"));
}

#[tokio::test]
async fn test_user_name_segment() {
    let vars = [("USER", "ada")];

    let hidden = session::user_name(ctx("user-name", Some("ada"), &vars)).await;
    assert!(!hidden.is_printable());

    let shown = session::user_name(ctx("user-name", Some("root"), &vars)).await;
    assert!(shown.text().ends_with("👤 ada"));

    let no_default = session::user_name(ctx("user-name", None, &vars)).await;
    assert!(no_default.is_printable());
}

#[tokio::test]
async fn test_ssh_and_time_segments() {
    let ssh = session::ssh_connection(ctx("ssh-connection", None, &[("SSH_CLIENT", "10.0.0.2 50000 22")])).await;
    assert!(ssh.text().ends_with("SSH"));

    let local = session::ssh_connection(ctx("ssh-connection", None, &[])).await;
    assert!(!local.is_printable());

    let time = session::current_time(ctx("current-time", None, &[])).await;
    assert_eq!(time.current_color(), Some(COLOR_TIME));
    assert_eq!(time.text(), format!("{}\\t", COLOR_TIME.escape()));
}

#[tokio::test]
async fn test_term_title_is_text_without_color() {
    let segment = session::term_title(ctx("term-title", None, &[])).await;
    assert_eq!(segment.text(), "\\[\\e]0;\\u@\\h: \\w\\a\\]");
    assert!(!segment.is_printable());
}

#[tokio::test]
async fn test_cwd_exists_reports_highest_valid_directory() {
    let temp_dir = TempDir::new().unwrap();
    let gone = temp_dir.path().join("removed").join("child");
    let pwd = gone.to_str().unwrap();

    let segment = directory::cwd_exists(ctx("cwd-exists", None, &[("PWD", pwd)])).await;
    assert_eq!(segment.headlines().len(), 2);
    assert_eq!(segment.headlines()[0], "Your current directory is invalid.");
    assert!(segment.headlines()[1].ends_with(temp_dir.path().to_str().unwrap()));
    assert!(!segment.is_printable());

    let segment = directory::cwd_exists(ctx(
        "cwd-exists",
        None,
        &[("PWD", temp_dir.path().to_str().unwrap())],
    ))
    .await;
    assert_eq!(segment, Segment::new());
}

#[tokio::test]
async fn test_work_dir_with_depth_parameter() {
    let vars = [("PWD", "/home/ada/src/tools/app/web"), ("HOME", "/home/ada")];
    let segment = directory::work_dir(ctx("work-dir", Some("2"), &vars)).await;

    assert!(segment.is_printable());
    assert_eq!(segment.begin_color(), Some(COLOR_HOME_DIR));
    assert_eq!(segment.current_color(), Some(COLOR_LAST_DIR));
    assert!(segment.text().contains('\u{2026}'));
    assert!(segment.text().ends_with("web"));
    assert!(!segment.text().contains("tools"));
}

#[tokio::test]
async fn test_read_only_on_writable_directory() {
    let temp_dir = TempDir::new().unwrap();
    let segment = directory::read_only(ctx(
        "read-only",
        None,
        &[("PWD", temp_dir.path().to_str().unwrap())],
    ))
    .await;
    assert!(!segment.is_printable());
}

#[tokio::test]
async fn test_nodejs_project_reads_nearest_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("src").join("components");
    fs::create_dir_all(&nested).await.unwrap();
    fs::write(
        temp_dir.path().join("package.json"),
        r#"{"name": "web-$(whoami)", "version": "1.2.3"}"#,
    )
    .await
    .unwrap();

    let segment = runtimes::nodejs_project(ctx("nodejs-project", None, &[("PWD", nested.to_str().unwrap())])).await;

    assert_eq!(segment.current_color(), Some(COLOR_NODEJS));
    assert!(segment.text().contains(r"web-\\$(whoami) 1.2.3"));
}

#[tokio::test]
async fn test_nodejs_project_ignores_broken_manifest() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("package.json"), "{ not json").await.unwrap();

    let segment = runtimes::nodejs_project(ctx(
        "nodejs-project",
        None,
        &[("PWD", temp_dir.path().to_str().unwrap())],
    ))
    .await;
    assert_eq!(segment, Segment::new());
}

#[tokio::test]
async fn test_language_segments_need_matching_files() {
    let temp_dir = TempDir::new().unwrap();
    let vars = [("PWD", temp_dir.path().to_str().unwrap())];

    assert_eq!(runtimes::python_version(ctx("python-version", None, &vars)).await, Segment::new());
    assert_eq!(runtimes::go_version(ctx("go-version", None, &vars)).await, Segment::new());
    assert_eq!(runtimes::docker_version(ctx("docker-version", None, &vars)).await, Segment::new());
}

#[tokio::test]
async fn test_virtual_env_names_project() {
    let segment = runtimes::virtual_env(ctx(
        "virtual-env",
        None,
        &[("VIRTUAL_ENV", "/home/ada/src/app/.venv"), ("PWD", "/")],
    ))
    .await;

    assert_eq!(segment.begin_color(), Some(COLOR_VIRTUAL_ENV));
    assert!(segment.text().contains("app"));

    let inactive = runtimes::virtual_env(ctx("virtual-env", None, &[])).await;
    assert!(!inactive.is_printable());
}

#[tokio::test]
async fn test_kernel_version_only_in_system_dirs() {
    let segment = system::kernel_version(ctx("kernel-version", None, &[("PWD", "/home")])).await;
    assert_eq!(segment, Segment::new());
}

#[tokio::test]
async fn test_warn_memory_rejects_bad_percentage() {
    let segment = system::warn_memory(ctx("warn-memory", Some("lots"), &[])).await;
    assert_eq!(segment, Segment::new());
}

#[tokio::test]
async fn test_warn_memory_zero_threshold_always_warns() {
    let segment = system::warn_memory(ctx("warn-memory", Some("0%"), &[])).await;
    assert_eq!(segment.headlines().len(), 1);
    assert!(segment.headlines()[0].starts_with("High memory usage: "));
    assert!(!segment.is_printable());
}

#[tokio::test]
async fn test_git_segment_outside_repository() {
    let temp_dir = TempDir::new().unwrap();
    let segment = git::git(ctx("git", None, &[("PWD", temp_dir.path().to_str().unwrap())])).await;
    assert!(!segment.is_printable());
}

#[tokio::test]
async fn test_git_segment_in_clean_repository() {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path();

    let init = std::process::Command::new("git")
        .args(["init", "--initial-branch=main"])
        .current_dir(repo_path)
        .output();
    match init {
        Ok(output) if output.status.success() => {}
        // git not available on this machine
        _ => return,
    }

    let segment = git::git(ctx("git", None, &[("PWD", repo_path.to_str().unwrap())])).await;
    assert!(segment.is_printable());
    assert_eq!(segment.current_color(), Some(COLOR_GIT_CLEAN));

    fs::write(repo_path.join("notes.md"), "draft").await.unwrap();
    let segment = git::git(ctx("git", None, &[("PWD", repo_path.to_str().unwrap())])).await;
    assert_eq!(segment.current_color(), Some(COLOR_GIT_DIRTY));
}
