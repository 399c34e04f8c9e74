use anyhow::Result;
use pico_args::Arguments;
use powerline_prompt::*;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug)]
struct Args {
    timeout: Option<String>,
    help: bool,
    segments: Vec<String>,
}

impl Args {
    fn from_env() -> Result<Self> {
        let mut args = Arguments::from_env();

        let help = args.contains(["-h", "--help"]);
        let timeout = args.opt_value_from_str("--timeout")?;
        let segments = args
            .finish()
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        Ok(Self {
            timeout,
            help,
            segments,
        })
    }
}

fn main() -> Result<()> {
    utils::logger::init();

    let args = Args::from_env()?;
    if args.help || args.segments.is_empty() {
        print_help();
        return Ok(());
    }

    let config = load_config(args.timeout, args.segments)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(generate_prompt(&config));

    // Timed-out providers may still be winding down; don't wait for them.
    runtime.shutdown_background();

    let prompt = result?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

async fn generate_prompt(config: &Config) -> Result<String> {
    let requests = SegmentRequest::parse_all(&config.segments);
    let scheduler = Scheduler::new(
        Arc::new(Registry::builtin()),
        Arc::new(Environment::from_process()),
        config.timeout,
    );

    let segments = scheduler.run(&requests).await?;
    Ok(render(&requests, &segments))
}

fn print_help() {
    println!("Powerline Prompt - Parallel, time-boxed powerline prompt for bash");
    println!();
    println!("USAGE:");
    println!("    powerline-prompt [OPTIONS] <SEGMENT>...");
    println!();
    println!("OPTIONS:");
    println!("    --timeout <DURATION>   Per-segment timeout, e.g. 500ms, 1s [default: 1s]");
    println!("    -h, --help             Show this help message");
    println!();
    println!("SEGMENTS:");
    println!("    cwd-exists             Check current working directory exists");
    println!("    warn-memory=N%         Warn if more than N% of memory/swap are used");
    println!("    term-title             Set terminal title");
    println!("    current-time           Display current time");
    println!("    go-version             Display installed go version, if any *.go files in current directory");
    println!("    python-version         Display installed python version, if any *.py files in current directory");
    println!("    nodejs-project         Display project title and version, if current directory contains package.json");
    println!("    docker-version         Display installed docker version, if current directory contains a Dockerfile");
    println!("    kernel-version         Display linux kernel version in /, /boot and /usr/src");
    println!("    warn-offline           Warn if no network connection available");
    println!("    shell-level            Display number of nested shells");
    println!("    virtual-env            Notify about activated python virtual environment");
    println!("    work-dir[=N]           Show current working directory, optionally limited to N folders");
    println!("    sudo-root              Warn if current terminal has root permissions via sudo");
    println!("    git                    Show git status, pushes, pulls, modified files and current branch");
    println!("    read-only              Warn if current directory is read only");
    println!("    ssh-connection         Warn if terminal is connected via ssh");
    println!("    user-name[=DEFAULT]    Show username except when it equals DEFAULT");
    println!("    exit-code=$?           Show if last command returned an error code");
    println!();
    println!("    Each segment may be requested once. Repeating a name, even with a");
    println!("    different parameter (work-dir work-dir=2), exits with status 1.");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    POWERLINE_PROMPT_TIMEOUT   Default for --timeout");
    println!("    POWERLINE_PROMPT_DEBUG     Enable debug logging on stderr");
    println!("    POWERLINE_PROMPT_LOG       Log filter when debugging [default: debug]");
    println!();
    println!("EXAMPLE:");
    println!("    # Output is quoted for PS1 assigned directly from the command substitution");
    println!("    PROMPT_COMMAND='PS1=\"$(powerline-prompt --timeout 500ms cwd-exists work-dir=3 git exit-code=$?)\"'");
}
