use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Snapshot of the environment variables the providers read.
///
/// Captured once at startup so providers never touch process-wide state and
/// tests can hand in fabricated values.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn from_process() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `key`, treating an empty value like an unset one
    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Logical working directory: `$PWD`, falling back to the process cwd
    pub fn working_dir(&self) -> PathBuf {
        match self.var("PWD") {
            Some(pwd) => PathBuf::from(pwd),
            None => env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
        }
    }

    pub fn home_dir(&self) -> Option<PathBuf> {
        self.var("HOME").map(PathBuf::from).or_else(dirs::home_dir)
    }
}

/// Everything a provider gets for one run.
#[derive(Debug, Clone)]
pub struct SegmentContext {
    name: String,
    param: Option<String>,
    env: Arc<Environment>,
    cancel: CancellationToken,
}

impl SegmentContext {
    pub fn new(
        name: impl Into<String>,
        param: Option<String>,
        env: Arc<Environment>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            name: name.into(),
            param,
            env,
            cancel,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn working_dir(&self) -> PathBuf {
        self.env.working_dir()
    }

    /// Cancelled by the scheduler once this segment has timed out
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
