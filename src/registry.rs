use crate::segments::{directory, git, runtimes, session, system, Segment, SegmentContext};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Async function filling one segment
pub type ProviderFn = Arc<dyn Fn(SegmentContext) -> BoxFuture<'static, Segment> + Send + Sync>;

/// Wrap an async fn as a [`ProviderFn`]
pub fn provider<F, Fut>(f: F) -> ProviderFn
where
    F: Fn(SegmentContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Segment> + Send + 'static,
{
    Arc::new(move |ctx: SegmentContext| f(ctx).boxed())
}

/// Segment names mapped to providers, split by whether they take a parameter.
///
/// A name may appear in both maps with different meanings, e.g. `work-dir`
/// and `work-dir=N`.
#[derive(Clone, Default)]
pub struct Registry {
    without_param: HashMap<String, ProviderFn>,
    with_param: HashMap<String, ProviderFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in segment
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry
            .register("cwd-exists", directory::cwd_exists)
            .register("shell-level", system::shell_level)
            .register("term-title", session::term_title)
            .register("sudo-root", system::sudo_root)
            .register("python-version", runtimes::python_version)
            .register("go-version", runtimes::go_version)
            .register("nodejs-project", runtimes::nodejs_project)
            .register("work-dir", directory::work_dir)
            .register("read-only", directory::read_only)
            .register("kernel-version", system::kernel_version)
            .register("git", git::git)
            .register("warn-offline", system::warn_offline)
            .register("virtual-env", runtimes::virtual_env)
            .register("docker-version", runtimes::docker_version)
            .register("current-time", session::current_time)
            .register("ssh-connection", session::ssh_connection)
            .register("user-name", session::user_name);

        registry
            .register_with_param("exit-code", session::exit_code)
            .register_with_param("work-dir", directory::work_dir)
            .register_with_param("warn-memory", system::warn_memory)
            .register_with_param("user-name", session::user_name);

        registry
    }

    pub fn register<F, Fut>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(SegmentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Segment> + Send + 'static,
    {
        self.without_param.insert(name.into(), provider(f));
        self
    }

    pub fn register_with_param<F, Fut>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(SegmentContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Segment> + Send + 'static,
    {
        self.with_param.insert(name.into(), provider(f));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ProviderFn> {
        self.without_param.get(name)
    }

    pub fn get_with_param(&self, name: &str) -> Option<&ProviderFn> {
        self.with_param.get(name)
    }

    /// All registered names, sorted, each listed once
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .without_param
            .keys()
            .chain(self.with_param.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut without: Vec<_> = self.without_param.keys().collect();
        let mut with: Vec<_> = self.with_param.keys().collect();
        without.sort();
        with.sort();
        f.debug_struct("Registry")
            .field("without_param", &without)
            .field("with_param", &with)
            .finish()
    }
}
