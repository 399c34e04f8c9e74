use crate::error::PromptError;
use crate::registry::{ProviderFn, Registry};
use crate::segments::{Environment, Segment, SegmentContext, SegmentMap};
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One requested segment: `name` or `name=param`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRequest {
    pub name: String,
    pub param: Option<String>,
}

impl SegmentRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: None,
        }
    }

    pub fn with_param(name: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: Some(param.into()),
        }
    }

    /// Split on the first `=`, ignoring whitespace around it
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((name, param)) => Self::with_param(name.trim(), param.trim()),
            None => Self::new(spec.trim()),
        }
    }

    pub fn parse_all<I, S>(specs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        specs.into_iter().map(|spec| Self::parse(spec.as_ref())).collect()
    }
}

impl FromStr for SegmentRequest {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SegmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}={}", self.name, param),
            None => f.write_str(&self.name),
        }
    }
}

/// Runs every requested segment concurrently, each boxed in by its own timeout.
pub struct Scheduler {
    registry: Arc<Registry>,
    env: Arc<Environment>,
    timeout: Duration,
}

impl Scheduler {
    pub fn new(registry: Arc<Registry>, env: Arc<Environment>, timeout: Duration) -> Self {
        Self {
            registry,
            env,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve every request against the registry before anything runs
    pub fn validate<'a>(
        &self,
        requests: &'a [SegmentRequest],
    ) -> Result<Vec<(&'a SegmentRequest, ProviderFn)>, PromptError> {
        let mut seen = HashSet::with_capacity(requests.len());
        let mut jobs = Vec::with_capacity(requests.len());

        for request in requests {
            let provider = match request.param {
                Some(_) => self.registry.get_with_param(&request.name).ok_or_else(|| {
                    if self.registry.get(&request.name).is_some() {
                        PromptError::ParameterNotAccepted(request.name.clone())
                    } else {
                        PromptError::UnknownSegment(request.name.clone())
                    }
                })?,
                None => self.registry.get(&request.name).ok_or_else(|| {
                    if self.registry.get_with_param(&request.name).is_some() {
                        PromptError::ParameterRequired(request.name.clone())
                    } else {
                        PromptError::UnknownSegment(request.name.clone())
                    }
                })?,
            };

            if !seen.insert(request.name.as_str()) {
                return Err(PromptError::DuplicateSegment(request.name.clone()));
            }
            jobs.push((request, Arc::clone(provider)));
        }

        Ok(jobs)
    }

    /// Run all requests and wait until each one finished or timed out.
    ///
    /// Every requested name is present in the returned map exactly once.
    pub async fn run(&self, requests: &[SegmentRequest]) -> Result<SegmentMap, PromptError> {
        let jobs = self.validate(requests)?;
        let results = Arc::new(Mutex::new(SegmentMap::with_capacity(jobs.len())));

        debug!(count = jobs.len(), timeout = ?self.timeout, "starting segment tasks");

        let tasks: Vec<_> = jobs
            .into_iter()
            .map(|(request, provider)| {
                let ctx = SegmentContext::new(
                    request.name.clone(),
                    request.param.clone(),
                    Arc::clone(&self.env),
                    CancellationToken::new(),
                );
                tokio::spawn(run_segment(ctx, provider, self.timeout, Arc::clone(&results)))
            })
            .collect();

        for joined in join_all(tasks).await {
            joined?;
        }

        let segments = std::mem::take(&mut *results.lock());
        Ok(segments)
    }
}

async fn run_segment(
    ctx: SegmentContext,
    provider: ProviderFn,
    timeout: Duration,
    results: Arc<Mutex<SegmentMap>>,
) {
    let name = ctx.name().to_string();
    let cancel = ctx.cancellation().clone();
    let started = Instant::now();

    // Own task so a provider that outlives the timeout keeps running detached
    // until it notices the cancellation.
    let handle = tokio::spawn(provider(ctx));

    let segment = match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(segment)) => {
            debug!(segment = %name, elapsed = ?started.elapsed(), "segment finished");
            segment
        }
        Ok(Err(err)) => {
            warn!(segment = %name, error = %err, "segment provider failed");
            Segment::new()
        }
        Err(_) => {
            cancel.cancel();
            debug!(segment = %name, ?timeout, "segment timed out");
            Segment::timed_out(&name)
        }
    };

    results.lock().insert(name, segment);
}
