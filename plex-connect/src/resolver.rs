//! Connection resolver: concurrent probing with deterministic selection.
//!
//! Every planned attempt runs as its own task. The resolver waits for all of
//! them (or the overall deadline), then walks the attempts in priority order
//! and takes the first success. Completion order never influences the winner.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::ResolverConfig;
use crate::endpoint::{AddressForm, Endpoint};
use crate::error::{AttemptFailure, ResolveError};
use crate::policy::{plan, ProbeAttempt, ResolutionRequest};
use crate::probe::{Probe, ProbeContext, ProbeFailure, ProbeResult};

/// Lifecycle of one resolution call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Idle,
    Probing,
    Resolved,
    Unreachable,
    NoEligibleEndpoints,
}

impl ResolutionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResolutionState::Idle | ResolutionState::Probing)
    }
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionState::Idle => "idle",
            ResolutionState::Probing => "probing",
            ResolutionState::Resolved => "resolved",
            ResolutionState::Unreachable => "unreachable",
            ResolutionState::NoEligibleEndpoints => "no-eligible-endpoints",
        };
        f.write_str(name)
    }
}

/// A successful resolution.
#[derive(Debug)]
pub struct Resolution<S> {
    /// Live session bound to the winning address
    pub session: S,
    pub endpoint: Endpoint,
    pub form: AddressForm,
    pub address: String,
    /// Number of attempts launched
    pub attempts: usize,
    /// Attempts that failed, for diagnostics
    pub failures: Vec<AttemptFailure>,
}

impl<S> Resolution<S> {
    pub fn state(&self) -> ResolutionState {
        ResolutionState::Resolved
    }

    pub fn into_session(self) -> S {
        self.session
    }
}

/// Resolves a resource's candidate endpoints into one live session.
///
/// The resolver holds no per-call state; every call plans, probes and
/// reduces from scratch.
pub struct Resolver<P: Probe> {
    probe: Arc<P>,
    config: ResolverConfig,
}

impl<P: Probe> Resolver<P> {
    /// Create a resolver with default configuration
    pub fn new(probe: P) -> Self {
        Self::with_config(probe, ResolverConfig::default())
    }

    pub fn with_config(probe: P, config: ResolverConfig) -> Self {
        Self {
            probe: Arc::new(probe),
            config,
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Resolve `request`, presenting `token` to every probe
    ///
    /// # Errors
    ///
    /// * `NoEligibleEndpoints` - the policy left nothing to probe; no probe ran
    /// * `ResourceUnreachable` - every attempt failed, with one diagnostic each
    pub async fn resolve(
        &self,
        request: &ResolutionRequest,
        token: &str,
    ) -> Result<Resolution<P::Session>, ResolveError> {
        let attempts = match plan(request) {
            Ok(attempts) => attempts,
            Err(e) => {
                info!(resource = %request.resource, state = %e.state(), "{}", e);
                return Err(e);
            }
        };

        info!(
            resource = %request.resource,
            attempts = attempts.len(),
            state = %ResolutionState::Probing,
            "Probing resource connections"
        );
        let started = Instant::now();

        let tasks = self.launch(&attempts, Arc::from(token));
        let (outcomes, timed_out) = self.join(tasks, attempts.len()).await;

        let results = attempts
            .into_iter()
            .zip(outcomes)
            .map(|(attempt, outcome)| {
                let outcome = outcome.unwrap_or_else(|| {
                    Err(if timed_out {
                        ProbeFailure::Abandoned
                    } else {
                        ProbeFailure::TaskFailed("probe task did not report".to_string())
                    })
                });
                ProbeResult { attempt, outcome }
            })
            .collect::<Vec<_>>();

        for result in &results {
            info!(
                "Testing connection: {} {}",
                result.attempt.address,
                if result.succeeded() { "OK" } else { "ERR" }
            );
        }

        let resolved = select(&request.resource, results, timed_out);
        match &resolved {
            Ok(resolution) => info!(
                resource = %request.resource,
                elapsed_ms = started.elapsed().as_millis() as u64,
                state = %resolution.state(),
                "Connecting to {}",
                resolution.address
            ),
            Err(e) => warn!(
                resource = %request.resource,
                elapsed_ms = started.elapsed().as_millis() as u64,
                state = %e.state(),
                "{}",
                e
            ),
        }
        resolved
    }

    /// Spawn one task per attempt, each bounded by the probe timeout
    fn launch(
        &self,
        attempts: &[ProbeAttempt],
        token: Arc<str>,
    ) -> JoinSet<(usize, Result<P::Session, ProbeFailure>)> {
        let mut tasks = JoinSet::new();
        for (index, attempt) in attempts.iter().enumerate() {
            let probe = Arc::clone(&self.probe);
            let context = ProbeContext::new(
                attempt.address.clone(),
                Arc::clone(&token),
                self.config.probe_timeout,
            );
            tasks.spawn(async move {
                let outcome = match tokio::time::timeout(context.timeout, probe.probe(&context)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(ProbeFailure::Timeout(context.timeout)),
                };
                (index, outcome)
            });
        }
        tasks
    }

    /// Wait for every task, or abandon the stragglers at the deadline
    async fn join(
        &self,
        mut tasks: JoinSet<(usize, Result<P::Session, ProbeFailure>)>,
        expected: usize,
    ) -> (Vec<Option<Result<P::Session, ProbeFailure>>>, bool) {
        let mut outcomes: Vec<Option<Result<P::Session, ProbeFailure>>> =
            (0..expected).map(|_| None).collect();
        // No deadline when it lies beyond what `Instant` can represent.
        let deadline = tokio::time::Instant::now().checked_add(self.config.overall_deadline);
        let mut timed_out = false;

        loop {
            let joined = match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, tasks.join_next()).await,
                None => Ok(tasks.join_next().await),
            };
            match joined {
                Ok(Some(Ok((index, outcome)))) => outcomes[index] = Some(outcome),
                Ok(Some(Err(e))) => warn!("Probe task ended abnormally: {}", e),
                Ok(None) => break,
                Err(_) => {
                    timed_out = true;
                    warn!(
                        outstanding = tasks.len(),
                        "Resolution deadline of {:?} exceeded, abandoning probes",
                        self.config.overall_deadline
                    );
                    tasks.abort_all();
                    // Aborted probes must be dropped before returning.
                    while tasks.join_next().await.is_some() {}
                    break;
                }
            }
        }

        (outcomes, timed_out)
    }
}

/// Reduce the joined results: first success in priority order wins.
fn select<S>(
    resource: &str,
    mut results: Vec<ProbeResult<S>>,
    timed_out: bool,
) -> Result<Resolution<S>, ResolveError> {
    results.sort_by_key(|r| r.attempt.priority());
    let attempts = results.len();

    let mut winner = None;
    let mut failures = Vec::new();
    for result in results {
        let ProbeResult { attempt, outcome } = result;
        match outcome {
            Ok(session) if winner.is_none() => winner = Some((attempt, session)),
            Ok(_) => debug!("Discarding slower-ranked session for {}", attempt.address),
            Err(reason) => failures.push(AttemptFailure {
                address: attempt.address,
                form: attempt.form,
                endpoint: attempt.endpoint.as_ref().clone(),
                reason,
            }),
        }
    }

    match winner {
        Some((attempt, session)) => Ok(Resolution {
            session,
            endpoint: attempt.endpoint.as_ref().clone(),
            form: attempt.form,
            address: attempt.address,
            attempts,
            failures,
        }),
        None => Err(ResolveError::ResourceUnreachable {
            resource: resource.to_string(),
            failures,
            timed_out,
        }),
    }
}
