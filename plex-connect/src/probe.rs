//! Probe seam: a single connectivity attempt against one address.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::policy::ProbeAttempt;

/// Immutable request context handed to one probe.
///
/// Each attempt gets its own context; nothing in it is shared mutably with
/// other attempts. The credential is forwarded untouched.
#[derive(Clone)]
pub struct ProbeContext {
    /// Fully formed base address to probe
    pub address: String,
    token: Arc<str>,
    /// Bound on this attempt
    pub timeout: Duration,
}

impl ProbeContext {
    pub fn new(address: impl Into<String>, token: Arc<str>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            token,
            timeout,
        }
    }

    /// The opaque access credential for this attempt
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ProbeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeContext")
            .field("address", &self.address)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Why a probe attempt did not produce a session.
///
/// Failures are data: the resolver records them, it never propagates them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("rejected credentials: {0}")]
    Unauthorized(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Still running when the resolution deadline expired
    #[error("abandoned at resolution deadline")]
    Abandoned,

    /// The probe task ended without reporting (panicked)
    #[error("probe task failed: {0}")]
    TaskFailed(String),
}

/// Attempts a live connection against one address.
///
/// Implementations make exactly one attempt per call and never retry.
/// Dropping the returned future must release every resource the attempt
/// holds; the resolver relies on that for cancellation.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Live session handle produced by a successful attempt
    type Session: Send + 'static;

    async fn probe(&self, context: &ProbeContext) -> Result<Self::Session, ProbeFailure>;
}

/// Outcome of one attempt, consumed once during aggregation.
///
/// The `Result` keeps the session/error pair exclusive.
#[derive(Debug)]
pub struct ProbeResult<S> {
    pub attempt: ProbeAttempt,
    pub outcome: Result<S, ProbeFailure>,
}

impl<S> ProbeResult<S> {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn session(&self) -> Option<&S> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ProbeFailure> {
        self.outcome.as_ref().err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{AddressForm, Endpoint};

    fn attempt() -> ProbeAttempt {
        let endpoint = Arc::new(Endpoint::new("http", "10.0.0.2", 32400, true));
        ProbeAttempt::new(0, AddressForm::Plain, endpoint)
    }

    #[test]
    fn test_context_debug_hides_token() {
        let context = ProbeContext::new("http://10.0.0.2:32400", Arc::from("secret"), Duration::from_secs(1));
        let debug = format!("{:?}", context);

        assert!(!debug.contains("secret"));
        assert_eq!(context.token(), "secret");
    }

    #[test]
    fn test_result_exclusivity() {
        let success: ProbeResult<&str> = ProbeResult {
            attempt: attempt(),
            outcome: Ok("session"),
        };
        assert!(success.succeeded());
        assert_eq!(success.session(), Some(&"session"));
        assert!(success.error().is_none());

        let failure: ProbeResult<&str> = ProbeResult {
            attempt: attempt(),
            outcome: Err(ProbeFailure::Timeout(Duration::from_secs(5))),
        };
        assert!(!failure.succeeded());
        assert!(failure.session().is_none());
        assert_eq!(failure.error(), Some(&ProbeFailure::Timeout(Duration::from_secs(5))));
    }
}
