//! Error types for connection resolution.

use std::fmt;

use thiserror::Error;

use crate::endpoint::{AddressForm, Endpoint};
use crate::probe::ProbeFailure;
use crate::resolver::ResolutionState;

/// Diagnostic record for one failed probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Address that was tried
    pub address: String,
    pub form: AddressForm,
    pub endpoint: Endpoint,
    pub reason: ProbeFailure,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.address, self.form, self.reason)
    }
}

/// Errors that end a resolution without a connection.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The policy excluded every candidate endpoint
    #[error("No eligible endpoints for resource '{resource}' ({candidates} candidates)")]
    NoEligibleEndpoints { resource: String, candidates: usize },

    /// Every launched probe failed
    #[error("Unable to connect to resource '{resource}': {}", summarize(.failures, .timed_out))]
    ResourceUnreachable {
        resource: String,
        /// One entry per launched attempt, in priority order
        failures: Vec<AttemptFailure>,
        /// The overall resolution deadline expired before every probe reported
        timed_out: bool,
    },
}

impl ResolveError {
    /// Terminal state this error corresponds to
    pub fn state(&self) -> ResolutionState {
        match self {
            ResolveError::NoEligibleEndpoints { .. } => ResolutionState::NoEligibleEndpoints,
            ResolveError::ResourceUnreachable { .. } => ResolutionState::Unreachable,
        }
    }

    /// Per-attempt diagnostics (empty when nothing was probed)
    pub fn failures(&self) -> &[AttemptFailure] {
        match self {
            ResolveError::NoEligibleEndpoints { .. } => &[],
            ResolveError::ResourceUnreachable { failures, .. } => failures,
        }
    }

    /// Whether the resolution deadline expired
    pub fn is_timeout(&self) -> bool {
        matches!(self, ResolveError::ResourceUnreachable { timed_out: true, .. })
    }
}

fn summarize(failures: &[AttemptFailure], timed_out: &bool) -> String {
    let tried: Vec<String> = failures.iter().map(ToString::to_string).collect();
    let mut summary = format!("{} attempts failed ({})", failures.len(), tried.join("; "));
    if *timed_out {
        summary.push_str(", resolution deadline exceeded");
    }
    summary
}
