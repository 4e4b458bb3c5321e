//! Endpoint ordering and filtering policy.
//!
//! Turns a resolution request into the ordered list of probe attempts:
//! ineligible endpoints are dropped, local endpoints move to the front,
//! duplicates collapse, and each survivor expands into one attempt per
//! allowed address form. The resulting order is also the tie-break order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::endpoint::{AddressForm, Endpoint};
use crate::error::ResolveError;

/// Everything needed to resolve one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Resource name, used in diagnostics only
    pub resource: String,
    /// Candidate endpoints; order is irrelevant
    pub endpoints: Vec<Endpoint>,
    /// Whether the caller owns the resource; non-owners never probe local endpoints
    pub owned: bool,
    /// `None` tries both address forms, `Some` restricts to one
    pub preference: Option<AddressForm>,
}

impl ResolutionRequest {
    pub fn new(resource: impl Into<String>, endpoints: Vec<Endpoint>) -> Self {
        Self {
            resource: resource.into(),
            endpoints,
            owned: false,
            preference: None,
        }
    }

    pub fn owned(mut self, owned: bool) -> Self {
        self.owned = owned;
        self
    }

    pub fn prefer(mut self, preference: Option<AddressForm>) -> Self {
        self.preference = preference;
        self
    }

    /// Forms each eligible endpoint is probed through, in preference order
    pub fn forms(&self) -> Vec<AddressForm> {
        match self.preference {
            Some(form) => vec![form],
            None => AddressForm::ALL.to_vec(),
        }
    }

    /// Whether the policy allows probing `endpoint`
    pub fn is_eligible(&self, endpoint: &Endpoint) -> bool {
        self.owned || !endpoint.is_local
    }
}

/// One (endpoint, address form) pair to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAttempt {
    /// Position of the source endpoint in policy order
    pub rank: usize,
    pub form: AddressForm,
    pub endpoint: Arc<Endpoint>,
    /// Address handed to the probe
    pub address: String,
}

impl ProbeAttempt {
    pub fn new(rank: usize, form: AddressForm, endpoint: Arc<Endpoint>) -> Self {
        let address = endpoint.address_for(form);
        Self {
            rank,
            form,
            endpoint,
            address,
        }
    }

    /// Tie-break key: earlier endpoint first, then the secure form
    pub fn priority(&self) -> (usize, AddressForm) {
        (self.rank, self.form)
    }
}

/// Filter, sort and deduplicate the request's endpoints.
pub fn eligible_endpoints(request: &ResolutionRequest) -> Vec<Endpoint> {
    let mut endpoints: Vec<Endpoint> = request
        .endpoints
        .iter()
        .filter(|e| request.is_eligible(e))
        .cloned()
        .collect();

    // Stable: directory order is kept within each locality.
    endpoints.sort_by_key(|e| !e.is_local);

    let mut seen = HashSet::new();
    endpoints.retain(|e| seen.insert(e.clone()));
    endpoints
}

/// Expand a request into its probe attempts, in priority order.
///
/// # Errors
///
/// `ResolveError::NoEligibleEndpoints` when nothing survives the filter.
pub fn plan(request: &ResolutionRequest) -> Result<Vec<ProbeAttempt>, ResolveError> {
    let endpoints = eligible_endpoints(request);
    if endpoints.is_empty() {
        return Err(ResolveError::NoEligibleEndpoints {
            resource: request.resource.clone(),
            candidates: request.endpoints.len(),
        });
    }

    let forms = request.forms();
    let attempts = endpoints
        .into_iter()
        .enumerate()
        .flat_map(|(rank, endpoint)| {
            let endpoint = Arc::new(endpoint);
            forms
                .iter()
                .map(move |form| ProbeAttempt::new(rank, *form, Arc::clone(&endpoint)))
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(attempts)
}
