//! Test helpers: a probe with scripted, reproducible latencies

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use plex_connect::{Endpoint, Probe, ProbeContext, ProbeFailure};

/// How a scripted attempt ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Fail,
    Panic,
}

/// Scripted behaviour for one address
#[derive(Debug, Clone, Copy)]
pub struct Script {
    pub latency: Duration,
    pub outcome: Outcome,
}

/// Probe whose outcome per address is fixed in advance.
///
/// Records every invocation and tracks how many attempts are still holding
/// their (simulated) connection.
#[derive(Default)]
pub struct ScriptedProbe {
    script: HashMap<String, Script>,
    calls: Mutex<Vec<String>>,
    in_flight: Arc<AtomicUsize>,
    tokens: Mutex<Vec<String>>,
}

struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(self, address: impl Into<String>, latency_ms: u64) -> Self {
        self.script(address, latency_ms, Outcome::Succeed)
    }

    pub fn fail(self, address: impl Into<String>, latency_ms: u64) -> Self {
        self.script(address, latency_ms, Outcome::Fail)
    }

    /// The attempt task panics instead of reporting
    pub fn panic(self, address: impl Into<String>, latency_ms: u64) -> Self {
        self.script(address, latency_ms, Outcome::Panic)
    }

    fn script(mut self, address: impl Into<String>, latency_ms: u64, outcome: Outcome) -> Self {
        self.script.insert(
            address.into(),
            Script {
                latency: Duration::from_millis(latency_ms),
                outcome,
            },
        );
        self
    }

    /// Addresses probed so far, in invocation order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Tokens presented so far
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    /// Attempts that have started and not yet released their connection
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    type Session = String;

    async fn probe(&self, context: &ProbeContext) -> Result<String, ProbeFailure> {
        self.calls.lock().unwrap().push(context.address.clone());
        self.tokens.lock().unwrap().push(context.token().to_string());

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        let script = match self.script.get(&context.address) {
            Some(script) => *script,
            None => return Err(ProbeFailure::Network("no route to host".to_string())),
        };

        tokio::time::sleep(script.latency).await;
        match script.outcome {
            Outcome::Succeed => Ok(format!("session:{}", context.address)),
            Outcome::Fail => Err(ProbeFailure::Network("connection refused".to_string())),
            Outcome::Panic => panic!("scripted panic for {}", context.address),
        }
    }
}

/// Local endpoint `i`: secure form `https://local-{i}.plex.direct:32400`, plain `http://192.168.1.{i}:32400`
pub fn local_endpoint(i: u8) -> Endpoint {
    Endpoint::new("https", format!("192.168.1.{}", i), 32400, true)
        .with_uri(Some(format!("https://local-{}.plex.direct:32400", i)))
}

/// Remote endpoint `i`: secure form `https://remote-{i}.plex.direct:32400`, plain `http://203.0.113.{i}:32400`
pub fn remote_endpoint(i: u8) -> Endpoint {
    Endpoint::new("https", format!("203.0.113.{}", i), 32400, false)
        .with_uri(Some(format!("https://remote-{}.plex.direct:32400", i)))
}
