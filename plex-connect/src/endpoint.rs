//! Candidate endpoints and the address forms they can be probed through.

use std::fmt;

/// The address form a probe attempt uses.
///
/// Ordering is the tie-break preference: `Secure` sorts before `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressForm {
    /// The endpoint's advertised URI, normally a TLS host name
    Secure,
    /// `http://address:port`
    Plain,
}

impl AddressForm {
    /// Both forms, in preference order
    pub const ALL: [AddressForm; 2] = [AddressForm::Secure, AddressForm::Plain];
}

impl fmt::Display for AddressForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressForm::Secure => write!(f, "secure"),
            AddressForm::Plain => write!(f, "plain"),
        }
    }
}

/// One candidate way of reaching a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub protocol: String,
    pub address: String,
    pub port: u16,
    /// Absolute URI; derived from protocol, address and port unless supplied
    pub uri: String,
    /// Whether the endpoint is on the resource's own network
    pub is_local: bool,
}

impl Endpoint {
    /// Create an endpoint whose URI is derived from its parts
    pub fn new(protocol: impl Into<String>, address: impl Into<String>, port: u16, is_local: bool) -> Self {
        let protocol = protocol.into();
        let address = address.into();
        let uri = format_uri(&protocol, &address, port);
        Self {
            protocol,
            address,
            port,
            uri,
            is_local,
        }
    }

    /// Replace the derived URI with one supplied by the directory
    ///
    /// Empty values keep the derived URI.
    pub fn with_uri(mut self, uri: Option<String>) -> Self {
        if let Some(uri) = uri.filter(|u| !u.trim().is_empty()) {
            self.uri = uri.trim_end_matches('/').to_string();
        }
        self
    }

    /// The address a probe should use for `form`
    pub fn address_for(&self, form: AddressForm) -> String {
        match form {
            AddressForm::Secure => self.uri.clone(),
            AddressForm::Plain => format_uri("http", &self.address, self.port),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.uri, if self.is_local { "local" } else { "remote" })
    }
}

fn format_uri(protocol: &str, address: &str, port: u16) -> String {
    if address.contains(':') && !address.starts_with('[') {
        format!("{}://[{}]:{}", protocol, address, port)
    } else {
        format!("{}://{}:{}", protocol, address, port)
    }
}
