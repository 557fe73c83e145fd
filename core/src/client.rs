//! Stateless request builder for the Tomcat Manager text API.
//!
//! # Design
//! `ManagerClient` holds only an `Endpoint` and carries no mutable state
//! between calls. `command` produces a `ManagerCommand`, which pairs the
//! command name with the `HttpRequest` to execute and knows how to parse the
//! body that comes back. The caller (or a `Transport`) performs the actual
//! round-trip.

use indexmap::IndexMap;
use percent_encoding::utf8_percent_encode;

use crate::endpoint::Endpoint;
use crate::error::ExecError;
use crate::exec::Transport;
use crate::http::{encode_query, HttpRequest, PATH_SEGMENT};
use crate::response::ManagerResponse;

/// Synchronous, stateless client for one Manager endpoint.
#[derive(Debug, Clone)]
pub struct ManagerClient {
    endpoint: Endpoint,
}

impl ManagerClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Build the request for `name` with `options` as the query string.
    ///
    /// The command name is not checked against the known commands; options
    /// keep the caller's iteration order.
    pub fn command<I, K, V>(&self, name: &str, options: I) -> ManagerCommand
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let options: IndexMap<String, String> = options
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut url = format!(
            "{}/manager/{}",
            self.endpoint.base_url(),
            utf8_percent_encode(name, PATH_SEGMENT)
        );
        if !options.is_empty() {
            url.push('?');
            url.push_str(&encode_query(&options));
        }
        tracing::debug!(command = name, url = %url, "built manager request");

        ManagerCommand {
            name: name.to_string(),
            options,
            request: HttpRequest {
                url,
                credentials: self.endpoint.credentials(),
            },
        }
    }
}

/// A Manager command ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerCommand {
    name: String,
    options: IndexMap<String, String>,
    request: HttpRequest,
}

impl ManagerCommand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &IndexMap<String, String> {
        &self.options
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// The full request string, credentials included.
    pub fn request_string(&self) -> String {
        self.request.authenticated_url()
    }

    /// Decode a body returned for this command.
    pub fn parse(&self, body: &str) -> ManagerResponse {
        ManagerResponse::parse(&self.name, body)
    }

    /// Execute through `transport` and parse the body.
    pub fn run<T: Transport + ?Sized>(&self, transport: &T) -> Result<ManagerResponse, ExecError> {
        let body = transport.execute(&self.request)?;
        Ok(self.parse(&body))
    }
}
