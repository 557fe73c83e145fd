//! Client core for the Tomcat Manager text API.
//!
//! # Overview
//! Builds authenticated `HttpRequest` values for Manager commands and parses
//! the plain-text bodies they return. Executing the request is delegated to
//! a `Transport`; `CurlTransport` shells out to `curl`, and callers with
//! their own HTTP client can feed the body straight into
//! `ManagerCommand::parse`.
//!
//! # Design
//! - `ManagerClient` is stateless, holding only an `Endpoint`.
//! - `ManagerCommand` pairs a command name with its request and selects the
//!   field schema used to decode the response.
//! - Tabular commands (`list`, `roles`, `resources`, `serverinfo`) are a
//!   static table in `schema`; everything else is parsed as status-only.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod exec;
pub mod http;
pub mod response;
pub mod schema;

pub use client::{ManagerClient, ManagerCommand};
pub use endpoint::Endpoint;
pub use error::ExecError;
pub use exec::{CurlTransport, Transport};
pub use http::{Credentials, HttpRequest};
pub use response::{ManagerResponse, Tuple};
pub use schema::CommandKind;
