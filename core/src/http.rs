//! HTTP request description for the host-does-IO pattern.
//!
//! # Design
//! `HttpRequest` describes a Manager call as plain data: the URL without
//! credentials plus the basic-auth pair. The core never opens a socket; a
//! `Transport` (or the caller's own HTTP client) executes the request and
//! hands the body text back for parsing.
//!
//! Query keys and values are percent-encoded with `QUERY_COMPONENT`, which
//! leaves `/` and `:` readable so context paths such as `path=/manager` reach
//! Tomcat byte-for-byte. Brackets are always escaped, and curl runs with
//! globbing off, so a value like `/app[1]` is never read as a URL pattern.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a query key or value.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'=')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside the command segment of the URL path.
pub(crate) const PATH_SEGMENT: &AsciiSet = &QUERY_COMPONENT.add(b'/');

/// Characters escaped inside the user or password of the URL authority.
const USERINFO: &AsciiSet = &QUERY_COMPONENT.add(b':').add(b'@').add(b'/');

/// Static basic-auth credentials for the Manager application.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// `user:password`, as passed to `curl -u`.
    pub fn pair(&self) -> String {
        format!("{}:{}", self.user, self.password)
    }
}

// Keep passwords out of `{:?}` output and log lines.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// An authenticated GET request against a Manager endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// `http://host:port/manager/{command}[?query]`, without credentials.
    pub url: String,
    pub credentials: Credentials,
}

impl HttpRequest {
    /// The request string with `user:password@` embedded in the authority.
    pub fn authenticated_url(&self) -> String {
        let userinfo = format!(
            "{}:{}@",
            utf8_percent_encode(&self.credentials.user, USERINFO),
            utf8_percent_encode(&self.credentials.password, USERINFO),
        );
        match self.url.split_once("://") {
            Some((scheme, rest)) => format!("{scheme}://{userinfo}{rest}"),
            None => format!("{userinfo}{}", self.url),
        }
    }

    /// Arguments for `curl`: silent mode that still reports errors, URL
    /// globbing off, basic auth, then the URL.
    ///
    /// Each element is a separate argv entry, so nothing is interpreted by a
    /// shell.
    pub fn curl_args(&self) -> Vec<String> {
        vec![
            "-sS".to_string(),
            "-g".to_string(),
            "-u".to_string(),
            self.credentials.pair(),
            self.url.clone(),
        ]
    }
}

/// Render `key=value` pairs joined with `&`, preserving iteration order.
pub fn encode_query<I, K, V>(options: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    options
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k.as_ref(), QUERY_COMPONENT),
                utf8_percent_encode(v.as_ref(), QUERY_COMPONENT),
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
