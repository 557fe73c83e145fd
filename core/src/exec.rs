//! Transports that execute a Manager `HttpRequest`.
//!
//! Provides a trait-based interface so the parser never depends on how the
//! body was fetched, with a `curl`-backed implementation and a mock for
//! testing.

use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::error::ExecError;
use crate::http::HttpRequest;

/// Executes an authenticated GET and returns the response body as text.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<String, ExecError>;
}

/// Runs `curl -s -u user:password <url>` as a child process.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    program: String,
}

impl CurlTransport {
    /// Use `program` instead of `curl` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::with_program("curl")
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &HttpRequest) -> Result<String, ExecError> {
        info!(program = %self.program, url = %request.url, "executing manager request");

        let output = Command::new(&self.program)
            .args(request.curl_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                program = %self.program,
                code = ?output.status.code(),
                stderr = %stderr,
                "manager request failed"
            );
            return Err(ExecError::Exit {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<String, ExecError> {
        (**self).execute(request)
    }
}

/// Mock transport for testing. Records every request it is asked to run.
#[cfg(test)]
pub struct MockTransport {
    result: Result<String, (i32, String)>,
    requests: std::sync::Mutex<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockTransport {
    /// Always return `body`.
    pub fn success(body: &str) -> Self {
        Self {
            result: Ok(body.to_string()),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Always fail as if the client exited with `code`.
    pub fn failure(code: i32, stderr: &str) -> Self {
        Self {
            result: Err((code, stderr.to_string())),
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Transport for MockTransport {
    fn execute(&self, request: &HttpRequest) -> Result<String, ExecError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.result {
            Ok(body) => Ok(body.clone()),
            Err((code, stderr)) => Err(ExecError::Exit {
                code: Some(*code),
                stderr: stderr.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Credentials;

    fn request() -> HttpRequest {
        HttpRequest {
            url: "http://localhost:8080/manager/list".to_string(),
            credentials: Credentials::new("admin", "admin"),
        }
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let transport = CurlTransport::with_program("definitely-not-a-real-curl-binary");
        let err = transport.execute(&request()).unwrap_err();
        match err {
            ExecError::Spawn { program, .. } => {
                assert_eq!(program, "definitely-not-a-real-curl-binary")
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }

    #[test]
    fn default_program_is_curl() {
        assert_eq!(CurlTransport::default().program(), "curl");
    }

    #[test]
    fn borrowed_transport_delegates() {
        let mock = MockTransport::success("OK - done\n");
        let borrowed: &dyn Transport = &mock;
        assert_eq!(borrowed.execute(&request()).unwrap(), "OK - done\n");
        assert_eq!(mock.requests().len(), 1);
    }
}
