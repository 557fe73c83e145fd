//! Error types for executing Manager requests.
//!
//! # Design
//! A `FAIL` status line is not an error: it is parsed into a
//! `ManagerResponse` with `is_failure() == true`. `ExecError` only covers the
//! transport around the request, i.e. the child process that performs it.

use thiserror::Error;

/// Errors returned by a `Transport`.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The HTTP client program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client exited unsuccessfully. `code` is `None` when the
    /// process was killed by a signal.
    #[error("request failed (exit code {code:?}): {stderr}")]
    Exit { code: Option<i32>, stderr: String },
}
