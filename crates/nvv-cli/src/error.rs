// Dweve NVV - Nuclear-data Verification & Validation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for the NVV CLI.
//!
//! Every command and benchmark job returns `Result<T, CliError>`; engine and
//! writer errors are converted at the boundary so that a failing job can be
//! reported without aborting the rest of the queue.

use nvv_core::{NvvError, NvvErrorKind};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for NVV CLI operations.
///
/// Implements `Clone` so job results can be collected from worker threads.
///
/// # Examples
///
/// ```rust,no_run
/// use nvv_cli::error::CliError;
///
/// fn read_config(path: &str) -> Result<String, CliError> {
///     std::fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Invalid or unreadable post-processing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input (library directory, case folders) is absent.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A report or archive target could not be written.
    #[error("Output is busy: {0}")]
    WriterBusy(String),

    /// Any other engine failure.
    #[error("Post-processing error: {0}")]
    Engine(String),

    /// One or more benchmark jobs failed.
    #[error("{failed} of {total} benchmark jobs failed")]
    JobsFailed {
        /// Number of failed jobs
        failed: usize,
        /// Number of jobs run
        total: usize,
    },

    /// Invalid input provided by the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid input error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nvv_cli::error::CliError;
    ///
    /// let err = CliError::invalid_input("compare needs at least two libraries");
    /// assert!(err.to_string().starts_with("Invalid input"));
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error only concerns output files.
    pub fn is_busy(&self) -> bool {
        matches!(self, CliError::WriterBusy(_))
    }
}

impl From<NvvError> for CliError {
    fn from(err: NvvError) -> Self {
        match err.kind {
            NvvErrorKind::Config => Self::Config(err.to_string()),
            NvvErrorKind::MissingInput => Self::MissingInput(err.to_string()),
            NvvErrorKind::WriterBusy => Self::WriterBusy(err.to_string()),
            _ => Self::Engine(err.to_string()),
        }
    }
}

impl From<nvv_csv::CsvError> for CliError {
    fn from(err: nvv_csv::CsvError) -> Self {
        NvvError::from(err).into()
    }
}

impl From<serde_json::Error> for CliError {
    fn from(source: serde_json::Error) -> Self {
        Self::Engine(format!("JSON error: {source}"))
    }
}
