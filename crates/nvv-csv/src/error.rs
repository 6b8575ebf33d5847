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

//! Error types for CSV reading and writing.

use nvv_core::NvvError;
use std::path::PathBuf;
use thiserror::Error;

/// CSV error types.
///
/// # Examples
///
/// ```
/// use nvv_csv::CsvError;
///
/// let err = CsvError::MissingColumn("Symbol".to_string());
/// assert_eq!(err.to_string(), "Missing required column: Symbol");
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// CSV parsing error at a specific line.
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based).
        line: usize,
        message: String,
    },

    /// Missing required column in CSV data.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Target file is locked or not writable.
    ///
    /// # Examples
    ///
    /// ```
    /// use nvv_csv::CsvError;
    /// use std::path::PathBuf;
    ///
    /// let err = CsvError::Busy { path: PathBuf::from("report.csv") };
    /// assert!(err.to_string().contains("report.csv"));
    /// ```
    #[error("Target is busy or locked: {}", path.display())]
    Busy { path: PathBuf },

    /// I/O error during CSV reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// NVV core error.
    #[error("NVV core error: {0}")]
    Core(String),

    /// Invalid UTF-8 in CSV output.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 { context: String },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for `Result` with `CsvError`.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    /// Add context to an error message.
    pub fn with_context(self, context: String) -> Self {
        match self {
            CsvError::ParseError { line, message } => CsvError::ParseError {
                line,
                message: format!("{} ({})", message, context),
            },
            CsvError::Core(msg) => CsvError::Core(format!("{} ({})", msg, context)),
            CsvError::Other(msg) => CsvError::Other(format!("{} ({})", msg, context)),
            busy @ CsvError::Busy { .. } => busy,
            other => CsvError::Other(format!("{} ({})", other, context)),
        }
    }

    /// Map an I/O error on `path`, turning permission failures into `Busy`.
    pub(crate) fn from_io(err: std::io::Error, path: PathBuf) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            CsvError::Busy { path }
        } else {
            CsvError::Io(err).with_context(path.display().to_string())
        }
    }
}

impl From<NvvError> for CsvError {
    fn from(err: NvvError) -> Self {
        CsvError::Core(err.to_string())
    }
}

impl From<CsvError> for NvvError {
    fn from(err: CsvError) -> Self {
        match &err {
            CsvError::Busy { path } => {
                NvvError::writer_busy(err.to_string()).with_context(path.display().to_string())
            }
            CsvError::Io(_) => NvvError::io(err.to_string()),
            CsvError::Json(_) => NvvError::parse(err.to_string()),
            _ => NvvError::io(err.to_string()),
        }
    }
}
