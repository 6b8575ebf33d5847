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

//! Error types for tally reduction and comparison.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while reducing or comparing tallies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NvvErrorKind {
    /// A tally present in raw output has no extraction settings.
    MissingConfig,
    /// A case exists in one library but not in the other.
    MissingCase,
    /// A required input (library directory, case folders) is absent.
    MissingInput,
    /// Raw value count does not match the axis product.
    Shape,
    /// Invalid configuration value.
    Config,
    /// The report target is locked by another process.
    WriterBusy,
    /// Malformed raw output or case folder name.
    Parse,
    /// I/O error (file operations).
    IO,
}

impl fmt::Display for NvvErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfig => write!(f, "MissingConfigError"),
            Self::MissingCase => write!(f, "MissingCaseError"),
            Self::MissingInput => write!(f, "MissingInputError"),
            Self::Shape => write!(f, "ShapeError"),
            Self::Config => write!(f, "ConfigError"),
            Self::WriterBusy => write!(f, "WriterBusyError"),
            Self::Parse => write!(f, "ParseError"),
            Self::IO => write!(f, "IOError"),
        }
    }
}

/// An error raised by the reduction pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}{}", .context.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
pub struct NvvError {
    /// The kind of error.
    pub kind: NvvErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Where it happened (e.g., "case 26056, tally 14").
    pub context: Option<String>,
}

impl NvvError {
    /// Create a new error.
    pub fn new(kind: NvvErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn missing_config(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::MissingConfig, message)
    }

    pub fn missing_case(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::MissingCase, message)
    }

    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::MissingInput, message)
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::Shape, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::Config, message)
    }

    pub fn writer_busy(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::WriterBusy, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::Parse, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(NvvErrorKind::IO, message)
    }
}

impl From<std::io::Error> for NvvError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::writer_busy(err.to_string()),
            _ => Self::io(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for NvvError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

/// Result type for NVV operations.
pub type NvvResult<T> = Result<T, NvvError>;
