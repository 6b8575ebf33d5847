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

//! NVV CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **single**: summarise one library (values, errors, statistical checks,
//!   raw-data archive) for a set of benchmark families
//! - **compare**: compare several libraries against a reference library
//! - **families**: list the configured benchmark families
//!
//! # Output layout
//!
//! ```text
//! <out>/Single_Libraries/<library>/<benchmark>/<code>/Report/*.csv
//! <out>/Single_Libraries/<library>/<benchmark>/<code>/Raw_Data/<case>/<case>_<tally>.csv
//! <out>/Comparisons/<reference>_Vs_<target>/<benchmark>/<code>/Report/*.csv
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use nvv_cli::commands::families;
//!
//! # fn main() -> Result<(), nvv_cli::error::CliError> {
//! // Print the built-in family catalogue
//! families(None, false)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Each (benchmark, code) pair runs as an isolated job: a job that fails (a
//! missing library directory, a locked report file) is reported and the
//! remaining jobs still run. The command fails at the end if any job did.

pub mod cli;
pub mod commands;
pub mod error;
pub mod jobs;
