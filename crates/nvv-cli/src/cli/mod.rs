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

//! CLI command definitions and argument parsing.
//!
//! # Organization
//!
//! - [`run`]: post-processing commands (single, compare)
//! - [`info`]: informational commands (families)

mod info;
mod run;

use clap::Subcommand;

pub use info::InfoCommands;
pub use run::{RunArgs, RunCommands};

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Run (single, compare)
/// └── Info (families)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use nvv_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Post-processing commands - flattened to appear at top level
    #[command(flatten)]
    Run(RunCommands),

    // Informational commands - flattened to appear at top level
    #[command(flatten)]
    Info(InfoCommands),
}

impl Commands {
    /// Execute the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a printable message if configuration or inputs are
    /// invalid, or if any benchmark job failed.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Run(cmd) => cmd.execute(),
            Commands::Info(cmd) => cmd.execute(),
        }
    }
}
