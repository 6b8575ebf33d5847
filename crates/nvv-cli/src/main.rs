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

//! NVV Command Line Interface

use clap::Parser;
use nvv_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// NVV - Nuclear-data Verification & Validation post-processing
///
/// Reduces transport-code tally output of benchmark runs into per-library
/// summaries and cross-library comparison reports.
///
/// # Examples
///
/// ```bash
/// # Summarise one library
/// nvv single --runs runs --library FENDL-3.2 --benchmark Sphere SphereSDDR
///
/// # Compare two libraries against the first
/// nvv compare --runs runs --library FENDL-3.2 JEFF-3.3 --benchmark Oktavian --parallel
///
/// # Show the family catalogue
/// nvv families
/// ```
#[derive(Parser)]
#[command(name = "nvv")]
#[command(
    author,
    version,
    about = "NVV - Nuclear-data Verification & Validation post-processing",
    long_about = None
)]
struct Cli {
    /// Debug logging (overridden by NVV_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "nvv=debug" } else { "nvv=info" };
    let filter = EnvFilter::try_from_env("NVV_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
