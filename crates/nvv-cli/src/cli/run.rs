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

//! Post-processing commands.

use crate::commands;
use clap::{Args, Subcommand};
use nvv_core::Code;
use std::path::PathBuf;

/// Arguments shared by every post-processing command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Root of the run tree (<root>/<library>/<benchmark>/<case>/<code>/)
    #[arg(short, long, value_name = "DIR")]
    pub runs: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "nvv_output")]
    pub out: PathBuf,

    /// Benchmark families to post-process
    #[arg(short, long = "benchmark", value_name = "NAME", required = true, num_args = 1..)]
    pub benchmarks: Vec<String>,

    /// Transport codes (default: every configured code that has output)
    #[arg(short, long = "code", value_name = "CODE")]
    pub codes: Vec<Code>,

    /// JSON file overriding the built-in post-processing configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Material lookup table (default: <runs>/materials.csv when present)
    #[arg(long, value_name = "FILE")]
    pub materials: Option<PathBuf>,

    /// Run benchmark jobs in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Maximum worker threads with --parallel
    #[arg(long, value_name = "N")]
    pub max_threads: Option<usize>,
}

/// Post-processing commands.
#[derive(Subcommand)]
pub enum RunCommands {
    /// Summarise one library
    ///
    /// Writes values, errors and statistical checks per benchmark and code,
    /// plus the parsed raw data of every case.
    Single {
        /// Library to summarise
        #[arg(short, long, value_name = "LIB")]
        library: String,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Compare libraries against the first one
    ///
    /// The first library is the reference; every other library is compared
    /// against it.
    Compare {
        /// Libraries to compare, reference first
        #[arg(short, long = "library", value_name = "LIB", required = true, num_args = 1..)]
        libraries: Vec<String>,

        #[command(flatten)]
        args: RunArgs,
    },
}

impl RunCommands {
    pub fn execute(self) -> Result<(), String> {
        let result = match self {
            RunCommands::Single { library, args } => commands::single(&library, &args),
            RunCommands::Compare { libraries, args } => commands::compare(&libraries, &args),
        };
        result.map_err(|e| e.to_string())
    }
}
