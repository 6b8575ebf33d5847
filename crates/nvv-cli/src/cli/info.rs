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

//! Informational commands.

use crate::commands;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum InfoCommands {
    /// List configured benchmark families
    ///
    /// Shows the reduction used by each family and the transport codes it is
    /// configured for. Families not listed fall back to the generic reduction.
    Families {
        /// JSON file overriding the built-in post-processing configuration
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the effective configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

impl InfoCommands {
    pub fn execute(self) -> Result<(), String> {
        match self {
            InfoCommands::Families { config, json } => {
                commands::families(config.as_deref(), json).map_err(|e| e.to_string())
            }
        }
    }
}
