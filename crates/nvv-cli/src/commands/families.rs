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

//! Listing of configured benchmark families.

use super::load_config;
use crate::error::CliError;
use colored::Colorize;
use nvv_core::PostProcessConfig;
use std::path::Path;

/// Print the configured families, or the whole effective configuration as
/// JSON with `json`.
pub fn families(config: Option<&Path>, json: bool) -> Result<(), CliError> {
    let config = load_config(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", render(&config));
    }
    Ok(())
}

fn render(config: &PostProcessConfig) -> String {
    let width = config.families.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (name, settings) in &config.families {
        let codes: Vec<&str> = settings.codes.keys().map(|c| c.as_str()).collect();
        out.push_str(&format!(
            "{}  {:<10}  {:<15}  {}\n",
            format!("{name:<width$}").bold(),
            format!("{:?}", settings.kind).to_lowercase(),
            format!("{:?}", settings.shape),
            codes.join(", "),
        ));
    }
    out.push_str(&format!(
        "{} other families use the generic reduction over every tally\n",
        "note:".yellow().bold()
    ));
    out
}
