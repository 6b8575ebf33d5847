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

//! Command implementations for the NVV CLI.
//!
//! - [`single`]: summarise one library per benchmark job
//! - [`compare`]: compare several libraries per benchmark job
//! - [`families`]: list the configured benchmark families

mod compare;
mod families;
mod single;

pub use compare::compare;
pub use families::families;
pub use single::single;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::jobs::{Job, JobConfig, JobResults};
use colored::Colorize;
use nvv_core::{CaseSource, Code, JsonOutputReader, MaterialTable, PostProcessConfig, RunTree};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

/// Default material table looked up in the run tree root.
pub const MATERIALS_FILE: &str = "materials.csv";

/// Read-only inputs shared by every job of one invocation.
#[derive(Debug)]
pub struct RunContext {
    pub config: PostProcessConfig,
    pub tree: RunTree,
    pub reader: JsonOutputReader,
    pub names: MaterialTable,
    pub out: PathBuf,
}

impl RunContext {
    pub fn load(args: &RunArgs) -> Result<Self, CliError> {
        let config = load_config(args.config.as_deref())?;

        if !args.runs.is_dir() {
            return Err(CliError::MissingInput(format!(
                "run tree '{}' is not a directory",
                args.runs.display()
            )));
        }

        let names = match &args.materials {
            Some(path) => nvv_csv::load_material_table(path)?,
            None => {
                let default = args.runs.join(MATERIALS_FILE);
                if default.is_file() {
                    nvv_csv::load_material_table(&default)?
                } else {
                    debug!("no material table, materials are labelled by symbol");
                    MaterialTable::new()
                }
            }
        };

        Ok(Self {
            config,
            tree: RunTree::new(&args.runs),
            reader: JsonOutputReader::default(),
            names,
            out: args.out.clone(),
        })
    }

    /// One job per (benchmark, code).
    ///
    /// Without explicit codes, every code configured for the family (every
    /// known code for unknown families) that has output for at least one of
    /// `libraries` is used. When none has output, the first candidate is kept
    /// so that the job reports what is missing.
    pub fn plan(&self, libraries: &[String], args: &RunArgs) -> Vec<Job> {
        let mut jobs = Vec::new();
        for benchmark in &args.benchmarks {
            if !args.codes.is_empty() {
                jobs.extend(args.codes.iter().map(|c| Job::new(benchmark, *c)));
                continue;
            }

            let candidates: Vec<Code> = match self.config.family(benchmark) {
                Some(settings) => settings.codes.keys().copied().collect(),
                None => Code::ALL.to_vec(),
            };
            let available: Vec<Code> = candidates
                .iter()
                .copied()
                .filter(|code| {
                    libraries.iter().any(|lib| {
                        self.tree
                            .cases(lib, benchmark, *code)
                            .map(|cases| !cases.is_empty())
                            .unwrap_or(false)
                    })
                })
                .collect();

            if available.is_empty() {
                if let Some(code) = candidates.first() {
                    jobs.push(Job::new(benchmark, *code));
                }
            } else {
                jobs.extend(available.into_iter().map(|c| Job::new(benchmark, c)));
            }
        }
        info!(jobs = jobs.len(), "planned benchmark jobs");
        jobs
    }

    /// `<out>/Single_Libraries/<library>/<benchmark>/<code>`
    pub fn single_dir(&self, library: &str, job: &Job) -> PathBuf {
        self.out
            .join("Single_Libraries")
            .join(library)
            .join(&job.benchmark)
            .join(job.code.as_str())
    }

    /// `<out>/Comparisons/<comparison>/<benchmark>/<code>`
    pub fn comparison_dir(&self, comparison: &str, job: &Job) -> PathBuf {
        self.out
            .join("Comparisons")
            .join(comparison)
            .join(&job.benchmark)
            .join(job.code.as_str())
    }
}

/// Built-in configuration, optionally overridden from a JSON file.
pub fn load_config(path: Option<&Path>) -> Result<PostProcessConfig, CliError> {
    let config = match path {
        Some(path) => PostProcessConfig::from_path(path)?,
        None => PostProcessConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Per-job progress lines are printed when debug logging is on.
pub(crate) fn job_config(args: &RunArgs) -> JobConfig {
    JobConfig {
        parallel: args.parallel,
        max_threads: args.max_threads,
        verbose: tracing::enabled!(Level::DEBUG),
    }
}

/// What a finished job produced.
#[derive(Debug, Clone, Default)]
pub struct JobReport {
    /// Set when the family has nothing to do for the requested action.
    pub notice: Option<String>,
    pub cases: usize,
    pub skipped: usize,
    pub files: Vec<PathBuf>,
}

impl JobReport {
    pub fn notice(notice: String) -> Self {
        Self {
            notice: Some(notice),
            ..Default::default()
        }
    }
}

/// Print notices and written files, then fail if any job failed.
pub(crate) fn finish(results: JobResults<JobReport>) -> Result<(), CliError> {
    for done in results.successes() {
        if let Ok(report) = &done.result {
            if let Some(notice) = &report.notice {
                println!("{} {}", "note:".yellow().bold(), notice);
            } else {
                println!(
                    "{} {}: {} cases, {} skipped, {} files",
                    "✓".green().bold(),
                    done.job,
                    report.cases,
                    report.skipped,
                    report.files.len()
                );
            }
        }
    }
    results.into_result().map(|_| ())
}
