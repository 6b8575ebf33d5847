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

//! Benchmark job queue with optional parallel execution and progress reporting.
//!
//! A job is one (benchmark, transport code) pair. Jobs are independent: each
//! one gets its own result, a failing job (missing library, locked output
//! file) is reported and the remaining jobs still run. Jobs run serially by
//! default; `--parallel` distributes them over a Rayon pool. The engine itself
//! is single-threaded and never sees more than one job.
//!
//! # Examples
//!
//! ```rust,no_run
//! use nvv_cli::error::CliError;
//! use nvv_cli::jobs::{Job, JobConfig, JobOperation, JobRunner};
//! use nvv_core::Code;
//!
//! struct Echo;
//!
//! impl JobOperation for Echo {
//!     type Output = String;
//!
//!     fn run(&self, job: &Job) -> Result<String, CliError> {
//!         Ok(job.to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//! }
//!
//! # fn main() -> Result<(), CliError> {
//! let jobs = vec![Job::new("Sphere", Code::Mcnp), Job::new("Oktavian", Code::Mcnp)];
//! let results = JobRunner::new(JobConfig::default()).process(&jobs, Echo, true)?;
//! println!("{} of {} jobs succeeded", results.success_count(), results.total_jobs());
//! # Ok(())
//! # }
//! ```

use crate::error::CliError;
use colored::Colorize;
use nvv_core::Code;
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::info_span;

/// Configuration for the job queue.
#[derive(Debug, Clone, Default)]
pub struct JobConfig {
    /// Run jobs on a Rayon pool instead of one after another.
    pub parallel: bool,

    /// Maximum number of worker threads when running in parallel.
    ///
    /// None means use Rayon's default (typically number of CPU cores).
    pub max_threads: Option<usize>,

    /// Print every finished job, not only failures.
    pub verbose: bool,
}

/// One unit of work: a benchmark run with one transport code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub benchmark: String,
    pub code: Code,
}

impl Job {
    pub fn new(benchmark: impl Into<String>, code: Code) -> Self {
        Self {
            benchmark: benchmark.into(),
            code,
        }
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.benchmark, self.code)
    }
}

/// Result of running one job.
#[derive(Debug, Clone)]
pub struct JobResult<T> {
    pub job: Job,
    pub result: Result<T, CliError>,
}

impl<T> JobResult<T> {
    pub fn success(job: Job, value: T) -> Self {
        Self {
            job,
            result: Ok(value),
        }
    }

    pub fn failure(job: Job, error: CliError) -> Self {
        Self {
            job,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Collected results of a job queue, in submission order.
#[derive(Debug, Clone)]
pub struct JobResults<T> {
    pub results: Vec<JobResult<T>>,
    /// Total processing time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> JobResults<T> {
    pub fn new(results: Vec<JobResult<T>>, elapsed_ms: u128) -> Self {
        Self {
            results,
            elapsed_ms,
        }
    }

    pub fn total_jobs(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    pub fn successes(&self) -> impl Iterator<Item = &JobResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &JobResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// `Err(JobsFailed)` when any job failed.
    pub fn into_result(self) -> Result<Vec<JobResult<T>>, CliError> {
        let failed = self.failure_count();
        if failed > 0 {
            Err(CliError::JobsFailed {
                failed,
                total: self.total_jobs(),
            })
        } else {
            Ok(self.results)
        }
    }
}

/// Work performed for each job.
pub trait JobOperation: Send + Sync {
    /// The output type for successful processing
    type Output: Send;

    /// Run a single job. Errors are confined to that job.
    fn run(&self, job: &Job) -> Result<Self::Output, CliError>;

    /// Human-readable name for progress reporting.
    fn name(&self) -> &str;
}

/// Lock-free progress counters shared by worker threads.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record_success(&self, job: &Job) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.succeeded.fetch_add(1, Ordering::Relaxed);

        if self.verbose {
            eprintln!("{} [{}/{}] {}", "✓".green().bold(), processed, self.total, job);
        }
    }

    fn record_failure(&self, job: &Job, error: &CliError) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.failed.fetch_add(1, Ordering::Relaxed);

        let hint = if error.is_busy() {
            " (close the file and rerun this benchmark)"
        } else {
            ""
        };
        eprintln!(
            "{} [{}/{}] {} - {}{}",
            "✗".red().bold(),
            processed,
            self.total,
            job,
            error,
            hint
        );
    }

    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "{} {}",
            "Post-processing:".bright_blue().bold(),
            operation_name.bright_white()
        );
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "  {} {}",
            "Total jobs:".bright_cyan(),
            processed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Succeeded:".green().bold(),
            succeeded.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Failed:".red().bold(),
            failed.to_string().bright_white()
        );
        println!("  {} {:.2}s", "Elapsed:".bright_cyan(), elapsed.as_secs_f64());
        println!("{}", "═".repeat(60).bright_blue());
    }
}

/// Runs a queue of benchmark jobs.
#[derive(Debug, Clone, Default)]
pub struct JobRunner {
    config: JobConfig,
}

impl JobRunner {
    pub fn new(config: JobConfig) -> Self {
        Self { config }
    }

    /// Run every job with `operation`, collecting all results.
    ///
    /// Only fails when the worker pool cannot be built; job failures are
    /// reported in the returned [`JobResults`].
    pub fn process<O>(
        &self,
        jobs: &[Job],
        operation: O,
        show_progress: bool,
    ) -> Result<JobResults<O::Output>, CliError>
    where
        O: JobOperation,
    {
        let start_time = Instant::now();

        if jobs.is_empty() {
            return Ok(JobResults::new(vec![], 0));
        }

        let tracker = show_progress.then(|| ProgressTracker::new(jobs.len(), self.config.verbose));
        let run_one = |job: &Job| {
            let _span = info_span!("job", benchmark = %job.benchmark, code = %job.code).entered();
            match operation.run(job) {
                Ok(value) => {
                    if let Some(t) = &tracker {
                        t.record_success(job);
                    }
                    JobResult::success(job.clone(), value)
                }
                Err(e) => {
                    if let Some(t) = &tracker {
                        t.record_failure(job, &e);
                    }
                    JobResult::failure(job.clone(), e)
                }
            }
        };

        let results: Vec<JobResult<O::Output>> = if !self.config.parallel || jobs.len() == 1 {
            jobs.iter().map(run_one).collect()
        } else if let Some(threads) = self.config.max_threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| CliError::invalid_input(format!("cannot start worker pool: {e}")))?;
            pool.install(|| jobs.par_iter().map(run_one).collect())
        } else {
            jobs.par_iter().map(run_one).collect()
        };

        if let Some(tracker) = tracker {
            tracker.print_summary(operation.name());
        }

        Ok(JobResults::new(results, start_time.elapsed().as_millis()))
    }
}
