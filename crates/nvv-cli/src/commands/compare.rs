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

//! Cross-library comparisons.

use super::{finish, job_config, JobReport, RunContext};
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::jobs::{Job, JobOperation, JobRunner};
use nvv_core::{
    dispatch, Action, ComparisonEngine, Dispatch, LibrarySummary, Report, ReportWriter,
    SingleLibraryAggregator,
};
use nvv_csv::CsvReportWriter;
use tracing::{info, warn};

/// Compare every library after the first against the first one.
///
/// Output per pair and job lands in
/// `<out>/Comparisons/<reference>_Vs_<target>/<benchmark>/<code>/Report/`.
///
/// # Errors
///
/// Fails with fewer than two libraries, on invalid configuration or run
/// tree, and when any job failed.
pub fn compare(libraries: &[String], args: &RunArgs) -> Result<(), CliError> {
    if libraries.len() < 2 {
        return Err(CliError::invalid_input(
            "compare needs at least two libraries, the reference first",
        ));
    }

    let ctx = RunContext::load(args)?;
    let engine = ComparisonEngine::new(ctx.config.bucket_thresholds()?);
    let jobs = ctx.plan(libraries, args);
    let operation = CompareOperation {
        ctx: &ctx,
        engine,
        libraries,
    };
    let results = JobRunner::new(job_config(args)).process(&jobs, operation, true)?;
    finish(results)
}

struct CompareOperation<'a> {
    ctx: &'a RunContext,
    engine: ComparisonEngine,
    libraries: &'a [String],
}

impl JobOperation for CompareOperation<'_> {
    type Output = JobReport;

    fn run(&self, job: &Job) -> Result<JobReport, CliError> {
        let ctx = self.ctx;
        let strategy = match dispatch(&ctx.config, &job.benchmark, job.code, Action::Compare) {
            Dispatch::Run(strategy) => strategy,
            Dispatch::Unsupported { notice } => {
                info!("{notice}");
                return Ok(JobReport::notice(notice));
            }
        };

        let aggregator = SingleLibraryAggregator::new(&ctx.tree, &ctx.reader, &ctx.names);
        let summaries = self
            .libraries
            .iter()
            .map(|library| {
                aggregator.aggregate(
                    &job.benchmark,
                    library,
                    job.code,
                    &strategy,
                    Action::Compare,
                    None,
                )
            })
            .collect::<Result<Vec<LibrarySummary>, _>>()?;

        let mut report = JobReport {
            cases: summaries.first().map_or(0, |s| s.values.len()),
            skipped: summaries.iter().map(|s| s.skipped.len()).sum(),
            ..Default::default()
        };

        for result in self.engine.compare_all(&summaries)? {
            let excluded = result.reference_only.len() + result.target_only.len();
            if excluded > 0 {
                warn!(
                    comparison = %result.name,
                    excluded,
                    "cases present in only one library are left out of the comparison"
                );
            }
            let cut_width = ctx.config.cut_width;
            let mut sheets = Report::comparison(&result, cut_width);
            for library in [&result.reference, &result.target] {
                if let Some(summary) = summaries.iter().find(|s| &s.library == library) {
                    sheets.attach_library(summary, cut_width);
                }
            }
            let dir = ctx.comparison_dir(&result.name, job).join("Report");
            let files = CsvReportWriter::new(dir).write(&sheets)?;
            report.files.extend(files);
        }

        Ok(report)
    }

    fn name(&self) -> &str {
        "compare"
    }
}
