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

//! Single-library summaries.

use super::{finish, job_config, JobReport, RunContext};
use crate::cli::RunArgs;
use crate::error::CliError;
use crate::jobs::{Job, JobOperation, JobRunner};
use nvv_core::{dispatch, Action, Dispatch, Report, ReportWriter, SingleLibraryAggregator};
use nvv_csv::{ArchiveMetadata, CsvReportWriter, RawArchive};
use tracing::info;

/// Summarise `library` for every requested benchmark.
///
/// Output per job lands in `<out>/Single_Libraries/<library>/<benchmark>/<code>/`
/// with a `Report/` and a `Raw_Data/` directory.
///
/// # Errors
///
/// Fails on invalid configuration or run tree, and when any job failed; the
/// other jobs still complete.
pub fn single(library: &str, args: &RunArgs) -> Result<(), CliError> {
    let ctx = RunContext::load(args)?;
    let jobs = ctx.plan(&[library.to_string()], args);
    let operation = SingleOperation {
        ctx: &ctx,
        library: library.to_string(),
    };
    let results = JobRunner::new(job_config(args)).process(&jobs, operation, true)?;
    finish(results)
}

struct SingleOperation<'a> {
    ctx: &'a RunContext,
    library: String,
}

impl JobOperation for SingleOperation<'_> {
    type Output = JobReport;

    fn run(&self, job: &Job) -> Result<JobReport, CliError> {
        let ctx = self.ctx;
        let strategy = match dispatch(&ctx.config, &job.benchmark, job.code, Action::Single) {
            Dispatch::Run(strategy) => strategy,
            Dispatch::Unsupported { notice } => {
                info!("{notice}");
                return Ok(JobReport::notice(notice));
            }
        };

        let dir = ctx.single_dir(&self.library, job);
        let metadata = ArchiveMetadata::new(&job.benchmark, &self.library, job.code);
        let mut archive = RawArchive::create(dir.join("Raw_Data"), &metadata)?;

        let aggregator = SingleLibraryAggregator::new(&ctx.tree, &ctx.reader, &ctx.names);
        let summary = aggregator.aggregate(
            &job.benchmark,
            &self.library,
            job.code,
            &strategy,
            Action::Single,
            Some(&mut archive),
        )?;

        let report = Report::single(&summary, ctx.config.cut_width);
        let files = CsvReportWriter::new(dir.join("Report")).write(&report)?;
        info!(
            library = %self.library,
            cases = summary.values.len(),
            archived = archive.written(),
            "single-library summary written"
        );

        Ok(JobReport {
            notice: None,
            cases: summary.values.len(),
            skipped: summary.skipped.len(),
            files,
        })
    }

    fn name(&self) -> &str {
        "single"
    }
}
