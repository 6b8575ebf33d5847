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

//! CSV rendition of finished reports: one file per sheet.

use crate::error::{CsvError, Result};
use crate::to_csv::{write_sections, ToCsvConfig};
use nvv_core::{NvvResult, Report, ReportWriter};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes `<out_dir>/<report name>_<sheet>.csv` for every sheet of a report.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    out_dir: PathBuf,
    config: ToCsvConfig,
}

impl CsvReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(out_dir, ToCsvConfig::default())
    }

    pub fn with_config(out_dir: impl Into<PathBuf>, config: ToCsvConfig) -> Self {
        Self {
            out_dir: out_dir.into(),
            config,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path the given sheet of `report` is written to.
    pub fn sheet_path(&self, report: &Report, sheet: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}_{}.csv", file_stem(&report.name), file_stem(sheet)))
    }

    fn write_report(&self, report: &Report) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir).map_err(|e| CsvError::from_io(e, self.out_dir.clone()))?;

        let mut written = Vec::new();
        for sheet in report.sheets() {
            let path = self.sheet_path(report, sheet);
            let file = File::create(&path).map_err(|e| CsvError::from_io(e, path.clone()))?;
            let sections = report.sections.iter().filter(|s| s.sheet == sheet);
            write_sections(sections, BufWriter::new(file), &self.config)
                .map_err(|e| e.with_context(path.display().to_string()))?;
            debug!(path = %path.display(), "wrote report sheet");
            written.push(path);
        }
        Ok(written)
    }
}

impl ReportWriter for CsvReportWriter {
    fn write(&mut self, report: &Report) -> NvvResult<Vec<PathBuf>> {
        Ok(self.write_report(report)?)
    }
}

/// File-system safe rendition of a sheet or report name.
fn file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.replace('%', "pct").chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    stem.trim_matches('_').to_string()
}
