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

//! Raw-data archive: every parsed tally of every case, one CSV per tally.
//!
//! Layout under the archive root:
//!
//! ```text
//! metadata.json
//! <case>/<case>_<tally>.csv
//! ```

use crate::error::{CsvError, Result};
use crate::to_csv::{write_table, ToCsvConfig};
use nvv_core::{CaseResult, CaseSink, Code, NvvResult};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the archive metadata.
pub const METADATA_FILE: &str = "metadata.json";

/// Provenance of an archived run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub nvv_version: String,
    pub benchmark: String,
    pub library: String,
    pub code: Code,
}

impl ArchiveMetadata {
    pub fn new(benchmark: impl Into<String>, library: impl Into<String>, code: Code) -> Self {
        Self {
            nvv_version: nvv_core::VERSION.to_string(),
            benchmark: benchmark.into(),
            library: library.into(),
            code,
        }
    }
}

/// Writes canonical tables of each case as it is aggregated.
#[derive(Debug)]
pub struct RawArchive {
    root: PathBuf,
    config: ToCsvConfig,
    written: usize,
}

impl RawArchive {
    /// Create the archive directory and write its metadata.
    pub fn create(root: impl Into<PathBuf>, metadata: &ArchiveMetadata) -> Result<Self> {
        Self::create_with_config(root, metadata, ToCsvConfig::default())
    }

    pub fn create_with_config(
        root: impl Into<PathBuf>,
        metadata: &ArchiveMetadata,
        config: ToCsvConfig,
    ) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| CsvError::from_io(e, root.clone()))?;

        let path = root.join(METADATA_FILE);
        let file = File::create(&path).map_err(|e| CsvError::from_io(e, path.clone()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), metadata)?;

        Ok(Self {
            root,
            config,
            written: 0,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of tally files written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn write_case(&mut self, case: &CaseResult) -> Result<()> {
        let key = case.id().key.to_string();
        let dir = self.root.join(&key);
        fs::create_dir_all(&dir).map_err(|e| CsvError::from_io(e, dir.clone()))?;

        for (tally, table) in &case.tables {
            let path = dir.join(format!("{key}_{tally}.csv"));
            let file = File::create(&path).map_err(|e| CsvError::from_io(e, path.clone()))?;
            write_table(&table.table, BufWriter::new(file), &self.config)
                .map_err(|e| e.with_context(path.display().to_string()))?;
            self.written += 1;
        }

        debug!(case = %key, tallies = case.tables.len(), "archived raw data");
        Ok(())
    }
}

/// Read back the metadata of an archive.
pub fn read_metadata(root: &Path) -> Result<ArchiveMetadata> {
    let path = root.join(METADATA_FILE);
    let text = fs::read_to_string(&path).map_err(|e| CsvError::from_io(e, path.clone()))?;
    Ok(serde_json::from_str(&text)?)
}

impl CaseSink for RawArchive {
    fn record(&mut self, case: &CaseResult) -> NvvResult<()> {
        Ok(self.write_case(case)?)
    }
}
