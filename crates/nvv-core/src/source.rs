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

//! Enumeration of case folders for a library/benchmark/code run.

use crate::config::Code;
use crate::error::{NvvError, NvvResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Where one case's output for one transport code lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLocation {
    /// Case folder name; encodes the case id.
    pub folder: String,
    /// Directory holding the code's output for that case.
    pub path: PathBuf,
}

impl CaseLocation {
    pub fn new(folder: impl Into<String>, path: PathBuf) -> Self {
        Self {
            folder: folder.into(),
            path,
        }
    }
}

/// Lists the cases of one run.
pub trait CaseSource {
    /// Case locations for (library, benchmark, code), sorted by folder name.
    ///
    /// A missing library or benchmark directory is a `MissingInput` error.
    fn cases(&self, library: &str, benchmark: &str, code: Code) -> NvvResult<Vec<CaseLocation>>;
}

/// Simulation tree laid out as `<root>/<library>/<benchmark>/<case>/<code>/`.
#[derive(Debug, Clone)]
pub struct RunTree {
    root: PathBuf,
}

impl RunTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Libraries that have a directory under the root.
    pub fn libraries(&self) -> NvvResult<Vec<String>> {
        sorted_dirs(&self.root)
    }
}

impl CaseSource for RunTree {
    fn cases(&self, library: &str, benchmark: &str, code: Code) -> NvvResult<Vec<CaseLocation>> {
        let library_dir = self.root.join(library);
        if !library_dir.is_dir() {
            return Err(NvvError::missing_input(format!(
                "no simulation directory for library '{library}'"
            ))
            .with_context(library_dir.display().to_string()));
        }
        let bench_dir = library_dir.join(benchmark);
        if !bench_dir.is_dir() {
            return Err(NvvError::missing_input(format!(
                "benchmark '{benchmark}' was not run for library '{library}'"
            ))
            .with_context(bench_dir.display().to_string()));
        }

        Ok(sorted_dirs(&bench_dir)?
            .into_iter()
            .filter_map(|folder| {
                let path = bench_dir.join(&folder).join(code.as_str());
                path.is_dir().then(|| CaseLocation::new(folder, path))
            })
            .collect())
    }
}

fn sorted_dirs(dir: &Path) -> NvvResult<Vec<String>> {
    let mut names = Vec::new();
    let entries = fs::read_dir(dir)
        .map_err(|e| NvvError::from(e).with_context(dir.display().to_string()))?;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
