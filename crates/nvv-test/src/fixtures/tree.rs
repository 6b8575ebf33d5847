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

//! On-disk run trees for tests that go through the file system.

use nvv_core::{Code, RawCaseOutput};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `tallies.json` for one case under `<root>/<library>/<benchmark>/<folder>/<code>/`.
pub fn write_case(
    root: &Path,
    library: &str,
    benchmark: &str,
    folder: &str,
    code: Code,
    output: &RawCaseOutput,
) -> io::Result<PathBuf> {
    let dir = root
        .join(library)
        .join(benchmark)
        .join(folder)
        .join(code.as_str());
    fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let path = dir.join("tallies.json");
    fs::write(&path, json)?;
    Ok(path)
}

/// A run tree in a temporary directory, removed on drop.
#[derive(Debug)]
pub struct TempRunTree {
    dir: TempDir,
}

impl TempRunTree {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_case(
        &self,
        library: &str,
        benchmark: &str,
        folder: &str,
        code: Code,
        output: &RawCaseOutput,
    ) -> io::Result<PathBuf> {
        write_case(self.path(), library, benchmark, folder, code, output)
    }

    /// Write a material lookup table `materials.csv` and return its path.
    pub fn add_materials(&self, rows: &[(&str, &str)]) -> io::Result<PathBuf> {
        let mut text = String::from("Symbol,Name\n");
        for (symbol, name) in rows {
            text.push_str(&format!("{symbol},{name}\n"));
        }
        let path = self.path().join("materials.csv");
        fs::write(&path, text)?;
        Ok(path)
    }
}
