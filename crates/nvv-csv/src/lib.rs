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

//! Delimited-text collaborators of the NVV post-processing engine.
//!
//! - **Raw-data archive**: [`RawArchive`] records every canonical per-case,
//!   per-tally table as `<raw>/<case>/<case>_<tally>.csv` next to a
//!   `metadata.json` describing the run.
//! - **Reports**: [`CsvReportWriter`] renders a finished [`nvv_core::Report`]
//!   as one CSV file per sheet, honouring header pairs, column cut width and
//!   number formats.
//! - **Material tables**: [`load_material_table`] reads `Symbol,Name` rows
//!   into a [`nvv_core::MaterialTable`] used for case labelling.
//!
//! # Examples
//!
//! ## Writing a report
//!
//! ```no_run
//! use nvv_core::{Code, LibrarySummary, Report, ReportWriter};
//! use nvv_csv::CsvReportWriter;
//!
//! let summary = LibrarySummary::new("Sphere", "FENDL-3.2", Code::Mcnp);
//! let report = Report::single(&summary, 20);
//!
//! let mut writer = CsvReportWriter::new("out/Report");
//! let files = writer.write(&report).unwrap();
//! println!("wrote {} sheets", files.len());
//! ```
//!
//! ## Archiving raw data while aggregating
//!
//! ```no_run
//! use nvv_core::strategy::SpectralStrategy;
//! use nvv_core::{
//!     Action, Code, JsonOutputReader, MaterialTable, RunTree, SingleLibraryAggregator, Strategy,
//! };
//! use nvv_csv::{ArchiveMetadata, RawArchive};
//!
//! let tree = RunTree::new("runs");
//! let reader = JsonOutputReader::default();
//! let names = MaterialTable::new();
//! let aggregator = SingleLibraryAggregator::new(&tree, &reader, &names);
//!
//! let metadata = ArchiveMetadata::new("Oktavian", "FENDL-3.2", Code::Mcnp);
//! let mut archive = RawArchive::create("out/Raw_Data", &metadata).unwrap();
//! let strategy = Strategy::Spectral(SpectralStrategy::new(Vec::new()));
//! let summary = aggregator
//!     .aggregate(
//!         "Oktavian",
//!         "FENDL-3.2",
//!         Code::Mcnp,
//!         &strategy,
//!         Action::Compare,
//!         Some(&mut archive),
//!     )
//!     .unwrap();
//! println!("{} cases", summary.values.len());
//! ```

mod archive;
mod error;
mod from_csv;
mod report;
mod to_csv;

// Re-export public API
pub use archive::{read_metadata, ArchiveMetadata, RawArchive, METADATA_FILE};
pub use error::{CsvError, Result};
pub use from_csv::{
    load_material_table, read_material_table, read_material_table_from_reader, FromCsvConfig,
};
pub use report::CsvReportWriter;
pub use to_csv::{
    table_to_csv, table_to_csv_with_config, write_sections, write_table, ToCsvConfig,
};
