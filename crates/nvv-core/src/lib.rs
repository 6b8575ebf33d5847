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

//! Tally reduction and cross-library comparison engine.
//!
//! This crate turns raw multi-axis tally output of transport simulations into
//! canonical tables, folds them per benchmark case into library summaries and
//! compares libraries against a reference with deterministic sentinel
//! classification.
//!
//! # Pipeline
//!
//! 1. A [`RawOutputReader`] loads the raw tallies of a case found by a
//!    [`CaseSource`].
//! 2. [`parse_tally`] builds a [`CanonicalTable`] per tally, plus the totals
//!    companion when the tally declares a total bin.
//! 3. [`SingleLibraryAggregator`] folds the cases, one at a time, through the
//!    family [`Strategy`] chosen by [`dispatch`] into a [`LibrarySummary`].
//! 4. [`ComparisonEngine`] aligns summaries and classifies the differences.
//! 5. [`Report`] packages the result for a [`ReportWriter`].
//!
//! # Example
//!
//! ```no_run
//! use nvv_core::{
//!     dispatch, Action, Code, ComparisonEngine, Dispatch, JsonOutputReader, MaterialTable,
//!     PostProcessConfig, RunTree, SingleLibraryAggregator,
//! };
//!
//! let config = PostProcessConfig::default();
//! let tree = RunTree::new("simulations");
//! let reader = JsonOutputReader::new();
//! let names = MaterialTable::new();
//! let aggregator = SingleLibraryAggregator::new(&tree, &reader, &names);
//!
//! if let Dispatch::Run(strategy) = dispatch(&config, "Sphere", Code::Mcnp, Action::Compare) {
//!     let run = |library| {
//!         aggregator.aggregate("Sphere", library, Code::Mcnp, &strategy, Action::Compare, None)
//!     };
//!     let reference = run("31c")?;
//!     let target = run("32c")?;
//!     let engine = ComparisonEngine::new(config.bucket_thresholds()?);
//!     let result = engine.compare(&reference, &target);
//!     println!("{} rows compared", result.relative.len());
//! }
//! # Ok::<(), nvv_core::NvvError>(())
//! ```

mod aggregate;
mod axis;
mod case;
mod compare;
pub mod config;
mod error;
mod parser;
mod raw;
pub mod report;
mod source;
pub mod strategy;
mod tally;

pub use aggregate::{AggregatedTable, CaseSink, Cell, LibrarySummary, SingleLibraryAggregator};
pub use axis::{Axis, BinLabel};
pub use case::{
    parse_case_folder, CaseId, CaseKey, CaseKeyShape, CaseKind, CaseLabel, CaseResult,
    MaterialTable, NameResolver, SortToken,
};
pub use compare::{
    BucketSummary, BucketThresholds, ComparisonEngine, ComparisonResult, Outcome, OutcomeRow,
    OutcomeTable,
};
pub use config::{
    Code, CodeTallies, EstimatorPair, FamilyKind, FamilySettings, PostProcessConfig, TimeSeries,
};
pub use error::{NvvError, NvvErrorKind, NvvResult};
pub use parser::{parse_case, parse_tally};
pub use raw::{JsonOutputReader, RawAxis, RawCaseOutput, RawOutputReader, RawTally};
pub use report::{
    LayoutHints, NumberFormat, Report, ReportCell, ReportRow, ReportTable, ReportWriter, Section,
};
pub use source::{CaseLocation, CaseSource, RunTree};
pub use strategy::{dispatch, Action, CaseRow, Dispatch, Reduction, Strategy};
pub use tally::{CanonicalTable, TallyRecord, TallyTable};

/// Version recorded in raw-data archives.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
