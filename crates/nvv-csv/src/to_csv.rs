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

//! Render canonical tally tables and report sections as CSV.

use crate::error::{CsvError, Result};
use nvv_core::{CanonicalTable, ReportTable, Section};
use std::io::Write;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

impl ToCsvConfig {
    fn writer<W: Write>(&self, writer: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(self.quote_style)
            .flexible(true)
            .from_writer(writer)
    }
}

/// Convert one canonical tally table to a CSV string.
///
/// # Example
/// ```
/// use nvv_core::{Axis, BinLabel, CanonicalTable, TallyRecord};
/// use nvv_csv::table_to_csv;
///
/// let mut table = CanonicalTable::new(4, "Neutron flux", vec![Axis::Energy]);
/// table.rows.push(TallyRecord::new(
///     4,
///     "Neutron flux",
///     vec![(Axis::Energy, BinLabel::Number(1.0))],
///     2.0,
///     0.1,
/// ));
/// let csv = table_to_csv(&table).unwrap();
/// assert_eq!(csv, "Energy,Value,Error\n1,2,0.1\n");
/// ```
pub fn table_to_csv(table: &CanonicalTable) -> Result<String> {
    table_to_csv_with_config(table, &ToCsvConfig::default())
}

/// Convert one canonical tally table to a CSV string with custom configuration.
pub fn table_to_csv_with_config(table: &CanonicalTable, config: &ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(table, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
        context: format!("tally {}", table.tally),
    })
}

/// Write a canonical tally table: kept axes, then `Value` and `Error`.
pub fn write_table<W: Write>(
    table: &CanonicalTable,
    writer: W,
    config: &ToCsvConfig,
) -> Result<()> {
    let mut wtr = config.writer(writer);

    if config.include_headers {
        wtr.write_record(table.column_names())?;
    }

    for row in &table.rows {
        let mut record: Vec<String> = table
            .axes
            .iter()
            .map(|axis| row.coord(*axis).map(|l| l.to_string()).unwrap_or_default())
            .collect();
        record.push(row.value.to_string());
        record.push(row.error.to_string());
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the sections of one sheet, one block per column chunk.
///
/// Each section starts with its title and subtitle rows. Wide tables are cut
/// into blocks of at most `cut_width` data columns, each block repeating the
/// index columns in its own header row.
pub fn write_sections<'a, W: Write>(
    sections: impl IntoIterator<Item = &'a Section>,
    writer: W,
    config: &ToCsvConfig,
) -> Result<()> {
    let mut wtr = config.writer(writer);

    for section in sections {
        let (title, subtitle) = &section.layout.header;
        wtr.write_record([title.as_str()])?;
        wtr.write_record([subtitle.as_str()])?;

        for block in section.table.split_columns(section.layout.cut_width) {
            write_block(&mut wtr, &block, section, config)?;
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_block<W: Write>(
    wtr: &mut csv::Writer<W>,
    block: &ReportTable,
    section: &Section,
    config: &ToCsvConfig,
) -> Result<()> {
    if config.include_headers {
        let header: Vec<&str> = block
            .index_columns
            .iter()
            .chain(block.columns.iter())
            .map(String::as_str)
            .collect();
        wtr.write_record(header)?;
    }

    let format = section.layout.number_format;
    for row in &block.rows {
        let record: Vec<String> = row
            .index
            .iter()
            .cloned()
            .chain(row.cells.iter().map(|c| c.render(format)))
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvv_core::{
        Axis, BinLabel, LayoutHints, NumberFormat, ReportCell, ReportRow, TallyRecord,
    };

    fn spectrum() -> CanonicalTable {
        let mut table = CanonicalTable::new(12, "Flux", vec![Axis::Cell, Axis::Energy]);
        for (e, v) in [(1.0, 0.5), (10.0, 0.0)] {
            table.rows.push(TallyRecord::new(
                12,
                "Flux",
                vec![(Axis::Cell, BinLabel::Number(2.0)), (Axis::Energy, BinLabel::Number(e))],
                v,
                0.1,
            ));
        }
        table.rows.push(TallyRecord::new(
            12,
            "Flux",
            vec![(Axis::Cell, BinLabel::Number(2.0)), (Axis::Energy, BinLabel::Total)],
            0.5,
            0.05,
        ));
        table
    }

    fn section(cut_width: usize) -> Section {
        Section {
            sheet: "Values".to_string(),
            layout: LayoutHints {
                header: ("Sphere FENDL [mcnp]".to_string(), "Values".to_string()),
                cut_width,
                number_format: NumberFormat::Percent,
            },
            table: ReportTable {
                index_columns: vec!["Zaid".to_string()],
                columns: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                rows: vec![ReportRow {
                    index: vec!["1001".to_string()],
                    cells: vec![
                        ReportCell::Number(0.25),
                        ReportCell::Empty,
                        ReportCell::Text("Passed".to_string()),
                    ],
                }],
            },
        }
    }

    #[test]
    fn test_table_to_csv() {
        let csv = table_to_csv(&spectrum()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Cells,Energy,Value,Error");
        assert_eq!(lines[1], "2,1,0.5,0.1");
        assert_eq!(lines[2], "2,10,0,NaN");
        assert_eq!(lines[3], "2,total,0.5,0.05");
    }

    #[test]
    fn test_table_without_headers_and_tabs() {
        let config = ToCsvConfig {
            delimiter: b'\t',
            include_headers: false,
            ..Default::default()
        };
        let csv = table_to_csv_with_config(&spectrum(), &config).unwrap();
        assert!(csv.starts_with("2\t1\t0.5\t0.1\n"));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_sections_single_block() {
        let mut buffer = Vec::new();
        write_sections([&section(20)], &mut buffer, &ToCsvConfig::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Sphere FENDL [mcnp]");
        assert_eq!(lines[1], "Values");
        assert_eq!(lines[2], "Zaid,a,b,c");
        assert_eq!(lines[3], "1001,25.00%,,Passed");
    }

    #[test]
    fn test_sections_cut_into_blocks() {
        let mut buffer = Vec::new();
        write_sections([&section(2)], &mut buffer, &ToCsvConfig::default()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], "Zaid,a,b");
        assert_eq!(lines[4], "Zaid,c");
        assert_eq!(lines[5], "1001,Passed");
    }
}
