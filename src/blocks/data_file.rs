//! # Delimited text data files
//!
//! Chunked reader for numeric observation files: one sample per line, one variable per
//! field. This is the usual output format of trajectory analysis tools (dihedral angle
//! time series, distances, ...).
//!
//! ## Format
//! -----------------
//! * Lines that are empty or whose first non-blank character is `#` or `@` (comments,
//!   xmgrace directives) are skipped.
//! * [`Delimiter::Whitespace`] (default): fields separated by any run of spaces/tabs.
//! * [`Delimiter::Char`]: fields separated by a single byte (`,`, `;`, `\t`, ...), read
//!   with the `csv` crate; surrounding blanks are trimmed.
//! * The column count is fixed by the **first data line**. Any later line with another
//!   width aborts the pass with [`StatsError::MalformedLine`] (1-based line number).
//! * An unparsable field aborts the pass with [`StatsError::InvalidNumber`].
//!
//! ## Example
//! -----------------
//! ```rust,no_run
//! use camino::Utf8Path;
//! use dihedral_stats::blocks::data_file::{DataFile, Delimiter};
//! use dihedral_stats::{ColumnStatistics, StatsParams};
//!
//! # fn run() -> Result<(), dihedral_stats::StatsError> {
//! let dihedrals = DataFile::new(Utf8Path::new("dihedrals.dat"), 10_000);
//! let shifts = dihedrals.angular_shifts(&StatsParams::default())?;
//!
//! let distances = DataFile::new(Utf8Path::new("distances.csv"), 10_000)
//!     .with_delimiter(Delimiter::Char(b','));
//! let means = distances.linear_means(&StatsParams::default())?;
//! # Ok(()) }
//! ```
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;

use crate::{
    blocks::{BlockSource, OpenBlocks},
    constants::Block,
    stats_errors::StatsError,
};

/// Rows pre-allocated per chunk; larger chunks grow with the rows actually read.
const PREALLOCATED_ROWS: usize = 1024;

/// Field separator of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Any run of blanks.
    #[default]
    Whitespace,
    /// A single byte, e.g. `b','`.
    Char(u8),
}

/// True for lines that carry no data: blank lines and `#`/`@` comments.
pub fn is_comment_or_empty(line: &str) -> bool {
    match line.trim_start().chars().next() {
        None => true,
        Some(c) => c == '#' || c == '@',
    }
}

/// A data file on disk, streamed in chunks of at most `max_chunk_rows` rows.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: Utf8PathBuf,
    max_chunk_rows: usize,
    delimiter: Delimiter,
}

impl DataFile {
    /// Whitespace-delimited file. A `max_chunk_rows` of zero is treated as one.
    pub fn new(path: &Utf8Path, max_chunk_rows: usize) -> Self {
        Self {
            path: path.to_owned(),
            max_chunk_rows: max_chunk_rows.max(1),
            delimiter: Delimiter::Whitespace,
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl OpenBlocks for DataFile {
    type Source = DataFileReader;

    fn open(&self) -> Result<DataFileReader, StatsError> {
        DataFileReader::open(&self.path, self.max_chunk_rows, self.delimiter)
    }
}

/// Line-oriented access to the records of a file, skipping non-data lines.
enum RowReader {
    Whitespace {
        lines: Lines<BufReader<File>>,
        line_no: usize,
    },
    Delimited {
        records: csv::StringRecordsIntoIter<File>,
    },
}

fn parse_fields<'a>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec<f64>, StatsError> {
    fields
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| StatsError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}

impl RowReader {
    /// Next data row as `(line number, values)`, or `None` at end of file.
    fn next_row(&mut self) -> Result<Option<(usize, Vec<f64>)>, StatsError> {
        match self {
            RowReader::Whitespace { lines, line_no } => {
                for line in lines.by_ref() {
                    *line_no += 1;
                    let line = line?;
                    if is_comment_or_empty(&line) {
                        continue;
                    }
                    let values = parse_fields(line.split_whitespace(), *line_no)?;
                    return Ok(Some((*line_no, values)));
                }
                Ok(None)
            }
            RowReader::Delimited { records } => {
                for record in records.by_ref() {
                    let record = record?;
                    let line = record.position().map_or(0, |p| p.line() as usize);
                    // blank-only lines survive csv as one empty field
                    let first = record.get(0).unwrap_or("");
                    if (record.len() <= 1 && first.is_empty()) || first.starts_with(['#', '@']) {
                        continue;
                    }
                    let values = parse_fields(record.iter(), line)?;
                    return Ok(Some((line, values)));
                }
                Ok(None)
            }
        }
    }
}

/// One streaming pass over a [`DataFile`].
pub struct DataFileReader {
    rows: RowReader,
    n_cols: usize,
    max_chunk_rows: usize,
    pending: Option<Vec<f64>>,
}

impl DataFileReader {
    /// Open `path` and read its first data line to fix the column count.
    ///
    /// Return
    /// ----------
    /// * `Err(StatsError::IoError)` / `Err(StatsError::CsvError)` on I/O failures.
    /// * `Err(StatsError::EmptySource)` if the file holds no data line.
    /// * `Err(StatsError::InvalidNumber)` if the first data line cannot be parsed.
    pub fn open(
        path: &Utf8Path,
        max_chunk_rows: usize,
        delimiter: Delimiter,
    ) -> Result<Self, StatsError> {
        let file = File::open(path)?;
        let mut rows = match delimiter {
            Delimiter::Whitespace => RowReader::Whitespace {
                lines: BufReader::new(file).lines(),
                line_no: 0,
            },
            Delimiter::Char(delim) => RowReader::Delimited {
                records: csv::ReaderBuilder::new()
                    .has_headers(false)
                    .delimiter(delim)
                    .comment(Some(b'#'))
                    .flexible(true)
                    .trim(csv::Trim::All)
                    .from_reader(file)
                    .into_records(),
            },
        };

        let (_, first) = rows
            .next_row()?
            .ok_or_else(|| StatsError::EmptySource(path.to_string()))?;
        let n_cols = first.len();
        debug!("opened {path}: {n_cols} column(s), chunks of {max_chunk_rows} row(s)");

        Ok(Self {
            rows,
            n_cols,
            max_chunk_rows: max_chunk_rows.max(1),
            pending: Some(first),
        })
    }
}

impl BlockSource for DataFileReader {
    fn n_cols(&self) -> usize {
        self.n_cols
    }

    fn next_block(&mut self) -> Result<Block, StatsError> {
        let mut values = Vec::with_capacity(
            self.max_chunk_rows
                .min(PREALLOCATED_ROWS)
                .saturating_mul(self.n_cols),
        );
        let mut n_rows = 0;

        if let Some(first) = self.pending.take() {
            values.extend(first);
            n_rows += 1;
        }

        while n_rows < self.max_chunk_rows {
            let Some((line, row)) = self.rows.next_row()? else {
                break;
            };
            if row.len() != self.n_cols {
                return Err(StatsError::MalformedLine {
                    line,
                    expected: self.n_cols,
                    found: row.len(),
                });
            }
            values.extend(row);
            n_rows += 1;
        }

        Ok(Block::from_row_slice(n_rows, self.n_cols, &values))
    }
}
