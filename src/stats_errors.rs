use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Insufficient data for {statistic}: {n_rows} row(s) available, at least {required} required")]
    InsufficientData {
        statistic: &'static str,
        n_rows: usize,
        required: usize,
    },

    #[error("Dimension mismatch: stream has {expected} column(s) but {found} value(s) were supplied")]
    DimensionMismatch { expected: usize, found: usize },

    /// A row of the stream does not have the stream's column count.
    ///
    /// `row` is the 0-based index of the offending row among the data rows of the stream.
    /// When the width is checked per block, it is the index of the block's first row.
    #[error("Malformed input at row {row}: expected {expected} column(s), found {found}")]
    MalformedInput {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A line of a text file does not have the column count of the file's first data line.
    ///
    /// `line` is the 1-based line number in the file, comments and blank lines included.
    #[error("Malformed line {line}: expected {expected} field(s), found {found}")]
    MalformedLine {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid number at line {line}: '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("No data line found in {0}")]
    EmptySource(String),

    #[error("Invalid statistics parameter: {0}")]
    InvalidParameter(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV reader error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for StatsError {
    fn eq(&self, other: &Self) -> bool {
        use StatsError::*;
        match (self, other) {
            (
                InsufficientData {
                    statistic: a,
                    n_rows: b,
                    required: c,
                },
                InsufficientData {
                    statistic: x,
                    n_rows: y,
                    required: z,
                },
            ) => a == x && b == y && c == z,
            (
                DimensionMismatch {
                    expected: a,
                    found: b,
                },
                DimensionMismatch {
                    expected: x,
                    found: y,
                },
            ) => a == x && b == y,
            (
                MalformedInput {
                    row: a,
                    expected: b,
                    found: c,
                },
                MalformedInput {
                    row: x,
                    expected: y,
                    found: z,
                },
            ) => a == x && b == y && c == z,
            (
                MalformedLine {
                    line: a,
                    expected: b,
                    found: c,
                },
                MalformedLine {
                    line: x,
                    expected: y,
                    found: z,
                },
            ) => a == x && b == y && c == z,
            (InvalidNumber { line: a, token: b }, InvalidNumber { line: x, token: y }) => {
                a == x && b == y
            }
            (EmptySource(a), EmptySource(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            // not comparable, equal when same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod stats_errors_test {
    use super::*;

    #[test]
    fn test_display_names_context() {
        let err = StatsError::MalformedInput {
            row: 12,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Malformed input at row 12: expected 3 column(s), found 2"
        );

        let err = StatsError::MalformedLine {
            line: 7,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Malformed line 7: expected 3 field(s), found 2"
        );
        assert_ne!(
            err,
            StatsError::MalformedInput {
                row: 7,
                expected: 3,
                found: 2
            }
        );

        let err = StatsError::InsufficientData {
            statistic: "linear sigmas",
            n_rows: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data for linear sigmas: 1 row(s) available, at least 2 required"
        );
    }

    #[test]
    fn test_partial_eq() {
        let io_a = StatsError::from(std::io::Error::other("a"));
        let io_b = StatsError::from(std::io::Error::other("b"));
        assert_eq!(io_a, io_b);

        assert_ne!(
            StatsError::DimensionMismatch {
                expected: 2,
                found: 3
            },
            StatsError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
        assert_ne!(
            StatsError::EmptySource("x".into()),
            StatsError::InvalidParameter("x".into())
        );
    }
}
