// CsvSource — file-backed sample stream from numeric CSV
//
// A lightweight CSV parser that doesn't require an external CSV crate.
// Supports headerless or header-row CSVs. The caller specifies which
// columns are data and which are labels. The file is parsed eagerly into
// memory; iteration then behaves like an in-memory stream.

use std::fs;
use std::path::Path;

use corral_core::{Error, Result};

use crate::in_memory::InMemorySource;
use crate::source::{SampleSource, SampleView};

/// Configuration for loading a CSV file.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Whether the first row is a header (to be skipped).
    pub has_header: bool,
    /// Column indices to use as data. Empty = all columns but the last.
    pub data_cols: Vec<usize>,
    /// Column indices to use as labels. Empty = the last column only.
    pub label_cols: Vec<usize>,
    /// Delimiter character (default: `,`).
    pub delimiter: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            data_cols: Vec::new(),
            label_cols: Vec::new(),
            delimiter: b',',
        }
    }
}

impl CsvConfig {
    pub fn has_header(mut self, h: bool) -> Self {
        self.has_header = h;
        self
    }
    pub fn data_cols(mut self, cols: Vec<usize>) -> Self {
        self.data_cols = cols;
        self
    }
    pub fn label_cols(mut self, cols: Vec<usize>) -> Self {
        self.label_cols = cols;
        self
    }
    pub fn delimiter(mut self, d: u8) -> Self {
        self.delimiter = d;
        self
    }
}

/// A sample stream loaded from a CSV file.
///
/// All values are parsed as `f32`. Sample indices are row positions in
/// file order (header excluded).
///
/// # Example
/// ```ignore
/// // iris.csv: 4 data columns, 1 label column (last)
/// let src = CsvSource::load("data/iris.csv", CsvConfig::default())?;
/// ```
#[derive(Debug)]
pub struct CsvSource {
    inner: InMemorySource,
}

impl CsvSource {
    /// Load a CSV file from disk.
    pub fn load<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_string(&content, config)
    }

    /// Parse CSV from an in-memory string.
    pub fn from_string(content: &str, config: CsvConfig) -> Result<Self> {
        let delim = config.delimiter as char;
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        if lines.is_empty() {
            return Err(Error::InvalidConfig("empty CSV".to_string()));
        }

        let start = if config.has_header { 1 } else { 0 };
        if start >= lines.len() {
            return Err(Error::InvalidConfig(
                "CSV has only a header, no data".to_string(),
            ));
        }

        // Auto-detect columns if not specified
        let num_cols = lines[start].split(delim).count();

        let data_cols = if config.data_cols.is_empty() {
            (0..num_cols.saturating_sub(1)).collect::<Vec<_>>()
        } else {
            config.data_cols
        };

        let label_cols = if config.label_cols.is_empty() {
            vec![num_cols - 1]
        } else {
            config.label_cols
        };

        let mut rows = Vec::with_capacity(lines.len() - start);

        for (line_no, &line) in lines[start..].iter().enumerate() {
            let cols: Vec<&str> = line.split(delim).collect();
            if cols.len() != num_cols {
                return Err(Error::Parse {
                    line: line_no + start + 1,
                    col: 0,
                    msg: format!("{} columns, expected {}", cols.len(), num_cols),
                });
            }

            let parse_at = |c: usize| -> Result<f32> {
                cols[c].trim().parse().map_err(|e| Error::Parse {
                    line: line_no + start + 1,
                    col: c,
                    msg: format!("{}", e),
                })
            };

            let mut data = Vec::with_capacity(data_cols.len());
            for &c in &data_cols {
                data.push(parse_at(c)?);
            }

            let mut label = Vec::with_capacity(label_cols.len());
            for &c in &label_cols {
                label.push(parse_at(c)?);
            }

            rows.push((data, label));
        }

        Ok(Self {
            inner: InMemorySource::new(rows)?,
        })
    }

    /// Number of data rows loaded.
    pub fn num_samples(&self) -> usize {
        self.inner.num_samples()
    }
}

impl SampleSource for CsvSource {
    fn restart(&mut self) -> Result<()> {
        self.inner.restart()
    }

    fn advance(&mut self) -> Result<bool> {
        self.inner.advance()
    }

    fn current(&self) -> SampleView<'_> {
        self.inner.current()
    }
}

// Tests
