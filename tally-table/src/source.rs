//! Tabular access behind a small trait: sheet names, headers, cell text.
//!
//! The normalizer only needs string cells; per-backend typing (numeric
//! columns, date cells) stays behind this seam so an XLSX backend could be
//! dropped in without touching the inference code.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

/// One sheet's worth of raw string data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A handle to a possibly multi-sheet tabular source.
pub trait TabularSource {
    fn sheet_names(&self) -> Result<Vec<String>>;
    fn read_sheet(&self, name: &str) -> Result<Sheet>;
}

/// CSV-backed workbook.
///
/// A `.csv` file is a one-sheet workbook named after its stem; a directory
/// is a workbook with one sheet per contained `.csv` file, ordered by name.
pub struct CsvWorkbook {
    path: PathBuf,
}

impl CsvWorkbook {
    /// The path is not touched here; errors surface on first read so the
    /// normalizer can degrade instead of the caller failing early.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        if self.path.is_dir() {
            self.path.join(format!("{name}.csv"))
        } else {
            self.path.clone()
        }
    }
}

impl TabularSource for CsvWorkbook {
    fn sheet_names(&self) -> Result<Vec<String>> {
        if self.path.is_dir() {
            let mut names = Vec::new();
            for entry in
                fs::read_dir(&self.path).with_context(|| format!("reading {}", self.path.display()))?
            {
                let path = entry?.path();
                let is_csv = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv && let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
            names.sort();
            Ok(names)
        } else if self.path.is_file() {
            let stem = self
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("sheet1");
            Ok(vec![stem.to_string()])
        } else {
            bail!("workbook not found: {}", self.path.display());
        }
    }

    fn read_sheet(&self, name: &str) -> Result<Sheet> {
        let path = self.sheet_path(name);
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("opening {}", path.display()))?;

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        Ok(Sheet { headers, rows })
    }
}
