//! Batch processing: one stamped document per qualifying spreadsheet row
//!
//! The batch walks the spreadsheet in row order, extracts a (name, phone)
//! pair per row, and drives one compositor call per pair. Row-level failures
//! are isolated: a bad row is counted as skipped and the batch continues.
//! Only configuration problems (bad paths, unknown font) and an unreadable
//! workbook abort the whole run.

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::fonts::{FontCatalog, RegisteredFont};
use crate::layout::BoundingBox;
use crate::pdf::stamp_document;
use crate::style::StyleSpec;

/// Options for one batch run. Collected and validated once up front.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Input spreadsheet (.xlsx, first worksheet, row 1 is a header)
    pub spreadsheet: PathBuf,
    /// PDF template; every page receives the overlay
    pub template: PathBuf,
    /// Directory output files are written into (created if missing)
    pub output_dir: PathBuf,
    /// 1-based column index holding the name value
    pub name_column: u32,
    /// 1-based column index holding the phone value
    pub phone_column: u32,
    /// Box the name is centered in, in page coordinates
    pub bbox: BoundingBox,
    /// Font, size and fill color for the stamped text
    pub style: StyleSpec,
}

/// Counts accumulated across all rows of a completed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows that produced an output file
    pub processed: usize,
    /// Rows skipped over missing values or a row-level failure
    pub skipped: usize,
}

/// Outcome of processing one row. Row failures are values, not escaping
/// errors: the batch loop aggregates them into the summary.
enum RowOutcome {
    Generated(PathBuf),
    Skipped(SkipReason),
}

enum SkipReason {
    MissingName,
    MissingPhone,
    Failed(Error),
}

impl SkipReason {
    fn describe(&self) -> String {
        match self {
            Self::MissingName => "missing name".to_string(),
            Self::MissingPhone => "missing phone number".to_string(),
            Self::Failed(e) => e.to_string(),
        }
    }
}

/// Run a full batch: validate configuration, then process every data row.
///
/// Returns the run summary, or an error if the batch never started (bad
/// configuration) or the workbook could not be read at all. No summary is
/// produced in the error case.
pub fn run_batch(options: &BatchOptions, catalog: &FontCatalog) -> Result<RunSummary> {
    // Configuration checks, in order: spreadsheet, template, font, output
    // directory. The template is checked before the output directory is
    // created so a bad template path leaves the filesystem untouched.
    if options.name_column == 0 || options.phone_column == 0 {
        return Err(Error::InvalidColumn("column indices are 1-based".into()));
    }
    if !options.spreadsheet.exists() {
        return Err(Error::FileNotFound(options.spreadsheet.clone()));
    }
    if !has_xlsx_extension(&options.spreadsheet) {
        return Err(Error::UnsupportedSpreadsheet(options.spreadsheet.clone()));
    }
    if !options.template.exists() {
        return Err(Error::FileNotFound(options.template.clone()));
    }
    let font = catalog.resolve(&options.style.font)?;
    std::fs::create_dir_all(&options.output_dir)?;

    // An unreadable workbook is a critical error: abort, no summary
    let mut workbook: Xlsx<_> = open_workbook(&options.spreadsheet)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptyWorkbook(options.spreadsheet.clone()))??;

    let name_col = options.name_column - 1;
    let phone_col = options.phone_column - 1;

    let mut summary = RunSummary::default();

    // Row 1 is the header; iterate up to the last row with data in either
    // of the two selected columns
    for row in 1..=last_data_row(&range, name_col, phone_col) {
        match process_row(&range, row, name_col, phone_col, options, &font) {
            RowOutcome::Generated(path) => {
                info!(row = row + 1, file = %path.display(), "generated");
                summary.processed += 1;
            }
            RowOutcome::Skipped(reason) => {
                warn!(row = row + 1, "skipping row: {}", reason.describe());
                summary.skipped += 1;
            }
        }
    }

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        output = %options.output_dir.display(),
        "batch complete"
    );

    Ok(summary)
}

/// Process a single data row into at most one output file.
fn process_row(
    range: &Range<Data>,
    row: u32,
    name_col: u32,
    phone_col: u32,
    options: &BatchOptions,
    font: &RegisteredFont,
) -> RowOutcome {
    let name = cell_to_string(range.get_value((row, name_col)));
    let phone = cell_to_string(range.get_value((row, phone_col)));

    let display = match name.as_deref().map(display_name) {
        Some(d) if !d.is_empty() => d,
        _ => return RowOutcome::Skipped(SkipReason::MissingName),
    };
    let stem = match phone.as_deref().map(sanitize_phone) {
        Some(s) if !s.is_empty() => s,
        _ => return RowOutcome::Skipped(SkipReason::MissingPhone),
    };

    // Identity of the output is the sanitized phone; a later row with the
    // same phone overwrites the earlier file
    let output_path = options.output_dir.join(format!("{stem}.pdf"));

    match stamp_document(
        &options.template,
        &output_path,
        &display,
        &options.bbox,
        &options.style,
        font,
    ) {
        Ok(()) => RowOutcome::Generated(output_path),
        Err(e) => RowOutcome::Skipped(SkipReason::Failed(e)),
    }
}

/// Last 0-based row index holding data in either selected column.
/// Returns 0 (header only, nothing to iterate) when no data row qualifies.
fn last_data_row(range: &Range<Data>, name_col: u32, phone_col: u32) -> u32 {
    let end_row = range.end().map(|(row, _)| row).unwrap_or(0);
    let mut last = 0;
    for row in 1..=end_row {
        let has_data = [name_col, phone_col].iter().any(|&col| {
            !matches!(range.get_value((row, col)), None | Some(Data::Empty))
        });
        if has_data {
            last = row;
        }
    }
    last
}

/// Convert a cell to its string form, `None` for absent/empty cells.
///
/// Bare numbers come out of xlsx as floats; integral values are formatted
/// without the trailing `.0` so a numeric phone cell still yields a clean
/// filename stem.
fn cell_to_string(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format_float(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Derive the display name: at most the first two whitespace-separated
/// tokens of the raw value, title-cased.
fn display_name(raw: &str) -> String {
    raw.split_whitespace()
        .take(2)
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case one token: a letter is uppercased when it follows a
/// non-letter (start of token, hyphen, apostrophe), lowercased otherwise.
/// "mary-jane" becomes "Mary-Jane", "o'brien" becomes "O'Brien".
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_letter_run_start = true;
    for ch in word.chars() {
        if ch.is_alphabetic() {
            if at_letter_run_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_letter_run_start = false;
        } else {
            out.push(ch);
            at_letter_run_start = true;
        }
    }
    out
}

/// Strip whitespace, `+` and `-` from a phone value for use as a filename stem.
fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '+' && *c != '-')
        .collect()
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}
