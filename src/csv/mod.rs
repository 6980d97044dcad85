//! CSV import/export.
//!
//! Canonical column order: `name, team, runs, balls, fours, sixes, format`.
//! Export appends a derived `strike_rate` column which import ignores.
//! Import is row-independent: a bad row is recorded and skipped, valid rows
//! before and after it still commit.
//!
//! Text fields beginning with `=`, `+`, `-`, or `@` are quote-prefixed on
//! export to neutralize spreadsheet formula injection; import strips the
//! guard so export→import is lossless.

use std::io::Read;

use ::csv::{ReaderBuilder, Trim, Writer};
use serde::Serialize;
use thiserror::Error;

use crate::calculate::format_strike_rate;
use crate::models::{Player, PlayerDraft};

/// Minimum fields a data row must carry (extra columns are ignored).
const MIN_FIELDS: usize = 7;

/// Errors that abort the whole CSV operation (not per-row failures).
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV read error: {0}")]
    Read(#[from] ::csv::Error),

    #[error("CSV write error: {0}")]
    Write(String),
}

/// Outcome of one parsed row: a draft ready for validation, or the reason
/// the row could not even be parsed.
#[derive(Debug)]
pub struct ParsedRow {
    /// 1-based line number in the input
    pub line: u64,
    pub draft: Result<PlayerDraft, String>,
}

/// A row that failed parse or validation during import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportError {
    pub line: u64,
    pub reason: String,
}

/// Summary of an import batch.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub imported: u32,
    pub skipped: u32,
    pub errors: Vec<ImportError>,
}

impl ImportReport {
    pub fn record_error(&mut self, line: u64, reason: String) {
        self.skipped += 1;
        self.errors.push(ImportError { line, reason });
    }
}

/// Parse CSV input into per-row drafts.
///
/// The first row is treated as a header iff its first field is `name`
/// (case-insensitive). Unreadable rows become `Err` drafts rather than
/// aborting the batch; only an unreadable stream fails the whole call.
pub fn parse<R: Read>(input: R) -> Result<Vec<ParsedRow>, CsvError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(i as u64 + 1);
                rows.push(ParsedRow {
                    line,
                    draft: Err(format!("unreadable row: {}", e)),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(i as u64 + 1);

        // Header detection: only the very first row qualifies
        if i == 0 && record.get(0).is_some_and(|f| f.eq_ignore_ascii_case("name")) {
            continue;
        }

        // Skip fully blank rows silently
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        if record.len() < MIN_FIELDS {
            rows.push(ParsedRow {
                line,
                draft: Err(format!(
                    "expected at least {} fields, got {}",
                    MIN_FIELDS,
                    record.len()
                )),
            });
            continue;
        }

        let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
        rows.push(ParsedRow {
            line,
            draft: Ok(PlayerDraft {
                name: unguard(&field(0)),
                team: unguard(&field(1)),
                runs: field(2),
                balls: field(3),
                fours: field(4),
                sixes: field(5),
                format: field(6),
            }),
        });
    }

    Ok(rows)
}

/// Serialize the collection to CSV with a header row.
pub fn export(players: &[Player]) -> Result<String, CsvError> {
    let mut writer = Writer::from_writer(Vec::new());

    writer
        .write_record([
            "name",
            "team",
            "runs",
            "balls",
            "fours",
            "sixes",
            "format",
            "strike_rate",
        ])
        .map_err(|e| CsvError::Write(e.to_string()))?;

    for p in players {
        writer
            .write_record([
                guard(&p.name),
                guard(&p.team),
                p.runs.to_string(),
                p.balls.to_string(),
                p.fours.to_string(),
                p.sixes.to_string(),
                p.format.as_str().to_string(),
                format_strike_rate(p.strike_rate()),
            ])
            .map_err(|e| CsvError::Write(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CsvError::Write(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CsvError::Write(e.to_string()))
}

/// Prefix a single quote onto fields a spreadsheet would evaluate.
fn guard(field: &str) -> String {
    match field.chars().next() {
        Some('=') | Some('+') | Some('-') | Some('@') => format!("'{}", field),
        _ => field.to_string(),
    }
}

/// Strip the formula guard applied by [`guard`].
fn unguard(field: &str) -> String {
    match field.strip_prefix('\'') {
        Some(rest)
            if matches!(
                rest.chars().next(),
                Some('=') | Some('+') | Some('-') | Some('@')
            ) =>
        {
            rest.to_string()
        }
        _ => field.to_string(),
    }
}
