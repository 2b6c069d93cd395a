//! Spreadsheet (.xlsx) text extraction

use super::ExtractResult;
use calamine::{Data, DataType, Reader, Xlsx};
use std::io::Cursor;

/// Rendering of date-formatted cells
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Flattens every worksheet into lines of space-separated cell values
///
/// Worksheets are read in workbook order and rows in sheet order. Each row
/// becomes one line holding its non-empty cells, stringified and joined by a
/// single space; a row with no values becomes an empty line. Lines of all
/// sheets are joined with `\n`. Date cells are rendered as timestamps.
pub fn parse_spreadsheet(bytes: &[u8]) -> ExtractResult<String> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let mut lines = Vec::new();
    for (name, range) in workbook.worksheets() {
        tracing::trace!("Reading worksheet '{}' ({:?})", name, range.get_size());
        for row in range.rows() {
            let values: Vec<String> = row
                .iter()
                .map(cell_text)
                .filter(|value| !value.is_empty())
                .collect();
            lines.push(values.join(" "));
        }
    }

    Ok(lines.join("\n"))
}

/// Stringifies one cell value
///
/// Cells with a date number format become `YYYY-MM-DD HH:MM:SS` instead of
/// their serial number, booleans become `True`/`False`, and everything else
/// uses calamine's display form (whole floats print without a fraction).
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(datetime) => datetime.format(DATE_TIME_FORMAT).to_string(),
            None => cell.to_string(),
        },
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        _ => cell.to_string(),
    }
}
