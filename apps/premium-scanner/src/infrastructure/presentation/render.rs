//! Table and JSON rendering of enriched records.

use std::fmt::Write;

use crate::domain::option_chain::EnrichedRecord;

/// Printed when a scan yields no rows.
pub const NO_DATA_MESSAGE: &str = "No data available to calculate margin and premium.";

const HEADERS: [&str; 6] = [
    "instrument_name",
    "strike_price",
    "side",
    "bid/ask",
    "margin_required",
    "premium_earned",
];

/// Render records as a fixed-width text table, one row per record.
///
/// Numeric columns are right-aligned. Returns [`NO_DATA_MESSAGE`] for an
/// empty slice.
#[must_use]
pub fn render_table(records: &[EnrichedRecord]) -> String {
    if records.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|record| {
            let quote = record.quote();
            [
                quote.instrument_name().to_string(),
                quote.strike_price().normalize().to_string(),
                quote.side().to_string(),
                quote.price().normalize().to_string(),
                record.margin_required().normalize().to_string(),
                record.premium_earned().normalize().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    write_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("  "));
    for row in &rows {
        write_row(&mut out, row, &widths);
    }

    out.truncate(out.trim_end().len());
    out
}

fn write_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        // text columns left, numeric columns right
        if index == 0 || index == 2 {
            let _ = write!(line, "{cell:<width$}");
        } else {
            let _ = write!(line, "{cell:>width$}");
        }
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Render records as a pretty-printed JSON array.
///
/// Decimal fields are emitted as strings to keep exact values.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(records: &[EnrichedRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
