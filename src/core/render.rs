use crate::domain::model::{ArrivalRecord, FlightCountEntry};
use crate::utils::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

pub const COUNTRY_HEADER: &str = "Country";
pub const FLIGHTS_HEADER: &str = "# Flights (UTC)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

pub fn render_results(entries: &[FlightCountEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table_results(entries)),
        OutputFormat::Csv => render_delimited(entries, b','),
        OutputFormat::Tsv => render_delimited(entries, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
    }
}

/// Country / flight count table as shown by both views.
pub fn render_table_results(entries: &[FlightCountEntry]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| vec![entry.country.clone(), entry.flight_count.to_string()])
        .collect();
    render_table(&[COUNTRY_HEADER, FLIGHTS_HEADER], &rows)
}

fn render_delimited(entries: &[FlightCountEntry], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["country", "flight_count"])?;
    for entry in entries {
        let count = entry.flight_count.to_string();
        writer.write_record([entry.country.as_str(), count.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SearchError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SearchError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

const MISSING_CELL: &str = "-";

/// Per-flight listing with arrival times in UTC. Missing values show as `-`.
pub fn render_arrivals(records: &[ArrivalRecord]) -> String {
    let cell = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING_CELL.to_string());

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let scheduled = match (record.scheduled_arrival_utc(), record.scheduled_arrival) {
                (Some(time), _) => time.format("%Y-%m-%d %H:%M UTC").to_string(),
                (None, Some(seconds)) => seconds.to_string(),
                (None, None) => MISSING_CELL.to_string(),
            };
            vec![
                cell(&record.flight_number),
                cell(&record.airline),
                cell(&record.origin),
                cell(&record.origin_country),
                scheduled,
            ]
        })
        .collect();

    render_table(
        &["Flight", "Airline", "Origin", "Country", "Scheduled arrival"],
        &rows,
    )
}

/// Pipe-delimited text table, columns padded to the widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut lines = vec![format_row(headers.to_vec())];
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(format!("|-{}-|", separator.join("-|-")));
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }

    lines.join("\n")
}

/// Splits a table produced by [`render_table`] back into body cells.
pub fn table_body_rows(table: &str) -> Vec<Vec<String>> {
    table
        .lines()
        .skip(2)
        .map(|line| {
            line.trim()
                .trim_start_matches('|')
                .trim_end_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}
