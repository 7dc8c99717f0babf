//! Flat-text export of the full record set.
//!
//! Comma-delimited UTF-8 with one header row, fields in the declared order
//! of [`SaleRecord`]. Fields containing a comma, quote or line break are
//! quoted RFC4180-style so a report survives a round trip through
//! [`parse_delimited_text`].

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::month::Month;
use crate::domain::sale::{Path, SaleRecord};

pub const HEADER: &str =
    "id,employee,month,rochas,decorativos,itens,total,path,commission,loyalty_bonus,forge_bonus";

/// Default artifact name for a downloaded report.
pub const DEFAULT_REPORT_NAME: &str = "sales_report.csv";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportParseError {
    #[error("missing or unexpected header row: `{0}`")]
    Header(String),
    #[error("row {row} has {found} fields, expected {expected}")]
    FieldCount { row: usize, found: usize, expected: usize },
    #[error("row {row}, field `{field}`: could not parse `{value}`")]
    Field { row: usize, field: &'static str, value: String },
    #[error("unterminated quoted field starting at row {0}")]
    UnterminatedQuote(usize),
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn to_delimited_text(records: &[SaleRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for record in records {
        let fields = [
            record.id.to_string(),
            escape(&record.employee),
            record.month.as_str().to_string(),
            record.rochas.to_string(),
            record.decorativos.to_string(),
            record.itens.to_string(),
            record.total.to_string(),
            record.path.as_str().to_string(),
            record.commission.to_string(),
            record.loyalty_bonus.to_string(),
            record.forge_bonus.to_string(),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Splits delimited text into rows of fields, honoring quoted fields.
fn split_rows(input: &str) -> Result<Vec<Vec<String>>, ExportParseError> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_row = 0usize;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                quote_row = rows.len() + 1;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut fields));
            }
            other => field.push(other),
        }
    }

    if in_quotes {
        return Err(ExportParseError::UnterminatedQuote(quote_row));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        rows.push(fields);
    }

    Ok(rows)
}

fn parse_decimal(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<Decimal, ExportParseError> {
    value.parse().map_err(|_| ExportParseError::Field { row, field, value: value.to_string() })
}

/// Re-ingests a previously exported report.
pub fn parse_delimited_text(input: &str) -> Result<Vec<SaleRecord>, ExportParseError> {
    let rows = split_rows(input)?;
    let mut rows = rows.into_iter();

    let header = rows.next().ok_or_else(|| ExportParseError::Header(String::new()))?;
    if header.join(",") != HEADER {
        return Err(ExportParseError::Header(header.join(",")));
    }

    let expected = HEADER.split(',').count();
    let mut records = Vec::new();
    for (offset, fields) in rows.enumerate() {
        let row = offset + 2;
        if fields.len() != expected {
            return Err(ExportParseError::FieldCount { row, found: fields.len(), expected });
        }

        let id = fields[0]
            .parse::<i64>()
            .map_err(|_| ExportParseError::Field { row, field: "id", value: fields[0].clone() })?;
        let month = fields[2].parse::<Month>().map_err(|_| ExportParseError::Field {
            row,
            field: "month",
            value: fields[2].clone(),
        })?;
        let path = fields[7].parse::<Path>().map_err(|_| ExportParseError::Field {
            row,
            field: "path",
            value: fields[7].clone(),
        })?;

        records.push(SaleRecord {
            id,
            employee: fields[1].clone(),
            month,
            rochas: parse_decimal(row, "rochas", &fields[3])?,
            decorativos: parse_decimal(row, "decorativos", &fields[4])?,
            itens: parse_decimal(row, "itens", &fields[5])?,
            total: parse_decimal(row, "total", &fields[6])?,
            path,
            commission: parse_decimal(row, "commission", &fields[8])?,
            loyalty_bonus: parse_decimal(row, "loyalty_bonus", &fields[9])?,
            forge_bonus: parse_decimal(row, "forge_bonus", &fields[10])?,
        });
    }

    Ok(records)
}
