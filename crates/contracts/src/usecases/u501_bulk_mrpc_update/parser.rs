//! Разбор буфера массовой вставки МРЦ: по строке "SKU<пробелы>цена".
//!
//! The whole buffer is accepted or rejected at once: one bad line rejects
//! the batch and every bad line is reported.

use std::fmt;

use super::request::BulkPriceUpdateRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineErrorKind {
    InvalidFormat,
    InvalidPrice,
}

/// Ошибка в конкретной строке (нумерация с 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub kind: LineErrorKind,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LineErrorKind::InvalidFormat => write!(f, "line {}: invalid format", self.line),
            LineErrorKind::InvalidPrice => write!(f, "line {}: invalid price", self.line),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BulkParseOutcome {
    /// No errors and at least one record, in input order
    Ready(Vec<BulkPriceUpdateRecord>),
    /// At least one malformed line; nothing may be sent
    Rejected(Vec<LineError>),
    /// Only blank lines
    NoData,
}

impl BulkParseOutcome {
    pub fn records(&self) -> &[BulkPriceUpdateRecord] {
        match self {
            BulkParseOutcome::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        match self {
            BulkParseOutcome::Rejected(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

pub fn parse_bulk_mrpc(text: &str) -> BulkParseOutcome {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }

        let parts: Vec<&str> = row.split_whitespace().collect();
        let [sku, price] = parts.as_slice() else {
            errors.push(LineError {
                line,
                kind: LineErrorKind::InvalidFormat,
            });
            continue;
        };

        if sku.is_empty() {
            errors.push(LineError {
                line,
                kind: LineErrorKind::InvalidFormat,
            });
            continue;
        }

        match parse_price(price) {
            Some(mrpc) => records.push(BulkPriceUpdateRecord {
                sku: sku.to_string(),
                mrpc,
            }),
            None => errors.push(LineError {
                line,
                kind: LineErrorKind::InvalidPrice,
            }),
        }
    }

    if !errors.is_empty() {
        BulkParseOutcome::Rejected(errors)
    } else if records.is_empty() {
        BulkParseOutcome::NoData
    } else {
        BulkParseOutcome::Ready(records)
    }
}

/// Positive finite decimal. A single comma is read as the decimal separator,
/// which is what a ru-RU spreadsheet puts on the clipboard.
fn parse_price(token: &str) -> Option<f64> {
    let normalized = if token.matches(',').count() == 1 && !token.contains('.') {
        token.replace(',', ".")
    } else {
        token.to_string()
    };

    // f64::from_str also takes "inf"/"nan"; only plain decimals are prices
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return None;
    }

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
