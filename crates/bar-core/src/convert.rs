// File: crates/bar-core/src/convert.rs
// Summary: Data converter: table rows of cells -> ordered `Record { category, amount }` sequence.
// Notes:
// - A non-numeric amount becomes NaN and a null category becomes "", so the
//   output always has one record per input row.
// - Only a row too short to hold both columns is rejected.

use thiserror::Error;

use crate::dataview::{Cell, Row};

/// One bar's worth of data.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub category: String,
    pub amount: f64,
}

impl Record {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self { category: category.into(), amount }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("row {row} has {cells} cell(s); category and amount columns are required")]
    InputShape { row: usize, cells: usize },
}

/// Convert rows into records, preserving order and length.
pub fn convert(rows: &[Row]) -> Result<Vec<Record>, ConvertError> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| match row.as_slice() {
            [category, amount, ..] => Ok(Record {
                category: cell_text(category),
                amount: cell_number(amount),
            }),
            _ => Err(ConvertError::InputShape { row: i, cells: row.len() }),
        })
        .collect()
}

/// Textual representation of a cell.
pub fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.clone(),
        Cell::Number(v) => format_number(*v),
        Cell::Bool(b) => b.to_string(),
        Cell::Null => String::new(),
    }
}

/// Numeric coercion of a cell; anything unparseable is NaN.
pub fn cell_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(v) => *v,
        Cell::Bool(true) => 1.0,
        Cell::Bool(false) => 0.0,
        Cell::Null => 0.0,
        Cell::Text(s) => parse_number(s),
    }
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if v == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }

    // shortest round-trip digits and decimal exponent, e.g. "1.2345e2"
    let sci = format!("{:e}", v.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exp.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let e = (n - 1).abs();
        match k {
            1 => format!("{digits}e{sign}{e}"),
            _ => format!("{}.{}e{sign}{e}", &digits[..1], &digits[1..]),
        }
    };
    if v < 0.0 { format!("-{body}") } else { body }
}

/// Unsigned integer literal in `radix`; arbitrarily wide values round to the nearest f64.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut exact: Option<u128> = Some(0);
    let mut approx = 0.0f64;
    for ch in digits.chars() {
        let Some(d) = ch.to_digit(radix) else { return f64::NAN };
        exact = exact
            .and_then(|acc| acc.checked_mul(radix as u128))
            .and_then(|acc| acc.checked_add(d as u128));
        approx = approx * radix as f64 + d as f64;
    }
    exact.map_or(approx, |v| v as f64)
}

fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }
    // str::parse also takes "inf" and "nan", which hosts reject
    let plain = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !plain {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}
