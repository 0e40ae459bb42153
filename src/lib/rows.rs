use std::str::FromStr;

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::types::{MonetaryAmount, Row, Transaction};

/// First cell of the optional header row.
pub const HEADER_MARKER: &str = "Date";

/// Header written to a fresh sheet, in cell order.
pub const HEADER_ROW: [&str; 5] = ["Date", "Spender", "Receiver", "Amount", "Remarks"];

pub fn has_header(rows: &[Row]) -> bool {
    rows.first()
        .and_then(|row| row.first())
        .map_or(false, |cell| cell == HEADER_MARKER)
}

/// Maps raw sheet rows onto transactions, dropping the header row when present.
pub fn parse_rows(rows: &[Row]) -> Vec<Transaction> {
    let skip = usize::from(has_header(rows));
    let transactions: Vec<Transaction> = rows.iter().skip(skip).map(|r| parse_row(r)).collect();
    debug!(
        "parsed {} transactions from {} rows",
        transactions.len(),
        rows.len()
    );
    transactions
}

fn parse_row(row: &[String]) -> Transaction {
    let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
    Transaction {
        date: cell(0),
        spender: cell(1),
        receiver: cell(2),
        amount: parse_amount(row.get(3).map(String::as_str)),
        remarks: row.get(4).filter(|remarks| !remarks.is_empty()).cloned(),
    }
}

/// Reads the leading number of an amount cell. Anything unreadable counts as zero.
pub fn parse_amount(cell: Option<&str>) -> MonetaryAmount {
    let cell = match cell.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return MonetaryAmount::default(),
    };

    let amount = numeric_prefix(cell).and_then(|(number, consumed)| {
        if consumed < cell.len() {
            warn!("ignoring trailing characters in amount {:?}", cell);
        }
        if number.contains('e') {
            Decimal::from_scientific(&number).ok()
        } else {
            Decimal::from_str(&number).ok()
        }
    });

    match amount {
        Some(a) => MonetaryAmount::new(a),
        None => {
            warn!("amount {:?} is not a number, counting it as 0", cell);
            MonetaryAmount::default()
        }
    }
}

// `[+-]?digits[.digits][(e|E)[+-]?digits]` at the start of the cell, normalised so that `.5`
// reads as `0.5` and `1.00E+03` as `1.00e3`. Returns the number and how many bytes of the cell
// it covered.
fn numeric_prefix(cell: &str) -> Option<(String, usize)> {
    let bytes = cell.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            end = 1;
            true
        }
        Some(b'+') => {
            end = 1;
            false
        }
        _ => false,
    };

    let int_len = digits_from(end);
    let int_part = &cell[end..end + int_len];
    end += int_len;

    let mut frac_part = "";
    if bytes.get(end) == Some(&b'.') {
        let frac_len = digits_from(end + 1);
        if frac_len > 0 {
            frac_part = &cell[end + 1..end + 1 + frac_len];
            end += 1 + frac_len;
        }
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = String::new();
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let sign_len = usize::from(matches!(bytes.get(end + 1), Some(b'+') | Some(b'-')));
        let exp_len = digits_from(end + 1 + sign_len);
        if exp_len > 0 {
            if bytes.get(end + 1) == Some(&b'-') {
                exponent.push('-');
            }
            let exp_start = end + 1 + sign_len;
            exponent.push_str(&cell[exp_start..exp_start + exp_len]);
            end = exp_start + exp_len;
        }
    }

    let mut number = String::with_capacity(end + 1);
    if negative {
        number.push('-');
    }
    number.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        number.push('.');
        number.push_str(frac_part);
    }
    if !exponent.is_empty() {
        number.push('e');
        number.push_str(&exponent);
    }
    Some((number, end))
}
