use std::{
    fs::{self, File, OpenOptions},
    path::PathBuf,
};

use ::serde::{Serialize, Serializer};
use log::debug;
use rust_decimal::Decimal;

use crate::display::format_amount;
use crate::error::{LedgerError, SourceError};
use crate::rows::HEADER_ROW;
use crate::types::{MonetaryAmount, PartyBalance, Row, Summary};

/// Supplies the sheet rows, header included when the sheet has one.
pub trait RowSource {
    fn fetch_rows(&self) -> Result<Vec<Row>, SourceError>;
}

/// Appends one `[date, spender, receiver, amount, remarks]` row to the sheet.
pub trait RowSink {
    fn append_row(&self, row: [String; 5]) -> Result<(), SourceError>;
}

/// A CSV export of the expense sheet on local disk.
pub struct CsvRowStore {
    path: PathBuf,
}

impl CsvRowStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvRowStore {
    fn fetch_rows(&self) -> Result<Vec<Row>, SourceError> {
        let file = File::open(&self.path).map_err(|e| SourceError::from_io(&self.path, e))?;
        // Header rows are left to the row parser, so the reader must not consume one. Cells are
        // passed on untrimmed, the way the sheet returns them.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows: Vec<Row> = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_owned).collect());
        }

        debug!("fetched {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

impl RowSink for CsvRowStore {
    fn append_row(&self, row: [String; 5]) -> Result<(), SourceError> {
        let is_new = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| SourceError::from_io(&self.path, e))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            wtr.write_record(HEADER_ROW)?;
        }
        wtr.write_record(&row)?;
        wtr.flush().map_err(|e| SourceError::from_io(&self.path, e))?;

        debug!("appended a row to {}", self.path.display());
        Ok(())
    }
}

fn two_decimals<S: Serializer>(x: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_amount(MonetaryAmount::new(*x)))
}

#[derive(Debug, Serialize)]
pub struct PartyBalanceEntity {
    party: String,
    #[serde(serialize_with = "two_decimals")]
    spent: Decimal,
    #[serde(serialize_with = "two_decimals")]
    received: Decimal,
    #[serde(serialize_with = "two_decimals")]
    balance: Decimal,
}

impl PartyBalanceEntity {
    pub fn from_balance(party: &str, state: &PartyBalance) -> Self {
        Self {
            party: party.to_string(),
            spent: state.spent.value(),
            received: state.received.value(),
            balance: state.balance.value(),
        }
    }
}

/// Party balances as CSV, one row per party in name order. Balances keep their sign.
pub fn output_csv(summary: &Summary) -> Result<String, LedgerError> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for (party, state) in summary.by_party.iter() {
        wtr.serialize(PartyBalanceEntity::from_balance(party, state))
            .map_err(|e| LedgerError::Output(e.to_string()))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| LedgerError::Output(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LedgerError::Output(e.to_string()))
}
