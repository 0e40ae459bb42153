mod display;
mod error;
mod expenses;
mod io;
mod parties;
mod rows;
mod summary;
mod types;
mod utils;

use std::path::Path;

pub use display::{
    format_amount, format_for_display, list_expenses, BalanceDirection, CategoryLine,
    CurrencyFormat, ExpenseLine, ExpenseList, PartyLine, SummaryView, NO_EXPENSES,
};
pub use error::{LedgerError, SourceError};
pub use expenses::{record_expense, record_expense_at, NewExpense};
pub use io::{output_csv, CsvRowStore, RowSink, RowSource};
pub use parties::{
    extract_parties, filter_by_party, party_filter_options, PartyFilterOptions,
    ALL_PARTIES_LABEL,
};
pub use rows::{has_header, parse_amount, parse_rows, HEADER_MARKER, HEADER_ROW};
pub use summary::{category_key, summarize, UNCATEGORIZED};
pub use types::{MonetaryAmount, PartyBalance, Row, Selector, Summary, Transaction};

/// Fetches the sheet and parses it into transactions.
pub fn load_transactions<S: RowSource>(source: &S) -> Result<Vec<Transaction>, LedgerError> {
    let rows = source.fetch_rows()?;
    Ok(parse_rows(&rows))
}

pub fn process_summary(sheet_path: &Path, selector: &Selector) -> Result<Summary, LedgerError> {
    let transactions = load_transactions(&CsvRowStore::new(sheet_path))?;
    let in_scope = filter_by_party(&transactions, selector);
    Ok(summarize(&in_scope))
}

/// Party balances of the sheet at `sheet_path` as CSV.
pub fn process_balances(sheet_path: &Path, selector: &Selector) -> Result<String, LedgerError> {
    let summary = process_summary(sheet_path, selector)?;
    output_csv(&summary)
}
