use chrono::{DateTime, SecondsFormat, Utc};
use log::info;

use crate::error::LedgerError;
use crate::io::RowSink;

/// An expense about to be recorded. The amount is stored as typed, the sheet interprets it.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub spender: String,
    pub receiver: String,
    pub amount: String,
    pub remarks: String,
}

impl NewExpense {
    fn validate(&self) -> Result<(), LedgerError> {
        for (field, value) in [
            ("spender", &self.spender),
            ("receiver", &self.receiver),
            ("amount", &self.amount),
        ] {
            if value.trim().is_empty() {
                return Err(LedgerError::InvalidExpense(format!("{} is required", field)));
            }
        }
        Ok(())
    }

    pub fn into_row(self, recorded_at: DateTime<Utc>) -> [String; 5] {
        [
            recorded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.spender,
            self.receiver,
            self.amount,
            self.remarks,
        ]
    }
}

pub fn record_expense_at<S: RowSink>(
    sink: &S,
    expense: NewExpense,
    recorded_at: DateTime<Utc>,
) -> Result<(), LedgerError> {
    expense.validate()?;
    info!(
        "recording {} from {} to {}",
        expense.amount, expense.spender, expense.receiver
    );
    sink.append_row(expense.into_row(recorded_at))?;
    Ok(())
}

/// Validates the expense and appends it to the sheet, dated now.
pub fn record_expense<S: RowSink>(sink: &S, expense: NewExpense) -> Result<(), LedgerError> {
    record_expense_at(sink, expense, Utc::now())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{TimeZone, Utc};

    use super::{record_expense_at, NewExpense};
    use crate::error::{LedgerError, SourceError};
    use crate::io::RowSink;

    #[derive(Default)]
    struct MemorySink(RefCell<Vec<[String; 5]>>);

    impl RowSink for MemorySink {
        fn append_row(&self, row: [String; 5]) -> Result<(), SourceError> {
            self.0.borrow_mut().push(row);
            Ok(())
        }
    }

    fn expense(spender: &str, receiver: &str, amount: &str) -> NewExpense {
        NewExpense {
            spender: spender.to_string(),
            receiver: receiver.to_string(),
            amount: amount.to_string(),
            remarks: "Dinner".to_string(),
        }
    }

    #[test]
    fn expense_is_appended_with_timestamp() {
        let sink = MemorySink::default();
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 18, 30, 0).unwrap();

        record_expense_at(&sink, expense("Alice", "Bob", "42.5"), at).unwrap();

        assert_eq!(
            sink.0.borrow()[0],
            [
                "2024-02-29T18:30:00.000Z".to_string(),
                "Alice".to_string(),
                "Bob".to_string(),
                "42.5".to_string(),
                "Dinner".to_string(),
            ]
        );
    }

    #[test]
    fn blank_parties_are_rejected() {
        let sink = MemorySink::default();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let result = record_expense_at(&sink, expense(" ", "Bob", "1"), at);

        assert!(matches!(result, Err(LedgerError::InvalidExpense(ref m)) if m == "spender is required"));
        assert!(sink.0.borrow().is_empty());
    }

    #[test]
    fn blank_amount_is_rejected() {
        let sink = MemorySink::default();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert!(record_expense_at(&sink, expense("Alice", "Bob", ""), at).is_err());
    }
}
