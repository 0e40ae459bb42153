use log::{debug, error};
use thiserror::Error;

use crate::types::{MonetaryAmount, Summary, Transaction};
use crate::utils::OrDefault;

/// Category key for transactions without remarks.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("adding {amount} to the {target} overflows")]
    Overflow { target: String, amount: String },
}

impl AggregationError {
    fn overflow(target: impl Into<String>, amount: MonetaryAmount) -> Self {
        Self::Overflow {
            target: target.into(),
            amount: amount.value().to_string(),
        }
    }
}

pub fn category_key(tx: &Transaction) -> &str {
    match tx.remarks.as_deref() {
        Some(remarks) if !remarks.is_empty() => remarks,
        _ => UNCATEGORIZED,
    }
}

// Spender and receiver are updated one after the other, so a self-transaction records both
// sides and leaves the balance where it was.
fn apply_transaction(summary: Summary, tx: &Transaction) -> Result<Summary, AggregationError> {
    let amount = tx.amount;

    let total = summary
        .total
        .checked_add(amount)
        .ok_or_else(|| AggregationError::overflow("total", amount))?;

    let spender_state = summary
        .by_party
        .get_or_default(&tx.spender)
        .debit(amount)
        .ok_or_else(|| AggregationError::overflow(format!("party {:?}", tx.spender), amount))?;
    let by_party = summary.by_party.update(tx.spender.clone(), spender_state);

    let receiver_state = by_party
        .get_or_default(&tx.receiver)
        .credit(amount)
        .ok_or_else(|| AggregationError::overflow(format!("party {:?}", tx.receiver), amount))?;
    let by_party = by_party.update(tx.receiver.clone(), receiver_state);

    let category = category_key(tx).to_string();
    let category_total = summary
        .by_category
        .get_or_default(&category)
        .checked_add(amount)
        .ok_or_else(|| AggregationError::overflow(format!("category {:?}", category), amount))?;
    let by_category = summary.by_category.update(category, category_total);

    Ok(Summary {
        total,
        by_party,
        by_category,
    })
}

// Used for testing
fn summarize_with_init(
    init: Summary,
    transactions: &[Transaction],
) -> Result<Summary, AggregationError> {
    transactions.iter().try_fold(init, apply_transaction)
}

/// Folds a batch into totals. A batch that cannot be aggregated yields the empty summary.
///
/// The result does not depend on row order as long as no running sum leaves the `Decimal`
/// range. With mixed-sign amounts near that limit, whether an intermediate sum overflows (and
/// the batch degrades) can depend on the order the rows arrive in.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    match summarize_with_init(Summary::default(), transactions) {
        Ok(summary) => {
            debug!(
                "summarised {} transactions across {} parties",
                transactions.len(),
                summary.by_party.len()
            );
            summary
        }
        Err(e) => {
            error!(
                "failed to summarise {} transactions: {}",
                transactions.len(),
                e
            );
            Summary::default()
        }
    }
}
