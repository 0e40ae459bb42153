use std::fmt;

use im::OrdSet;
use log::debug;

use crate::types::{Selector, Transaction};

/// Label shown next to the match-all option of a party picker.
pub const ALL_PARTIES_LABEL: &str = "All Parties";

/// Every distinct, non-blank spender or receiver name in ascending order.
///
/// Names compare byte-wise, so every uppercase initial sorts before any lowercase one (`"Bob"`
/// precedes `"alice"`). This is not a locale collation.
pub fn extract_parties(transactions: &[Transaction]) -> Vec<String> {
    transactions
        .iter()
        .flat_map(|tx| [&tx.spender, &tx.receiver])
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .collect::<OrdSet<String>>()
        .into_iter()
        .collect()
}

/// Narrows a batch to the transactions the selector covers. An unknown party yields nothing.
pub fn filter_by_party(transactions: &[Transaction], selector: &Selector) -> Vec<Transaction> {
    let selected: Vec<Transaction> = match selector {
        Selector::All => transactions.to_vec(),
        Selector::Party(party) => transactions
            .iter()
            .filter(|tx| tx.involves(party))
            .cloned()
            .collect(),
    };
    debug!(
        "selector {:?} kept {} of {} transactions",
        selector.as_str(),
        selected.len(),
        transactions.len()
    );
    selected
}

/// Options for a party picker: the match-all entry, then each party, with a selection that
/// survives a reload only while its party still exists.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PartyFilterOptions {
    pub parties: Vec<String>,
    pub selected: Selector,
}

impl PartyFilterOptions {
    /// `(value, label)` pairs in display order.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        std::iter::once((Selector::ALL, ALL_PARTIES_LABEL))
            .chain(self.parties.iter().map(|p| (p.as_str(), p.as_str())))
            .collect()
    }
}

/// One option per line, value then label, with the selected one marked `*`.
impl fmt::Display for PartyFilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (value, label) in self.entries() {
            let marker = if value == self.selected.as_str() { '*' } else { ' ' };
            writeln!(f, "{} {}\t{}", marker, value, label)?;
        }
        Ok(())
    }
}

pub fn party_filter_options(parties: Vec<String>, current: Option<&Selector>) -> PartyFilterOptions {
    let selected = match current {
        Some(Selector::Party(name)) if parties.contains(name) => Selector::Party(name.clone()),
        _ => Selector::All,
    };
    PartyFilterOptions { parties, selected }
}
