use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::RoundingStrategy;

use crate::types::{MonetaryAmount, Summary, Transaction};

pub const NO_EXPENSES: &str = "No expenses recorded yet.";

/// Two decimal places, half away from zero.
pub fn format_amount(amount: MonetaryAmount) -> String {
    let rounded = amount
        .value()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CurrencyFormat {
    pub symbol: String,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn render(&self, amount: &str) -> String {
        format!("{}{}", self.symbol, amount)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("₹")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BalanceDirection {
    NetReceived,
    NetSpent,
}

impl BalanceDirection {
    pub fn of(balance: MonetaryAmount) -> Self {
        if balance.is_negative() {
            BalanceDirection::NetSpent
        } else {
            BalanceDirection::NetReceived
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceDirection::NetReceived => "net received",
            BalanceDirection::NetSpent => "net spent",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PartyLine {
    pub name: String,
    pub spent: String,
    pub received: String,
    /// Absolute value; the sign is carried by `direction`.
    pub balance: String,
    pub direction: BalanceDirection,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryLine {
    pub name: String,
    pub amount: String,
}

/// Display-ready summary. Amounts are already rounded to two decimals.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SummaryView {
    pub total: String,
    pub parties: Vec<PartyLine>,
    pub categories: Vec<CategoryLine>,
    pub currency: CurrencyFormat,
}

impl SummaryView {
    pub fn with_currency(self, currency: CurrencyFormat) -> Self {
        Self { currency, ..self }
    }
}

pub fn format_for_display(summary: &Summary) -> SummaryView {
    let parties = summary
        .by_party
        .iter()
        .map(|(name, state)| PartyLine {
            name: name.clone(),
            spent: format_amount(state.spent),
            received: format_amount(state.received),
            balance: format_amount(state.balance.abs()),
            direction: BalanceDirection::of(state.balance),
        })
        .collect();

    let categories = summary
        .by_category
        .iter()
        .map(|(name, amount)| CategoryLine {
            name: name.clone(),
            amount: format_amount(*amount),
        })
        .collect();

    SummaryView {
        total: format_amount(summary.total),
        parties,
        categories,
        currency: CurrencyFormat::default(),
    }
}

impl fmt::Display for SummaryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.currency;
        writeln!(f, "Total Expenses")?;
        writeln!(f, "  {}", c.render(&self.total))?;

        if self.parties.is_empty() && self.categories.is_empty() {
            writeln!(f)?;
            return writeln!(f, "{}", NO_EXPENSES);
        }

        writeln!(f)?;
        writeln!(f, "Party-wise Summary")?;
        for party in &self.parties {
            writeln!(
                f,
                "  {}: Spent {} | Received {} | Balance {} ({})",
                party.name,
                c.render(&party.spent),
                c.render(&party.received),
                c.render(&party.balance),
                party.direction.label()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Category-wise Summary")?;
        for category in &self.categories {
            writeln!(f, "  {}: {}", category.name, c.render(&category.amount))?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExpenseLine {
    pub date: String,
    pub spender: String,
    pub receiver: String,
    pub amount: String,
    pub remarks: Option<String>,
}

fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()));
    match date {
        Ok(d) => d.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Newest first, in reverse sheet order.
pub fn list_expenses(transactions: &[Transaction]) -> Vec<ExpenseLine> {
    transactions
        .iter()
        .rev()
        .map(|tx| ExpenseLine {
            date: display_date(&tx.date),
            spender: tx.spender.clone(),
            receiver: tx.receiver.clone(),
            amount: format_amount(tx.amount),
            remarks: tx.remarks.clone(),
        })
        .collect()
}

pub struct ExpenseList<'a> {
    pub lines: &'a [ExpenseLine],
    pub currency: &'a CurrencyFormat,
}

impl fmt::Display for ExpenseList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return writeln!(f, "{}", NO_EXPENSES);
        }
        for line in self.lines {
            write!(
                f,
                "{}  {} -> {}  {}",
                line.date,
                line.spender,
                line.receiver,
                self.currency.render(&line.amount)
            )?;
            match &line.remarks {
                Some(remarks) => writeln!(f, "  {}", remarks)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{
        format_amount, format_for_display, list_expenses, BalanceDirection, CurrencyFormat,
        ExpenseList, NO_EXPENSES,
    };
    use crate::summary::summarize;
    use crate::types::{MonetaryAmount, Summary, Transaction};

    fn tx(date: &str, spender: &str, receiver: &str, amount: i64, remarks: &str) -> Transaction {
        Transaction {
            date: date.to_string(),
            spender: spender.to_string(),
            receiver: receiver.to_string(),
            amount: MonetaryAmount::from(amount),
            remarks: Some(remarks.to_string()).filter(|r| !r.is_empty()),
        }
    }

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(format_amount(MonetaryAmount::from(140)), "140.00");
        assert_eq!(format_amount(MonetaryAmount::new(Decimal::new(12345, 3))), "12.35");
        assert_eq!(format_amount(MonetaryAmount::new(Decimal::new(-125, 2))), "-1.25");
        assert_eq!(format_amount(MonetaryAmount::new(Decimal::new(5, 3))), "0.01");
    }

    #[test]
    fn non_negative_balance_is_net_received() {
        assert_eq!(
            BalanceDirection::of(MonetaryAmount::default()),
            BalanceDirection::NetReceived
        );
        assert_eq!(
            BalanceDirection::of(MonetaryAmount::from(-1)),
            BalanceDirection::NetSpent
        );
    }

    #[test]
    fn view_is_sorted_and_formatted() {
        let summary = summarize(&[
            tx("2024-01-01", "Zoe", "Alice", 100, "Lunch"),
            tx("2024-01-02", "Alice", "Zoe", 40, "Coffee"),
        ]);
        let view = format_for_display(&summary);

        assert_eq!(view.total, "140.00");
        let names: Vec<&str> = view.parties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Zoe"]);
        let categories: Vec<&str> = view.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(categories, vec!["Coffee", "Lunch"]);

        let alice = &view.parties[0];
        assert_eq!(alice.spent, "40.00");
        assert_eq!(alice.received, "100.00");
        assert_eq!(alice.balance, "60.00");
        assert_eq!(alice.direction, BalanceDirection::NetReceived);

        let zoe = &view.parties[1];
        assert_eq!(zoe.balance, "60.00");
        assert_eq!(zoe.direction, BalanceDirection::NetSpent);
    }

    #[test]
    fn rendered_view_uses_currency_symbol() {
        let summary = summarize(&[tx("2024-01-01", "A", "B", 5, "")]);
        let rendered = format_for_display(&summary)
            .with_currency(CurrencyFormat::new("$"))
            .to_string();

        assert!(rendered.contains("Total Expenses\n  $5.00\n"));
        assert!(rendered.contains("  A: Spent $5.00 | Received $0.00 | Balance $5.00 (net spent)\n"));
        assert!(rendered.contains("  Uncategorized: $5.00\n"));
    }

    #[test]
    fn empty_summary_renders_placeholder() {
        let rendered = format_for_display(&Summary::default()).to_string();
        assert!(rendered.contains("₹0.00"));
        assert!(rendered.contains(NO_EXPENSES));
        assert!(!rendered.contains("Party-wise Summary"));
    }

    #[test]
    fn expenses_are_listed_newest_first() {
        let lines = list_expenses(&[
            tx("2024-01-01", "A", "B", 10, "Lunch"),
            tx("2024-03-05T10:15:00.000Z", "B", "A", 3, ""),
            tx("someday", "A", "C", 1, ""),
        ]);

        assert_eq!(lines[0].date, "someday");
        assert_eq!(lines[1].date, "2024-03-05");
        assert_eq!(lines[1].amount, "3.00");
        assert_eq!(lines[2].date, "2024-01-01");
        assert_eq!(lines[2].remarks.as_deref(), Some("Lunch"));
    }

    #[test]
    fn empty_expense_list_renders_placeholder() {
        let currency = CurrencyFormat::default();
        let rendered = ExpenseList {
            lines: &[],
            currency: &currency,
        }
        .to_string();
        assert_eq!(rendered, format!("{}\n", NO_EXPENSES));
    }
}
