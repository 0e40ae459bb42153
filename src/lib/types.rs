use im::OrdMap;
use rust_decimal::Decimal;

/// A raw sheet row, one string per cell, as returned by the row source.
pub type Row = Vec<String>;

#[derive(Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

impl From<i64> for MonetaryAmount {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

/// One recorded expense movement. Missing trailing cells leave the text fields empty and
/// `remarks` unset.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub date: String,
    pub spender: String,
    pub receiver: String,
    pub amount: MonetaryAmount,
    pub remarks: Option<String>,
}

impl Transaction {
    pub fn involves(&self, party: &str) -> bool {
        self.spender == party || self.receiver == party
    }
}

/// Which transactions a summary covers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Selector {
    /// Every transaction, selected with the literal `"all"`.
    All,
    /// Only transactions where the party is spender or receiver.
    Party(String),
}

impl Selector {
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &str {
        match self {
            Selector::All => Self::ALL,
            Selector::Party(name) => name,
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            Selector::All
        } else {
            Selector::Party(value.to_string())
        }
    }
}

/// Running position of one party. `balance` is received minus spent, positive for a net
/// recipient.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct PartyBalance {
    pub spent: MonetaryAmount,
    pub received: MonetaryAmount,
    pub balance: MonetaryAmount,
}

impl PartyBalance {
    /// Records the party paying `amount`. `None` on overflow.
    pub fn debit(&self, amount: MonetaryAmount) -> Option<Self> {
        Some(Self {
            spent: self.spent.checked_add(amount)?,
            balance: self.balance.checked_sub(amount)?,
            ..*self
        })
    }

    /// Records the party being paid `amount`. `None` on overflow.
    pub fn credit(&self, amount: MonetaryAmount) -> Option<Self> {
        Some(Self {
            received: self.received.checked_add(amount)?,
            balance: self.balance.checked_add(amount)?,
            ..*self
        })
    }
}

/// Aggregate of a transaction batch. The ordered maps keep parties and categories sorted by name.
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct Summary {
    pub total: MonetaryAmount,
    pub by_party: OrdMap<String, PartyBalance>,
    pub by_category: OrdMap<String, MonetaryAmount>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.by_party.is_empty() && self.by_category.is_empty()
    }
}
