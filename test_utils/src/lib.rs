use serde::Serialize;

#[derive(Serialize)]
struct BalanceRow {
    party: &'static str,
    spent: &'static str,
    received: &'static str,
    balance: &'static str,
}

impl BalanceRow {
    fn new(
        party: &'static str,
        spent: &'static str,
        received: &'static str,
        balance: &'static str,
    ) -> Self {
        Self {
            party,
            spent,
            received,
            balance,
        }
    }
}

// Only used during testing so no need to return result
pub fn create_csv(rows: Vec<[&'static str; 4]>) -> String {
    let balance_rows: Vec<BalanceRow> = rows
        .into_iter()
        .map(|r| BalanceRow::new(r[0], r[1], r[2], r[3]))
        .collect();

    let mut wtr = csv::Writer::from_writer(vec![]);
    for b in balance_rows {
        wtr.serialize(b).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

/// Raw sheet rows as the row source would hand them over. Rows may be ragged.
pub fn sheet_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
