use std::{path::PathBuf, process};

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use split_ledger_lib::{
    extract_parties, format_for_display, list_expenses, load_transactions, party_filter_options,
    process_balances, process_summary, record_expense, CsvRowStore, CurrencyFormat, ExpenseList,
    LedgerError, NewExpense, Selector,
};

/// Shared expense tracker over a CSV export of the expense sheet
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the expense sheet
    #[arg(long, default_value = "expenses.csv")]
    sheet: PathBuf,

    /// Currency symbol used in text output
    #[arg(long, default_value = "₹")]
    currency: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Total, party-wise and category-wise balances
    Summary {
        /// Party to summarise, or "all"
        #[arg(long, default_value = Selector::ALL)]
        party: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Everyone who has spent or received, marking the selected party
    Parties {
        /// Previously selected party, kept only if it still appears in the sheet
        #[arg(long, default_value = Selector::ALL)]
        party: String,
    },
    /// Recorded expenses, newest first
    List,
    /// Record an expense
    Add {
        #[arg(long)]
        spender: String,
        #[arg(long)]
        receiver: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        remarks: String,
    },
}

fn run(args: Args) -> Result<String, LedgerError> {
    let store = CsvRowStore::new(&args.sheet);
    let currency = CurrencyFormat::new(args.currency);

    match args.command {
        Command::Summary { party, format } => {
            let selector = Selector::from(party.as_str());
            match format {
                OutputFormat::Csv => process_balances(&args.sheet, &selector),
                OutputFormat::Text => {
                    let summary = process_summary(&args.sheet, &selector)?;
                    Ok(format_for_display(&summary)
                        .with_currency(currency)
                        .to_string())
                }
            }
        }
        Command::Parties { party } => {
            let transactions = load_transactions(&store)?;
            let current = Selector::from(party.as_str());
            let options = party_filter_options(extract_parties(&transactions), Some(&current));
            Ok(options.to_string())
        }
        Command::List => {
            let transactions = load_transactions(&store)?;
            let lines = list_expenses(&transactions);
            Ok(ExpenseList {
                lines: &lines,
                currency: &currency,
            }
            .to_string())
        }
        Command::Add {
            spender,
            receiver,
            amount,
            remarks,
        } => {
            record_expense(
                &store,
                NewExpense {
                    spender,
                    receiver,
                    amount,
                    remarks,
                },
            )?;
            Ok(String::from("Expense recorded.\n"))
        }
    }
}

fn main() {
    env_logger::init();

    match run(Args::parse()) {
        Ok(output) => {
            print!("{}", output);
            process::exit(0);
        }
        Err(e) => {
            error!("{:?}", e);
            eprintln!("an error occurred: {}", e);
            process::exit(1);
        }
    }
}
