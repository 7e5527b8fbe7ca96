use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use clap::{Args, Parser};
use homebank_csv::{
    output::{output_path, write_records, DEFAULT_OUTPUT_TEMPLATE},
    Bank, ConverterBuilder,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "homebank-csv",
    about = "Convert a CSV file exported from several banks and credit card providers to a HomeBank compatible format"
)]
struct Cli {
    /// Input CSV file to be converted
    filename: String,

    /// Name (and optionally, path) of the output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_TEMPLATE)]
    output_file: String,

    /// Show debugging log traces
    #[arg(short, long)]
    debug: bool,

    #[command(flatten)]
    bank: BankFlags,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct BankFlags {
    /// Convert a N26 CSV file (with headers in Spanish)
    #[arg(long)]
    n26: bool,
    /// Convert a DKB Cash (Germany) CSV file
    #[arg(long)]
    dkb: bool,
    /// Convert a DKB VISA (Germany) CSV file
    #[arg(long)]
    dkbvisa: bool,
    /// Convert an Amazon VISA (Germany) CSV file
    #[arg(long)]
    amazonvisa: bool,
    /// Convert a PayPal CSV file (Completed Payments) with default fields
    #[arg(long)]
    paypal: bool,
    /// Convert a Santander Bank Polska CSV file
    #[arg(long = "santanderPL")]
    santander_pl: bool,
    /// Convert a Spendee app CSV file
    #[arg(long)]
    spendee: bool,
    /// Convert an American Express (Germany) CSV file exported with all details
    #[arg(long)]
    amex: bool,
}

impl BankFlags {
    fn selected(&self) -> Vec<Bank> {
        [
            (self.n26, Bank::N26),
            (self.dkb, Bank::Dkb),
            (self.dkbvisa, Bank::DkbVisa),
            (self.amazonvisa, Bank::AmazonVisa),
            (self.paypal, Bank::PayPal),
            (self.santander_pl, Bank::SantanderPl),
            (self.spendee, Bank::Spendee),
            (self.amex, Bank::Amex),
        ]
        .into_iter()
        .filter_map(|(set, bank)| set.then_some(bank))
        .collect()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
    tracing::debug!("starting conversion");

    let bank = Bank::select(cli.bank.selected())?;
    let conversion = ConverterBuilder::new()
        .filename(&cli.filename)
        .bank(bank)
        .convert()
        .with_context(|| format!("failed to convert {}", cli.filename))?;

    let today = chrono::Local::now().date_naive();
    let path = output_path(&cli.output_file, conversion.bank, today);
    let file = File::create(&path).with_context(|| format!("failed to create {}", path))?;
    write_records(BufWriter::new(file), &conversion.records)
        .with_context(|| format!("failed to write {}", path))?;

    tracing::info!(path = %path, records = conversion.records.len(), "wrote HomeBank file");
    Ok(())
}
