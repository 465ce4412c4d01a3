use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;

mod economy;

/// The size of the channel for resolving placeholder requests.
const CHANNEL_SIZE: usize = 100;

/// Fraction digits reported by the ledger when none are given.
const DEFAULT_FRACTIONAL_DIGITS: i32 = 2;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    if !(3..=4).contains(&args.len()) {
        eprintln!(
            "Usage: {} <balances_csv> <requests_csv> [fractional_digits]",
            args[0]
        );
        std::process::exit(1);
    }
    let fractional_digits = match args.get(3).map(|digits| digits.parse::<i32>()) {
        None => DEFAULT_FRACTIONAL_DIGITS,
        Some(Ok(digits)) => digits,
        Some(Err(err)) => {
            eprintln!("Invalid fractional digits {}: {err}", args[3]);
            std::process::exit(1);
        }
    };

    let ledger = match economy::Ledger::from_path(&args[1], fractional_digits) {
        Ok(ledger) => ledger,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let formatter = Arc::new(economy::BalanceFormatter::new(ledger));

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut resolver = economy::Resolver::new(Arc::clone(&formatter), receiver);

    let handle = tokio::spawn(async move {
        resolver.run().await;
        resolver
    });

    let mut reader = match ReaderBuilder::new().trim(Trim::All).from_path(&args[2]) {
        Ok(reader) => reader,
        Err(err) => {
            eprintln!("Failed to read requests: {err}");
            std::process::exit(1);
        }
    };

    for request in reader.deserialize::<economy::Request>() {
        match request {
            Ok(request) => {
                if let Err(err) = sender.send(request).await {
                    log::error!("Error sending request: {err}");
                }
            }
            Err(err) => log::warn!("Skipping request: {err}"),
        }
    }

    drop(sender); // Close the sender to signal no more requests will be sent
    let resolver = handle
        .await
        .expect("Failed to join the resolver task");

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for response in resolver.get_responses() {
        if let Err(err) = writer.serialize(response) {
            log::error!("Error writing response: {err}");
        }
    }
    if let Err(err) = writer.flush() {
        log::error!("Error flushing output: {err}");
    }
    log::info!(
        "Built {} precision formatters ({} cached) for {} requests",
        formatter.precisions().built(),
        formatter.precisions().len(),
        resolver.get_responses().len()
    );
}
