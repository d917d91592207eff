mod args;
mod config;
mod reader;
mod writer;

use bank::clock::{Clock, ManualClock, SystemClock};
use bank::identity::resolve_requester;
use bank::input::{InputCommand, RowIdentity};
use bank::{Bank, BankConfig, Result};

use std::sync::Arc;

fn main() -> Result {
    config::configure_app()?;

    log::debug!("Application configured. Beginning process...");

    // rows without an `at` column happen at start-up time, or at the last time given
    let clock = Arc::new(ManualClock::new(SystemClock.now()));
    let bank = Bank::in_memory(BankConfig::default(), clock.clone())?;

    process_data(&bank, &clock)?;

    log::debug!("Process complete. Beginning report...");

    report_to_std_out(&bank)?;

    log::debug!("Application finished successfully!");

    Ok(())
}

/// Read input file and replay every command against the bank
fn process_data(bank: &Bank, clock: &ManualClock) -> Result {
    let input_path = args::parse_input_arg()?;
    log::debug!("Found filepath as input arg: {input_path:?}");

    let mut rdr = reader::build_csv_reader(input_path)?;

    log::debug!("Deserializing reader...");
    for (line, record) in rdr.deserialize::<InputCommand>().enumerate() {
        log::debug!("Parsing record {line} into InputCommand: {record:?}");
        let input = match record {
            Ok(input) => input,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };

        if let Some(at) = input.at {
            clock.set(at);
        }

        log::debug!("Parsing input into Command: {input:?}");
        let command = match input.clone().parse_command() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("Record {line}: {e}");
                continue;
            }
        };

        let requester = if command.requires_identity() {
            match resolve_requester(&RowIdentity, &input, bank.clients()) {
                Ok(client) => Some(client),
                Err(e) => {
                    log::warn!("Record {line}: {e}");
                    continue;
                }
            }
        } else {
            None
        };

        match bank.execute(command, requester.as_ref()) {
            Ok(outcome) => log::debug!("Record {line}: {outcome:?}"),
            Err(e) => log::warn!("Record {line} rejected: {e}"),
        }
    }

    Ok(())
}

/// Build the account report and write it to stdout
fn report_to_std_out(bank: &Bank) -> Result {
    let report = bank.account_report();
    log::debug!("Successfully built reports for {} accounts", report.len());

    let output = writer::write_report(&report)?;

    log::debug!("Writing to stdout: {output:?}");
    print!("{output}");

    Ok(())
}
