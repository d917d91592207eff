use bank::{AccountReport, Result};

use anyhow::Context;

use csv::Writer;

/// Renders the account report as CSV, one line per account after the header
pub fn write_report(reports: &[AccountReport]) -> Result<String> {
    let mut wtr = Writer::from_writer(vec![]);

    for report in reports {
        log::debug!("Serializing report: {report:?}");
        wtr.serialize(report)
            .with_context(|| format!("Couldn't serialize report of account {}", report.account))?;
    }

    let utf8 = wtr.into_inner()?;
    let string = String::from_utf8(utf8)?;

    return Ok(string);
}
