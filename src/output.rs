use std::io;

use chrono::NaiveDate;

use crate::{builder::Bank, dialect::Dialect, errors::ConvertResult, types::Record};

pub const DEFAULT_OUTPUT_TEMPLATE: &str = "HomeBank_{bank}_{date}.csv";

/// Fills `{bank}` and `{date}` (as `YYYYMMDD`) in an output file template.
pub fn output_path(template: &str, bank: Bank, date: NaiveDate) -> String {
    template
        .replace("{bank}", bank.label())
        .replace("{date}", &date.format("%Y%m%d").to_string())
}

/// Writes records in HomeBank's CSV layout, without a header row.
pub fn write_records<W: io::Write>(writer: W, records: &[Record]) -> ConvertResult<()> {
    let mut writer = Dialect::HOMEBANK.writer_builder().from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}
