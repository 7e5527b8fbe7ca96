pub mod amazon_visa;
pub mod amex;
pub mod dkb;
pub mod dkb_visa;
pub mod n26;
pub mod paypal;
pub mod santander_pl;
pub mod spendee;
pub mod traits;
pub mod types;

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::{
    dialect::Dialect,
    errors::{ConvertError, ConvertResult},
};

pub mod prelude {
    pub use super::amazon_visa::AmazonVisaParser;
    pub use super::amex::AmexParser;
    pub use super::dkb::DkbParser;
    pub use super::dkb_visa::DkbVisaParser;
    pub use super::n26::N26Parser;
    pub use super::paypal::PayPalParser;
    pub use super::santander_pl::SantanderPlParser;
    pub use super::spendee::SpendeeParser;
    pub use super::traits::Parser;
    pub use super::types::{DatePattern, NumberFormat, RawDate};
}

/// Rows of a file with a header line, deserialized by column name.
///
/// Each row comes with its 1-based line number in `content`. Rows shorter
/// than the header are padded with empty fields.
pub(crate) fn named_rows<T>(dialect: &Dialect, content: &str) -> ConvertResult<Vec<(u64, T)>>
where
    T: DeserializeOwned,
{
    let mut reader = dialect.reader_builder(true).from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();

    reader
        .records()
        .map(|result| {
            let mut record = result?;
            let line = line_of(content, &record, 0);
            while record.len() < headers.len() {
                record.push_field("");
            }
            record
                .deserialize(Some(&headers))
                .map(|row| (line, row))
                .map_err(|e| ConvertError::from(e).at_line(line))
        })
        .collect()
}

/// Rows addressed by column index. `line_offset` is added to each line
/// number for content that was cut out of a larger file.
pub(crate) fn positional_rows(
    dialect: &Dialect,
    content: &str,
    skip_first: bool,
    line_offset: u64,
) -> ConvertResult<Vec<(u64, StringRecord)>> {
    let mut reader = dialect
        .reader_builder(skip_first)
        .from_reader(content.as_bytes());

    reader
        .records()
        .map(|result| {
            let record = result?;
            Ok((line_of(content, &record, line_offset), record))
        })
        .collect()
}

/// Line of the record's first field, counted from its byte offset. The csv
/// reader may place a record after the `\r` of a CRLF pair, so pending line
/// breaks are skipped first.
fn line_of(content: &str, record: &StringRecord, offset: u64) -> u64 {
    let Some(pos) = record.position() else {
        return offset;
    };
    let bytes = content.as_bytes();
    let mut start = usize::try_from(pos.byte()).map_or(bytes.len(), |b| b.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    let breaks = bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64;
    breaks + 1 + offset
}

/// Field by index, empty when the row is short.
pub(crate) fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

/// "Original Price = 12.00 USD - 1.08 exchange rate"
pub(crate) fn original_price_info(amount: &str, currency: &str, rate: &str) -> String {
    format!("Original Price = {} {} - {} exchange rate", amount, currency, rate)
}
