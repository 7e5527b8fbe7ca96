//! DKB VISA credit card export. Same metadata preamble as the DKB Cash file.
//!
//! Columns: 0 Umsatz abgerechnet, 1 Wertstellung, 2 Belegdatum,
//! 3 Beschreibung, 4 Betrag (EUR), 5 Ursprünglicher Betrag

use csv::StringRecord;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{field, positional_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::{ConvertError, ConvertResult},
    header::HeaderLocator,
    types::{PaymentCode, Record},
};

const RECEIPT_DATE: usize = 2;
const DESCRIPTION: usize = 3;
const AMOUNT: usize = 4;
const ORIGINAL_AMOUNT: usize = 5;

fn to_record(row: &StringRecord) -> ConvertResult<Record> {
    let date = RawDate::from(field(row, RECEIPT_DATE)).parse(DatePattern::DayMonthYearDot)?;
    let amount = parse_amount(field(row, AMOUNT), NumberFormat::DecimalComma)?;
    let mut record =
        Record::new(date, PaymentCode::CreditCard, amount).with_memo(field(row, DESCRIPTION));

    // "12,99 USD" when charged in a foreign currency
    let original = field(row, ORIGINAL_AMOUNT);
    if !original.is_empty() {
        let mut parts = original.split_whitespace();
        let (Some(value), Some(currency)) = (parts.next(), parts.next()) else {
            return Err(ConvertError::MalformedField {
                field: "Ursprünglicher Betrag",
                value: original.to_string(),
            });
        };
        record.push_tag(currency);
        record.memo = format!("{} - {}{}", record.memo, currency, value);
    }

    Ok(record)
}

pub struct DkbVisaParser;

impl Parser for DkbVisaParser {
    const DIALECT: Dialect = Dialect::DKB;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        let (rows, skipped) = HeaderLocator::DKB.trim(content);

        positional_rows(&Self::DIALECT, &rows, false, skipped)?
            .iter()
            .map(|(line, row)| to_record(row).map_err(|e| e.at_line(*line)))
            .collect()
    }
}
