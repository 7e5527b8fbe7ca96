//! DKB Cash (Germany) account export.
//!
//! The file opens with account metadata; the real header is the first line
//! naming both "Betrag" and "Wertstellung". Columns after it:
//!
//! 0 Buchungstag, 1 Wertstellung, 2 Buchungstext, 3 Auftraggeber / Begünstigter,
//! 4 Verwendungszweck, 5 Kontonummer, 6 BLZ, 7 Betrag (EUR), 8 Gläubiger-ID,
//! 9 Mandatsreferenz, 10 Kundenreferenz

use csv::StringRecord;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{field, positional_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::ConvertResult,
    header::HeaderLocator,
    types::{PaymentCode, Record},
};

const VALUE_DATE: usize = 1;
const BOOKING_TEXT: usize = 2;
const COUNTERPARTY: usize = 3;
const PURPOSE: usize = 4;
const ACCOUNT_NUMBER: usize = 5;
const AMOUNT: usize = 7;

/// Maps the "Buchungstext" column, case-insensitively.
pub fn payment_code(booking_text: &str) -> PaymentCode {
    match booking_text.to_lowercase().as_str() {
        "lastschrift" | "folgelastschrift" | "online-zahlung" => PaymentCode::ElectronicPayment,
        "gutschrift"
        | "umbuchung"
        | "gutschr. ueberweisung"
        | "online-ueberweisung"
        | "überweisung" => PaymentCode::Transfer,
        "dauerauftrag" => PaymentCode::StandingOrder,
        "abschluss" => PaymentCode::InstitutionFee,
        "kartenzahlung" | "kartenzahlung/-abrechnung" => PaymentCode::DebitCard,
        "bargeldabhebung" => PaymentCode::Cash,
        _ => PaymentCode::Unknown,
    }
}

fn to_record(row: &StringRecord) -> ConvertResult<Record> {
    let date = RawDate::from(field(row, VALUE_DATE)).parse(DatePattern::DayMonthYearDot)?;
    let amount = parse_amount(field(row, AMOUNT), NumberFormat::DecimalComma)?;
    let memo = format!(
        "{}-{}-{}",
        field(row, COUNTERPARTY),
        field(row, PURPOSE),
        field(row, ACCOUNT_NUMBER)
    );

    Ok(Record::new(date, payment_code(field(row, BOOKING_TEXT)), amount).with_memo(memo))
}

pub struct DkbParser;

impl Parser for DkbParser {
    const DIALECT: Dialect = Dialect::DKB;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        let (rows, skipped) = HeaderLocator::DKB.trim(content);

        positional_rows(&Self::DIALECT, &rows, false, skipped)?
            .iter()
            .map(|(line, row)| to_record(row).map_err(|e| e.at_line(*line)))
            .collect()
    }
}
