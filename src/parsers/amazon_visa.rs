//! Amazon VISA (Germany) credit card export.
//!
//! Columns after the header: 0 Kreditkartennummer, 1 Transaktionsdatum,
//! 2 Buchungsdatum, 3 Händler (Name, Stadt & Land), 4 Umsatzkategorie,
//! 5 Betrag in Fremdwährung, 6 Einheit Fremdwährung, 7 Umrechnungskurs,
//! 8 Betrag in Euro, 9 Amazon Punkte, 10 Prime Punkte

use csv::StringRecord;
use tracing::debug;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{field, original_price_info, positional_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::ConvertResult,
    header::HeaderLocator,
    types::{PaymentCode, Record},
};

const TRANSACTION_DATE: usize = 1;
const MERCHANT: usize = 3;
const CATEGORY: usize = 4;
const FOREIGN_AMOUNT: usize = 5;
const FOREIGN_CURRENCY: usize = 6;
const EXCHANGE_RATE: usize = 7;
const AMOUNT: usize = 8;

/// Rows carrying only loyalty points have no amount in either currency.
fn is_points_only(row: &StringRecord) -> bool {
    field(row, AMOUNT).is_empty() && field(row, FOREIGN_AMOUNT).is_empty()
}

fn to_record(row: &StringRecord) -> ConvertResult<Record> {
    let date = RawDate::from(field(row, TRANSACTION_DATE)).parse(DatePattern::DayMonthYearDot)?;
    let amount = -parse_amount(field(row, AMOUNT), NumberFormat::DecimalComma)?;
    let memo = format!("{}-{}", field(row, MERCHANT), field(row, CATEGORY));
    let mut record = Record::new(date, PaymentCode::CreditCard, amount).with_memo(memo);

    let currency = field(row, FOREIGN_CURRENCY);
    let foreign_amount = field(row, FOREIGN_AMOUNT);
    if currency != "EUR" && !foreign_amount.is_empty() {
        record.info = original_price_info(foreign_amount, currency, field(row, EXCHANGE_RATE));
    }

    Ok(record)
}

pub struct AmazonVisaParser;

impl Parser for AmazonVisaParser {
    const DIALECT: Dialect = Dialect::AMAZON_VISA;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        let (rows, skipped) = HeaderLocator::AMAZON_VISA.trim(content);

        let mut records = Vec::new();
        for (line, row) in positional_rows(&Self::DIALECT, &rows, false, skipped)? {
            if is_points_only(&row) {
                debug!(line, "skipping points-only row");
                continue;
            }
            records.push(to_record(&row).map_err(|e| e.at_line(line))?);
        }
        Ok(records)
    }
}
