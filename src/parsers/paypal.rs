//! PayPal activity export ("Completed Payments", default fields, English
//! headers).
//!
//! Foreign-currency purchases appear as the purchase itself plus a pair of
//! "General Currency Conversion" rows. The EUR conversion row carries the
//! amount actually taken from the account and is folded into the purchase.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{named_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::ConvertResult,
    types::{PaymentCode, Record},
};

const HOME_CURRENCY: &str = "EUR";
const TYPE_AUTHORIZATION: &str = "General Authorization";
const TYPE_CURRENCY_CONVERSION: &str = "General Currency Conversion";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PayPalRow {
    #[serde(rename = "Date")]
    date: RawDate,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    trn_type: String,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Net")]
    net: String,
    #[serde(rename = "To Email Address")]
    to_email: String,
    #[serde(rename = "Transaction ID")]
    transaction_id: String,
    #[serde(rename = "Subject")]
    subject: String,
    #[serde(rename = "Note")]
    note: String,
    #[serde(rename = "Reference Txn ID")]
    reference_txn_id: String,
}

/// Overwrites the amount of the first record whose memo mentions
/// `reference`. Returns false when nothing matched.
fn merge_conversion(records: &mut [Record], reference: &str, amount: Decimal) -> bool {
    if reference.is_empty() {
        return false;
    }
    match records.iter_mut().find(|r| r.memo.contains(reference)) {
        Some(record) => {
            record.amount = amount;
            true
        }
        None => false,
    }
}

pub struct PayPalParser;

impl Parser for PayPalParser {
    const DIALECT: Dialect = Dialect::PAYPAL;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        let mut records: Vec<Record> = Vec::new();

        for (line, row) in named_rows::<PayPalRow>(&Self::DIALECT, content)? {
            if row.trn_type == TYPE_AUTHORIZATION {
                debug!(line, "skipping authorization");
                continue;
            }
            // PayPal ends some exports with a line holding only a tab
            if row.date.as_str().contains('\t') {
                continue;
            }

            let date = row
                .date
                .parse(DatePattern::DayMonthYearSlash)
                .map_err(|e| e.at_line(line))?;
            let amount =
                parse_amount(&row.net, NumberFormat::DecimalComma).map_err(|e| e.at_line(line))?;

            if row.trn_type == TYPE_CURRENCY_CONVERSION {
                if row.currency == HOME_CURRENCY
                    && !merge_conversion(&mut records, &row.reference_txn_id, amount)
                {
                    debug!(line, reference = %row.reference_txn_id, "conversion has no matching payment");
                }
                continue;
            }

            let mut memo = format!("{} {} - {}", row.subject, row.note, row.transaction_id);
            if row.currency != HOME_CURRENCY {
                memo = format!("{} {}={}", memo, row.currency, amount);
            }

            records.push(
                Record::new(date, PaymentCode::ElectronicPayment, amount)
                    .with_payee(format!("{} - {}", row.name, row.to_email))
                    .with_memo(memo),
            );
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    const HEADER: &str = "\"Date\",\"Time\",\"TimeZone\",\"Name\",\"Type\",\"Status\",\"Currency\",\"Gross\",\"Fee\",\"Net\",\"From Email Address\",\"To Email Address\",\"Transaction ID\",\"Reference Txn ID\",\"Subject\",\"Note\"";

    fn sample(rows: &[&str]) -> String {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str("\r\n");
            content.push_str(row);
        }
        content
    }

    #[test]
    fn test_purchase() {
        let content = sample(&[
            "\"01/02/2023\",\"10:00:00\",\"CET\",\"Cafe Uno\",\"Purchase\",\"Completed\",\"EUR\",\"12,50\",\"0,00\",\"12,50\",\"me@example.com\",\"cafe@example.com\",\"TX1\",\"\",\"Coffee\",\"\"",
        ]);
        let records = PayPalParser::parse(&content).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2023, 2, 1).unwrap());
        assert_eq!(record.payment, PaymentCode::ElectronicPayment);
        assert_eq!(record.amount, Decimal::from_str("12.50").unwrap());
        assert_eq!(record.memo, "Coffee  - TX1");
        assert_eq!(record.payee, "Cafe Uno - cafe@example.com");
    }

    #[test]
    fn test_authorization_is_dropped() {
        let content = sample(&[
            "\"01/02/2023\",\"10:00:00\",\"CET\",\"Shop\",\"General Authorization\",\"Pending\",\"EUR\",\"-5,00\",\"0,00\",\"-5,00\",\"\",\"\",\"TX0\",\"\",\"\",\"\"",
        ]);
        assert!(PayPalParser::parse(&content).unwrap().is_empty());
    }

    #[test]
    fn test_trailing_tab_line_is_dropped() {
        let content = sample(&["\t"]);
        assert!(PayPalParser::parse(&content).unwrap().is_empty());

        let content = sample(&[
            "\"01/02/2023\",\"10:00:00\",\"CET\",\"Cafe Uno\",\"Purchase\",\"Completed\",\"EUR\",\"12,50\",\"0,00\",\"12,50\",\"me@example.com\",\"cafe@example.com\",\"TX1\",\"\",\"Coffee\",\"\"",
            "\t",
        ]);
        assert_eq!(PayPalParser::parse(&content).unwrap().len(), 1);
    }

    #[test]
    fn test_currency_conversion_merges_into_purchase() {
        let content = sample(&[
            "\"03/02/2023\",\"09:00:00\",\"CET\",\"Steam\",\"Express Checkout Payment\",\"Completed\",\"USD\",\"-19,99\",\"0,00\",\"-19,99\",\"\",\"steam@example.com\",\"TX2\",\"\",\"Game\",\"\"",
            "\"03/02/2023\",\"09:00:00\",\"CET\",\"\",\"General Currency Conversion\",\"Completed\",\"USD\",\"19,99\",\"0,00\",\"19,99\",\"\",\"\",\"TX3\",\"TX2\",\"\",\"\"",
            "\"03/02/2023\",\"09:00:00\",\"CET\",\"\",\"General Currency Conversion\",\"Completed\",\"EUR\",\"-18,63\",\"0,00\",\"-18,63\",\"\",\"\",\"TX4\",\"TX2\",\"\",\"\"",
        ]);
        let records = PayPalParser::parse(&content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, Decimal::from_str("-18.63").unwrap());
        assert_eq!(records[0].memo, "Game  - TX2 USD=-19.99");
    }

    #[test]
    fn test_unmatched_conversion_is_dropped() {
        let content = sample(&[
            "\"03/02/2023\",\"09:00:00\",\"CET\",\"\",\"General Currency Conversion\",\"Completed\",\"EUR\",\"-18,63\",\"0,00\",\"-18,63\",\"\",\"\",\"TX4\",\"TX9\",\"\",\"\"",
        ]);
        assert!(PayPalParser::parse(&content).unwrap().is_empty());
    }

    #[test]
    fn test_merge_ignores_empty_reference() {
        let mut records = vec![
            Record::new(
                NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
                PaymentCode::ElectronicPayment,
                Decimal::ONE,
            )
            .with_memo("Coffee - TX1"),
        ];
        assert!(!merge_conversion(&mut records, "", Decimal::TEN));
        assert_eq!(records[0].amount, Decimal::ONE);
    }

    #[test]
    fn test_merge_updates_first_match_only() {
        let date = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        let mut records = vec![
            Record::new(date, PaymentCode::ElectronicPayment, Decimal::ONE).with_memo("A - TX1"),
            Record::new(date, PaymentCode::ElectronicPayment, Decimal::ONE).with_memo("B - TX1"),
        ];
        assert!(merge_conversion(&mut records, "TX1", Decimal::TEN));
        assert_eq!(records[0].amount, Decimal::TEN);
        assert_eq!(records[1].amount, Decimal::ONE);
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let content = sample(&[
            "\"2023-02-01\",\"10:00:00\",\"CET\",\"Shop\",\"Purchase\",\"Completed\",\"EUR\",\"1,00\",\"0,00\",\"1,00\",\"\",\"\",\"TX1\",\"\",\"\",\"\"",
        ]);
        assert!(PayPalParser::parse(&content).is_err());
    }
}
