//! American Express (Germany), exported with all details.
//!
//! Amounts are charges, positive when money leaves the account, and the
//! address column can span several lines.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{named_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::{ConvertError, ConvertResult},
    types::{PaymentCode, Record},
};

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AmexRow {
    #[serde(rename = "Datum")]
    date: RawDate,
    #[serde(rename = "Beschreibung")]
    description: String,
    #[serde(rename = "Karteninhaber")]
    card_holder: String,
    #[serde(rename = "Betrag")]
    amount: String,
    #[serde(rename = "Weitere Details")]
    details: String,
    #[serde(rename = "Adresse")]
    address: String,
    #[serde(rename = "PLZ")]
    postcode: String,
    #[serde(rename = "Land")]
    country: String,
}

impl AmexRow {
    fn into_record(self) -> ConvertResult<Record> {
        let date = self.date.parse(DatePattern::DayMonthYearSlash)?;
        let amount = -parse_amount(&self.amount, NumberFormat::DecimalComma)?;
        let memo = format!(
            "{}-{}-{}, {}, {}",
            self.description, self.details, self.address, self.postcode, self.country
        );

        Ok(Record::new(date, PaymentCode::CreditCard, amount)
            .with_memo(clean_memo(&memo))
            .with_info(self.card_holder))
    }
}

/// Collapses whitespace runs, turns leftover line breaks into ", " and
/// removes the doubled dash an empty details column leaves behind.
fn clean_memo(memo: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(memo, " ");
    collapsed
        .replace('\r', "")
        .replace('\n', ", ")
        .replace("--", "-")
}

pub struct AmexParser;

impl Parser for AmexParser {
    const DIALECT: Dialect = Dialect::AMEX;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        named_rows::<AmexRow>(&Self::DIALECT, content)?
            .into_iter()
            .map(|(line, row)| row.into_record().map_err(|e: ConvertError| e.at_line(line)))
            .collect()
    }
}
