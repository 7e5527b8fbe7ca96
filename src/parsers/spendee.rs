//! Spendee budgeting app export.

use serde::Deserialize;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{named_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::{ConvertError, ConvertResult},
    types::{PaymentCode, Record},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpendeeRow {
    #[serde(rename = "Date")]
    date: RawDate,
    #[serde(rename = "Category name")]
    category_name: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Note")]
    note: String,
    #[serde(rename = "Labels")]
    labels: String,
}

impl SpendeeRow {
    fn into_record(self) -> ConvertResult<Record> {
        let date = self.date.parse(DatePattern::IsoDateTime)?;
        let amount = parse_amount(&self.amount, NumberFormat::DecimalPoint)?;
        let note: String = self.note.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        let memo = format!("{} - {} - {}", note, self.category_name, self.labels);

        Ok(Record::new(date, PaymentCode::Cash, amount).with_memo(memo))
    }
}

pub struct SpendeeParser;

impl Parser for SpendeeParser {
    const DIALECT: Dialect = Dialect::SPENDEE;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        named_rows::<SpendeeRow>(&Self::DIALECT, content)?
            .into_iter()
            .map(|(line, row)| row.into_record().map_err(|e: ConvertError| e.at_line(line)))
            .collect()
    }
}
