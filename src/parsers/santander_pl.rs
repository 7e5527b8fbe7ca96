//! Santander Bank Polska account history. The first line is account
//! metadata, there is no column header.
//!
//! Columns: 0 data księgowania, 1 data operacji, 2 tytuł operacji,
//! 3 nadawca/odbiorca, 4 numer rachunku, 5 kwota, 6 saldo po operacji

use csv::StringRecord;
use rust_decimal::Decimal;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{field, positional_rows, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::ConvertResult,
    types::{PaymentCode, Record},
};

const OPERATION_DATE: usize = 1;
const TITLE: usize = 2;
const COUNTERPARTY: usize = 3;
const ACCOUNT_NUMBER: usize = 4;
const AMOUNT: usize = 5;

fn to_record(row: &StringRecord) -> ConvertResult<Record> {
    let date = RawDate::from(field(row, OPERATION_DATE)).parse(DatePattern::DayMonthYearDash)?;
    let amount = parse_amount(field(row, AMOUNT), NumberFormat::DecimalComma)?;
    let payment = if amount > Decimal::ZERO {
        PaymentCode::Deposit
    } else {
        PaymentCode::ElectronicPayment
    };

    Ok(Record::new(date, payment, amount)
        .with_payee(field(row, COUNTERPARTY))
        .with_memo(format!("{} - {}", field(row, TITLE), field(row, ACCOUNT_NUMBER))))
}

pub struct SantanderPlParser;

impl Parser for SantanderPlParser {
    const DIALECT: Dialect = Dialect::SANTANDER_PL;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        positional_rows(&Self::DIALECT, content, true, 0)?
            .iter()
            .map(|(line, row)| to_record(row).map_err(|e| e.at_line(*line)))
            .collect()
    }
}
