//! N26 account export with Spanish column names.

use serde::Deserialize;

use super::types::{parse_amount, DatePattern, NumberFormat, RawDate};
use super::{named_rows, original_price_info, traits::Parser};
use crate::{
    dialect::Dialect,
    errors::{ConvertError, ConvertResult},
    types::{PaymentCode, Record},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct N26Row {
    #[serde(rename = "Fecha")]
    date: RawDate,
    #[serde(rename = "Beneficiario")]
    payee: String,
    #[serde(rename = "Tipo de transacción")]
    trn_type: String,
    #[serde(rename = "Referencia de pago")]
    reference: String,
    #[serde(rename = "Cantidad (EUR)")]
    amount: String,
    #[serde(rename = "Cantidad (Divisa extranjera)")]
    foreign_amount: String,
    #[serde(rename = "Tipo de divisa extranjera")]
    foreign_currency: String,
    #[serde(rename = "Tipo de cambio")]
    exchange_rate: String,
}

/// Maps "Tipo de transacción". Matching is exact.
pub fn payment_code(trn_type: &str) -> PaymentCode {
    match trn_type {
        "Pago con MasterCard" => PaymentCode::DebitCard,
        "Transferencia saliente" => PaymentCode::Transfer,
        "Domiciliación bancaria" => PaymentCode::ElectronicPayment,
        "Ingreso" => PaymentCode::Deposit,
        _ => PaymentCode::Unknown,
    }
}

impl N26Row {
    fn into_record(self) -> ConvertResult<Record> {
        let date = self.date.parse(DatePattern::Iso)?;
        let amount = parse_amount(&self.amount, NumberFormat::DecimalPoint)?;
        let memo = format!("{}-{}", self.payee, self.reference);
        let mut record = Record::new(date, payment_code(&self.trn_type), amount).with_memo(memo);

        if !self.foreign_currency.is_empty() && self.foreign_currency != "EUR" {
            record.info =
                original_price_info(&self.foreign_amount, &self.foreign_currency, &self.exchange_rate);
        }

        Ok(record.with_payee(self.payee))
    }
}

pub struct N26Parser;

impl Parser for N26Parser {
    const DIALECT: Dialect = Dialect::N26;

    fn parse(content: &str) -> ConvertResult<Vec<Record>> {
        named_rows::<N26Row>(&Self::DIALECT, content)?
            .into_iter()
            .map(|(line, row)| row.into_record().map_err(|e: ConvertError| e.at_line(line)))
            .collect()
    }
}
