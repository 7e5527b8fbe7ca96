use std::fmt;
use std::fs;

use tracing::{debug, info};

use crate::{
    dialect::Dialect,
    encoding,
    errors::{ConvertError, ConvertResult},
    parsers::prelude::*,
    postprocess::post_process,
    types::Record,
};

/// Institutions whose exports can be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    N26,
    Dkb,
    DkbVisa,
    AmazonVisa,
    PayPal,
    SantanderPl,
    Spendee,
    Amex,
}

impl Bank {
    pub const ALL: [Bank; 8] = [
        Bank::N26,
        Bank::Dkb,
        Bank::DkbVisa,
        Bank::AmazonVisa,
        Bank::PayPal,
        Bank::SantanderPl,
        Bank::Spendee,
        Bank::Amex,
    ];

    /// Name used in the output file.
    pub fn label(&self) -> &'static str {
        match self {
            Bank::N26 => "N26",
            Bank::Dkb => "DKB",
            Bank::DkbVisa => "DKBVISA",
            Bank::AmazonVisa => "AMAZONVISA",
            Bank::PayPal => "PAYPAL",
            Bank::SantanderPl => "SANTANDER-PL",
            Bank::Spendee => "SPENDEE",
            Bank::Amex => "AMEX",
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Bank::N26 => N26Parser::DIALECT,
            Bank::Dkb => DkbParser::DIALECT,
            Bank::DkbVisa => DkbVisaParser::DIALECT,
            Bank::AmazonVisa => AmazonVisaParser::DIALECT,
            Bank::PayPal => PayPalParser::DIALECT,
            Bank::SantanderPl => SantanderPlParser::DIALECT,
            Bank::Spendee => SpendeeParser::DIALECT,
            Bank::Amex => AmexParser::DIALECT,
        }
    }

    /// Whether PayPal payees get rewritten after parsing.
    pub fn uses_post_processor(&self) -> bool {
        !matches!(self, Bank::N26 | Bank::DkbVisa | Bank::PayPal)
    }

    /// Exactly one bank out of the selected ones.
    pub fn select(selected: impl IntoIterator<Item = Bank>) -> ConvertResult<Bank> {
        let selected: Vec<Bank> = selected.into_iter().collect();
        match selected.as_slice() {
            [] => Err(ConvertError::NoBankSelected),
            [bank] => Ok(*bank),
            _ => Err(ConvertError::MultipleBanksSelected(selected)),
        }
    }

    fn parse_raw(&self, content: &str) -> ConvertResult<Vec<Record>> {
        match self {
            Bank::N26 => N26Parser::parse(content),
            Bank::Dkb => DkbParser::parse(content),
            Bank::DkbVisa => DkbVisaParser::parse(content),
            Bank::AmazonVisa => AmazonVisaParser::parse(content),
            Bank::PayPal => PayPalParser::parse(content),
            Bank::SantanderPl => SantanderPlParser::parse(content),
            Bank::Spendee => SpendeeParser::parse(content),
            Bank::Amex => AmexParser::parse(content),
        }
    }

    pub fn convert(&self, content: &str) -> ConvertResult<Vec<Record>> {
        let mut records = self.parse_raw(content)?;
        if self.uses_post_processor() {
            records.iter_mut().for_each(post_process);
        }
        Ok(records)
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Records converted from one export, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub bank: Bank,
    pub records: Vec<Record>,
}

impl Conversion {
    pub fn label(&self) -> &'static str {
        self.bank.label()
    }
}

#[derive(Default)]
pub struct ConverterBuilder {
    content: Option<String>,
    filepath: Option<String>,
    bank: Option<Bank>,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Already decoded file content. Takes precedence over `filename`.
    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// File to read; its encoding is detected.
    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn bank(mut self, bank: Bank) -> Self {
        self.bank = Some(bank);
        self
    }

    pub fn convert(self) -> ConvertResult<Conversion> {
        let bank = self.bank.ok_or(ConvertError::NoBankSelected)?;

        let content = self.content.map(Ok).unwrap_or_else(|| {
            self.filepath
                .ok_or(ConvertError::MissingContentAndFilepath)
                .and_then(|path| {
                    debug!(path = %path, "reading input file");
                    fs::read(path).map_err(Into::into)
                })
                .map(|bytes| encoding::decode(&bytes).text)
        })?;

        let records = bank.convert(&content)?;
        info!(bank = %bank, records = records.len(), "converted export");

        Ok(Conversion { bank, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentCode;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SANTANDER_PAYPAL: &str = "meta;;;;;;\r\n01-01-2024;01-01-2024;1234 Spotify;PayPal Europe S.a.r.l.;;-9,99;0,00;1;\r\n";

    #[test]
    fn test_builder_new() {
        let builder = ConverterBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.bank.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ConverterBuilder::new()
            .content("content")
            .filename("file.csv")
            .bank(Bank::Dkb);

        assert!(builder.content.is_some());
        assert!(builder.filepath.is_some());
        assert_eq!(builder.bank, Some(Bank::Dkb));
    }

    #[test]
    fn test_convert_without_bank() {
        let result = ConverterBuilder::new().content("x").convert();
        assert!(matches!(result, Err(ConvertError::NoBankSelected)));
    }

    #[test]
    fn test_convert_without_content_or_path() {
        let result = ConverterBuilder::new().bank(Bank::N26).convert();
        assert!(matches!(result, Err(ConvertError::MissingContentAndFilepath)));
    }

    #[test]
    fn test_convert_missing_file() {
        let result = ConverterBuilder::new()
            .bank(Bank::N26)
            .filename("/nonexistent/export.csv")
            .convert();
        assert!(matches!(result, Err(ConvertError::ReadContentFailed(_))));
    }

    #[test]
    fn test_convert_applies_post_processor() {
        let conversion = ConverterBuilder::new()
            .content(SANTANDER_PAYPAL)
            .bank(Bank::SantanderPl)
            .convert()
            .unwrap();

        assert_eq!(conversion.label(), "SANTANDER-PL");
        let record = &conversion.records[0];
        assert_eq!(record.payee, "PAYPAL");
        assert_eq!(record.memo, "Europe 1234 Spotify - ");
        assert_eq!(record.tags, "paypal");
        assert_eq!(record.payment, PaymentCode::ElectronicPayment);
        assert_eq!(record.amount, Decimal::from_str("-9.99").unwrap());
    }

    #[test]
    fn test_n26_skips_post_processor() {
        let content = "Fecha,Beneficiario,Tipo de transacción,Referencia de pago,Cantidad (EUR)\n2024-01-01,PayPal Europe,Ingreso,Refund,5.0\n";
        let conversion = ConverterBuilder::new()
            .content(content)
            .bank(Bank::N26)
            .convert()
            .unwrap();

        assert_eq!(conversion.records[0].payee, "PayPal Europe");
        assert_eq!(conversion.records[0].tags, "");
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&[Bank::Dkb], true)]
    #[case(&[Bank::Dkb, Bank::Amex], false)]
    fn test_select(#[case] selected: &[Bank], #[case] should_succeed: bool) {
        let result = Bank::select(selected.iter().copied());
        if should_succeed {
            assert_eq!(result.unwrap(), selected[0]);
        } else {
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_select_reports_configuration_errors() {
        assert!(matches!(
            Bank::select(Vec::new()),
            Err(ConvertError::NoBankSelected)
        ));
        assert!(matches!(
            Bank::select([Bank::N26, Bank::PayPal]),
            Err(ConvertError::MultipleBanksSelected(banks)) if banks.len() == 2
        ));
    }

    #[test]
    fn test_post_processor_applicability() {
        let applied: Vec<Bank> = Bank::ALL
            .into_iter()
            .filter(Bank::uses_post_processor)
            .collect();
        assert_eq!(
            applied,
            vec![Bank::Dkb, Bank::AmazonVisa, Bank::SantanderPl, Bank::Spendee, Bank::Amex]
        );
    }

    #[rstest]
    #[case(Bank::N26, "N26")]
    #[case(Bank::DkbVisa, "DKBVISA")]
    #[case(Bank::SantanderPl, "SANTANDER-PL")]
    #[case(Bank::Amex, "AMEX")]
    fn test_labels(#[case] bank: Bank, #[case] expected: &str) {
        assert_eq!(bank.to_string(), expected);
    }

    #[test]
    fn test_dialect_per_bank() {
        assert_eq!(Bank::PayPal.dialect().delimiter, b',');
        assert_eq!(Bank::Amex.dialect().delimiter, b';');
    }
}
