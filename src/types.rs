use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// HomeBank payment method codes.
///
/// Code 5 is unused by HomeBank. `Unknown` (0) is the catch-all for
/// transaction types no mapping table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PaymentCode {
    #[default]
    Unknown = 0,
    CreditCard = 1,
    Check = 2,
    Cash = 3,
    Transfer = 4,
    DebitCard = 6,
    StandingOrder = 7,
    ElectronicPayment = 8,
    Deposit = 9,
    InstitutionFee = 10,
    DirectDebit = 11,
}

impl PaymentCode {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<PaymentCode> for u8 {
    fn from(payment: PaymentCode) -> Self {
        payment.code()
    }
}

impl Serialize for PaymentCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

/// One row of the HomeBank import file. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub payment: PaymentCode,
    pub info: String,
    pub payee: String,
    pub memo: String,
    pub amount: Decimal,
    pub category: String,
    pub tags: String,
}

impl Record {
    pub fn new(date: NaiveDate, payment: PaymentCode, amount: Decimal) -> Self {
        Self {
            date,
            payment,
            info: String::new(),
            payee: String::new(),
            memo: String::new(),
            amount,
            category: String::new(),
            tags: String::new(),
        }
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = payee.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Appends a tag, space separated.
    pub fn push_tag(&mut self, tag: &str) {
        if !self.tags.is_empty() {
            self.tags.push(' ');
        }
        self.tags.push_str(tag);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.split_whitespace().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn create_test_record() -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2025, 12, 26).unwrap(),
            PaymentCode::ElectronicPayment,
            Decimal::from_str("-50.00").unwrap(),
        )
        .with_payee("Coffee Shop")
        .with_memo("Morning coffee")
    }

    #[rstest]
    #[case(PaymentCode::Unknown, 0)]
    #[case(PaymentCode::CreditCard, 1)]
    #[case(PaymentCode::Cash, 3)]
    #[case(PaymentCode::DebitCard, 6)]
    #[case(PaymentCode::ElectronicPayment, 8)]
    #[case(PaymentCode::InstitutionFee, 10)]
    #[case(PaymentCode::DirectDebit, 11)]
    fn test_payment_code_values(#[case] payment: PaymentCode, #[case] expected: u8) {
        assert_eq!(u8::from(payment), expected);
    }

    #[test]
    fn test_new_record_has_empty_text_fields() {
        let record = Record::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            PaymentCode::Cash,
            Decimal::ZERO,
        );
        assert!(record.info.is_empty());
        assert!(record.payee.is_empty());
        assert!(record.memo.is_empty());
        assert!(record.category.is_empty());
        assert!(record.tags.is_empty());
    }

    #[rstest]
    #[case(&[], "")]
    #[case(&["paypal"], "paypal")]
    #[case(&["USD", "paypal"], "USD paypal")]
    fn test_push_tag(#[case] tags: &[&str], #[case] expected: &str) {
        let mut record = create_test_record();
        for tag in tags {
            record.push_tag(tag);
        }
        assert_eq!(record.tags, expected);
    }

    #[test]
    fn test_has_tag_matches_whole_words() {
        let mut record = create_test_record();
        record.push_tag("paypal");
        assert!(record.has_tag("paypal"));
        assert!(!record.has_tag("pay"));
    }

    #[test]
    fn test_record_serialization() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"date\":\"2025-12-26\""));
        assert!(json.contains("\"payment\":8"));
        assert!(json.contains("Coffee Shop"));
    }
}
