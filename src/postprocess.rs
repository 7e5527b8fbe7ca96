use crate::types::Record;

const PAYPAL_MARKER: &str = "paypal";
const PAYPAL_TAG: &str = "paypal";
/// Last memo word of German "Zahlung bei ..." PayPal payments.
const MERCHANT_MARKER: &str = "bei";

/// Rewrites payees paid through PayPal into a consistent payee and tag.
///
/// Records already tagged are left untouched, so applying this twice is a
/// no-op.
pub fn post_process(record: &mut Record) {
    if !record.payee.to_lowercase().contains(PAYPAL_MARKER) || record.has_tag(PAYPAL_TAG) {
        return;
    }

    let Some(last_word) = record.memo.split_whitespace().last() else {
        return;
    };

    if last_word == MERCHANT_MARKER {
        record.payee = "PayPal".to_string();
    } else {
        // "PayPal Europe ..." keeps the second word ahead of the memo
        if let Some(second) = record.payee.split_whitespace().nth(1) {
            record.memo = format!("{} {}", second, record.memo);
        }
        record.payee = "PAYPAL".to_string();
    }
    record.push_tag(PAYPAL_TAG);
}
