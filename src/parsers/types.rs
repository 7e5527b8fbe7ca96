use crate::errors::{ConvertError, ConvertResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date layout an institution exports. Each institution uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `31/12/2025`
    DayMonthYearSlash,
    /// `31.12.2025`
    DayMonthYearDot,
    /// `31-12-2025`
    DayMonthYearDash,
    /// `2025-12-31T10:15:00+01:00`, time part is dropped
    IsoDateTime,
    /// `2025-12-31`
    Iso,
}

impl DatePattern {
    pub fn format(&self) -> &'static str {
        match self {
            DatePattern::DayMonthYearSlash => "%d/%m/%Y",
            DatePattern::DayMonthYearDot => "%d.%m.%Y",
            DatePattern::DayMonthYearDash => "%d-%m-%Y",
            DatePattern::IsoDateTime | DatePattern::Iso => "%Y-%m-%d",
        }
    }
}

/// Representa uma data como veio no arquivo da instituição.
///
/// A conversão para `NaiveDate` exige o padrão fixo da instituição, sem
/// tentar outros formatos.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDate(String);

impl RawDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parse(&self, pattern: DatePattern) -> ConvertResult<NaiveDate> {
        let s = self.0.trim();
        let invalid = || ConvertError::InvalidDate {
            value: self.0.clone(),
            pattern: pattern.format(),
        };

        match pattern {
            DatePattern::IsoDateTime => {
                let (date, rest) =
                    NaiveDate::parse_and_remainder(s, pattern.format()).map_err(|_| invalid())?;
                if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
                    Ok(date)
                } else {
                    Err(invalid())
                }
            }
            _ => NaiveDate::parse_from_str(s, pattern.format()).map_err(|_| invalid()),
        }
    }
}

impl From<String> for RawDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RawDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Decimal separator used by an institution's amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `-1234.56`
    DecimalPoint,
    /// `-1.234,56` or `-1 234,56`
    DecimalComma,
}

/// Parses a monetary amount, dropping locale grouping.
pub fn parse_amount(value: &str, format: NumberFormat) -> ConvertResult<Decimal> {
    let trimmed = value.trim();
    let normalized: String = match format {
        NumberFormat::DecimalPoint => trimmed.chars().filter(|c| !c.is_whitespace()).collect(),
        // a plain "12.50" has no comma and keeps its point
        NumberFormat::DecimalComma if trimmed.contains(',') => trimmed
            .chars()
            .filter(|c| *c != '.' && !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect(),
        NumberFormat::DecimalComma => trimmed.chars().filter(|c| !c.is_whitespace()).collect(),
    };

    Decimal::from_str(normalized.trim_start_matches('+'))
        .map_err(|_| ConvertError::InvalidAmount(value.to_string()))
}

// -----------------------------------------------------------------------------
// Testes
// -----------------------------------------------------------------------------
