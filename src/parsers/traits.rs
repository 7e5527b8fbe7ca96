use crate::{dialect::Dialect, errors::ConvertResult, types::Record};

/// Converts one institution's CSV export into HomeBank records.
pub trait Parser {
    const DIALECT: Dialect;

    fn parse(content: &str) -> ConvertResult<Vec<Record>>;
}
