use csv::{QuoteStyle, ReaderBuilder, Terminator, Trim, WriterBuilder};

/// Line terminator of a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    CrLf,
    Lf,
}

/// Delimiter and quoting rules of one institution's CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    pub double_quote: bool,
    pub terminator: LineTerminator,
    pub minimal_quoting: bool,
}

impl Dialect {
    const fn semicolon() -> Self {
        Self {
            delimiter: b';',
            quote: b'"',
            double_quote: true,
            terminator: LineTerminator::CrLf,
            minimal_quoting: true,
        }
    }

    const fn comma() -> Self {
        Self {
            delimiter: b',',
            ..Self::semicolon()
        }
    }

    pub const AMEX: Dialect = Dialect::semicolon();
    pub const AMAZON_VISA: Dialect = Dialect::semicolon();
    pub const DKB: Dialect = Dialect::semicolon();
    pub const SANTANDER_PL: Dialect = Dialect::semicolon();
    pub const N26: Dialect = Dialect::comma();
    /// Was `;` until October 2022.
    pub const PAYPAL: Dialect = Dialect::comma();
    pub const SPENDEE: Dialect = Dialect {
        terminator: LineTerminator::Lf,
        ..Dialect::comma()
    };
    /// Layout of the file HomeBank imports.
    pub const HOMEBANK: Dialect = Dialect::semicolon();

    fn csv_terminator(&self) -> Terminator {
        match self.terminator {
            LineTerminator::CrLf => Terminator::CRLF,
            LineTerminator::Lf => Terminator::Any(b'\n'),
        }
    }

    /// Reader configured for this dialect. Rows may have uneven lengths.
    ///
    /// Any line ending is accepted whatever the dialect's terminator, which
    /// only applies when writing.
    pub fn reader_builder(&self, has_headers: bool) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(self.double_quote)
            // CRLF in the csv crate accepts \r, \n and \r\n when reading
            .terminator(Terminator::CRLF)
            .has_headers(has_headers)
            .trim(Trim::Headers)
            .flexible(true);
        builder
    }

    pub fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(self.double_quote)
            .terminator(self.csv_terminator())
            .quote_style(if self.minimal_quoting {
                QuoteStyle::Necessary
            } else {
                QuoteStyle::Always
            })
            .has_headers(false);
        builder
    }
}
