//! Finds the real column header in exports that start with account metadata.

use tracing::{debug, warn};

/// Two markers that only co-occur on the true header line of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocator {
    first: &'static str,
    second: &'static str,
}

impl HeaderLocator {
    /// DKB Cash and DKB VISA exports.
    pub const DKB: HeaderLocator = HeaderLocator::new("Betrag", "Wertstellung");
    pub const AMAZON_VISA: HeaderLocator =
        HeaderLocator::new("Kreditkartennummer", "Transaktionsdatum");

    pub const fn new(first: &'static str, second: &'static str) -> Self {
        Self { first, second }
    }

    pub fn is_header(&self, line: &str) -> bool {
        line.contains(self.first) && line.contains(self.second)
    }

    /// Index of the first line after the header, if there is a header.
    pub fn position<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
        lines
            .iter()
            .position(|line| self.is_header(line.as_ref()))
            .map(|idx| idx + 1)
    }

    /// Lines following the header. Empty when no header line is found.
    pub fn remaining<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> &'a [S] {
        match self.position(lines) {
            Some(start) => {
                debug!(line = start, "located header row");
                &lines[start..]
            }
            None => {
                warn!(
                    first = self.first,
                    second = self.second,
                    "header row not found, no rows will be converted"
                );
                &lines[lines.len()..]
            }
        }
    }

    /// Drops everything up to and including the header line.
    ///
    /// Returns the remaining text and how many lines were dropped.
    pub fn trim<'a>(&self, content: &'a str) -> (String, u64) {
        let lines: Vec<&'a str> = content.lines().collect();
        let rest = self.remaining(lines.as_slice());
        let skipped = (lines.len() - rest.len()) as u64;
        (rest.join("\n"), skipped)
    }
}
