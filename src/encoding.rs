//! Text decoding for exports whose encoding is not declared.

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

/// Below this detector confidence the output may contain mangled characters.
pub const MIN_CONFIDENCE: f32 = 0.75;

#[derive(Debug, Clone)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static str,
    pub confidence: f32,
}

/// Guesses the encoding of raw bytes using chardet.
///
/// Unknown charsets fall back to UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, f32) {
    let (charset, confidence, _language) = chardet::detect(bytes);
    let label = chardet::charset2encoding(&charset);
    let encoding = Encoding::for_label(label.as_bytes()).unwrap_or(UTF_8);

    debug!(charset = %charset, encoding = encoding.name(), confidence, "detected file encoding");
    (encoding, confidence)
}

/// Decodes bytes with the detected encoding. A byte order mark wins over
/// the detector and is stripped.
pub fn decode(bytes: &[u8]) -> Decoded {
    let (encoding, confidence) = detect_encoding(bytes);
    if confidence < MIN_CONFIDENCE {
        warn!(
            encoding = encoding.name(),
            confidence, "confidence on the encoding type is low, output may contain errors"
        );
    }

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "input contains malformed sequences");
    }

    Decoded {
        text: text.into_owned(),
        encoding: used.name(),
        confidence,
    }
}
