//! Decoding of raw command output into text.
//!
//! Output captured from `adb shell` is usually UTF-8, but devices with a
//! misconfigured locale, or files created under another codepage, can leave
//! stray single-byte characters in an otherwise valid stream. Decoding is
//! all-or-nothing per call: if any byte fails as UTF-8, the whole sequence is
//! reinterpreted as Latin-1 so the line parser always sees one consistently
//! decoded string.

use tracing::debug;

/// A text encoding the decoder can apply to raw output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Preferred multi-byte encoding.
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// The encoding tried first.
    pub const PREFERRED: Self = Self::Utf8;
    /// The encoding used when the preferred one rejects the input.
    pub const FALLBACK: Self = Self::Latin1;
}

/// Decodes `bytes` under `encoding`, returning `None` if any sequence is invalid.
///
/// `Encoding::Latin1` never returns `None`.
#[must_use]
pub fn attempt_decode(bytes: &[u8], encoding: Encoding) -> Option<String> {
    match encoding {
        Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
        Encoding::Latin1 => Some(latin1(bytes)),
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Decodes `bytes` and reports which encoding produced the text.
#[must_use]
pub fn decode_with(bytes: &[u8]) -> (String, Encoding) {
    if let Some(text) = attempt_decode(bytes, Encoding::PREFERRED) {
        return (text, Encoding::PREFERRED);
    }
    debug!(len = bytes.len(), "output is not valid UTF-8, decoding as Latin-1");
    (latin1(bytes), Encoding::FALLBACK)
}

/// Decodes raw command output into text. Never fails.
///
/// Valid UTF-8 is returned as-is. Anything else is decoded byte-for-byte as
/// Latin-1, yielding exactly one `char` per input byte.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    decode_with(bytes).0
}
