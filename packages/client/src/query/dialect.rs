//! Encoding dialects for query-string serialization

use std::borrow::Cow;

/// Space-encoding scheme and escaping rules used when serializing a mapping.
///
/// Both dialects percent-encode every byte outside the RFC 3986 unreserved
/// set (`A-Z a-z 0-9 - _ . ~`); they differ only in how a space is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EncodingDialect {
    /// `application/x-www-form-urlencoded` style: space becomes `+`
    Rfc1738,
    /// Strict percent-encoding: space becomes `%20`
    #[default]
    Rfc3986,
}

impl EncodingDialect {
    /// Percent-encode a single key or value under this dialect
    #[must_use]
    pub fn escape(self, input: &str) -> Cow<'_, str> {
        let encoded = urlencoding::encode(input);
        match self {
            EncodingDialect::Rfc3986 => encoded,
            EncodingDialect::Rfc1738 if encoded.contains("%20") => {
                Cow::Owned(encoded.replace("%20", "+"))
            }
            EncodingDialect::Rfc1738 => encoded,
        }
    }

    /// Dialect name for logging
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EncodingDialect::Rfc1738 => "RFC1738",
            EncodingDialect::Rfc3986 => "RFC3986",
        }
    }
}
