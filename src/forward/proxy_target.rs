use std::{
    borrow::Cow,
    fmt::{self, Display},
};

use percent_encoding::percent_decode_str;
use url::Url;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),

    #[error("decoded target is not valid UTF-8")]
    InvalidUtf8,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TargetError {
    #[error("not an absolute URL: {0}")]
    Unparseable(#[from] url::ParseError),

    #[error("URL {0} has no host")]
    MissingHost(String),
}

/// Percent-decodes a path segment exactly once.
///
/// Every `%` must introduce two hex digits and the decoded bytes must be UTF-8.
/// `+` is left untouched.
pub fn decode_target(segment: &str) -> Result<String, DecodeError> {
    let bytes = segment.as_bytes();

    for (index, _) in segment.match_indices('%') {
        let escape = bytes.get(index + 1..index + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(DecodeError::MalformedEscape(index));
        }
    }

    percent_decode_str(segment)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// An absolute URL with a host, ready to be fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyTarget(Url);

impl ProxyTarget {
    pub fn parse(decoded: &str) -> Result<Self, TargetError> {
        let url = Url::parse(decoded)?;

        if !url.has_host() {
            return Err(TargetError::MissingHost(decoded.to_string()));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ProxyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
