use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::new(FailureKind::Decode, err.to_string())
    }
}

/// Decode the pledge page into UTF-8: BOM, then Content-Type charset, then chardetng.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_label) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedHtml, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "malformed byte sequence".into(),
        });
    }
    Ok(DecodedHtml {
        html: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{charset_label, decode_html, DecodeError};

    #[test]
    fn charset_label_is_case_insensitive() {
        assert_eq!(
            charset_label("text/html; Charset=\"ISO-8859-1\"").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(charset_label("text/html"), None);
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = decode_html(b"caf\xc3 \xff", Some("text/html; charset=utf-8"));
        assert!(matches!(err, Err(DecodeError::DecodeFailure { .. })));
    }
}
