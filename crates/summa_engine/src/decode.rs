use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Page markup decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("could not decode page bytes as {0}")]
    Malformed(String),
}

/// Decodes raw page bytes to UTF-8: BOM first, then the Content-Type charset,
/// then chardetng detection as the fallback.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_from_content_type) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let part = part.trim();
        let (key, value) = part.split_once('=')?;
        if !key.eq_ignore_ascii_case("charset") {
            return None;
        }
        Some(value.trim_matches([' ', '"', '\''].as_ref()).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed(encoding.name().to_string()));
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding: encoding.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::charset_from_content_type;

    #[test]
    fn charset_parameter_is_found_case_insensitively() {
        assert_eq!(
            charset_from_content_type("text/html; Charset=\"ISO-8859-1\""),
            Some("ISO-8859-1".to_string())
        );
    }

    #[test]
    fn missing_charset_yields_none() {
        assert_eq!(charset_from_content_type("text/html"), None);
    }
}
