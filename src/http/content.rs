//! Content-type detection for request bodies

use crate::types::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};

/// Pick the `Content-Type` for a buffered request body.
///
/// Bodies whose first non-whitespace byte opens a JSON object or array are
/// sent as JSON. Everything else, including an empty body, is sent as a
/// form.
pub fn sniff_content_type(body: &[u8]) -> &'static str {
    match body.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{' | b'[') => CONTENT_TYPE_JSON,
        _ => CONTENT_TYPE_FORM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(br#"{"name":"savings"}"#, CONTENT_TYPE_JSON ; "json object")]
    #[test_case(b"[1,2,3]", CONTENT_TYPE_JSON ; "json array")]
    #[test_case(b"\n\t  {\"a\":1}", CONTENT_TYPE_JSON ; "leading whitespace")]
    #[test_case(b"grant_type=refresh_token&client_id=abc", CONTENT_TYPE_FORM ; "form data")]
    #[test_case(b"", CONTENT_TYPE_FORM ; "empty body")]
    #[test_case(b"   ", CONTENT_TYPE_FORM ; "whitespace only")]
    #[test_case(b"plain text", CONTENT_TYPE_FORM ; "plain text")]
    fn test_sniff_content_type(body: &[u8], expected: &str) {
        assert_eq!(sniff_content_type(body), expected);
    }
}
