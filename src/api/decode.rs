//
//  abuseipdb-client
//  api/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response decoding.
//!
//! Decoding never fails with an error. A body that is not JSON is reported as
//! [`Decoded::Unparseable`] and the client substitutes the empty document, so
//! callers cannot tell an unparseable body from a literal `null`.

use serde_json::Value;
use tracing::{error, trace};

use super::request::Endpoint;
use super::transport::RawResponse;

/// Outcome of parsing a captured body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Document(Value),
    Unparseable,
}

impl Decoded {
    /// The document, or `null` when the body could not be parsed.
    pub fn into_document(self) -> Value {
        match self {
            Self::Document(value) => value,
            Self::Unparseable => Value::Null,
        }
    }
}

/// Parses a JSON endpoint's body.
pub fn decode_json(endpoint: Endpoint, raw: &RawResponse) -> Decoded {
    match serde_json::from_slice::<Value>(raw.body()) {
        Ok(value) => Decoded::Document(value),
        Err(e) => {
            error!("Failed to parse JSON from {}: {}", endpoint.path(), e);
            trace!("Erroneous output: {}", raw.text());
            Decoded::Unparseable
        }
    }
}

/// Renders the plaintext blacklist body.
///
/// A body that parses as JSON (which is how the API reports errors even on this
/// endpoint) comes back pretty-printed; anything else is returned verbatim.
pub fn decode_plaintext(raw: &RawResponse) -> String {
    match serde_json::from_slice::<Value>(raw.body()) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| raw.text().into_owned()),
        Err(_) => raw.text().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_json_document() {
        let raw = RawResponse::from_body(200, r#"{"ip":"1.2.3.4"}"#);
        let decoded = decode_json(Endpoint::Check, &raw);
        assert_eq!(decoded, Decoded::Document(json!({"ip": "1.2.3.4"})));
    }

    #[test]
    fn test_decode_json_garbage_is_unparseable() {
        let raw = RawResponse::from_body(502, "<html>Bad Gateway</html>");
        let decoded = decode_json(Endpoint::Blacklist, &raw);
        assert_eq!(decoded, Decoded::Unparseable);
        assert_eq!(decoded.into_document(), Value::Null);
    }

    #[test]
    fn test_empty_body_is_unparseable() {
        assert_eq!(decode_json(Endpoint::Report, &RawResponse::new()), Decoded::Unparseable);
    }

    #[test]
    fn test_plaintext_passthrough() {
        let raw = RawResponse::from_body(200, "1.2.3.4\n5.6.7.8\n");
        assert_eq!(decode_plaintext(&raw), "1.2.3.4\n5.6.7.8\n");
    }

    #[test]
    fn test_plaintext_json_is_pretty_printed() {
        let raw = RawResponse::from_body(401, r#"{"errors":[{"detail":"nope"}]}"#);
        let text = decode_plaintext(&raw);
        assert!(text.starts_with("{\n"));
        assert!(text.contains("\"detail\": \"nope\""));
    }
}
